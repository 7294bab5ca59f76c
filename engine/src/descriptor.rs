//! Reading and writing `<flame>` documents.
//!
//! ```xml
//! <flame>
//!   <xform weight="0.5" color="3" Linear="1" coeffs="0.1 0.2 0.3 0.4 0.5 0.6"/>
//! </flame>
//! ```
//!
//! Only `<xform>` elements directly under the root are records. The kind
//! marker is an attribute named after the variation with the value `"1"`.
//! Numbers are written in shortest round-trip form.

use std::str::{self, FromStr};

use flame_types::{Affine, AffineParseError, FunctionDescriptor, VariationKind};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

const ROOT: &str = "flame";
const RECORD: &str = "xform";

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed flame document: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document has no <flame> root element")]
    MissingRoot,
    #[error("expected <flame> root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("document ends before the <flame> root is closed")]
    UnclosedRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("record {index}: missing `{attribute}` attribute")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },
    #[error("record {index}: `{attribute}` is not a number: {value:?}")]
    InvalidNumber {
        index: usize,
        attribute: &'static str,
        value: String,
    },
    #[error("record {index}: invalid coeffs: {source}")]
    InvalidCoeffs {
        index: usize,
        source: AffineParseError,
    },
}

/// Parse every function record of a `<flame>` document, in document order.
pub fn parse_document(xml: &str) -> Result<Vec<FunctionDescriptor>, DescriptorError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut records = Vec::new();

    loop {
        let (element, opens) = match reader.read_event()? {
            Event::Start(element) => (element, true),
            Event::Empty(element) => (element, false),
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Eof if depth > 0 => return Err(DescriptorError::UnclosedRoot),
            Event::Eof => break,
            _ => continue,
        };

        if depth == 0 {
            if saw_root {
                return Err(DescriptorError::MultipleRoots);
            }
            if element.name().as_ref() != ROOT.as_bytes() {
                let found = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                return Err(DescriptorError::UnexpectedRoot(found));
            }
            saw_root = true;
        } else if depth == 1 && element.name().as_ref() == RECORD.as_bytes() {
            records.push(parse_record(&element, records.len())?);
        }

        if opens {
            depth += 1;
        }
    }

    if !saw_root {
        return Err(DescriptorError::MissingRoot);
    }
    Ok(records)
}

fn parse_record(
    element: &BytesStart<'_>,
    index: usize,
) -> Result<FunctionDescriptor, DescriptorError> {
    let mut weight = None;
    let mut color = None;
    let mut coeffs = None;
    let mut seed = None;
    let mut kind = VariationKind::Linear;

    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"weight" => weight = Some(parse_number(&value, index, "weight")?),
            b"color" => color = Some(parse_number(&value, index, "color")?),
            b"seed" => seed = Some(parse_number(&value, index, "seed")?),
            b"coeffs" => {
                let parsed: Affine = value
                    .parse()
                    .map_err(|source| DescriptorError::InvalidCoeffs { index, source })?;
                coeffs = Some(parsed);
            }
            key => {
                if let Some(marker) = str::from_utf8(key).ok().and_then(VariationKind::parse)
                    && value.trim() == "1"
                {
                    kind = marker;
                }
            }
        }
    }

    Ok(FunctionDescriptor {
        weight: require(weight, index, "weight")?,
        color: require(color, index, "color")?,
        kind,
        coeffs: require(coeffs, index, "coeffs")?,
        seed,
    })
}

fn parse_number<T: FromStr>(
    raw: &str,
    index: usize,
    attribute: &'static str,
) -> Result<T, DescriptorError> {
    raw.trim()
        .parse()
        .map_err(|_| DescriptorError::InvalidNumber {
            index,
            attribute,
            value: raw.to_string(),
        })
}

fn require<T>(value: Option<T>, index: usize, attribute: &'static str) -> Result<T, DescriptorError> {
    value.ok_or(DescriptorError::MissingAttribute { index, attribute })
}

fn record_element(record: &FunctionDescriptor) -> BytesStart<'static> {
    let mut element = BytesStart::new(RECORD);
    element.push_attribute(("weight", record.weight.to_string().as_str()));
    element.push_attribute(("color", record.color.to_string().as_str()));
    element.push_attribute((record.kind.name(), "1"));
    element.push_attribute(("coeffs", record.coeffs.to_string().as_str()));
    if let Some(seed) = record.seed {
        element.push_attribute(("seed", seed.to_string().as_str()));
    }
    element
}

fn into_string(writer: Writer<Vec<u8>>) -> String {
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Format one record as a self-closing `<xform>` element.
#[must_use]
pub fn write_record(record: &FunctionDescriptor) -> String {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Empty(record_element(record)))
        .expect("writing to memory cannot fail");
    into_string(writer)
}

/// Wrap records in a `<flame>` root, one per line.
#[must_use]
pub fn write_document(records: &[FunctionDescriptor]) -> String {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let events = [Event::Start(BytesStart::new(ROOT))]
        .into_iter()
        .chain(records.iter().map(|record| Event::Empty(record_element(record))))
        .chain([Event::End(BytesEnd::new(ROOT))]);
    for event in events {
        writer
            .write_event(event)
            .expect("writing to memory cannot fail");
    }
    into_string(writer)
}

#[cfg(test)]
mod tests {
    use super::{DescriptorError, parse_document, write_document, write_record};
    use flame_types::{Affine, FunctionDescriptor, VariationKind};

    fn record(kind: VariationKind, seed: Option<i64>) -> FunctionDescriptor {
        FunctionDescriptor {
            weight: 0.5,
            color: 3.0,
            kind,
            coeffs: Affine::from_array([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            seed,
        }
    }

    #[test]
    fn writes_the_documented_layout() {
        let doc = write_document(&[record(VariationKind::Linear, None)]);
        insta::assert_snapshot!(doc, @r#"
        <flame>
          <xform weight="0.5" color="3" Linear="1" coeffs="0.1 0.2 0.3 0.4 0.5 0.6"/>
        </flame>
        "#);
    }

    #[test]
    fn writes_seed_when_present() {
        let line = write_record(&record(VariationKind::Julia, Some(-42)));
        assert_eq!(
            line,
            r#"<xform weight="0.5" color="3" Julia="1" coeffs="0.1 0.2 0.3 0.4 0.5 0.6" seed="-42"/>"#
        );
    }

    #[test]
    fn empty_set_writes_bare_root() {
        assert_eq!(write_document(&[]), "<flame>\n</flame>");
    }

    #[test]
    fn parses_records_in_order() {
        let xml = r#"<?xml version="1.0"?>
<flame name="test">
  <xform weight="0.25" color="1" Spiral="1" coeffs="1 2 3 4 5 6" seed="9"/>
  <xform weight="0.75" color="0.5" coeffs="6 5 4 3 2 1"></xform>
  <palette><xform weight="oops"/></palette>
</flame>"#;
        let records = parse_document(xml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, VariationKind::Spiral);
        assert_eq!(records[0].seed, Some(9));
        assert_eq!(records[0].coeffs.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(records[1].kind, VariationKind::Linear);
        assert_eq!(records[1].weight, 0.75);
        assert_eq!(records[1].seed, None);
    }

    #[test]
    fn written_document_parses_back() {
        let originals = vec![
            record(VariationKind::Linear, None),
            FunctionDescriptor {
                weight: 0.123_456_789_012_345_67,
                color: 0.987_654_321,
                kind: VariationKind::Linear,
                coeffs: Affine::from_array([-1e-7, 2.5, -0.0, 1.0 / 3.0, 7e12, 0.1 + 0.2]),
                seed: Some(i64::MIN),
            },
        ];
        let parsed = parse_document(&write_document(&originals)).unwrap();
        assert_eq!(parsed, originals);
    }

    #[test]
    fn missing_attribute_is_reported_with_index() {
        let xml = r#"<flame>
  <xform weight="1" color="0" coeffs="1 2 3 4 5 6"/>
  <xform weight="1" coeffs="1 2 3 4 5 6"/>
</flame>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::MissingAttribute {
                index: 1,
                attribute: "color"
            }
        ));
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let xml = r#"<flame><xform weight="heavy" color="0" coeffs="1 2 3 4 5 6"/></flame>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidNumber {
                index: 0,
                attribute: "weight",
                ..
            }
        ));
    }

    #[test]
    fn short_coeffs_are_rejected() {
        let xml = r#"<flame><xform weight="1" color="0" coeffs="1 2 3"/></flame>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidCoeffs { index: 0, .. }));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse_document("<fire><xform/></fire>").unwrap_err();
        assert!(matches!(err, DescriptorError::UnexpectedRoot(ref name) if name == "fire"));
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(
            parse_document("").unwrap_err(),
            DescriptorError::MissingRoot
        ));
    }

    #[test]
    fn mismatched_tags_are_xml_errors() {
        let xml = r#"<flame><xform weight="1" color="0" coeffs="1 2 3 4 5 6"></flame>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(matches!(err, DescriptorError::Xml(_)));
    }

    #[test]
    fn truncated_document_is_rejected() {
        let xml = r#"<flame>
  <xform weight="1" color="0" coeffs="1 2 3 4 5 6"/>"#;
        assert!(matches!(
            parse_document(xml).unwrap_err(),
            DescriptorError::UnclosedRoot
        ));
    }

    #[test]
    fn second_root_is_rejected() {
        let one = r#"<flame><xform weight="1" color="0" coeffs="1 2 3 4 5 6"/></flame>"#;
        let err = parse_document(&format!("{one}{one}")).unwrap_err();
        assert!(matches!(err, DescriptorError::MultipleRoots));
    }
}
