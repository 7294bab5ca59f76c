use crate::{Affine, VariationKind};

/// One persisted function record, as stored in an `<xform>` element.
///
/// `kind` is the marker written alongside the record. Readers fill it in from
/// the document, but reconstruction always yields a Linear function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    pub weight: f64,
    pub color: f64,
    pub kind: VariationKind,
    pub coeffs: Affine,
    /// Seed of the function's private random source, if it has one.
    pub seed: Option<i64>,
}
