//! Ordered function sets and their document form.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::slice;

use flame_types::{FunctionDescriptor, Point};
use thiserror::Error;

use crate::descriptor;
use crate::transform::TransformFunction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FunctionSetError {
    #[error("function set must contain at least one function")]
    Empty,
}

/// Ordered, non-empty collection of transform functions.
///
/// A function's position is its stable index: the chaos game reports it to the
/// accumulator and serialized documents keep the same order.
#[derive(Debug, Clone)]
pub struct FunctionSet(Vec<TransformFunction>);

// Never empty by construction, so `is_empty` would be meaningless.
#[allow(clippy::len_without_is_empty)]
impl FunctionSet {
    pub fn new(functions: Vec<TransformFunction>) -> Result<Self, FunctionSetError> {
        if functions.is_empty() {
            return Err(FunctionSetError::Empty);
        }
        Ok(Self(functions))
    }

    /// Rebuild a set from persisted records. Every function comes back Linear.
    pub fn from_descriptors(records: &[FunctionDescriptor]) -> Result<Self, FunctionSetError> {
        Self::new(
            records
                .iter()
                .map(TransformFunction::from_descriptor)
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, TransformFunction> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TransformFunction] {
        &self.0
    }

    pub(crate) fn apply(&mut self, index: usize, point: &mut Point) {
        self.0[index].apply(point);
    }

    /// Rotate every function by `theta` radians.
    pub fn rotate(&mut self, theta: f64) {
        for function in &mut self.0 {
            function.rotate(theta);
        }
    }

    #[must_use]
    pub fn descriptors(&self) -> Vec<FunctionDescriptor> {
        self.0.iter().map(TransformFunction::to_descriptor).collect()
    }

    /// Serialize as a `<flame>` document.
    #[must_use]
    pub fn to_document(&self) -> String {
        descriptor::write_document(&self.descriptors())
    }

    /// Formula of each function, keyed by its index.
    #[must_use]
    pub fn formula_strings(&self) -> BTreeMap<usize, &'static str> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, function)| (i, function.formula()))
            .collect()
    }
}

impl Index<usize> for FunctionSet {
    type Output = TransformFunction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a FunctionSet {
    type Item = &'a TransformFunction;
    type IntoIter = slice::Iter<'a, TransformFunction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_document())
    }
}
