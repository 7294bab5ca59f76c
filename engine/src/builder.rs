//! Building function sets, either at random or from a `<flame>` document.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::{fs, io};

use flame_types::VariationKind;
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::Xoshiro256PlusPlus;
use thiserror::Error;

use crate::descriptor::{self, DescriptorError};
use crate::function_set::{FunctionSet, FunctionSetError};
use crate::transform::TransformFunction;

pub const DEFAULT_MAX_FUNCTION_COUNT: NonZeroUsize = NonZeroUsize::new(15).unwrap();
pub const DEFAULT_LOGISTIC_R: f64 = 3.7;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read flame document {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    FunctionSet(#[from] FunctionSetError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSetConfig {
    /// Use this kind for every random function instead of drawing one.
    pub fixed_kind: Option<VariationKind>,
    /// Upper bound of the random set size; the size is drawn from `1..=max`.
    pub max_function_count: NonZeroUsize,
    /// Load the set from this document instead of drawing it.
    pub load_from: Option<PathBuf>,
    /// Scale of the LogisticMap growth rate, which is drawn from `[0, logistic_r)`.
    pub logistic_r: f64,
    /// Seed for construction draws. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for FunctionSetConfig {
    fn default() -> Self {
        Self {
            fixed_kind: None,
            max_function_count: DEFAULT_MAX_FUNCTION_COUNT,
            load_from: None,
            logistic_r: DEFAULT_LOGISTIC_R,
            seed: None,
        }
    }
}

/// Produces function sets. Owns the random source for every construction draw.
#[derive(Debug, Clone)]
pub struct FunctionSetBuilder {
    config: FunctionSetConfig,
    rng: Xoshiro256PlusPlus,
}

impl FunctionSetBuilder {
    #[must_use]
    pub fn new(config: FunctionSetConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FunctionSetConfig {
        &self.config
    }

    /// Load from `load_from` when set, otherwise draw a random set.
    pub fn build(&mut self) -> Result<FunctionSet, BuildError> {
        match self.config.load_from.clone() {
            Some(path) => Self::load(&path),
            None => Ok(self.randomized()),
        }
    }

    /// Draw a set of `1..=max_function_count` random functions.
    pub fn randomized(&mut self) -> FunctionSet {
        let max = self.config.max_function_count.get();
        let count = Uniform::new_inclusive(1, max)
            .map_or(1, |range| range.sample(&mut self.rng));
        let functions: Vec<TransformFunction> = (0..count)
            .map(|_| {
                let kind = self.next_kind();
                TransformFunction::random(kind, &mut self.rng, self.config.logistic_r)
            })
            .collect();
        tracing::debug!(
            functions = functions.len(),
            fixed_kind = ?self.config.fixed_kind,
            "Built random function set"
        );
        FunctionSet::new(functions).expect("random sets hold at least one function")
    }

    fn next_kind(&mut self) -> VariationKind {
        if let Some(kind) = self.config.fixed_kind {
            return kind;
        }
        let index = Uniform::new(0, VariationKind::COUNT)
            .map_or(0, |range| range.sample(&mut self.rng));
        VariationKind::from_index(index)
            .unwrap_or_else(|| unreachable!("kind index {index} out of range"))
    }

    /// Read a `<flame>` document from disk. Every function is Linear.
    pub fn load(path: &Path) -> Result<FunctionSet, BuildError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read flame document at {:?}: {}", path, source);
            BuildError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let set = Self::from_document(&content)?;
        tracing::debug!(functions = set.len(), path = %path.display(), "Loaded function set");
        Ok(set)
    }

    /// Parse a `<flame>` document. Every function is Linear.
    pub fn from_document(xml: &str) -> Result<FunctionSet, BuildError> {
        let records = descriptor::parse_document(xml)?;
        Ok(FunctionSet::from_descriptors(&records)?)
    }
}
