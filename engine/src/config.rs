//! TOML configuration for the chaos game.
//!
//! ```toml
//! seed = 42
//!
//! [game]
//! iterations = 1000000
//! start_x = 0.5
//!
//! [functions]
//! max_count = 15
//! fixed_kind = "Swirl"   # or a kind index, e.g. 5
//! load_from = "saved.flame"
//! logistic_r = 3.7
//! ```

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use flame_types::VariationKind;
use serde::Deserialize;
use thiserror::Error;

use crate::builder::{DEFAULT_LOGISTIC_R, DEFAULT_MAX_FUNCTION_COUNT, FunctionSetConfig};
use crate::chaos::{DEFAULT_START_X, GameConfig};

pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Mixed into the shared seed for function selection, so selection does not
/// replay the construction stream.
const SELECTION_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown variation kind index {0} (expected 0..{max})", max = VariationKind::COUNT)]
    UnknownKind(usize),
    #[error("functions.max_count must be at least 1")]
    InvalidCount,
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::UnknownKind(_) | ConfigError::InvalidCount => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FlameConfig {
    /// Shared seed. Construction uses it as is; selection uses a derived stream.
    pub seed: Option<u64>,
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub functions: FunctionsSection,
}

#[derive(Debug, Deserialize)]
pub struct GameSection {
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    #[serde(default = "default_start_x")]
    pub start_x: f64,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            start_x: DEFAULT_START_X,
        }
    }
}

/// A fixed kind, given either by index or by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KindSelector {
    Index(usize),
    Name(VariationKind),
}

impl KindSelector {
    pub fn resolve(&self) -> Result<VariationKind, ConfigError> {
        match self {
            KindSelector::Index(index) => {
                VariationKind::from_index(*index).ok_or(ConfigError::UnknownKind(*index))
            }
            KindSelector::Name(kind) => Ok(*kind),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FunctionsSection {
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    pub fixed_kind: Option<KindSelector>,
    pub load_from: Option<PathBuf>,
    #[serde(default = "default_logistic_r")]
    pub logistic_r: f64,
}

impl Default for FunctionsSection {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_FUNCTION_COUNT.get(),
            fixed_kind: None,
            load_from: None,
            logistic_r: DEFAULT_LOGISTIC_R,
        }
    }
}

const fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

const fn default_start_x() -> f64 {
    DEFAULT_START_X
}

const fn default_max_count() -> usize {
    DEFAULT_MAX_FUNCTION_COUNT.get()
}

const fn default_logistic_r() -> f64 {
    DEFAULT_LOGISTIC_R
}

impl FlameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            iterations: self.game.iterations,
            start_x: self.game.start_x,
            seed: self.seed.map(|seed| seed ^ SELECTION_STREAM),
        }
    }

    /// Validate the `[functions]` section.
    ///
    /// A relative `load_from` is resolved by the caller; it is passed through
    /// unchanged.
    pub fn function_set_config(&self) -> Result<FunctionSetConfig, ConfigError> {
        let functions = &self.functions;
        let max_function_count =
            NonZeroUsize::new(functions.max_count).ok_or(ConfigError::InvalidCount)?;
        let fixed_kind = functions
            .fixed_kind
            .as_ref()
            .map(KindSelector::resolve)
            .transpose()?;
        Ok(FunctionSetConfig {
            fixed_kind,
            max_function_count,
            load_from: functions.load_from.clone(),
            logistic_r: functions.logistic_r,
            seed: self.seed,
        })
    }
}
