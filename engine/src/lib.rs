//! Chaos-game engine for Flame.
//!
//! Builds sets of randomly parameterized IFS functions (or loads them from a
//! `<flame>` document), then iterates a single point through them and hands
//! every visited point to an [`Accumulator`].

// Re-export from types for the public API
pub use flame_types::{Affine, AffineParseError, FunctionDescriptor, Point, VariationKind};

mod builder;
mod chaos;
mod config;
pub mod descriptor;
mod function_set;
mod transform;
mod variation;

pub use builder::{
    BuildError, DEFAULT_LOGISTIC_R, DEFAULT_MAX_FUNCTION_COUNT, FunctionSetBuilder,
    FunctionSetConfig,
};
pub use chaos::{
    Accumulator, ChaosGame, DEFAULT_START_X, GameConfig, MappedPoint, WARMUP_ITERATIONS,
};
pub use config::{
    ConfigError, DEFAULT_ITERATIONS, FlameConfig, FunctionsSection, GameSection, KindSelector,
};
pub use descriptor::DescriptorError;
pub use function_set::{FunctionSet, FunctionSetError};
pub use transform::TransformFunction;
pub use variation::{JuliaSource, Variation};
