//! The chaos game loop.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use flame_types::Point;
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::Xoshiro256PlusPlus;

use crate::function_set::FunctionSet;

/// Iterations run before the accumulator sees any points.
pub const WARMUP_ITERATIONS: usize = 20;

pub const DEFAULT_START_X: f64 = 0.5;

/// Receives one point per main iteration.
///
/// Implementations are typically density maps. A failing `map` aborts the run
/// and the error is returned from [`ChaosGame::run`].
pub trait Accumulator {
    type Error;

    fn map(&mut self, x: f64, y: f64, function_index: usize) -> Result<(), Self::Error>;
}

/// One recorded accumulator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    pub x: f64,
    pub y: f64,
    pub function_index: usize,
}

impl Accumulator for Vec<MappedPoint> {
    type Error = Infallible;

    fn map(&mut self, x: f64, y: f64, function_index: usize) -> Result<(), Self::Error> {
        self.push(MappedPoint {
            x,
            y,
            function_index,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Main iterations per run, each reported to the accumulator.
    pub iterations: u64,
    /// Initial x of the running point; y and z start at zero.
    pub start_x: f64,
    /// Seed for function selection. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub const fn new(iterations: u64) -> Self {
        Self {
            iterations,
            start_x: DEFAULT_START_X,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_start_x(mut self, start_x: f64) -> Self {
        self.start_x = start_x;
        self
    }
}

/// Runs the chaos game over a function set.
///
/// Each engine owns its point, function set and selection source, so separate
/// engines can run on separate threads.
#[derive(Debug, Clone)]
pub struct ChaosGame {
    functions: FunctionSet,
    point: Point,
    iterations: u64,
    start_x: f64,
    rng: Xoshiro256PlusPlus,
}

impl ChaosGame {
    #[must_use]
    pub fn new(functions: FunctionSet, config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            functions,
            point: Point::new(config.start_x, 0.0, 0.0),
            iterations: config.iterations,
            start_x: config.start_x,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Reseed the selection source.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    }

    /// Reset the point, warm up, then feed `iterations` points to `accumulator`.
    ///
    /// Functions are picked uniformly; their weights play no part. The point
    /// carries over from one iteration to the next.
    pub fn run<A: Accumulator>(&mut self, accumulator: &mut A) -> Result<(), A::Error> {
        let picker = Uniform::new(0, self.functions.len())
            .expect("function set is never empty");
        self.point = Point::new(self.start_x, 0.0, 0.0);
        tracing::debug!(
            functions = self.functions.len(),
            iterations = self.iterations,
            start_x = self.start_x,
            "Starting chaos game"
        );

        for _ in 0..WARMUP_ITERATIONS {
            let index = picker.sample(&mut self.rng);
            self.functions.apply(index, &mut self.point);
        }

        for _ in 0..self.iterations {
            let index = picker.sample(&mut self.rng);
            self.functions.apply(index, &mut self.point);
            accumulator.map(self.point.x, self.point.y, index)?;
        }

        tracing::debug!(point = %self.point, "Chaos game finished");
        Ok(())
    }

    /// Rotate every function by `theta` radians.
    pub fn rotate(&mut self, theta: f64) {
        self.functions.rotate(theta);
    }

    #[must_use]
    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    #[must_use]
    pub fn into_functions(self) -> FunctionSet {
        self.functions
    }

    /// Current position of the running point.
    #[must_use]
    pub fn point(&self) -> Point {
        self.point
    }

    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    #[must_use]
    pub fn formula_strings(&self) -> BTreeMap<usize, &'static str> {
        self.functions.formula_strings()
    }

    #[must_use]
    pub fn to_document(&self) -> String {
        self.functions.to_document()
    }
}

impl fmt::Display for ChaosGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.functions, f)
    }
}
