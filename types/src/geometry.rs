//! Points and affine coefficient sets.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

/// The running point of the chaos game.
///
/// Only the Lorenz attractor reads or writes `z`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance from the origin in the xy-plane.
    #[must_use]
    pub fn distance_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance from the origin in the xy-plane.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_squared().sqrt()
    }

    /// `atan(y / x)`, or 0 when `x` is exactly zero.
    ///
    /// This is the single-argument arctangent, so the result lies in (-π/2, π/2).
    #[must_use]
    pub fn theta(&self) -> f64 {
        if self.x == 0.0 {
            return 0.0;
        }
        (self.y / self.x).atan()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// The six coefficients of `x' = ax + by + c, y' = dx + ey + f`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffineParseError {
    #[error("expected 6 coefficients, found {0}")]
    WrongCount(usize),
    #[error("invalid coefficient {value:?}: {source}")]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },
}

impl Affine {
    #[must_use]
    pub const fn from_array([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Rotate the `(a, b)` pair by `theta` radians.
    pub fn rotate_ab(&mut self, theta: f64) {
        (self.a, self.b) = rotate_pair(self.a, self.b, theta);
    }

    /// Rotate the `(d, e)` pair by `theta` radians.
    pub fn rotate_de(&mut self, theta: f64) {
        (self.d, self.e) = rotate_pair(self.d, self.e, theta);
    }
}

fn rotate_pair(u: f64, v: f64, theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (u * cos - v * sin, u * sin + v * cos)
}

/// Formats as the space-separated `coeffs` attribute value.
impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

impl FromStr for Affine {
    type Err = AffineParseError;

    /// Parses six whitespace-separated numbers in `a b c d e f` order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(AffineParseError::WrongCount(parts.len()));
        }
        let mut coeffs = [0.0; 6];
        for (slot, raw) in coeffs.iter_mut().zip(parts) {
            *slot = raw
                .parse()
                .map_err(|source| AffineParseError::InvalidNumber {
                    value: raw.to_string(),
                    source,
                })?;
        }
        Ok(Self::from_array(coeffs))
    }
}
