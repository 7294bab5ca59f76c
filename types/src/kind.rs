//! The closed set of variation kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which formula a transform function applies.
///
/// The discriminant order is the kind index used by the fixed-kind override and
/// by uniform kind selection, so it must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariationKind {
    Identity,
    Linear,
    Parabolic,
    Sinusoidal,
    Spherical,
    Swirl,
    Horseshoe,
    Polar,
    Hankerchief,
    Heart,
    Disc,
    Spiral,
    Hyperbolic,
    Diamond,
    Ex,
    Julia,
    LorenzAttractor,
    LogisticMap,
}

impl VariationKind {
    pub const COUNT: usize = 18;

    pub const ALL: [VariationKind; Self::COUNT] = [
        VariationKind::Identity,
        VariationKind::Linear,
        VariationKind::Parabolic,
        VariationKind::Sinusoidal,
        VariationKind::Spherical,
        VariationKind::Swirl,
        VariationKind::Horseshoe,
        VariationKind::Polar,
        VariationKind::Hankerchief,
        VariationKind::Heart,
        VariationKind::Disc,
        VariationKind::Spiral,
        VariationKind::Hyperbolic,
        VariationKind::Diamond,
        VariationKind::Ex,
        VariationKind::Julia,
        VariationKind::LorenzAttractor,
        VariationKind::LogisticMap,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by index. Returns `None` outside `0..COUNT`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used as the kind-marker attribute key in flame documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            VariationKind::Identity => "Identity",
            VariationKind::Linear => "Linear",
            VariationKind::Parabolic => "Parabolic",
            VariationKind::Sinusoidal => "Sinusoidal",
            VariationKind::Spherical => "Spherical",
            VariationKind::Swirl => "Swirl",
            VariationKind::Horseshoe => "Horseshoe",
            VariationKind::Polar => "Polar",
            VariationKind::Hankerchief => "Hankerchief",
            VariationKind::Heart => "Heart",
            VariationKind::Disc => "Disc",
            VariationKind::Spiral => "Spiral",
            VariationKind::Hyperbolic => "Hyperbolic",
            VariationKind::Diamond => "Diamond",
            VariationKind::Ex => "Ex",
            VariationKind::Julia => "Julia",
            VariationKind::LorenzAttractor => "LorenzAttractor",
            VariationKind::LogisticMap => "LogisticMap",
        }
    }

    /// Parse a marker name. Matching is exact, as in the document format.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Human-readable formula, in terms of x, y, r (distance) and θ (angle).
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            VariationKind::Identity => "x, y",
            VariationKind::Linear => "ax+by+c, dx+ey+f",
            VariationKind::Parabolic => "y^2, x^2",
            VariationKind::Sinusoidal => "sin(x), sin(y)",
            VariationKind::Spherical => "(x)/r^2, (y)/r^2",
            VariationKind::Swirl => "r*cos(θ+r), r*sin(θ+r)",
            VariationKind::Horseshoe => "r*cos(2*θ), r*sin(2*θ)",
            VariationKind::Polar => "θ/π, r-1",
            VariationKind::Hankerchief => "r*sin(θ+r), r*cos(θ-r)",
            VariationKind::Heart => "r*sin(θ*r), -r*cos(θ*r)",
            VariationKind::Disc => "θ*sin(πr)/π, θ*cos(πr)/π",
            VariationKind::Spiral => "(cos(θ) + sin(r))/r, (sin(θ) - cos(r))/r",
            VariationKind::Hyperbolic => "sin(θ)/r, cos(θ)*r",
            VariationKind::Diamond => "sin(θ)/cos(r), cos(θ)/sin(r)",
            VariationKind::Ex => "r*sin(θ+r)^3, r*cos(θ-r)^3",
            VariationKind::Julia => "sqr*cos(θ/2+Ω), sqr*sin(θ/2+Ω); Ω=0|π",
            VariationKind::LorenzAttractor => "d[x,y,z]/dt=[10(y-x),28x-y-xz,xy-2.6z]",
            VariationKind::LogisticMap => "y, rx(1 - x)",
        }
    }
}

impl fmt::Display for VariationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
