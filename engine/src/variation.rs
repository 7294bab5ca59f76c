//! The variation formulas.
//!
//! Every variation rewrites the point in place. Several formulas assign `x`
//! first and then read it again while computing `y`; that ordering is part of
//! their definition and the tests pin it down.

use std::f64::consts::PI;

use flame_types::{Affine, Point, VariationKind};
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::Xoshiro256PlusPlus;

/// Squared distance substituted by Spherical when the point sits on the origin.
const SPHERICAL_ORIGIN_GUARD: f64 = 0.01;

/// Integration step of the Lorenz attractor.
const LORENZ_DT: f64 = 0.01;
const LORENZ_SIGMA: f64 = 10.0;
const LORENZ_RHO: f64 = 28.0;
const LORENZ_BETA: f64 = 2.6;

/// Private random source of a Julia variation.
///
/// Each Julia function owns one, seeded independently, so functions never
/// share generator state with each other or with the engine.
#[derive(Debug, Clone)]
pub struct JuliaSource {
    seed: i64,
    rng: Xoshiro256PlusPlus,
}

impl JuliaSource {
    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed as u64),
        }
    }

    #[must_use]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Ω is 0 or π with equal probability.
    fn omega(&mut self) -> f64 {
        let u: f64 = StandardUniform.sample(&mut self.rng);
        if u <= 0.5 { 0.0 } else { PI }
    }
}

/// A variation together with the state it needs beyond the affine coefficients.
#[derive(Debug, Clone)]
pub enum Variation {
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
    Julia(JuliaSource),
    LorenzAttractor,
    LogisticMap { r: f64 },
}

impl Variation {
    /// Build the variation for `kind`.
    ///
    /// `julia_seed` is only read for Julia and `logistic_r` only for LogisticMap.
    #[must_use]
    pub fn new(kind: VariationKind, julia_seed: i64, logistic_r: f64) -> Self {
        match kind {
            VariationKind::Identity => Variation::Identity,
            VariationKind::Linear => Variation::Linear,
            VariationKind::Parabolic => Variation::Parabolic,
            VariationKind::Sinusoidal => Variation::Sinusoidal,
            VariationKind::Spherical => Variation::Spherical,
            VariationKind::Swirl => Variation::Swirl,
            VariationKind::Horseshoe => Variation::Horseshoe,
            VariationKind::Polar => Variation::Polar,
            VariationKind::Hankerchief => Variation::Hankerchief,
            VariationKind::Heart => Variation::Heart,
            VariationKind::Disc => Variation::Disc,
            VariationKind::Spiral => Variation::Spiral,
            VariationKind::Hyperbolic => Variation::Hyperbolic,
            VariationKind::Diamond => Variation::Diamond,
            VariationKind::Ex => Variation::Ex,
            VariationKind::Julia => Variation::Julia(JuliaSource::new(julia_seed)),
            VariationKind::LorenzAttractor => Variation::LorenzAttractor,
            VariationKind::LogisticMap => Variation::LogisticMap { r: logistic_r },
        }
    }

    #[must_use]
    pub fn kind(&self) -> VariationKind {
        match self {
            Variation::Identity => VariationKind::Identity,
            Variation::Linear => VariationKind::Linear,
            Variation::Parabolic => VariationKind::Parabolic,
            Variation::Sinusoidal => VariationKind::Sinusoidal,
            Variation::Spherical => VariationKind::Spherical,
            Variation::Swirl => VariationKind::Swirl,
            Variation::Horseshoe => VariationKind::Horseshoe,
            Variation::Polar => VariationKind::Polar,
            Variation::Hankerchief => VariationKind::Hankerchief,
            Variation::Heart => VariationKind::Heart,
            Variation::Disc => VariationKind::Disc,
            Variation::Spiral => VariationKind::Spiral,
            Variation::Hyperbolic => VariationKind::Hyperbolic,
            Variation::Diamond => VariationKind::Diamond,
            Variation::Ex => VariationKind::Ex,
            Variation::Julia(_) => VariationKind::Julia,
            Variation::LorenzAttractor => VariationKind::LorenzAttractor,
            Variation::LogisticMap { .. } => VariationKind::LogisticMap,
        }
    }

    /// Seed of the private random source, for variations that carry one.
    #[must_use]
    pub fn seed(&self) -> Option<i64> {
        match self {
            Variation::Julia(source) => Some(source.seed()),
            _ => None,
        }
    }

    /// Rewrite `p` in place. Only Linear and Parabolic read the coefficients.
    pub fn apply(&mut self, p: &mut Point, coeffs: &Affine) {
        match self {
            Variation::Identity => {
                p.y = p.x;
            }
            Variation::Linear => {
                p.x = coeffs.a * p.x + coeffs.b * p.y + coeffs.c;
                p.y = coeffs.d * p.x + coeffs.e * p.y + coeffs.f;
            }
            Variation::Parabolic => {
                p.x = coeffs.a * (p.y * p.y);
                p.y = coeffs.b * (p.x * p.x);
            }
            Variation::Sinusoidal => {
                p.x = p.x.sin();
                p.y = p.y.sin();
            }
            Variation::Spherical => {
                let mut d2 = p.distance_squared();
                if d2 == 0.0 {
                    d2 = SPHERICAL_ORIGIN_GUARD;
                }
                p.x /= d2;
                p.y /= d2;
            }
            Variation::Swirl => {
                let (r, t) = polar(p);
                p.x = r * (t + r).cos();
                p.y = r * (t + r).sin();
            }
            Variation::Horseshoe => {
                let (r, t) = polar(p);
                p.x = r * (2.0 * t).cos();
                p.y = r * (2.0 * t).sin();
            }
            Variation::Polar => {
                // The radius is measured after x has been replaced.
                p.x = p.theta() / PI;
                p.y = p.distance() - 1.0;
            }
            Variation::Hankerchief => {
                let (r, t) = polar(p);
                p.x = r * (t + r).sin();
                p.y = r * (t - r).cos();
            }
            Variation::Heart => {
                let (r, t) = polar(p);
                p.x = r * (t * r).sin();
                p.y = -r * (t * r).cos();
            }
            Variation::Disc => {
                let (r, t) = polar(p);
                p.x = t * (PI * r).sin() / PI;
                p.y = t * (PI * r).cos() / PI;
            }
            Variation::Spiral => {
                let (r, t) = polar(p);
                p.x = (t.cos() + r.sin()) / r;
                p.y = (t.sin() - r.cos()) / r;
            }
            Variation::Hyperbolic => {
                let (r, t) = polar(p);
                p.x = t.sin() / r;
                p.y = t.cos() * r;
            }
            Variation::Diamond => {
                let (r, t) = polar(p);
                p.x = t.sin() / r.cos();
                p.y = t.cos() / r.sin();
            }
            Variation::Ex => {
                let (r, t) = polar(p);
                p.x = r * (t + r).sin().powi(3);
                p.y = r * (t - r).cos().powi(3);
            }
            Variation::Julia(source) => {
                let (r, t) = polar(p);
                let sqr = r.sqrt();
                let omega = source.omega();
                p.x = sqr * (t / 2.0 + omega).cos();
                p.y = sqr * (t / 2.0 + omega).sin();
            }
            Variation::LorenzAttractor => {
                let dx = LORENZ_DT * (LORENZ_SIGMA * (p.y - p.x));
                let dy = LORENZ_DT * (LORENZ_RHO * p.x - p.y - p.x * p.z);
                let dz = LORENZ_DT * (-LORENZ_BETA * p.z + p.x * p.y);
                p.x += dx;
                p.y += dy;
                p.z += dz;
            }
            Variation::LogisticMap { r } => {
                let next = *r * p.x - *r * (p.x * p.x);
                p.x = next;
                p.y = next;
            }
        }
    }
}

fn polar(p: &Point) -> (f64, f64) {
    (p.distance(), p.theta())
}
