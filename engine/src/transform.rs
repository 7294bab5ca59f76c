//! A single IFS function: affine coefficients, one variation, weight and color.

use flame_types::{Affine, FunctionDescriptor, Point, VariationKind};
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::Xoshiro256PlusPlus;

use crate::variation::Variation;

#[derive(Debug, Clone)]
pub struct TransformFunction {
    /// Stored and persisted, but selection in the chaos game ignores it.
    weight: f64,
    color: f64,
    coeffs: Affine,
    variation: Variation,
    seed: Option<i64>,
}

impl TransformFunction {
    #[must_use]
    pub fn new(variation: Variation, coeffs: Affine, weight: f64, color: f64) -> Self {
        let seed = variation.seed();
        Self {
            weight,
            color,
            coeffs,
            variation,
            seed,
        }
    }

    /// Draw a function of `kind` from the shared construction source.
    ///
    /// Draw order: the LogisticMap growth rate (`u * logistic_r`) first, then
    /// a through f, color, weight, and finally the Julia seed.
    pub fn random(
        kind: VariationKind,
        rng: &mut Xoshiro256PlusPlus,
        logistic_r: f64,
    ) -> Self {
        let r = if kind == VariationKind::LogisticMap {
            unit(rng) * logistic_r
        } else {
            0.0
        };
        let coeffs = Affine::from_array([
            unit(rng),
            unit(rng),
            unit(rng),
            unit(rng),
            unit(rng),
            unit(rng),
        ]);
        let color = unit(rng);
        let weight = unit(rng);
        let julia_seed: i64 = if kind == VariationKind::Julia {
            StandardUniform.sample(rng)
        } else {
            0
        };
        Self::new(Variation::new(kind, julia_seed, r), coeffs, weight, color)
    }

    /// Rebuild a function from a persisted record.
    ///
    /// The record format does not preserve variation state, so the result is
    /// always Linear whatever marker the record carries.
    #[must_use]
    pub fn from_descriptor(descriptor: &FunctionDescriptor) -> Self {
        if descriptor.kind != VariationKind::Linear {
            tracing::debug!(
                marker = descriptor.kind.name(),
                "Loading non-Linear function record as Linear"
            );
        }
        Self {
            weight: descriptor.weight,
            color: descriptor.color,
            coeffs: descriptor.coeffs,
            variation: Variation::Linear,
            seed: descriptor.seed,
        }
    }

    #[must_use]
    pub fn to_descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor {
            weight: self.weight,
            color: self.color,
            kind: self.kind(),
            coeffs: self.coeffs,
            seed: self.seed,
        }
    }

    pub fn apply(&mut self, point: &mut Point) {
        self.variation.apply(point, &self.coeffs);
    }

    /// Rotate the linear part by `theta` radians.
    ///
    /// Parabolic only rotates `(a, b)`; its `(d, e)` never change.
    pub fn rotate(&mut self, theta: f64) {
        self.coeffs.rotate_ab(theta);
        if self.kind() != VariationKind::Parabolic {
            self.coeffs.rotate_de(theta);
        }
    }

    #[must_use]
    pub fn kind(&self) -> VariationKind {
        self.variation.kind()
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn color(&self) -> f64 {
        self.color
    }

    #[must_use]
    pub fn coeffs(&self) -> Affine {
        self.coeffs
    }

    #[must_use]
    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    /// LogisticMap growth rate.
    #[must_use]
    pub fn logistic_r(&self) -> Option<f64> {
        match self.variation {
            Variation::LogisticMap { r } => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn formula(&self) -> &'static str {
        self.kind().formula()
    }
}

fn unit(rng: &mut Xoshiro256PlusPlus) -> f64 {
    StandardUniform.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::TransformFunction;
    use crate::variation::Variation;
    use flame_types::{Affine, FunctionDescriptor, Point, VariationKind};
    use rand::SeedableRng;
    use rand::rngs::Xoshiro256PlusPlus;

    const COEFFS: Affine = Affine {
        a: 0.9,
        b: -0.3,
        c: 0.1,
        d: 0.4,
        e: 0.7,
        f: -0.2,
    };

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-12
    }

    #[test]
    fn random_draws_stay_in_unit_interval() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        for kind in VariationKind::ALL {
            let function = TransformFunction::random(kind, &mut rng, 3.7);
            assert_eq!(function.kind(), kind);
            for value in function.coeffs().to_array() {
                assert!((0.0..1.0).contains(&value));
            }
            assert!((0.0..1.0).contains(&function.weight()));
            assert!((0.0..1.0).contains(&function.color()));
        }
    }

    #[test]
    fn random_logistic_rate_is_scaled() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..50 {
            let function = TransformFunction::random(VariationKind::LogisticMap, &mut rng, 3.7);
            let r = function.logistic_r().unwrap();
            assert!((0.0..3.7).contains(&r));
        }
    }

    #[test]
    fn random_is_deterministic_per_seed() {
        let mut left = Xoshiro256PlusPlus::seed_from_u64(77);
        let mut right = Xoshiro256PlusPlus::seed_from_u64(77);
        for kind in VariationKind::ALL {
            let a = TransformFunction::random(kind, &mut left, 3.7);
            let b = TransformFunction::random(kind, &mut right, 3.7);
            assert_eq!(a.to_descriptor(), b.to_descriptor());
        }
    }

    #[test]
    fn only_julia_gets_a_seed() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        for kind in VariationKind::ALL {
            let function = TransformFunction::random(kind, &mut rng, 3.7);
            assert_eq!(function.seed().is_some(), kind == VariationKind::Julia);
        }
    }

    #[test]
    fn rotate_there_and_back_restores_coefficients() {
        for kind in VariationKind::ALL {
            if kind == VariationKind::Parabolic {
                continue;
            }
            let mut function = TransformFunction::new(Variation::new(kind, 1, 2.0), COEFFS, 0.5, 0.5);
            function.rotate(0.83);
            assert!(!close(function.coeffs().a, COEFFS.a), "{kind} did not rotate");
            function.rotate(-0.83);
            let after = function.coeffs();
            for (got, want) in after.to_array().iter().zip(COEFFS.to_array()) {
                assert!(close(*got, want), "{kind}: {got} != {want}");
            }
        }
    }

    #[test]
    fn rotate_keeps_pair_lengths() {
        let mut function = TransformFunction::new(Variation::Linear, COEFFS, 1.0, 0.0);
        function.rotate(2.1);
        let c = function.coeffs();
        assert!(close(c.a.hypot(c.b), COEFFS.a.hypot(COEFFS.b)));
        assert!(close(c.d.hypot(c.e), COEFFS.d.hypot(COEFFS.e)));
        assert_eq!((c.c, c.f), (COEFFS.c, COEFFS.f));
    }

    #[test]
    fn parabolic_rotates_only_a_and_b() {
        let mut function = TransformFunction::new(Variation::Parabolic, COEFFS, 1.0, 0.0);
        for theta in [0.3, 1.7, -2.2, 100.0] {
            function.rotate(theta);
            let c = function.coeffs();
            assert_eq!((c.d, c.e), (COEFFS.d, COEFFS.e));
        }
        let mut function = TransformFunction::new(Variation::Parabolic, COEFFS, 1.0, 0.0);
        function.rotate(0.6);
        function.rotate(-0.6);
        let c = function.coeffs();
        assert!(close(c.a, COEFFS.a) && close(c.b, COEFFS.b));
    }

    #[test]
    fn linear_descriptor_round_trip_is_exact() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);
        let original = TransformFunction::random(VariationKind::Linear, &mut rng, 3.7);
        let restored = TransformFunction::from_descriptor(&original.to_descriptor());
        assert_eq!(restored.kind(), VariationKind::Linear);
        assert_eq!(restored.weight().to_bits(), original.weight().to_bits());
        assert_eq!(restored.color().to_bits(), original.color().to_bits());
        assert_eq!(restored.coeffs(), original.coeffs());
        assert_eq!(restored.seed(), None);
    }

    #[test]
    fn non_linear_descriptor_reloads_as_linear() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let julia = TransformFunction::random(VariationKind::Julia, &mut rng, 3.7);
        let descriptor = julia.to_descriptor();
        assert_eq!(descriptor.kind, VariationKind::Julia);

        let restored = TransformFunction::from_descriptor(&descriptor);
        assert_eq!(restored.kind(), VariationKind::Linear);
        assert_eq!(restored.coeffs(), julia.coeffs());
        assert_eq!(restored.seed(), julia.seed());
    }

    #[test]
    fn apply_dispatches_on_kind() {
        let record = FunctionDescriptor {
            weight: 1.0,
            color: 0.0,
            kind: VariationKind::Identity,
            coeffs: COEFFS,
            seed: None,
        };
        // Reloaded as Linear, so the affine map applies rather than Identity.
        let mut function = TransformFunction::from_descriptor(&record);
        let mut p = Point::new(1.0, 1.0, 0.0);
        function.apply(&mut p);
        let x = 0.9 * 1.0 + -0.3 * 1.0 + 0.1;
        assert_eq!(p.x, x);
        assert_eq!(p.y, 0.4 * x + 0.7 * 1.0 + -0.2);
    }

    #[test]
    fn formula_follows_kind() {
        let function = TransformFunction::new(Variation::Heart, COEFFS, 1.0, 0.0);
        assert_eq!(function.formula(), "r*sin(θ*r), -r*cos(θ*r)");
    }
}
