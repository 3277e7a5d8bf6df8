use crate::Float;
use fastrand::Rng;

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in the range `[lower, upper)`, or `lower` if the range is empty.
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        if upper <= lower {
            return lower;
        }
        // rounding can land exactly on `upper` for very wide ranges
        (lower + (upper - lower) * self.float()).min(upper)
    }
    /// Get a random value in the range `[0, 1)`
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_in_unit_interval() {
        let mut rng = Rng::with_seed(0);
        for _ in 0..1000 {
            let r = rng.float();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_range_stays_inside() {
        let mut rng = Rng::with_seed(0);
        for _ in 0..1000 {
            let r = rng.range(-2.0, 3.0);
            assert!((-2.0..=3.0).contains(&r));
        }
        assert_eq!(rng.range(1.5, 1.5), 1.5);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = Rng::with_seed(42);
        let mut b = Rng::with_seed(42);
        let xs: Vec<Float> = (0..10).map(|_| a.range(0.0, 10.0)).collect();
        let ys: Vec<Float> = (0..10).map(|_| b.range(0.0, 10.0)).collect();
        assert_eq!(xs, ys);
    }
}
