//! Scale factor clamp policy

/// Lowest minimum a policy may request
pub const MIN_SCALE_FLOOR: f64 = 0.1;

/// Highest maximum a policy may request
pub const MAX_SCALE_CEILING: f64 = 5.0;

/// Min/max bounds applied independently to every derived scale factor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingLimits {
    min_scale: f64,
    max_scale: f64,
}

impl ScalingLimits {
    /// `[0.5, 2.0]`
    pub const DEFAULT: ScalingLimits = ScalingLimits {
        min_scale: 0.5,
        max_scale: 2.0,
    };

    /// `[0.8, 1.25]`, for large-screen designs that should barely move
    pub const STRICT: ScalingLimits = ScalingLimits {
        min_scale: 0.8,
        max_scale: 1.25,
    };

    /// `[0.3, 3.0]`
    pub const RELAXED: ScalingLimits = ScalingLimits {
        min_scale: 0.3,
        max_scale: 3.0,
    };

    /// Create a policy. The minimum is raised to at least 0.1 and the maximum
    /// lowered to at most 5.0.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale: min_scale.max(MIN_SCALE_FLOOR),
            max_scale: max_scale.min(MAX_SCALE_CEILING),
        }
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// `min(max_scale, max(min_scale, value))`
    ///
    /// NaN maps to `min_scale`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        self.max_scale.min(self.min_scale.max(value))
    }

    /// Whether `value` lies inside the bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_scale && value <= self.max_scale
    }
}

impl Default for ScalingLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_bounds_are_capped() {
        let limits = ScalingLimits::new(0.01, 9.0);
        assert_eq!(limits.min_scale(), 0.1);
        assert_eq!(limits.max_scale(), 5.0);

        let limits = ScalingLimits::new(0.8, 1.5);
        assert_eq!(limits.min_scale(), 0.8);
        assert_eq!(limits.max_scale(), 1.5);
    }

    #[test]
    fn test_clamp() {
        let limits = ScalingLimits::default();
        assert_eq!(limits.clamp(0.2), 0.5);
        assert_eq!(limits.clamp(1.1), 1.1);
        assert_eq!(limits.clamp(7.0), 2.0);
        assert_eq!(limits.clamp(f64::NAN), 0.5);
        assert!(limits.contains(limits.clamp(f64::INFINITY)));
    }

    #[test]
    fn test_named_policies() {
        assert_eq!(ScalingLimits::default(), ScalingLimits::new(0.5, 2.0));
        assert_eq!(ScalingLimits::STRICT, ScalingLimits::new(0.8, 1.25));
        assert_eq!(ScalingLimits::RELAXED, ScalingLimits::new(0.3, 3.0));
    }
}
