#[derive(Debug, Clone, Copy, PartialEq)]

pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Midpoint of the interval.
    pub fn center(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    /// The unit interval [0, 1], used for display clamping and color checks.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Every non-negative ray parameter.
    pub const NON_NEGATIVE: Interval = Interval {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
        assert_eq!(negative.center(), 0.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
        assert!(!interval.contains(f64::NAN));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::UNIT;

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.25), 0.25);
        assert_eq!(interval.clamp(15.0), 1.0);
    }

    #[test]
    fn test_non_negative() {
        assert!(Interval::NON_NEGATIVE.contains(0.0));
        assert!(Interval::NON_NEGATIVE.contains(1e300));
        assert!(!Interval::NON_NEGATIVE.contains(-1e-300));
        assert_eq!(Interval::UNIVERSE.size(), f64::INFINITY);
    }
}
