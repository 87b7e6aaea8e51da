//! Interpolation bounds

use crate::vector::{all, Animatable, LaneMask};

/// Two values of the same type to interpolate between.
///
/// Unlike `std::ops::RangeInclusive`, the bounds are not expected to be
/// ordered: `start` may be greater than `end` in any lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolatingPair<T> {
    /// The starting bound of the interpolation
    pub start: T,
    /// The end bound of the interpolation
    pub end: T,
}

impl<T> InterpolatingPair<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Swap the bounds
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Convert both bounds, e.g. into their vector representation
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> InterpolatingPair<U> {
        InterpolatingPair {
            start: f(self.start),
            end: f(self.end),
        }
    }
}

impl<T: Animatable> InterpolatingPair<T> {
    /// The pair with both bounds at zero
    pub const fn zero() -> Self {
        Self {
            start: T::ZERO,
            end: T::ZERO,
        }
    }

    /// Check whether `element` lies between the bounds in every lane.
    ///
    /// Both bounds are inclusive.
    pub fn contains(&self, element: T) -> bool {
        let lower = self.start.min_lanes(self.end);
        let upper = self.start.max_lanes(self.end);
        all(lower.lanes_le(element).and(element.lanes_le(upper)))
    }

    /// Linear blend between the bounds; `fraction` is not clamped.
    pub fn interpolate(&self, fraction: f64) -> T {
        self.start.lerp(self.end, fraction)
    }

    /// Distance between the bounds, `end - start`
    pub fn delta(&self) -> T {
        self.end - self.start
    }
}

impl<T> From<(T, T)> for InterpolatingPair<T> {
    fn from((start, end): (T, T)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Vec2, Vec4};

    #[test]
    fn test_contains_own_bounds() {
        let pair = InterpolatingPair::new(Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0));
        assert!(pair.contains(pair.start));
        assert!(pair.contains(pair.end));

        let scalar = InterpolatingPair::new(10.0_f64, -10.0);
        assert!(scalar.contains(10.0));
        assert!(scalar.contains(-10.0));
    }

    #[test]
    fn test_contains_is_per_lane() {
        let pair = InterpolatingPair::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(pair.contains(Vec2::new(0.5, 0.5)));
        // Inside on x, outside on y
        assert!(!pair.contains(Vec2::new(0.5, 1.5)));
        assert!(!pair.contains(Vec2::new(-0.1, 0.5)));
    }

    #[test]
    fn test_unordered_bounds() {
        let pair = InterpolatingPair::new(5.0_f64, 1.0);
        assert!(pair.contains(3.0));
        assert!(!pair.contains(0.0));
        assert_eq!(pair.reversed(), InterpolatingPair::new(1.0, 5.0));
    }

    #[test]
    fn test_zero_pair() {
        let pair = InterpolatingPair::<Vec4>::zero();
        assert_eq!(pair.start, Vec4::ZERO);
        assert_eq!(pair.end, Vec4::ZERO);
        assert!(pair.contains(Vec4::ZERO));
    }

    #[test]
    fn test_interpolate_and_map() {
        let pair = InterpolatingPair::new(2.0_f64, 4.0);
        assert_eq!(pair.interpolate(0.5), 3.0);
        assert_eq!(pair.delta(), 2.0);

        let widened = InterpolatingPair::new(1.0_f32, 2.0).map(f64::from);
        assert_eq!(widened, InterpolatingPair::new(1.0_f64, 2.0));
    }
}
