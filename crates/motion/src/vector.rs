//! Animatable vector values
//!
//! Every animation in this crate is generic over [`Animatable`]: a fixed-width
//! tuple of `f64` lanes with component-wise arithmetic and comparison. Scalars
//! (`f32`, `f64`) are single-lane values; [`Vector<N>`] covers 2D/3D/4D points
//! and colors with a single const-generic implementation.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// Per-lane boolean result of a component-wise comparison.
pub trait LaneMask: Copy + Debug {
    /// True when every lane is set
    fn all(self) -> bool;
    /// True when at least one lane is set
    fn any(self) -> bool;
    /// Lane-wise logical and
    fn and(self, other: Self) -> Self;
}

impl LaneMask for bool {
    #[inline]
    fn all(self) -> bool {
        self
    }

    #[inline]
    fn any(self) -> bool {
        self
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        self && other
    }
}

impl<const N: usize> LaneMask for [bool; N] {
    #[inline]
    fn all(self) -> bool {
        self.iter().all(|lane| *lane)
    }

    #[inline]
    fn any(self) -> bool {
        self.iter().any(|lane| *lane)
    }

    #[inline]
    fn and(self, other: Self) -> Self {
        std::array::from_fn(|i| self[i] && other[i])
    }
}

/// Reduce a lane mask to a single boolean (true when every lane is set).
#[inline]
pub fn all<M: LaneMask>(mask: M) -> bool {
    mask.all()
}

/// A value type that can be animated.
///
/// Implementors only provide the lane primitives (`map`, `zip_map`,
/// comparisons); the arithmetic used by the animation kinds is derived from
/// them.
pub trait Animatable:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// Mask produced by component-wise comparisons
    type Mask: LaneMask;

    /// Number of lanes
    const LANES: usize;

    /// The value with every lane set to zero
    const ZERO: Self;

    /// A value with every lane set to `value`
    fn splat(value: f64) -> Self;

    /// Apply `f` to every lane
    fn map(self, f: impl FnMut(f64) -> f64) -> Self;

    /// Combine two values lane by lane
    fn zip_map(self, other: Self, f: impl FnMut(f64, f64) -> f64) -> Self;

    /// Component-wise `self <= other`
    fn lanes_le(self, other: Self) -> Self::Mask;

    /// Component-wise `self >= other`
    fn lanes_ge(self, other: Self) -> Self::Mask;

    /// True when `predicate` holds for every lane
    fn all_lanes(self, predicate: impl FnMut(f64) -> bool) -> bool;

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self.map(|lane| lane * factor)
    }

    #[inline]
    fn divide(self, divisor: f64) -> Self {
        self.map(|lane| lane / divisor)
    }

    #[inline]
    fn mul_lanes(self, other: Self) -> Self {
        self.zip_map(other, |a, b| a * b)
    }

    #[inline]
    fn div_lanes(self, other: Self) -> Self {
        self.zip_map(other, |a, b| a / b)
    }

    #[inline]
    fn min_lanes(self, other: Self) -> Self {
        self.zip_map(other, f64::min)
    }

    #[inline]
    fn max_lanes(self, other: Self) -> Self {
        self.zip_map(other, f64::max)
    }

    #[inline]
    fn abs(self) -> Self {
        self.map(f64::abs)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.all_lanes(f64::is_finite)
    }

    /// `self + (other - self) * fraction`, unclamped
    #[inline]
    fn lerp(self, other: Self, fraction: f64) -> Self {
        self + (other - self).scale(fraction)
    }

    /// True when every lane's magnitude is at most `epsilon`
    #[inline]
    fn is_within(self, epsilon: f64) -> bool {
        all(self.abs().lanes_le(Self::splat(epsilon)))
    }
}

impl Animatable for f64 {
    type Mask = bool;
    const LANES: usize = 1;
    const ZERO: Self = 0.0;

    #[inline]
    fn splat(value: f64) -> Self {
        value
    }

    #[inline]
    fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        f(self)
    }

    #[inline]
    fn zip_map(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        f(self, other)
    }

    #[inline]
    fn lanes_le(self, other: Self) -> bool {
        self <= other
    }

    #[inline]
    fn lanes_ge(self, other: Self) -> bool {
        self >= other
    }

    #[inline]
    fn all_lanes(self, mut predicate: impl FnMut(f64) -> bool) -> bool {
        predicate(self)
    }
}

// f32 lanes are widened to f64 for the math and narrowed on the way out.
impl Animatable for f32 {
    type Mask = bool;
    const LANES: usize = 1;
    const ZERO: Self = 0.0;

    #[inline]
    fn splat(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        f(self as f64) as f32
    }

    #[inline]
    fn zip_map(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        f(self as f64, other as f64) as f32
    }

    #[inline]
    fn lanes_le(self, other: Self) -> bool {
        self <= other
    }

    #[inline]
    fn lanes_ge(self, other: Self) -> bool {
        self >= other
    }

    #[inline]
    fn all_lanes(self, mut predicate: impl FnMut(f64) -> bool) -> bool {
        predicate(self as f64)
    }
}

/// A fixed-width vector of `f64` lanes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize>(pub [f64; N]);

/// 2D point or size
pub type Vec2 = Vector<2>;
/// 3D point
pub type Vec3 = Vector<3>;
/// 4D vector
pub type Vec4 = Vector<4>;
/// RGBA color, one lane per channel
pub type Rgba = Vector<4>;

impl<const N: usize> Vector<N> {
    pub const fn from_array(lanes: [f64; N]) -> Self {
        Self(lanes)
    }

    pub const fn to_array(self) -> [f64; N] {
        self.0
    }

    pub fn lanes(&self) -> &[f64] {
        &self.0
    }
}

impl Vector<2> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    pub const fn y(&self) -> f64 {
        self.0[1]
    }
}

impl Vector<3> {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    pub const fn z(&self) -> f64 {
        self.0[2]
    }
}

impl Vector<4> {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    /// Build a color from red, green, blue and alpha channels
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self([r, g, b, a])
    }

    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    pub const fn z(&self) -> f64 {
        self.0[2]
    }

    pub const fn w(&self) -> f64 {
        self.0[3]
    }

    pub const fn r(&self) -> f64 {
        self.0[0]
    }

    pub const fn g(&self) -> f64 {
        self.0[1]
    }

    pub const fn b(&self) -> f64 {
        self.0[2]
    }

    pub const fn a(&self) -> f64 {
        self.0[3]
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self([0.0; N])
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(lanes: [f64; N]) -> Self {
        Self(lanes)
    }
}

impl<const N: usize> From<Vector<N>> for [f64; N] {
    fn from(vector: Vector<N>) -> Self {
        vector.0
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, lane: usize) -> &f64 {
        &self.0[lane]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, lane: usize) -> &mut f64 {
        &mut self.0[lane]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|lane| -lane)
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        self.divide(rhs)
    }
}

impl<const N: usize> Mul for Vector<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_lanes(rhs)
    }
}

impl<const N: usize> Div for Vector<N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.div_lanes(rhs)
    }
}

impl<const N: usize> Animatable for Vector<N> {
    type Mask = [bool; N];
    const LANES: usize = N;
    const ZERO: Self = Self([0.0; N]);

    #[inline]
    fn splat(value: f64) -> Self {
        Self([value; N])
    }

    #[inline]
    fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self(self.0.map(&mut f))
    }

    #[inline]
    fn zip_map(self, other: Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    #[inline]
    fn lanes_le(self, other: Self) -> [bool; N] {
        std::array::from_fn(|i| self.0[i] <= other.0[i])
    }

    #[inline]
    fn lanes_ge(self, other: Self) -> [bool; N] {
        std::array::from_fn(|i| self.0[i] >= other.0[i])
    }

    #[inline]
    fn all_lanes(self, predicate: impl FnMut(f64) -> bool) -> bool {
        self.0.into_iter().all(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);

        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(a - b, Vec2::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, -2.0));
        assert_eq!(a * b, Vec2::new(3.0, -8.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_min_max_abs() {
        let a = Vec3::new(1.0, -5.0, 3.0);
        let b = Vec3::new(2.0, -6.0, 3.0);

        assert_eq!(a.min_lanes(b), Vec3::new(1.0, -6.0, 3.0));
        assert_eq!(a.max_lanes(b), Vec3::new(2.0, -5.0, 3.0));
        assert_eq!(a.abs(), Vec3::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn test_lane_masks() {
        let a = Vec2::new(1.0, 5.0);
        let b = Vec2::new(2.0, 4.0);

        assert_eq!(a.lanes_le(b), [true, false]);
        assert_eq!(a.lanes_ge(b), [false, true]);
        assert!(!all(a.lanes_le(b)));
        assert!(a.lanes_le(b).any());
        assert_eq!(a.lanes_le(b).and([true, true]), [true, false]);
        assert!(all(a.lanes_le(a)));
    }

    #[test]
    fn test_scalar_lanes() {
        assert_eq!(<f64 as Animatable>::ZERO, 0.0);
        assert!(all(1.0_f64.lanes_le(2.0)));
        assert_eq!(3.0_f32.scale(0.5), 1.5);
        assert!(0.0005_f64.is_within(1e-3));
        assert!(!(-0.5_f64).is_within(1e-3));
    }

    #[test]
    fn test_color_channels() {
        let c = Rgba::rgba(1.0, 0.5, 0.25, 1.0);
        assert_eq!(c.r(), 1.0);
        assert_eq!(c.g(), 0.5);
        assert_eq!(c.b(), 0.25);
        assert_eq!(c.a(), 1.0);

        let mid = c.lerp(Rgba::ZERO, 0.5);
        assert_eq!(mid, Rgba::rgba(0.5, 0.25, 0.125, 0.5));
    }

    #[test]
    fn test_finite_check() {
        assert!(Vec4::splat(1.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 0.0).is_finite());
    }
}
