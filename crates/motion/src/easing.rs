//! Easing functions for animations

use crate::pair::InterpolatingPair;
use crate::vector::Animatable;

/// Maximum Newton-Raphson iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
/// Bisection steps; 2^-30 is well below the solver tolerance
const BISECTION_ITERATIONS: usize = 30;
/// Acceptable error in x when solving for the bezier parameter
const SOLVER_TOLERANCE: f64 = 1e-6;
/// Below this slope Newton-Raphson is abandoned
const MIN_SLOPE: f64 = 1e-6;

/// Control points of a cubic bezier running from (0, 0) to (1, 1).
///
/// `x1` and `x2` should stay within [0, 1]; outside that range `x(t)` may not
/// be monotonic and the solved curve loses precision.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for a time fraction in [0, 1] (matches CSS `cubic-bezier()`).
    ///
    /// Uses Newton-Raphson with binary-search fallback for robustness.
    /// `x` is clamped to [0, 1]; NaN is treated as 0.
    pub fn solve(&self, x: f64) -> f64 {
        // Endpoints are always exact
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let t = self.solve_t_for_x(x);
        bezier_sample(t, self.y1, self.y2)
    }

    /// Find the curve parameter `t` in [0, 1] where `x(t) == x`.
    fn solve_t_for_x(&self, x: f64) -> f64 {
        // Solve using Newton-Raphson, falling back to binary search if the
        // slope is too flat or the guess leaves the unit interval.
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier_sample(t, self.x1, self.x2) - x;
            if err.abs() < SOLVER_TOLERANCE {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        // Binary search fallback (always terminates within [0, 1])
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let val = bezier_sample(t, self.x1, self.x2);
            if (val - x).abs() < SOLVER_TOLERANCE {
                break;
            }
            if val < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EasingFunction {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(Bezier),
}

impl EasingFunction {
    /// Control points of the `EaseIn` preset
    pub const EASE_IN: Bezier = Bezier::new(0.42, 0.0, 1.0, 1.0);
    /// Control points of the `EaseOut` preset
    pub const EASE_OUT: Bezier = Bezier::new(0.0, 0.0, 0.58, 1.0);
    /// Control points of the `EaseInOut` preset
    pub const EASE_IN_OUT: Bezier = Bezier::new(0.42, 0.0, 0.58, 1.0);

    /// Every preset, followed by an explicit bezier equivalent of ease-in-out
    pub const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::EaseIn,
        EasingFunction::EaseOut,
        EasingFunction::EaseInOut,
        EasingFunction::CubicBezier(Bezier::new(0.42, 0.0, 0.58, 1.0)),
    ];

    /// Custom curve from four control-point coefficients
    pub const fn cubic(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        EasingFunction::CubicBezier(Bezier::new(x1, y1, x2, y2))
    }

    /// The control points backing this curve, `None` for `Linear`
    pub fn bezier(&self) -> Option<Bezier> {
        match self {
            EasingFunction::Linear => None,
            EasingFunction::EaseIn => Some(Self::EASE_IN),
            EasingFunction::EaseOut => Some(Self::EASE_OUT),
            EasingFunction::EaseInOut => Some(Self::EASE_IN_OUT),
            EasingFunction::CubicBezier(bezier) => Some(*bezier),
        }
    }

    /// Apply the easing function to a progress value.
    ///
    /// `fraction` is clamped to [0, 1]; NaN is treated as 0.
    pub fn solve(&self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        match self.bezier() {
            None => fraction,
            Some(bezier) => bezier.solve(fraction),
        }
    }

    /// Interpolate `pair` by the eased progress at `fraction`.
    pub fn solve_interpolated_value<T: Animatable>(
        &self,
        pair: &InterpolatingPair<T>,
        fraction: f64,
    ) -> T {
        let progress = self.solve(fraction);
        // Bounds are returned verbatim so the ends are exact
        if progress == 0.0 {
            pair.start
        } else if progress == 1.0 {
            pair.end
        } else {
            pair.interpolate(progress)
        }
    }
}

impl From<Bezier> for EasingFunction {
    fn from(bezier: Bezier) -> Self {
        EasingFunction::CubicBezier(bezier)
    }
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
