//! Curve sampling for previews and graphs
//!
//! Sampling works on a copy of the animation, so a live instance can be
//! graphed at any moment without stopping or resetting it.

use crate::animation::Animation;
use crate::easing::EasingFunction;
use crate::pair::InterpolatingPair;
use crate::vector::Animatable;

/// Slack for `duration / dt` landing a hair above an integer
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Upper bound on the number of points [`sample`] returns
pub const MAX_SAMPLES: usize = 1 << 16;

/// Which quantity to sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleKind {
    #[default]
    Position,
    /// Falls back to `Position` for kinds without velocity
    Velocity,
}

/// A sampled point of an animation curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<T> {
    /// Seconds since sampling began
    pub time: f64,
    /// Position or velocity at `time`, depending on the sample kind
    pub value: T,
}

/// Sample an animation every `dt` seconds over `[0, duration)`.
///
/// The caller's animation is cloned and never mutated. Returns an empty list
/// when `dt` or `duration` is not strictly positive and finite. At most
/// [`MAX_SAMPLES`] points are produced; longer ranges are truncated.
pub fn sample<T: Animatable>(
    animation: &Animation<T>,
    dt: f64,
    duration: f64,
    kind: SampleKind,
) -> Vec<Sample<T>> {
    if !(dt.is_finite() && dt > 0.0 && duration.is_finite() && duration > 0.0) {
        return Vec::new();
    }

    let kind = if kind == SampleKind::Velocity && !animation.supports_velocity() {
        SampleKind::Position
    } else {
        kind
    };

    let steps = (duration / dt - STEP_COUNT_EPSILON).ceil();
    let count = steps.min(MAX_SAMPLES as f64) as usize;
    let mut preview = animation.clone();
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let value = match kind {
            SampleKind::Position => preview.value(),
            SampleKind::Velocity => preview.velocity().unwrap_or(T::ZERO),
        };
        samples.push(Sample {
            time: i as f64 * dt,
            value,
        });
        preview.tick(dt);
    }
    samples
}

/// Sample an easing curve at `count` evenly spaced fractions, both ends included.
pub fn sample_easing<T: Animatable>(
    easing: &EasingFunction,
    pair: &InterpolatingPair<T>,
    count: usize,
) -> Vec<(f64, T)> {
    match count {
        0 => Vec::new(),
        1 => vec![(0.0, pair.start)],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let fraction = i as f64 / last;
                    (fraction, easing.solve_interpolated_value(pair, fraction))
                })
                .collect()
        }
    }
}
