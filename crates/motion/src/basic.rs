//! Duration-based tween driven by an easing function

use crate::animation::{is_valid_dt, AnimationStatus, ValueAnimation};
use crate::easing::EasingFunction;
use crate::error::{MotionError, Result};
use crate::pair::InterpolatingPair;
use crate::vector::Animatable;

/// Eases from one value to another over a fixed duration.
///
/// Position only: velocity is not tracked.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicAnimation<T: Animatable> {
    pair: InterpolatingPair<T>,
    value: T,
    duration: f64,
    elapsed: f64,
    easing: EasingFunction,
    status: AnimationStatus,
}

impl<T: Animatable> BasicAnimation<T> {
    /// Create a running tween lasting `duration` seconds.
    pub fn new(from: T, to: T, duration: f64, easing: EasingFunction) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MotionError::InvalidDuration(duration));
        }
        Ok(Self {
            pair: InterpolatingPair::new(from, to),
            value: from,
            duration,
            elapsed: 0.0,
            easing,
            status: AnimationStatus::Running,
        })
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Elapsed time over duration, in [0, 1]
    pub fn fraction(&self) -> f64 {
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn pair(&self) -> InterpolatingPair<T> {
        self.pair
    }

    /// Restart the tween from the current value toward `to_value`.
    pub fn set_to_value(&mut self, to_value: T) {
        self.pair = InterpolatingPair::new(self.value, to_value);
        self.elapsed = 0.0;
        tracing::debug!("Tween retargeted: {:?} -> {:?}", self.value, to_value);
    }
}

impl<T: Animatable> ValueAnimation<T> for BasicAnimation<T> {
    const SUPPORTS_VELOCITY: bool = false;

    fn tick(&mut self, dt: f64) {
        if self.status != AnimationStatus::Running {
            return;
        }
        if !is_valid_dt(dt) {
            tracing::trace!("Tween tick ignored: dt = {}", dt);
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.value = self.pair.end;
            self.status = AnimationStatus::Stopped;
            tracing::debug!("Tween finished at {:?}", self.value);
        } else {
            self.value = self
                .easing
                .solve_interpolated_value(&self.pair, self.fraction());
        }
    }

    fn value(&self) -> T {
        self.value
    }

    fn velocity(&self) -> Option<T> {
        None
    }

    fn to_value(&self) -> T {
        self.pair.end
    }

    fn status(&self) -> AnimationStatus {
        self.status
    }

    fn update_value(&mut self, value: T) {
        self.value = value;
    }

    fn stop(&mut self) {
        self.status = AnimationStatus::Stopped;
        tracing::debug!("Tween stopped at {:?}", self.value);
    }

    fn start(&mut self) {
        self.status = AnimationStatus::Running;
    }
}
