//! Exponential decay (momentum scrolling / flick) animations
//!
//! The decay constant is the fraction of velocity kept per millisecond, the
//! same convention as platform scroll-view deceleration rates. With
//! `k = -ln(c) · 1000`:
//!
//! ```text
//! v(t) = v0 · e^(-k·t)
//! x(t) = x0 + v0 · (1 - e^(-k·t)) / k
//! ```
//!
//! The position integral is exact, so the travelled distance does not depend
//! on the tick rate and converges to `v0 / k`.

use crate::animation::{is_valid_dt, AnimationStatus, ValueAnimation};
use crate::error::{MotionError, Result};
use crate::vector::Animatable;

/// Decay constants are expressed per this many steps per second
pub const DECAY_TIME_SCALE: f64 = 1000.0;

/// Velocity below which a decay animation comes to rest
pub const DEFAULT_DECAY_RESTING_VELOCITY: f64 = 0.05;

/// A velocity-driven animation that slows down exponentially.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayAnimation<T: Animatable> {
    value: T,
    velocity: T,
    decay_constant: f64,
    status: AnimationStatus,
    resting_velocity: f64,
}

impl<T: Animatable> DecayAnimation<T> {
    /// Standard deceleration
    pub const NORMAL: f64 = 0.998;
    /// Quick deceleration
    pub const FAST: f64 = 0.99;

    /// Create a running decay from `value` with initial `velocity` (units per second).
    pub fn new(value: T, velocity: T, decay_constant: f64) -> Result<Self> {
        validate_decay_constant(decay_constant)?;
        Ok(Self {
            value,
            velocity,
            decay_constant,
            status: AnimationStatus::Running,
            resting_velocity: DEFAULT_DECAY_RESTING_VELOCITY,
        })
    }

    /// Builder: velocity below which the animation stops
    pub fn with_resting_velocity(mut self, resting_velocity: f64) -> Self {
        self.resting_velocity = resting_velocity.abs();
        self
    }

    pub fn decay_constant(&self) -> f64 {
        self.decay_constant
    }

    pub fn set_decay_constant(&mut self, decay_constant: f64) -> Result<()> {
        validate_decay_constant(decay_constant)?;
        self.decay_constant = decay_constant;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: T) {
        self.velocity = velocity;
    }

    /// Exponential rate `k` in 1/seconds
    pub fn rate(&self) -> f64 {
        -self.decay_constant.ln() * DECAY_TIME_SCALE
    }

    /// Value and velocity `t` seconds from now, without advancing.
    pub fn project(&self, t: f64) -> (T, T) {
        let rate = self.rate();
        let retained = (-rate * t).exp();
        let travelled = self.velocity.scale((1.0 - retained) / rate);
        (self.value + travelled, self.velocity.scale(retained))
    }
}

impl<T: Animatable> ValueAnimation<T> for DecayAnimation<T> {
    const SUPPORTS_VELOCITY: bool = true;

    fn tick(&mut self, dt: f64) {
        if self.status != AnimationStatus::Running {
            return;
        }
        if !is_valid_dt(dt) {
            tracing::trace!("Decay tick ignored: dt = {}", dt);
            return;
        }

        let (value, velocity) = self.project(dt);
        self.value = value;
        self.velocity = velocity;

        if self.velocity.is_within(self.resting_velocity) {
            self.velocity = T::ZERO;
            self.status = AnimationStatus::Stopped;
            tracing::debug!("Decay came to rest at {:?}", self.value);
        }
    }

    fn value(&self) -> T {
        self.value
    }

    fn velocity(&self) -> Option<T> {
        Some(self.velocity)
    }

    /// Asymptotic resting position given the current velocity
    fn to_value(&self) -> T {
        self.value + self.velocity.divide(self.rate())
    }

    fn status(&self) -> AnimationStatus {
        self.status
    }

    fn update_value(&mut self, value: T) {
        self.value = value;
    }

    fn stop(&mut self) {
        self.status = AnimationStatus::Stopped;
        self.velocity = T::ZERO;
        tracing::debug!("Decay stopped at {:?}", self.value);
    }

    fn start(&mut self) {
        self.status = AnimationStatus::Running;
    }
}

fn validate_decay_constant(decay_constant: f64) -> Result<()> {
    if decay_constant > 0.0 && decay_constant < 1.0 {
        Ok(())
    } else {
        Err(MotionError::InvalidDecayConstant(decay_constant))
    }
}
