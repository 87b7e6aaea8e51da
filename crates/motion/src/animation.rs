//! The steppable animation contract
//!
//! Every animation kind advances only when the driver calls
//! [`ValueAnimation::tick`]; nothing here reads a clock. [`Animation`] is the
//! closed set of kinds for drivers that need to store them side by side.

use crate::basic::BasicAnimation;
use crate::decay::DecayAnimation;
use crate::spring::SpringAnimation;
use crate::vector::Animatable;

/// Whether an animation is still advancing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    Running,
    #[default]
    Stopped,
}

/// Common interface of all animation kinds.
pub trait ValueAnimation<T: Animatable> {
    /// Whether this kind tracks velocity
    const SUPPORTS_VELOCITY: bool;

    /// Advance by `dt` seconds.
    ///
    /// No-op while stopped, or when `dt` is zero, negative or not finite.
    fn tick(&mut self, dt: f64);

    /// Current value
    fn value(&self) -> T;

    /// Current velocity in units per second, `None` for positional kinds
    fn velocity(&self) -> Option<T>;

    /// Value the animation is heading to
    fn to_value(&self) -> T;

    fn status(&self) -> AnimationStatus;

    /// Overwrite the current value. Status and velocity are left untouched.
    fn update_value(&mut self, value: T);

    /// Stop immediately, zeroing velocity
    fn stop(&mut self);

    /// Resume ticking from the current state
    fn start(&mut self);

    fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }
}

/// Returns true when a tick of `dt` seconds should advance state
#[inline]
pub(crate) fn is_valid_dt(dt: f64) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Any animation kind
#[derive(Clone, Debug, PartialEq)]
pub enum Animation<T: Animatable> {
    Spring(SpringAnimation<T>),
    Decay(DecayAnimation<T>),
    Basic(BasicAnimation<T>),
}

impl<T: Animatable> Animation<T> {
    /// Whether the wrapped kind tracks velocity
    pub fn supports_velocity(&self) -> bool {
        match self {
            Animation::Spring(_) => <SpringAnimation<T> as ValueAnimation<T>>::SUPPORTS_VELOCITY,
            Animation::Decay(_) => <DecayAnimation<T> as ValueAnimation<T>>::SUPPORTS_VELOCITY,
            Animation::Basic(_) => <BasicAnimation<T> as ValueAnimation<T>>::SUPPORTS_VELOCITY,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        match self {
            Animation::Spring(spring) => spring.tick(dt),
            Animation::Decay(decay) => decay.tick(dt),
            Animation::Basic(basic) => basic.tick(dt),
        }
    }

    pub fn value(&self) -> T {
        match self {
            Animation::Spring(spring) => spring.value(),
            Animation::Decay(decay) => decay.value(),
            Animation::Basic(basic) => basic.value(),
        }
    }

    pub fn velocity(&self) -> Option<T> {
        match self {
            Animation::Spring(spring) => spring.velocity(),
            Animation::Decay(decay) => decay.velocity(),
            Animation::Basic(basic) => basic.velocity(),
        }
    }

    pub fn to_value(&self) -> T {
        match self {
            Animation::Spring(spring) => spring.to_value(),
            Animation::Decay(decay) => decay.to_value(),
            Animation::Basic(basic) => basic.to_value(),
        }
    }

    pub fn status(&self) -> AnimationStatus {
        match self {
            Animation::Spring(spring) => spring.status(),
            Animation::Decay(decay) => decay.status(),
            Animation::Basic(basic) => basic.status(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    pub fn update_value(&mut self, value: T) {
        match self {
            Animation::Spring(spring) => spring.update_value(value),
            Animation::Decay(decay) => decay.update_value(value),
            Animation::Basic(basic) => basic.update_value(value),
        }
    }

    pub fn stop(&mut self) {
        match self {
            Animation::Spring(spring) => spring.stop(),
            Animation::Decay(decay) => decay.stop(),
            Animation::Basic(basic) => basic.stop(),
        }
    }

    pub fn start(&mut self) {
        match self {
            Animation::Spring(spring) => spring.start(),
            Animation::Decay(decay) => decay.start(),
            Animation::Basic(basic) => basic.start(),
        }
    }
}

impl<T: Animatable> From<SpringAnimation<T>> for Animation<T> {
    fn from(spring: SpringAnimation<T>) -> Self {
        Animation::Spring(spring)
    }
}

impl<T: Animatable> From<DecayAnimation<T>> for Animation<T> {
    fn from(decay: DecayAnimation<T>) -> Self {
        Animation::Decay(decay)
    }
}

impl<T: Animatable> From<BasicAnimation<T>> for Animation<T> {
    fn from(basic: BasicAnimation<T>) -> Self {
        Animation::Basic(basic)
    }
}
