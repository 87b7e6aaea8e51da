//! Spring physics
//!
//! Springs are advanced with the closed-form solution of the damped harmonic
//! oscillator `m·x'' + c·x' + k·x = 0`, where `x` is the displacement from the
//! target. Unlike a numerical integrator the result does not depend on how
//! elapsed time is split into ticks, so springs stay stable at any frame rate.
//!
//! The solution is linear in the initial displacement and velocity:
//!
//! ```text
//! x(t) = a·x0 + b·v0
//! v(t) = c·x0 + d·v0
//! ```
//!
//! Only the scalar coefficients depend on the damping regime, which lets every
//! [`Animatable`] type share one implementation.

use std::f64::consts::PI;

use crate::animation::{is_valid_dt, AnimationStatus, ValueAnimation};
use crate::error::{MotionError, Result};
use crate::vector::Animatable;

/// Damping ratios this close to 1 use the critically damped solution
const CRITICAL_DAMPING_EPSILON: f64 = 1e-6;

/// Default resting threshold for displacement from the target
pub const DEFAULT_RESTING_DISTANCE: f64 = 1e-3;
/// Default resting threshold for velocity
pub const DEFAULT_RESTING_VELOCITY: f64 = 1e-3;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Spring constant `k`
    pub stiffness: f64,
    /// Damping coefficient `c`
    pub damping: f64,
    /// Mass `m`
    pub mass: f64,
}

/// Which closed-form branch governs a spring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingRegime {
    /// `ζ < 1`: oscillates around the target while decaying
    Underdamped,
    /// `ζ == 1`: fastest approach without overshoot
    CriticallyDamped,
    /// `ζ > 1`: slow approach without overshoot
    Overdamped,
}

/// Scalar coefficients mapping `(x0, v0)` to `(x(t), v(t))`
#[derive(Clone, Copy, Debug)]
struct SpringCoefficients {
    position_from_position: f64,
    position_from_velocity: f64,
    velocity_from_position: f64,
    velocity_from_velocity: f64,
}

impl SpringConfig {
    /// Create a validated spring configuration.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        let config = Self {
            stiffness,
            damping,
            mass,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configure a spring from a damping ratio and a response time.
    ///
    /// `response` is the period in seconds of the undamped oscillation, which
    /// is easier to tune than raw stiffness. Mass is fixed at 1.
    pub fn from_response(damping_ratio: f64, response: f64) -> Result<Self> {
        if !response.is_finite() || response <= 0.0 {
            return Err(MotionError::InvalidResponse(response));
        }
        let mass = 1.0;
        let stiffness = (2.0 * PI / response).powi(2) * mass;
        let damping = 4.0 * PI * damping_ratio * mass / response;
        Self::new(stiffness, damping, mass)
    }

    /// A spring with exactly enough damping to never overshoot
    pub fn critically_damped(stiffness: f64, mass: f64) -> Result<Self> {
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt(), mass)
    }

    /// Stiff spring, settles quickly with little overshoot
    pub fn stiff() -> Self {
        Self {
            stiffness: 400.0,
            damping: 30.0,
            mass: 1.0,
        }
    }

    /// Snappy spring with a small bounce
    pub fn snappy() -> Self {
        Self {
            stiffness: 300.0,
            damping: 20.0,
            mass: 1.0,
        }
    }

    /// Soft spring for larger transitions
    pub fn gentle() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            mass: 1.0,
        }
    }

    /// Bouncy spring
    pub fn wobbly() -> Self {
        Self {
            stiffness: 180.0,
            damping: 12.0,
            mass: 1.0,
        }
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Reject parameters that would make the solution non-finite
    pub fn validate(&self) -> Result<()> {
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(MotionError::InvalidStiffness(self.stiffness));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(MotionError::InvalidDamping(self.damping));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(MotionError::InvalidMass(self.mass));
        }
        Ok(())
    }

    /// Undamped angular frequency `ω0 = √(k/m)`
    pub fn angular_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn regime(&self) -> DampingRegime {
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() < CRITICAL_DAMPING_EPSILON {
            DampingRegime::CriticallyDamped
        } else if zeta < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }

    /// Solve the oscillator for elapsed time `t`.
    ///
    /// Takes the displacement from the target and the velocity at time zero and
    /// returns both at time `t`. Pure; usable to sample a spring's curve
    /// without any animation instance.
    pub fn solve<T: Animatable>(&self, displacement: T, velocity: T, t: f64) -> (T, T) {
        let k = self.coefficients(t);
        let position = displacement.scale(k.position_from_position)
            + velocity.scale(k.position_from_velocity);
        let velocity = displacement.scale(k.velocity_from_position)
            + velocity.scale(k.velocity_from_velocity);
        (position, velocity)
    }

    fn coefficients(&self, t: f64) -> SpringCoefficients {
        let omega0 = self.angular_frequency();
        let zeta = self.damping_ratio();

        match self.regime() {
            DampingRegime::Underdamped => {
                let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
                let envelope = (-zeta * omega0 * t).exp();
                let (sin, cos) = (omega_d * t).sin_cos();
                SpringCoefficients {
                    position_from_position: envelope * (cos + zeta * omega0 / omega_d * sin),
                    position_from_velocity: envelope * sin / omega_d,
                    velocity_from_position: -envelope * omega0 * omega0 / omega_d * sin,
                    velocity_from_velocity: envelope * (cos - zeta * omega0 / omega_d * sin),
                }
            }
            DampingRegime::CriticallyDamped => {
                let envelope = (-omega0 * t).exp();
                SpringCoefficients {
                    position_from_position: envelope * (1.0 + omega0 * t),
                    position_from_velocity: envelope * t,
                    velocity_from_position: -envelope * omega0 * omega0 * t,
                    velocity_from_velocity: envelope * (1.0 - omega0 * t),
                }
            }
            DampingRegime::Overdamped => {
                // r_fast = -ω0(ζ + √(ζ²-1)); r_slow = ω0² / r_fast avoids cancellation
                let root = (zeta * zeta - 1.0).sqrt();
                let r_fast = -omega0 * (zeta + root);
                let r_slow = omega0 * omega0 / r_fast;
                let e_fast = (r_fast * t).exp();
                let e_slow = (r_slow * t).exp();
                let span = r_slow - r_fast;
                SpringCoefficients {
                    position_from_position: (r_slow * e_fast - r_fast * e_slow) / span,
                    position_from_velocity: (e_slow - e_fast) / span,
                    velocity_from_position: r_fast * r_slow * (e_fast - e_slow) / span,
                    velocity_from_velocity: (r_slow * e_slow - r_fast * e_fast) / span,
                }
            }
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// A spring-driven animation toward `to_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringAnimation<T: Animatable> {
    config: SpringConfig,
    value: T,
    velocity: T,
    to_value: T,
    status: AnimationStatus,
    resting_distance: f64,
    resting_velocity: f64,
    resolves_upon_reaching_to_value: bool,
    /// Lanes that have reached or crossed `to_value`, 1.0 when set
    crossed: T,
}

impl<T: Animatable> SpringAnimation<T> {
    /// Create a running spring at `value`, at rest, heading to `to_value`.
    pub fn new(config: SpringConfig, value: T, to_value: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            value,
            velocity: T::ZERO,
            to_value,
            status: AnimationStatus::Running,
            resting_distance: DEFAULT_RESTING_DISTANCE,
            resting_velocity: DEFAULT_RESTING_VELOCITY,
            resolves_upon_reaching_to_value: false,
            crossed: T::ZERO,
        })
    }

    /// Create a spring from raw stiffness, damping and mass.
    pub fn with_parameters(
        stiffness: f64,
        damping: f64,
        mass: f64,
        value: T,
        to_value: T,
    ) -> Result<Self> {
        Self::new(SpringConfig::new(stiffness, damping, mass)?, value, to_value)
    }

    /// Builder: initial velocity
    pub fn with_velocity(mut self, velocity: T) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: thresholds below which the spring is considered at rest
    pub fn with_resting_thresholds(mut self, distance: f64, velocity: f64) -> Self {
        self.resting_distance = distance.abs();
        self.resting_velocity = velocity.abs();
        self
    }

    /// Builder: stop as soon as the target is reached or crossed.
    ///
    /// Crossings are tracked per lane, so a vector spring stops once every
    /// lane has reached its target at least once, not necessarily in the
    /// same tick. A lane only counts when its displacement changes sign or
    /// lands on zero; starting at the target with some velocity does not.
    /// Lanes sitting at the target with no velocity count as reached.
    pub fn resolving_upon_reaching_to_value(mut self, resolves: bool) -> Self {
        self.resolves_upon_reaching_to_value = resolves;
        self.crossed = T::ZERO;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn stiffness(&self) -> f64 {
        self.config.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.config.damping
    }

    pub fn mass(&self) -> f64 {
        self.config.mass
    }

    /// Swap the physical parameters, keeping value and velocity
    pub fn set_config(&mut self, config: SpringConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Retarget mid-flight.
    ///
    /// Velocity is preserved so the motion continues smoothly toward the new
    /// target; displacement is measured from `to_value` on the next tick.
    pub fn set_to_value(&mut self, to_value: T) {
        tracing::debug!("Spring retargeted: {:?} -> {:?}", self.to_value, to_value);
        self.to_value = to_value;
        self.crossed = T::ZERO;
    }

    pub fn set_velocity(&mut self, velocity: T) {
        self.velocity = velocity;
    }

    /// True when displacement and velocity are both within resting thresholds
    pub fn is_at_rest(&self) -> bool {
        (self.value - self.to_value).is_within(self.resting_distance)
            && self.velocity.is_within(self.resting_velocity)
    }

    /// Record lanes whose displacement reached zero or flipped sign this tick,
    /// then report whether every lane is done.
    fn has_reached_to_value(&mut self, previous: T, displacement: T) -> bool {
        let crossed_now = previous.zip_map(displacement, |before, after| {
            let flipped = before != 0.0 && (after == 0.0 || (before < 0.0) != (after < 0.0));
            if flipped {
                1.0
            } else {
                0.0
            }
        });
        self.crossed = self.crossed.max_lanes(crossed_now);

        let idle = displacement.abs().max_lanes(self.velocity.abs());
        self.crossed
            .zip_map(idle, |crossed, idle| {
                if crossed > 0.0 || idle == 0.0 {
                    1.0
                } else {
                    0.0
                }
            })
            .all_lanes(|done| done > 0.0)
    }

    fn settle(&mut self) {
        self.value = self.to_value;
        self.velocity = T::ZERO;
        self.status = AnimationStatus::Stopped;
        tracing::debug!("Spring settled at {:?}", self.to_value);
    }
}

impl<T: Animatable> ValueAnimation<T> for SpringAnimation<T> {
    const SUPPORTS_VELOCITY: bool = true;

    fn tick(&mut self, dt: f64) {
        if self.status != AnimationStatus::Running {
            return;
        }
        if !is_valid_dt(dt) {
            tracing::trace!("Spring tick ignored: dt = {}", dt);
            return;
        }

        let previous = self.value - self.to_value;
        let (displacement, velocity) = self.config.solve(previous, self.velocity, dt);
        self.value = self.to_value + displacement;
        self.velocity = velocity;

        let reached = self.resolves_upon_reaching_to_value
            && self.has_reached_to_value(previous, displacement);
        if reached || self.is_at_rest() {
            self.settle();
        }
    }

    fn value(&self) -> T {
        self.value
    }

    fn velocity(&self) -> Option<T> {
        Some(self.velocity)
    }

    fn to_value(&self) -> T {
        self.to_value
    }

    fn status(&self) -> AnimationStatus {
        self.status
    }

    fn update_value(&mut self, value: T) {
        self.value = value;
        self.crossed = T::ZERO;
    }

    fn stop(&mut self) {
        self.status = AnimationStatus::Stopped;
        self.velocity = T::ZERO;
        tracing::debug!("Spring stopped at {:?}", self.value);
    }

    fn start(&mut self) {
        self.status = AnimationStatus::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;

    const DT: f64 = 1.0 / 60.0;

    fn spring(stiffness: f64, damping: f64) -> SpringAnimation<f64> {
        SpringAnimation::with_parameters(stiffness, damping, 1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_spring_settles_within_three_seconds() {
        let mut anim = spring(100.0, 10.0);
        for _ in 0..180 {
            anim.tick(DT);
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert!((anim.value() - 1.0).abs() < 1e-3);
        assert_eq!(anim.velocity(), Some(0.0));
    }

    #[test]
    fn test_regimes() {
        assert_eq!(spring(100.0, 10.0).config().regime(), DampingRegime::Underdamped);
        assert_eq!(
            spring(100.0, 20.0).config().regime(),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(spring(100.0, 40.0).config().regime(), DampingRegime::Overdamped);
    }

    #[test]
    fn test_critically_damped_never_overshoots() {
        let mut anim = spring(100.0, 20.0);
        let steps = [DT, 0.001, 0.1, DT, 0.5, 0.02, 0.3];
        let mut previous = anim.value();
        for i in 0..300 {
            anim.tick(steps[i % steps.len()]);
            assert!(anim.value() <= 1.0, "overshot at step {i}: {}", anim.value());
            assert!(anim.value() >= previous - 1e-12, "moved backwards at step {i}");
            previous = anim.value();
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
    }

    #[test]
    fn test_underdamped_overshoots() {
        let mut anim = spring(100.0, 10.0);
        let mut max = f64::MIN;
        for _ in 0..180 {
            anim.tick(DT);
            max = max.max(anim.value());
        }
        assert!(max > 1.0, "expected overshoot, max was {max}");
    }

    #[test]
    fn test_overdamped_approaches_without_overshoot() {
        let mut anim = spring(100.0, 40.0);
        for _ in 0..600 {
            anim.tick(DT);
            assert!(anim.value() <= 1.0);
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert_eq!(anim.value(), 1.0);
    }

    #[test]
    fn test_tick_splitting_is_invariant() {
        for damping in [2.0, 20.0, 60.0] {
            let mut stepped = spring(100.0, damping).with_resting_thresholds(0.0, 0.0);
            let mut single = stepped.clone();
            let mut uneven = stepped.clone();

            for _ in 0..60 {
                stepped.tick(DT);
            }
            single.tick(1.0);
            uneven.tick(0.3);
            uneven.tick(0.7);

            let v = single.value();
            assert!((stepped.value() - v).abs() < 1e-9, "damping {damping}");
            assert!((uneven.value() - v).abs() < 1e-9, "damping {damping}");
            let velocity = single.velocity().unwrap();
            assert!((stepped.velocity().unwrap() - velocity).abs() < 1e-9);
        }
    }

    #[test]
    fn test_velocity_matches_position_derivative() {
        let config = SpringConfig::new(100.0, 10.0, 1.0).unwrap();
        let h = 1e-6;
        let t = 0.2;
        let (x_before, _) = config.solve(-1.0_f64, 0.5, t - h);
        let (x_after, _) = config.solve(-1.0_f64, 0.5, t + h);
        let (_, v) = config.solve(-1.0_f64, 0.5, t);
        assert!(((x_after - x_before) / (2.0 * h) - v).abs() < 1e-4);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut anim = spring(100.0, 10.0);
        for _ in 0..10 {
            anim.tick(DT);
        }
        let velocity = anim.velocity();
        anim.set_to_value(2.0);
        assert_eq!(anim.velocity(), velocity);
        assert_eq!(anim.to_value(), 2.0);

        for _ in 0..300 {
            anim.tick(DT);
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert_eq!(anim.value(), 2.0);
    }

    #[test]
    fn test_resolves_upon_reaching_to_value() {
        let mut anim = spring(100.0, 10.0).resolving_upon_reaching_to_value(true);
        let mut ticks = 0;
        while anim.is_running() && ticks < 180 {
            anim.tick(DT);
            ticks += 1;
        }
        assert_eq!(anim.value(), 1.0);
        // Stops at the first crossing, well before the bounce dies out
        assert!(ticks < 30, "took {ticks} ticks");
    }

    #[test]
    fn test_starting_at_target_with_velocity_does_not_resolve() {
        let mut anim = SpringAnimation::new(SpringConfig::wobbly(), 1.0, 1.0)
            .unwrap()
            .with_velocity(50.0)
            .resolving_upon_reaching_to_value(true);
        anim.tick(DT);
        assert!(anim.is_running());
        assert!(anim.value() > 1.0);
        assert!(anim.velocity().is_some_and(|v| v != 0.0));

        // Resolves on the way back through the target
        let mut ticks = 1;
        while anim.is_running() && ticks < 180 {
            anim.tick(DT);
            ticks += 1;
        }
        assert_eq!(anim.value(), 1.0);
        assert!(ticks < 40, "took {ticks} ticks");
    }

    #[test]
    fn test_vector_lanes_resolve_independently() {
        // Lanes cross the target on different ticks
        let resolving = |resolves: bool| {
            SpringAnimation::new(SpringConfig::wobbly(), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0))
                .unwrap()
                .with_velocity(Vec2::new(0.0, -20.0))
                .resolving_upon_reaching_to_value(resolves)
        };
        let ticks_until_stopped = |mut anim: SpringAnimation<Vec2>| {
            let mut ticks = 0;
            while anim.is_running() && ticks < 600 {
                anim.tick(DT);
                ticks += 1;
            }
            (ticks, anim.value())
        };

        let (resolved_ticks, value) = ticks_until_stopped(resolving(true));
        let (rest_ticks, _) = ticks_until_stopped(resolving(false));

        assert_eq!(value, Vec2::new(1.0, 1.0));
        assert!(resolved_ticks <= 20, "took {resolved_ticks} ticks");
        assert!(resolved_ticks < rest_ticks);
    }

    #[test]
    fn test_f32_spring_settles() {
        let mut anim = SpringAnimation::new(SpringConfig::snappy(), 0.0_f32, 100.0).unwrap();
        for _ in 0..180 {
            anim.tick(DT);
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert_eq!(anim.value(), 100.0_f32);
        assert_eq!(anim.velocity(), Some(0.0_f32));
    }

    #[test]
    fn test_vector_spring_settles_every_lane() {
        let mut anim = SpringAnimation::new(
            SpringConfig::stiff(),
            Vec2::new(0.0, 50.0),
            Vec2::new(10.0, -5.0),
        )
        .unwrap()
        .with_velocity(Vec2::new(-20.0, 0.0));
        for _ in 0..600 {
            anim.tick(DT);
        }
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert_eq!(anim.value(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_huge_dt_stays_finite() {
        let mut anim = spring(100.0, 10.0);
        anim.tick(1.0e6);
        assert!(anim.value().is_finite());
        assert_eq!(anim.status(), AnimationStatus::Stopped);
        assert_eq!(anim.value(), 1.0);
    }

    #[test]
    fn test_undamped_spring_keeps_oscillating() {
        let mut anim = spring(100.0, 0.0);
        for _ in 0..600 {
            anim.tick(DT);
        }
        assert!(anim.is_running());
        assert!(anim.value().is_finite());
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        assert_eq!(
            SpringConfig::new(0.0, 1.0, 1.0),
            Err(MotionError::InvalidStiffness(0.0))
        );
        assert_eq!(
            SpringConfig::new(100.0, -1.0, 1.0),
            Err(MotionError::InvalidDamping(-1.0))
        );
        assert_eq!(
            SpringConfig::new(100.0, 1.0, -2.0),
            Err(MotionError::InvalidMass(-2.0))
        );
        assert!(SpringConfig::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(SpringAnimation::new(SpringConfig::default().with_mass(0.0), 0.0, 1.0).is_err());
        assert_eq!(
            SpringConfig::from_response(0.5, 0.0),
            Err(MotionError::InvalidResponse(0.0))
        );
    }

    #[test]
    fn test_from_response() {
        let config = SpringConfig::from_response(0.8, 0.5).unwrap();
        assert!((config.damping_ratio() - 0.8).abs() < 1e-9);
        // Undamped period equals the response
        let period = 2.0 * PI / config.angular_frequency();
        assert!((period - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SpringConfig::stiff(),
            SpringConfig::snappy(),
            SpringConfig::gentle(),
            SpringConfig::wobbly(),
        ] {
            assert!(config.validate().is_ok());
            assert_eq!(config.regime(), DampingRegime::Underdamped);
        }
        let critical = SpringConfig::critically_damped(250.0, 2.0).unwrap();
        assert_eq!(critical.regime(), DampingRegime::CriticallyDamped);
    }
}
