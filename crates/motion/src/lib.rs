//! Motion
//!
//! Analytic animation engine: springs, decay and eased tweens over any
//! vector-like value.
//!
//! # Features
//!
//! - **Spring Physics**: closed-form damped oscillator (under-, critically- and
//!   over-damped), stable for any tick size
//! - **Decay**: exponential velocity falloff with an exact position integral
//! - **Easing**: linear, ease-in/out presets and arbitrary cubic beziers
//! - **Generic Values**: scalars, 2D/3D/4D vectors and colors share one
//!   implementation through [`Animatable`]
//! - **Driver Agnostic**: animations only advance when `tick(dt)` is called
//!
//! # Example
//!
//! ```rust
//! use motion::{AnimationStatus, SpringAnimation, SpringConfig, ValueAnimation};
//!
//! let mut spring = SpringAnimation::new(SpringConfig::snappy(), 0.0, 100.0)?;
//! while spring.status() == AnimationStatus::Running {
//!     spring.tick(1.0 / 60.0);
//! }
//! assert_eq!(spring.value(), 100.0);
//! # Ok::<(), motion::MotionError>(())
//! ```

pub mod animation;
pub mod basic;
pub mod decay;
pub mod easing;
pub mod error;
pub mod pair;
pub mod sample;
pub mod scheduler;
pub mod spring;
pub mod vector;

pub use animation::{Animation, AnimationStatus, ValueAnimation};
pub use basic::BasicAnimation;
pub use decay::DecayAnimation;
pub use easing::{Bezier, EasingFunction};
pub use error::{MotionError, Result};
pub use pair::InterpolatingPair;
pub use sample::{sample, sample_easing, Sample, SampleKind, MAX_SAMPLES};
pub use scheduler::{AnimationId, AnimationSet};
pub use spring::{DampingRegime, SpringAnimation, SpringConfig};
pub use vector::{Animatable, LaneMask, Rgba, Vec2, Vec3, Vec4, Vector};
