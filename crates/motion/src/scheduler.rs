//! Animation set
//!
//! Holds many animations and advances them together. The set never reads a
//! clock: the driver passes the elapsed time to [`AnimationSet::tick`].

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::animation::Animation;
use crate::vector::Animatable;

new_key_type! {
    pub struct AnimationId;
}

/// Ids of animations that stopped during a tick
pub type Settled = SmallVec<[AnimationId; 4]>;

/// A collection of animations advanced by the same driver
#[derive(Clone, Debug)]
pub struct AnimationSet<T: Animatable> {
    animations: SlotMap<AnimationId, Animation<T>>,
}

impl<T: Animatable> AnimationSet<T> {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, animation: impl Into<Animation<T>>) -> AnimationId {
        self.animations.insert(animation.into())
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation<T>> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation<T>> {
        self.animations.get_mut(id)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Animation<T>> {
        self.animations.remove(id)
    }

    /// Advance every running animation by `dt` seconds.
    ///
    /// Returns the animations that stopped during this tick.
    pub fn tick(&mut self, dt: f64) -> Settled {
        let mut settled = Settled::new();
        for (id, animation) in self.animations.iter_mut() {
            if !animation.is_running() {
                continue;
            }
            animation.tick(dt);
            if !animation.is_running() {
                settled.push(id);
            }
        }
        if !settled.is_empty() {
            tracing::trace!("{} animation(s) settled", settled.len());
        }
        settled
    }

    /// Stop every animation
    pub fn stop_all(&mut self) {
        for (_, animation) in self.animations.iter_mut() {
            animation.stop();
        }
    }

    /// Drop animations that are no longer running
    pub fn remove_stopped(&mut self) {
        self.animations.retain(|_, animation| animation.is_running());
    }

    /// Check if any animations are still active
    pub fn has_running(&self) -> bool {
        self.animations.values().any(Animation::is_running)
    }

    /// Iterate over all animations (immutable)
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &Animation<T>)> {
        self.animations.iter()
    }

    /// Iterate over all animations (mutable)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AnimationId, &mut Animation<T>)> {
        self.animations.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl<T: Animatable> Default for AnimationSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
