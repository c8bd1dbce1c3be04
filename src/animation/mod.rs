//! Per-frame Animation
//!
//! Animation callbacks are plain closures bound to nodes at compile time and
//! invoked once per frame by the [`AnimationDispatcher`] with the elapsed
//! session time in seconds.

pub mod dispatcher;
pub mod library;

use std::fmt;
use std::rc::Rc;

use glam::Vec3;

pub use dispatcher::AnimationDispatcher;
pub use library::AnimationLibrary;

use crate::resources::Material;
use crate::scene::Transform;

/// Per-node values a callback latches on the first frame it sees the node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    pub origin: Option<Vec3>,
    pub started_at: Option<f32>,
}

impl AnimationState {
    /// The origin recorded on first use, `position` until then.
    pub fn origin_or(&mut self, position: Vec3) -> Vec3 {
        *self.origin.get_or_insert(position)
    }

    /// The elapsed time recorded on first use, `elapsed` until then.
    pub fn started_at_or(&mut self, elapsed: f32) -> f32 {
        *self.started_at.get_or_insert(elapsed)
    }
}

/// What a callback may touch on the node it animates.
pub struct AnimationTarget<'a> {
    pub name: &'a str,
    pub transform: &'a mut Transform,
    pub material: Option<&'a mut Material>,
    pub state: &'a mut AnimationState,
}

type CallbackFn = dyn Fn(&mut AnimationTarget<'_>, f32);

/// Shared per-frame callback: `(target, elapsed_seconds)`.
#[derive(Clone)]
pub struct AnimationCallback {
    name: String,
    f: Rc<CallbackFn>,
}

impl AnimationCallback {
    pub fn new(name: impl Into<String>, f: impl Fn(&mut AnimationTarget<'_>, f32) + 'static) -> Self {
        Self {
            name: name.into(),
            f: Rc::new(f),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, target: &mut AnimationTarget<'_>, elapsed: f32) {
        (self.f)(target, elapsed);
    }
}

impl fmt::Debug for AnimationCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationCallback").field("name", &self.name).finish_non_exhaustive()
    }
}
