use glam::Vec3;
use rustc_hash::FxHashMap;

use super::{AnimationCallback, AnimationTarget};

/// Seconds the `fade` animation takes to reach zero opacity.
pub const FADE_SECONDS: f32 = 10.0;

type Factory = Box<dyn Fn() -> AnimationCallback>;

/// Named animation factories.
///
/// Every lookup builds a fresh callback. Anything a callback remembers about
/// a node (its origin, when it started fading) lives in the node's
/// [`AnimationState`](super::AnimationState), so one callback can drive
/// many replicated instances.
pub struct AnimationLibrary {
    factories: FxHashMap<String, Factory>,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationLibrary {
    /// A library preloaded with the built-in animations:
    /// `rotate`, `spin`, `float`, `pulse`, `orbit` and `fade`.
    #[must_use]
    pub fn new() -> Self {
        let mut lib = Self {
            factories: FxHashMap::default(),
        };
        lib.register("rotate", rotate);
        lib.register("spin", spin);
        lib.register("float", float);
        lib.register("pulse", pulse);
        lib.register("orbit", orbit);
        lib.register("fade", fade);
        lib
    }

    /// Registers (or replaces) a named animation.
    pub fn register(&mut self, name: &str, factory: impl Fn() -> AnimationCallback + 'static) {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Registers a stateless closure under `name`.
    pub fn register_fn(&mut self, name: &str, f: impl Fn(&mut AnimationTarget<'_>, f32) + Clone + 'static) {
        let key = name.to_string();
        self.register(name, move || AnimationCallback::new(key.clone(), f.clone()));
    }

    /// Builds the callback for `name`. Unknown names are logged and yield
    /// `None`, leaving the node on the material-refresh path.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<AnimationCallback> {
        let key = name.split_whitespace().next().unwrap_or(name);
        match self.factories.get(key) {
            Some(factory) => Some(factory()),
            None => {
                log::warn!("Unknown animation '{name}'");
                None
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

fn rotate() -> AnimationCallback {
    AnimationCallback::new("rotate", |target, elapsed| {
        target.transform.set_rotation_euler(elapsed * 0.5, elapsed, 0.0);
    })
}

fn spin() -> AnimationCallback {
    AnimationCallback::new("spin", |target, elapsed| {
        let euler = target.transform.rotation_euler();
        target.transform.set_rotation_euler(euler.x, elapsed, euler.z);
    })
}

fn float() -> AnimationCallback {
    AnimationCallback::new("float", |target, elapsed| {
        let y = target.state.origin_or(target.transform.position).y;
        target.transform.position.y = y + (elapsed * 2.0).sin() * 10.0;
    })
}

fn pulse() -> AnimationCallback {
    AnimationCallback::new("pulse", |target, elapsed| {
        let s = 1.0 + (elapsed * 3.0).sin() * 0.1;
        target.transform.scale = Vec3::splat(s);
    })
}

fn orbit() -> AnimationCallback {
    AnimationCallback::new("orbit", |target, elapsed| {
        let center = target.state.origin_or(target.transform.position);
        let (sin, cos) = (elapsed * 0.5).sin_cos();
        target.transform.position = center + Vec3::new(cos * 50.0, 0.0, sin * 50.0);
    })
}

fn fade() -> AnimationCallback {
    fade_callback(None, FADE_SECONDS)
}

/// Fades opacity from 1 at `start` to 0 at `start + seconds` (session time).
/// A non-positive duration hides the node at once.
#[must_use]
pub fn fade_over(start: f32, seconds: f32) -> AnimationCallback {
    fade_callback(Some(start), seconds)
}

// Without a fixed start the fade begins on the node's first frame.
fn fade_callback(start: Option<f32>, seconds: f32) -> AnimationCallback {
    AnimationCallback::new("fade", move |target, elapsed| {
        let t0 = start.unwrap_or_else(|| target.state.started_at_or(elapsed));
        let opacity = if seconds > 0.0 {
            (1.0 - (elapsed - t0) / seconds).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if let Some(material) = target.material.as_deref_mut() {
            material.set_opacity(opacity);
        }
    })
}
