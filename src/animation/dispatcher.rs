use crate::animation::{AnimationCallback, AnimationTarget};
use crate::scene::{Node, NodeKind, Scene};

/// Drives bound animation callbacks over a scene's top-level nodes.
///
/// Per node:
/// - drawable with a callback: invoke it with the node's own target
/// - drawable without one: flag the material for refresh
/// - group: apply the group's callback to each child (with the child's own
///   name), or refresh each child's material when the group has none
///
/// Scene membership is never changed.
#[derive(Debug, Default)]
pub struct AnimationDispatcher {
    frames: u64,
}

impl AnimationDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames dispatched so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick(&mut self, scene: &mut Scene, elapsed: f32) {
        self.frames += 1;
        let roots = scene.root_nodes.clone();

        for key in roots {
            let Some(node) = scene.nodes.get_mut(key) else { continue };
            let callback = node.animation.clone();

            if node.is_group() {
                let children = node.children.clone();
                for child in children {
                    if let Some(child_node) = scene.nodes.get_mut(child) {
                        apply(child_node, callback.as_ref(), elapsed);
                    }
                }
            } else {
                apply(node, callback.as_ref(), elapsed);
            }
        }
        log::trace!("Dispatched frame {} of scene '{}' at {elapsed:.3}s", self.frames, scene.name);
    }
}

fn apply(node: &mut Node, callback: Option<&AnimationCallback>, elapsed: f32) {
    match callback {
        Some(callback) => {
            let Node {
                name,
                transform,
                kind,
                animation_state,
                ..
            } = node;
            let material = match kind {
                NodeKind::Mesh(mesh) | NodeKind::Line(mesh) => Some(&mut mesh.material),
                NodeKind::Group => None,
            };
            let mut target = AnimationTarget {
                name: name.as_str(),
                transform,
                material,
                state: animation_state,
            };
            callback.call(&mut target, elapsed);
        }
        None => {
            if let Some(material) = node.material_mut() {
                material.mark_needs_update();
            }
        }
    }
}
