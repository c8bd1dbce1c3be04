//! Descriptor Compiler
//!
//! Compiles [`ObjectDescriptor`]s into scene nodes: resolves defaults, builds
//! geometry and material, binds the animation callback, handles replication
//! (`count`) and nesting (`children`), and inserts the result into a scene.
//!
//! Malformed input never aborts a compile: unknown kinds log a warning and
//! fall back to a box geometry or a basic material.

pub mod assets;
pub mod fit;
pub mod geometry;
pub mod material;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use glam::Vec3;

pub use assets::AssetCache;
pub use fit::{FitOutcome, fit_on_screen};
pub use geometry::{BuiltGeometry, build_geometry};
pub use material::build_material;

use crate::animation::AnimationLibrary;
use crate::descriptor::{Defaults, ObjectDescriptor};
use crate::errors::{Result, WorldError};
use crate::scene::{Node, NodeKey, Scene, SceneManager};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x0022_CC00;

/// Edge length of the jitter cube per replicated instance.
pub const JITTER_PER_INSTANCE: f32 = 10.0;

pub struct DescriptorCompiler {
    defaults: Defaults,
    assets: AssetCache,
    animations: AnimationLibrary,
    rng: StdRng,
}

impl Default for DescriptorCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCompiler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            defaults: Defaults::builtin().clone(),
            assets: AssetCache::new(),
            animations: AnimationLibrary::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    #[must_use]
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetCache {
        &mut self.assets
    }

    #[must_use]
    pub fn animations(&self) -> &AnimationLibrary {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationLibrary {
        &mut self.animations
    }

    /// Compiles one descriptor into `scene` at the top level.
    pub fn compile(&mut self, descriptor: &ObjectDescriptor, scene: &mut Scene) -> NodeKey {
        self.compile_node(descriptor, scene, None)
    }

    /// Compiles each descriptor in order into the same scene.
    pub fn compile_all(&mut self, descriptors: &[ObjectDescriptor], scene: &mut Scene) -> Vec<NodeKey> {
        descriptors.iter().map(|d| self.compile(d, scene)).collect()
    }

    /// Compiles into the managed scene at creation index `index`.
    pub fn compile_into(
        &mut self,
        manager: &mut SceneManager,
        index: usize,
        descriptors: &[ObjectDescriptor],
    ) -> Result<Vec<NodeKey>> {
        let scene = manager.scene_at_mut(index).ok_or(WorldError::SceneNotFound(index))?;
        Ok(self.compile_all(descriptors, scene))
    }

    fn compile_node(&mut self, descriptor: &ObjectDescriptor, scene: &mut Scene, parent: Option<NodeKey>) -> NodeKey {
        let count = descriptor.instance_count();
        let key = if count > 1 {
            self.compile_replicated(descriptor, count, scene, parent)
        } else {
            let (mut node, strips) = self.build_node(descriptor);
            node.transform.position = descriptor.resolved_position(&self.defaults);
            node.transform.rotation = descriptor.resolved_rotation();
            node.animation = descriptor.animation_key().and_then(|name| self.animations.create(name));
            let key = insert(scene, node, strips, parent);
            self.compile_children(descriptor, scene, key);
            key
        };

        log::debug!(
            "Compiled '{}' ({}) into scene '{}'",
            descriptor.display_name(),
            descriptor.kind_name(),
            scene.name
        );
        key
    }

    /// `count` jittered instances under one container; the callback is bound
    /// on the container and fans out to every instance.
    fn compile_replicated(
        &mut self,
        descriptor: &ObjectDescriptor,
        count: u32,
        scene: &mut Scene,
        parent: Option<NodeKey>,
    ) -> NodeKey {
        let mut container = Node::group(descriptor.display_name());
        container.transform.position = descriptor.resolved_position(&self.defaults);
        container.animation = descriptor.animation_key().and_then(|name| self.animations.create(name));
        let container_key = insert(scene, container, Vec::new(), parent);

        let half = count as f32 * JITTER_PER_INSTANCE / 2.0;
        for _ in 0..count {
            let (mut instance, strips) = self.build_node(descriptor);
            instance.transform.position = Vec3::new(
                self.rng.random_range(-half..half),
                self.rng.random_range(-half..half),
                self.rng.random_range(-half..half),
            );
            instance.transform.rotation = descriptor.resolved_rotation();
            let key = insert(scene, instance, strips, Some(container_key));
            self.compile_children(descriptor, scene, key);
        }
        container_key
    }

    fn compile_children(&mut self, descriptor: &ObjectDescriptor, scene: &mut Scene, parent: NodeKey) {
        for child in &descriptor.children {
            self.compile_node(child, scene, Some(parent));
        }
    }

    /// Geometry + material as a mesh, or a group plus one line node per
    /// strip.
    fn build_node(&self, descriptor: &ObjectDescriptor) -> (Node, Vec<Node>) {
        let material = build_material(descriptor, &self.assets);
        let name = descriptor.display_name();
        match build_geometry(descriptor, &self.defaults, &self.assets) {
            BuiltGeometry::Mesh(geometry) => (Node::mesh(name, geometry, material), Vec::new()),
            BuiltGeometry::Lines(lines) => {
                let strips = lines
                    .into_iter()
                    .map(|geometry| Node::line(name, geometry, material.clone()))
                    .collect();
                (Node::group(name), strips)
            }
        }
    }
}

fn insert(scene: &mut Scene, node: Node, strips: Vec<Node>, parent: Option<NodeKey>) -> NodeKey {
    let key = match parent {
        Some(p) => scene.add_to_parent(node, p),
        None => scene.add_node(node),
    };
    for strip in strips {
        scene.add_to_parent(strip, key);
    }
    key
}
