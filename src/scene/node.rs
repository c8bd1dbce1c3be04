use glam::Affine3A;

use crate::animation::{AnimationCallback, AnimationState};
use crate::resources::{Geometry, Material};
use crate::scene::NodeKey;
use crate::scene::transform::Transform;

/// Geometry paired with the material it is drawn with.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}

/// What a node draws, if anything.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh(Mesh),
    /// Mesh drawn as a line strip.
    Line(Mesh),
    /// Pure container.
    Group,
}

/// A scene graph node.
///
/// Nodes form a tree through `parent` / `children`; the owning [`Scene`]
/// keeps both sides in sync.
///
/// [`Scene`]: crate::scene::Scene
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    /// Per-frame callback bound by the compiler.
    pub animation: Option<AnimationCallback>,
    /// Values latched by the callback on this node's first frame.
    pub animation_state: AnimationState,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            kind,
            animation: None,
            animation_state: AnimationState::default(),
        }
    }

    #[must_use]
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh(Mesh::new(geometry, material)))
    }

    #[must_use]
    pub fn line(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Line(Mesh::new(geometry, material)))
    }

    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    #[must_use]
    pub fn drawable(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) | NodeKind::Line(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    pub fn drawable_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) | NodeKind::Line(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.drawable().map(|m| &m.geometry)
    }

    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        self.drawable().map(|m| &m.material)
    }

    pub fn material_mut(&mut self) -> Option<&mut Material> {
        self.drawable_mut().map(|m| &mut m.material)
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        self.transform.world_matrix()
    }
}
