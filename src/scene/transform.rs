use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Position, rotation and scale of a node.
///
/// The local matrix is rebuilt lazily: [`update_local_matrix`](Self::update_local_matrix)
/// compares the public components against the snapshot it last composed.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,
    world_matrix: Affine3A,

    // None until first composed, or after mark_dirty.
    composed: Option<(Vec3, Quat, Vec3)>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Vec3::ZERO)
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            composed: None,
        }
    }

    /// Returns whether the local matrix had to be rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = (self.position, self.rotation, self.scale);
        if self.composed == Some(current) {
            return false;
        }
        self.local_matrix = Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.composed = Some(current);
        true
    }

    /// XYZ order, radians.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        self.rotation.to_euler(EulerRot::XYZ).into()
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, world: Affine3A) {
        self.world_matrix = world;
    }

    /// Forces the next update to recompose.
    pub fn mark_dirty(&mut self) {
        self.composed = None;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
