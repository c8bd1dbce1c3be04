use glam::{Mat4, Vec2, Vec3};
use serde::Deserialize;

/// Fallback viewport when a camera descriptor carries no size.
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `fov` is vertical, in degrees.
    Perspective { fov: f32, aspect: f32 },
    /// Frustum spans the viewport in world units, centred on the axis.
    Orthographic { width: f32, height: f32 },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,

    projection_matrix: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::with_projection(Projection::Perspective { fov, aspect }, near, far)
    }

    #[must_use]
    pub fn new_orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::with_projection(Projection::Orthographic { width, height }, near, far)
    }

    fn with_projection(projection: Projection, near: f32, far: f32) -> Self {
        let mut cam = Self {
            name: "Camera".to_string(),
            projection,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection {
            Projection::Perspective { fov, aspect } => Mat4::perspective_rh(fov.to_radians(), aspect, self.near, self.far),
            Projection::Orthographic { width, height } => {
                let (w, h) = (width / 2.0, height / 2.0);
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        };
    }

    /// Resize hook: perspective cameras take the new aspect, orthographic
    /// cameras the new extent.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if height <= 0.0 {
            log::warn!("Ignoring viewport with non-positive height");
            return;
        }
        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = width / height,
            Projection::Orthographic { width: w, height: h } => {
                *w = width;
                *h = height;
            }
        }
        self.update_projection_matrix();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if let Projection::Perspective { aspect: a, .. } = &mut self.projection {
            *a = aspect;
            self.update_projection_matrix();
        }
    }

    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        if forward.length_squared() <= f32::EPSILON {
            return Mat4::from_translation(-self.position);
        }
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }

    /// Visible width/height of the frustum at `depth` world units in front
    /// of the camera.
    #[must_use]
    pub fn visible_size_at_depth(&self, depth: f32) -> Vec2 {
        match self.projection {
            Projection::Perspective { fov, aspect } => {
                let height = 2.0 * (fov.to_radians() / 2.0).tan() * depth.abs();
                Vec2::new(height * aspect, height)
            }
            Projection::Orthographic { width, height } => Vec2::new(width, height),
        }
    }

    /// Visible extent at a world position's depth along the camera's Z.
    #[must_use]
    pub fn visible_size_at(&self, point: Vec3) -> Vec2 {
        self.visible_size_at_depth(self.position.z - point.z)
    }
}

/// Camera fragment of the world configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraDescriptor {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub fov: Option<f32>,
    pub near: Option<f32>,
    pub far: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Ordered cameras; the first is named "main", the rest "cam_N".
#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
    active: usize,
}

impl CameraRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a camera from its descriptor and registers it. Returns its
    /// index.
    pub fn setup_camera(&mut self, descriptor: &CameraDescriptor, viewport: (f32, f32)) -> usize {
        let width = descriptor.width.unwrap_or(viewport.0);
        let height = descriptor.height.unwrap_or(viewport.1);
        let near = descriptor.near.unwrap_or(0.01);
        let far = descriptor.far.unwrap_or(1000.0);
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let fov = descriptor.fov.unwrap_or(60.0);

        let kind = descriptor.kind.as_deref().unwrap_or("perspective").to_ascii_lowercase();
        let mut camera = match kind.as_str() {
            "perspective" => Camera::new_perspective(fov, aspect, near, far),
            "orthographic" => Camera::new_orthographic(width, height, near, far),
            other => {
                log::warn!("Camera type '{other}' is not supported, using perspective");
                Camera::new_perspective(fov, aspect, near, far)
            }
        };
        camera.position = Vec3::new(0.0, 0.0, 200.0);
        camera.name = if self.cameras.is_empty() {
            "main".to_string()
        } else {
            format!("cam_{}", self.cameras.len())
        };

        log::debug!("Registered camera '{}' ({kind})", camera.name);
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Camera> {
        self.cameras.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Camera> {
        self.cameras.get_mut(index)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn active(&self) -> Option<&Camera> {
        self.cameras.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.get_mut(self.active)
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, index: usize) {
        if index < self.cameras.len() {
            self.active = index;
        } else {
            log::warn!("Camera index {index} out of range");
        }
    }

    /// Applies a viewport resize to every camera.
    pub fn resize(&mut self, width: f32, height: f32) {
        for camera in &mut self.cameras {
            camera.set_viewport(width, height);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Camera> {
        self.cameras.iter()
    }
}
