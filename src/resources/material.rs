use bitflags::bitflags;

use crate::resources::color::Color;
use crate::resources::texture::Texture;

bitflags! {
    /// Render-state switches carried by every material.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFlags: u32 {
        const TRANSPARENT  = 1 << 0;
        const WIREFRAME    = 1 << 1;
        const FLAT_SHADING = 1 << 2;
        const DOUBLE_SIDED = 1 << 3;
    }
}

/// Material kinds recognised by descriptor `material` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Basic,
    Normal,
    Wireframe,
    Phong,
    Lambert,
    Line,
    /// Unrecognised name; compiled as basic.
    Fallback(String),
}

impl MaterialKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Self::Basic,
            "normal" => Self::Normal,
            "wireframe" => Self::Wireframe,
            "phong" => Self::Phong,
            "lambert" => Self::Lambert,
            "line" => Self::Line,
            _ => Self::Fallback(name.to_string()),
        }
    }
}

/// Surface description attached to a drawable.
#[derive(Debug, Clone)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub opacity: f32,
    pub flags: MaterialFlags,
    pub map: Option<Texture>,
    /// Set when the renderer must re-upload the material.
    pub needs_update: bool,
    version: u64,
}

impl Material {
    fn with_kind(kind: MaterialKind, color: Color) -> Self {
        Self {
            kind,
            color,
            opacity: 1.0,
            flags: MaterialFlags::empty(),
            map: None,
            needs_update: false,
            version: 0,
        }
    }

    #[must_use]
    pub fn basic(color: Color) -> Self {
        Self::with_kind(MaterialKind::Basic, color)
    }

    /// Normal-shaded, flat, double sided.
    #[must_use]
    pub fn normal() -> Self {
        let mut m = Self::with_kind(MaterialKind::Normal, Color::WHITE);
        m.flags = MaterialFlags::FLAT_SHADING | MaterialFlags::DOUBLE_SIDED | MaterialFlags::TRANSPARENT;
        m
    }

    /// Normal shading drawn as wireframe.
    #[must_use]
    pub fn wireframe() -> Self {
        let mut m = Self::with_kind(MaterialKind::Wireframe, Color::WHITE);
        m.flags = MaterialFlags::WIREFRAME | MaterialFlags::TRANSPARENT;
        m
    }

    #[must_use]
    pub fn phong(color: Color) -> Self {
        Self::with_kind(MaterialKind::Phong, color)
    }

    #[must_use]
    pub fn lambert(color: Color) -> Self {
        Self::with_kind(MaterialKind::Lambert, color)
    }

    #[must_use]
    pub fn line(color: Color) -> Self {
        Self::with_kind(MaterialKind::Line, color)
    }

    /// Attaches a texture map; textured materials render transparent.
    #[must_use]
    pub fn with_map(mut self, texture: Texture) -> Self {
        self.map = Some(texture);
        self.flags |= MaterialFlags::TRANSPARENT;
        self
    }

    #[must_use]
    pub fn with_transparency(mut self) -> Self {
        self.flags |= MaterialFlags::TRANSPARENT;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        if self.opacity < 1.0 {
            self.flags |= MaterialFlags::TRANSPARENT;
        }
        self.mark_needs_update();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.mark_needs_update();
    }

    #[inline]
    #[must_use]
    pub fn transparent(&self) -> bool {
        self.flags.contains(MaterialFlags::TRANSPARENT)
    }

    #[inline]
    #[must_use]
    pub fn wireframe_enabled(&self) -> bool {
        self.flags.contains(MaterialFlags::WIREFRAME)
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
        self.version = self.version.wrapping_add(1);
    }

    /// Clears the refresh flag, returning whether it was set.
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::wireframe()
    }
}
