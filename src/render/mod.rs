//! Renderer Settings & Render Backend Seam
//!
//! The crate does not draw pixels. A [`RenderBackend`] receives the
//! configured [`RendererSettings`] once and then `(scene, camera)` every
//! frame. [`HeadlessRenderer`] is the built-in backend: it only records what
//! it was asked to draw, which is all tests and the CLI runner need.
//!
//! ```rust,ignore
//! let settings = setup_renderer(&config.renderer, config.viewport);
//! let mut backend = HeadlessRenderer::default();
//! backend.configure(&settings);
//! ```

use serde::Deserialize;

use crate::descriptor::ColorValue;
use crate::resources::Color;
use crate::scene::{Camera, NodeKind, Scene};
use crate::world::config::Viewport;

/// Clear color used when the configuration names none.
pub const DEFAULT_CLEAR_COLOR: u32 = 0x0022CC;

/// Renderer fragment of the world configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererDescriptor {
    pub color: Option<ColorValue>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub pixel_ratio: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub clear_color: Color,
}

impl Default for RendererSettings {
    fn default() -> Self {
        setup_renderer(&RendererDescriptor::default(), Viewport::default())
    }
}

impl RendererSettings {
    /// Backing-store size in physical pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(1.0) as u32,
            (self.height * self.pixel_ratio).round().max(1.0) as u32,
        )
    }
}

/// Resolves renderer settings: explicit values, else the viewport, else the
/// default clear color.
#[must_use]
pub fn setup_renderer(descriptor: &RendererDescriptor, viewport: Viewport) -> RendererSettings {
    let clear_color = match &descriptor.color {
        None => Color::from_hex(DEFAULT_CLEAR_COLOR),
        Some(value) => value.resolve().unwrap_or_else(|| {
            log::warn!("Unrecognised renderer color {value:?}, using default");
            Color::from_hex(DEFAULT_CLEAR_COLOR)
        }),
    };
    RendererSettings {
        width: descriptor.width.unwrap_or(viewport.width),
        height: descriptor.height.unwrap_or(viewport.height),
        pixel_ratio: descriptor.pixel_ratio.unwrap_or(viewport.pixel_ratio),
        clear_color,
    }
}

/// Receives frames from the world controller.
pub trait RenderBackend {
    fn configure(&mut self, settings: &RendererSettings);
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Summary of the last frame a [`HeadlessRenderer`] saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameRecord {
    pub scene: String,
    pub camera: String,
    pub drawables: usize,
}

/// Backend that draws nothing and remembers what it was given.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub settings: Option<RendererSettings>,
    pub frames_rendered: u64,
    pub last_frame: Option<FrameRecord>,
}

impl RenderBackend for HeadlessRenderer {
    fn configure(&mut self, settings: &RendererSettings) {
        let (w, h) = settings.physical_size();
        log::info!("Headless renderer configured: {w}x{h}, clear #{:06x}", settings.clear_color.to_hex());
        self.settings = Some(*settings);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let drawables = scene
            .nodes
            .values()
            .filter(|n| n.visible && !matches!(n.kind, NodeKind::Group))
            .count();
        self.frames_rendered += 1;
        self.last_frame = Some(FrameRecord {
            scene: scene.name.clone(),
            camera: camera.name.clone(),
            drawables,
        });
    }
}
