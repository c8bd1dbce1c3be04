//! World configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "menu": { "title": "cover.png", "links": ["https://band.bandcamp.com"] },
//!   "sounds": { "tracks": ["intro.ogg"] },
//!   "worldObjects": [ { "type": "plane", "size": [10000, 10000] } ],
//!   "camera": { "fov": 60 },
//!   "renderer": { "color": 136140 },
//!   "transition": { "fadeMs": 10000 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::descriptor::ObjectDescriptor;
use crate::errors::Result;
use crate::render::RendererDescriptor;
use crate::scene::{CameraDescriptor, FogDescriptor};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    pub menu: MenuConfig,
    pub preloader: Option<ObjectDescriptor>,
    pub sounds: Option<SoundConfig>,
    pub world_objects: Vec<ObjectDescriptor>,
    pub camera: CameraDescriptor,
    pub renderer: RendererDescriptor,
    pub fog: Option<FogDescriptor>,
    pub viewport: Viewport,
    pub transition: TransitionConfig,
    /// Seed for replication jitter.
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Sound configuration that actually names something to play.
    #[must_use]
    pub fn active_sounds(&self) -> Option<&SoundConfig> {
        self.sounds.as_ref().filter(|s| !s.tracks.is_empty())
    }

    /// The configured preloader, or a rotating wireframe icosahedron.
    #[must_use]
    pub fn preloader_descriptor(&self) -> ObjectDescriptor {
        self.preloader.clone().unwrap_or_else(|| {
            ObjectDescriptor::new("icosahedron")
                .with_material("wireframe")
                .with_animation("rotate")
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    /// Image url (rendered as a textured plane) or plain text (rendered
    /// with `font`).
    pub title: Option<String>,
    pub links: Vec<String>,
    pub font: Option<String>,
}

impl MenuConfig {
    /// Links that point at a recognised platform; others are dropped.
    #[must_use]
    pub fn social_links(&self) -> Vec<SocialLink> {
        self.links.iter().filter_map(|l| SocialLink::parse(l)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    Bandcamp,
    Instagram,
    Soundcloud,
    Spotify,
    Twitter,
    Tumblr,
    Youtube,
}

impl SocialPlatform {
    const ALL: [SocialPlatform; 7] = [
        SocialPlatform::Bandcamp,
        SocialPlatform::Instagram,
        SocialPlatform::Soundcloud,
        SocialPlatform::Spotify,
        SocialPlatform::Twitter,
        SocialPlatform::Tumblr,
        SocialPlatform::Youtube,
    ];

    /// Icon / keyword name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Bandcamp => "bandcamp",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Soundcloud => "soundcloud",
            SocialPlatform::Spotify => "spotify",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Tumblr => "tumblr",
            SocialPlatform::Youtube => "youtube",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

impl SocialLink {
    /// Recognises the first platform keyword appearing in the url.
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let lower = url.to_ascii_lowercase();
        let platform = SocialPlatform::ALL
            .into_iter()
            .filter_map(|p| lower.find(p.as_str()).map(|at| (at, p)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, p)| p);

        match platform {
            Some(platform) => Some(Self {
                platform,
                url: url.to_string(),
            }),
            None => {
                log::warn!("Menu link '{url}' matches no known platform");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundConfig {
    pub tracks: Vec<String>,
    pub volume: Option<f32>,
    pub looped: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        let (width, height) = crate::scene::camera::DEFAULT_VIEWPORT;
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionConfig {
    pub fade_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { fade_ms: 10_000 }
    }
}

impl TransitionConfig {
    #[must_use]
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}
