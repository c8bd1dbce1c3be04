use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::resources::{Font, Texture};

/// Decoded assets the compiler may reference by url.
///
/// Loading happens before compilation (see the world pipeline); the compiler
/// itself never performs I/O.
#[derive(Debug, Default, Clone)]
pub struct AssetCache {
    textures: FxHashMap<String, Texture>,
    fonts: FxHashMap<String, Rc<dyn Font>>,
    default_font: Option<String>,
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_texture(&mut self, texture: Texture) {
        self.textures.insert(texture.url.clone(), texture);
    }

    #[must_use]
    pub fn texture(&self, url: &str) -> Option<&Texture> {
        self.textures.get(url)
    }

    #[must_use]
    pub fn has_texture(&self, url: &str) -> bool {
        self.textures.contains_key(url)
    }

    /// Registers a font; the first one registered becomes the default.
    pub fn insert_font(&mut self, url: impl Into<String>, font: Rc<dyn Font>) {
        let url = url.into();
        if self.default_font.is_none() {
            self.default_font = Some(url.clone());
        }
        self.fonts.insert(url, font);
    }

    /// The font at `url`, or the default font when `url` is `None`.
    #[must_use]
    pub fn font(&self, url: Option<&str>) -> Option<Rc<dyn Font>> {
        let key = url.or(self.default_font.as_deref())?;
        self.fonts.get(key).cloned()
    }

    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
