use std::path::{Path, PathBuf};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::errors::{Result, WorldError};
use crate::resources::{Font, Texture, TypefaceFont};
use crate::world::collaborators::AssetLoader;

/// Loads textures and typeface fonts from the local filesystem, resolving
/// urls relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileAssetLoader {
    root_path: PathBuf,
}

impl FileAssetLoader {
    /// `path` may be the root directory or a file inside it (for example the
    /// world config).
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn resolve(&self, url: &str) -> Result<PathBuf> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Err(WorldError::AssetLoad {
                url: url.to_string(),
                reason: "remote urls are not supported by the file loader".to_string(),
            });
        }
        Ok(self.root_path.join(url))
    }

    fn read_texture(&self, url: &str) -> Result<Texture> {
        let path = self.resolve(url)?;
        let (width, height) = image::image_dimensions(&path)?;
        log::debug!("Loaded texture '{url}' ({width}x{height})");
        Ok(Texture::new(url, width, height))
    }

    fn read_font(&self, url: &str) -> Result<Rc<dyn Font>> {
        let path = self.resolve(url)?;
        let json = std::fs::read_to_string(&path)?;
        let font = TypefaceFont::from_json(&json)?;
        log::debug!("Loaded font '{url}' ({} glyphs)", font.glyphs.len());
        Ok(Rc::new(font))
    }
}

impl AssetLoader for FileAssetLoader {
    fn load_texture<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Texture>> {
        async move { self.read_texture(url) }.boxed_local()
    }

    fn load_font<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Rc<dyn Font>>> {
        async move { self.read_font(url) }.boxed_local()
    }
}
