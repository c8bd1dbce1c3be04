/// A decoded image reference: where it came from and its natural size.
///
/// Pixel data stays with the render backend; the scene only needs identity
/// and dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Texture {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    #[must_use]
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Whether a url names an image the title loader accepts.
#[must_use]
pub fn is_image_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    [".jpg", ".jpeg", ".png", ".gif"].iter().any(|ext| path.ends_with(ext))
}
