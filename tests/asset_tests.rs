//! Asset Loading Tests
//!
//! Tests for:
//! - FileAssetLoader texture dimensions from image headers
//! - Typeface font loading and glyph shape generation
//! - Failure modes: missing files, remote urls, malformed fonts

use std::path::PathBuf;

use futures::executor::block_on;

use albumworld::FileAssetLoader;
use albumworld::WorldError;
use albumworld::resources::{Font, TypefaceFont};
use albumworld::world::AssetLoader;

/// Square glyph "A" with a square hole, and an outline-less space.
const FONT_JSON: &str = r#"{
    "familyName": "Blocky",
    "resolution": 1000,
    "glyphs": {
        "A": { "ha": 800, "o": "m 0 0 l 700 0 l 700 700 l 0 700 l 0 0 m 200 200 l 200 500 l 500 500 l 500 200 l 200 200" },
        " ": { "ha": 300 }
    }
}"#;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("albumworld-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Textures
// ============================================================================

#[test]
fn texture_dimensions_come_from_the_image() {
    let dir = scratch_dir("tex");
    image::RgbImage::new(64, 32).save(dir.join("cover.png")).unwrap();

    let loader = FileAssetLoader::new(&dir);
    let texture = block_on(loader.load_texture("cover.png")).unwrap();
    assert_eq!((texture.width, texture.height), (64, 32));
    assert_eq!(texture.url, "cover.png");
    assert!((texture.aspect() - 2.0).abs() < f32::EPSILON);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn loader_rooted_at_a_file_uses_its_directory() {
    let dir = scratch_dir("root");
    let config = dir.join("world.json");
    std::fs::write(&config, "{}").unwrap();

    let loader = FileAssetLoader::new(&config);
    assert_eq!(loader.root_path(), dir.as_path());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_texture_is_an_error() {
    let loader = FileAssetLoader::new(std::env::temp_dir());
    let result = block_on(loader.load_texture("definitely-not-here.png"));
    assert!(result.is_err());
}

#[test]
fn remote_urls_are_rejected() {
    let loader = FileAssetLoader::new(".");
    let result = block_on(loader.load_texture("https://cdn.example.com/cover.png"));
    assert!(matches!(result, Err(WorldError::AssetLoad { .. })));
}

// ============================================================================
// Fonts
// ============================================================================

#[test]
fn typeface_glyphs_become_shapes_with_holes() {
    let font = TypefaceFont::from_json(FONT_JSON).unwrap();
    assert_eq!(font.family_name, "Blocky");

    let shapes = font.generate_shapes("A A", 100.0);
    assert_eq!(shapes.len(), 2);
    assert!(shapes.iter().all(|s| s.holes.len() == 1));

    // second glyph advanced by two glyph widths plus a space: (800 + 300) / 10
    let second_x = shapes[1].outline.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    assert!((second_x - 110.0).abs() < 1e-3, "second glyph starts at {second_x}");
}

#[test]
fn missing_glyphs_are_skipped() {
    let font = TypefaceFont::from_json(FONT_JSON).unwrap();
    assert!(font.generate_shapes("zzz", 100.0).is_empty());
}

#[test]
fn fonts_load_from_disk() {
    let dir = scratch_dir("font");
    std::fs::write(dir.join("blocky.json"), FONT_JSON).unwrap();

    let loader = FileAssetLoader::new(&dir);
    let font = block_on(loader.load_font("blocky.json")).unwrap();
    assert_eq!(font.generate_shapes("A", 50.0).len(), 1);

    std::fs::write(dir.join("broken.json"), "{ not json").unwrap();
    assert!(matches!(block_on(loader.load_font("broken.json")), Err(WorldError::Json(_))));
    std::fs::remove_dir_all(dir).unwrap();
}
