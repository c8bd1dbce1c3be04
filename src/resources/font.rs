//! Fonts as shape generators.
//!
//! [`TypefaceFont`] reads the typeface JSON layout (`glyphs` with `ha`
//! advance and an `o` outline command string, plus `resolution`).

use std::fmt;

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::resources::primitives::shape::{Shape, ShapePath, contains, signed_area};

/// Turns text into closed 2D shapes, `size` being the em height.
pub trait Font: fmt::Debug {
    fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    #[serde(default)]
    pub ha: f32,
    /// Outline commands: `m x y`, `l x y`, `q x y cpx cpy`,
    /// `b x y cp1x cp1y cp2x cp2y`.
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypefaceFont {
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    pub resolution: f32,
    pub glyphs: FxHashMap<String, Glyph>,
}

impl TypefaceFont {
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn glyph_contours(glyph: &Glyph, scale: f32, offset: f32) -> Vec<Vec<Vec2>> {
        let Some(outline) = glyph.o.as_deref() else {
            return Vec::new();
        };

        let tokens: Vec<&str> = outline.split_whitespace().collect();
        let mut contours = Vec::new();
        let mut path = ShapePath::new();
        let mut started = false;
        let mut i = 0;

        let map = |x: f32, y: f32| (x * scale + offset, y * scale);
        while i < tokens.len() {
            let arity = match tokens[i] {
                "m" | "l" => 2,
                "q" => 4,
                "b" => 6,
                other => {
                    log::debug!("Skipping unknown glyph command '{other}'");
                    i += 1;
                    continue;
                }
            };
            let Some(args) = tokens
                .get(i + 1..=i + arity)
                .and_then(|raw| raw.iter().map(|t| t.parse::<f32>().ok()).collect::<Option<Vec<_>>>())
            else {
                log::warn!("Truncated glyph outline");
                break;
            };

            let (x, y) = map(args[0], args[1]);
            match tokens[i] {
                "m" => {
                    if started {
                        contours.push(path.points());
                    }
                    path.move_to(x, y);
                    started = true;
                }
                "l" => {
                    path.line_to(x, y);
                }
                "q" => {
                    let (cx, cy) = map(args[2], args[3]);
                    path.quadratic_curve_to(cx, cy, x, y);
                }
                _ => {
                    let (c1x, c1y) = map(args[2], args[3]);
                    let (c2x, c2y) = map(args[4], args[5]);
                    path.bezier_curve_to(c1x, c1y, c2x, c2y, x, y);
                }
            }
            i += arity + 1;
        }
        if started {
            contours.push(path.points());
        }
        contours.retain(|c| c.len() >= 3);
        contours
    }
}

impl Font for TypefaceFont {
    fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape> {
        let scale = size / self.resolution.max(1.0);
        let mut offset = 0.0;
        let mut contours = Vec::new();

        for ch in text.chars() {
            let key = ch.to_string();
            let glyph = self.glyphs.get(&key).or_else(|| self.glyphs.get("?"));
            let Some(glyph) = glyph else {
                log::warn!("Font '{}' has no glyph for {ch:?}", self.family_name);
                continue;
            };
            contours.extend(Self::glyph_contours(glyph, scale, offset));
            offset += glyph.ha * scale;
        }

        group_contours(contours)
    }
}

/// Contours wound like the first one are solids; the rest are holes of the
/// solid that contains them.
#[must_use]
pub fn group_contours(contours: Vec<Vec<Vec2>>) -> Vec<Shape> {
    let Some(first) = contours.first() else {
        return Vec::new();
    };
    let solid_sign = signed_area(first).signum();

    let mut shapes: Vec<Shape> = Vec::new();
    let mut holes = Vec::new();
    for contour in contours {
        if signed_area(&contour).signum() == solid_sign {
            shapes.push(Shape::new(contour));
        } else {
            holes.push(contour);
        }
    }

    for hole in holes {
        let probe = hole[0];
        match shapes.iter_mut().rev().find(|s| contains(&s.outline, probe)) {
            Some(shape) => shape.holes.push(hole),
            None => log::debug!("Dropping orphan hole contour with {} points", hole.len()),
        }
    }
    shapes
}
