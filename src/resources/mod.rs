//! Core Resources
//!
//! CPU-side data a render backend consumes, independent of any GPU API:
//! - Geometry: vertex buffers plus the planar extent used for fitting
//! - Material: surface kind, color, opacity, texture map, refresh flag
//! - Texture: image identity and natural size
//! - Font: text to 2D shapes
//! - Primitives: procedural geometry generators

pub mod color;
pub mod font;
pub mod geometry;
pub mod material;
pub mod primitives;
pub mod texture;

pub use color::Color;
pub use font::{Font, TypefaceFont};
pub use geometry::{BoundingBox, BoundingSphere, Geometry, GeometryKind, GeometryParameters, Topology};
pub use material::{Material, MaterialFlags, MaterialKind};
pub use texture::Texture;
