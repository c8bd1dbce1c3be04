use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::compiler::AssetCache;
use crate::curves::{self, Curve, CurvePath};
use crate::descriptor::{Defaults, ObjectDescriptor, TypeHandler};
use crate::resources::primitives::{
    self, CylinderOptions, PlaneOptions, Polyhedron, SphereOptions, TubeOptions, heart_shape,
};
use crate::resources::{Geometry, GeometryKind, MaterialKind};

/// Geometry produced for one descriptor.
#[derive(Debug, Clone)]
pub enum BuiltGeometry {
    Mesh(Geometry),
    /// Several line strips drawn together (outlined text).
    Lines(Vec<Geometry>),
}

/// Parametric surfaces are sampled on a fixed grid.
const PARAMETRIC_SLICES: u32 = 8;
/// Em size passed to the font when generating text shapes.
const FONT_SIZE: f32 = 100.0;

/// Dispatches on the descriptor's geometry kind.
#[must_use]
pub fn build_geometry(descriptor: &ObjectDescriptor, defaults: &Defaults, assets: &AssetCache) -> BuiltGeometry {
    let size = descriptor.resolved_size(defaults);
    let segments = descriptor.resolved_segments(defaults);
    let (theta_start, theta_length) = descriptor.resolved_arc();
    let open_ended = descriptor.open_end.unwrap_or(false);

    let geometry = match descriptor.geometry_kind() {
        GeometryKind::Box => primitives::create_box(size[0], size[1], size[2]),
        GeometryKind::Sphere => primitives::create_sphere(&SphereOptions {
            radius: size[0],
            width_segments: segments,
            height_segments: segments,
        }),
        GeometryKind::Cone => {
            primitives::create_cone(size[0], size[1], segments, open_ended, theta_start, theta_length)
        }
        GeometryKind::Cylinder => primitives::create_cylinder(&CylinderOptions {
            radius_top: size[0] / 2.0,
            radius_bottom: size[0] / 2.0,
            height: size[1],
            radial_segments: segments,
            height_segments: segments,
            open_ended,
            theta_start,
            theta_length,
        }),
        GeometryKind::Circle => {
            primitives::create_circle(size[0] / 2.0, descriptor.segments.unwrap_or(32), theta_start, theta_length)
        }
        GeometryKind::Tube => {
            let path = tube_path(descriptor, size);
            primitives::create_tube(
                &path,
                &TubeOptions {
                    radius: size[0] / 2.0,
                    tubular_segments: segments,
                    radial_segments: (segments / 4).max(3),
                    closed: false,
                },
            )
        }
        GeometryKind::Lathe => {
            let profile = lathe_profile(descriptor, defaults, size);
            primitives::create_lathe(&profile, segments, 0.0, TAU)
        }
        GeometryKind::Plane => primitives::create_plane(&PlaneOptions {
            width: size[0],
            height: size[1],
            width_segments: segments,
            height_segments: segments,
        }),
        GeometryKind::Font => return build_text(descriptor, assets, size),
        GeometryKind::Heart => {
            let shape = heart_shape(Vec2::ZERO);
            match descriptor.extrude {
                Some(extrude) => primitives::create_extrude(&shape, extrude.depth, extrude.steps),
                None => primitives::create_shape(&[shape]),
            }
        }
        GeometryKind::Parametric => {
            let radius = size[0];
            match descriptor.parametric_handler.clone() {
                Some(handler) => primitives::create_parametric(
                    move |u, v| handler.sample(u, v, radius),
                    PARAMETRIC_SLICES,
                    PARAMETRIC_SLICES,
                ),
                None => {
                    let surface = parametric_surface(descriptor, defaults);
                    primitives::create_parametric(|u, v| surface(u, v, radius), PARAMETRIC_SLICES, PARAMETRIC_SLICES)
                }
            }
        }
        GeometryKind::Dodecahedron => primitives::create_polyhedron(Polyhedron::Dodecahedron, size[0] / 2.0),
        GeometryKind::Octahedron => primitives::create_polyhedron(Polyhedron::Octahedron, size[0]),
        GeometryKind::Icosahedron => primitives::create_polyhedron(Polyhedron::Icosahedron, size[0]),
        GeometryKind::Fallback(name) => {
            log::warn!(
                "Unknown geometry type '{name}' on '{}', using a box of size {size:?}",
                descriptor.display_name()
            );
            primitives::create_box(size[0], size[1], size[2])
        }
    };

    BuiltGeometry::Mesh(geometry)
}

/// Tube centre line: explicit path, then a runtime curve, then a straight
/// segment up the Y axis.
fn tube_path(descriptor: &ObjectDescriptor, size: [f32; 3]) -> CurvePath {
    if let Some(segments) = descriptor.path_segments() {
        return curves::build_curve_path(segments);
    }
    if let Some(handler) = &descriptor.curve_handler {
        return std::iter::once(Curve::Custom(handler.clone())).collect();
    }
    std::iter::once(Curve::Line(Vec3::ZERO, Vec3::new(0.0, size[1], 0.0))).collect()
}

fn lathe_profile(descriptor: &ObjectDescriptor, defaults: &Defaults, size: [f32; 3]) -> Vec<Vec2> {
    if let Some(segments) = descriptor.path_segments() {
        return curves::lathe_profile(segments);
    }
    let angle = match &descriptor.type_handler {
        Some(TypeHandler::Values(values)) if !values.is_empty() => values[0],
        Some(other) => {
            log::warn!("Lathe typeHandler {other:?} is not an angle list, using default");
            defaults.lathe_angle()
        }
        None => defaults.lathe_angle(),
    };
    curves::generated_lathe_profile(angle, size)
}

fn parametric_surface(descriptor: &ObjectDescriptor, defaults: &Defaults) -> fn(f32, f32, f32) -> Vec3 {
    let requested = match &descriptor.type_handler {
        Some(TypeHandler::Name(name)) => Some(name.as_str()),
        Some(TypeHandler::Values(_)) | None => {
            log::warn!("Parametric type needs a function or a handler name, using default");
            None
        }
    };

    requested
        .and_then(|name| {
            let surface = primitives::named_surface(name);
            if surface.is_none() {
                log::warn!("Unknown parametric handler '{name}', using default");
            }
            surface
        })
        .or_else(|| primitives::named_surface(&defaults.parametric_handler))
        .unwrap_or(|u, v, size| Vec3::new(u * size, v * size, 0.0))
}

/// Text from the configured font, centred horizontally. Outlined when the
/// material is `line`.
fn build_text(descriptor: &ObjectDescriptor, assets: &AssetCache, size: [f32; 3]) -> BuiltGeometry {
    let Some(font) = assets.font(descriptor.font.as_deref()) else {
        log::warn!("No font loaded for text '{}', using a box", descriptor.display_name());
        return BuiltGeometry::Mesh(primitives::create_box(size[0], size[1], size[2]));
    };

    let text = descriptor.title.as_deref().unwrap_or(descriptor.display_name());
    let shapes = font.generate_shapes(text, FONT_SIZE);

    let filled = primitives::create_shape(&shapes);
    let offset = filled
        .bounding_box()
        .map_or(Vec3::ZERO, |bb| Vec3::new(-bb.center().x, 0.0, 0.0));

    if descriptor.material_kind() == MaterialKind::Line {
        let lines = primitives::create_outlines(&shapes)
            .into_iter()
            .map(|mut g| {
                g.translate(offset);
                g
            })
            .collect();
        BuiltGeometry::Lines(lines)
    } else {
        let mut filled = filled;
        filled.translate(offset);
        filled.kind = "font".to_string();
        BuiltGeometry::Mesh(filled)
    }
}
