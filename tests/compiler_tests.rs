//! Descriptor Compiler Tests
//!
//! Tests for:
//! - Replication: `count` instances under one container, jittered positions
//! - Fallbacks: unknown geometry type compiles to a box, unknown material to basic
//! - Defaults: sizes, positions and material kind from the defaults table
//! - Children, rotation, animation binding and textures
//! - Text geometry from a font (filled and outlined)
//! - Fit-to-screen scale changes
//! - End-to-end: a plane plus a replicated group of boxes

use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

use albumworld::compiler::{DescriptorCompiler, FitOutcome, fit_on_screen};
use albumworld::descriptor::{ObjectDescriptor, PathSegment, SegmentKind};
use albumworld::resources::primitives::Shape;
use albumworld::resources::{Color, Font, MaterialKind, Texture, Topology};
use albumworld::scene::{Camera, Node, NodeKind, Scene, SceneManager};

const EPSILON: f32 = 1e-4;

fn compile_one(descriptor: &ObjectDescriptor) -> (Scene, albumworld::NodeKey) {
    let mut compiler = DescriptorCompiler::with_seed(7);
    let mut scene = Scene::new("test");
    let key = compiler.compile(descriptor, &mut scene);
    (scene, key)
}

fn geometry_kind(node: &Node) -> &str {
    node.geometry().map_or("", |g| g.kind.as_str())
}

/// One square glyph per character, 10 units apart.
#[derive(Debug)]
struct BlockFont;

impl Font for BlockFont {
    fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape> {
        text.chars()
            .enumerate()
            .map(|(i, _)| {
                let x = i as f32 * size;
                Shape::new(vec![
                    Vec2::new(x, 0.0),
                    Vec2::new(x + size * 0.8, 0.0),
                    Vec2::new(x + size * 0.8, size),
                    Vec2::new(x, size),
                ])
            })
            .collect()
    }
}

// ============================================================================
// Replication
// ============================================================================

#[test]
fn count_five_yields_five_distinct_instances() {
    let descriptor = ObjectDescriptor::new("box").with_name("crates").with_count(5);
    let (scene, key) = compile_one(&descriptor);

    let container = scene.get_node(key).unwrap();
    assert!(container.is_group());
    assert_eq!(container.children().len(), 5);

    let positions: Vec<Vec3> = container
        .children()
        .iter()
        .map(|&k| scene.get_node(k).unwrap().transform.position)
        .collect();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            assert_ne!(a, b, "replicated instances share a position");
        }
    }

    // jitter stays inside the count * 10 cube
    let half = 5.0 * 10.0 / 2.0;
    assert!(positions.iter().all(|p| p.abs().max_element() <= half));
}

#[test]
fn replicated_instances_are_deterministic_per_seed() {
    let descriptor = ObjectDescriptor::new("sphere").with_count(3);
    let (a, ka) = compile_one(&descriptor);
    let (b, kb) = compile_one(&descriptor);

    let pos = |scene: &Scene, key| -> Vec<Vec3> {
        scene
            .get_node(key)
            .unwrap()
            .children()
            .iter()
            .map(|&k| scene.get_node(k).unwrap().transform.position)
            .collect()
    };
    assert_eq!(pos(&a, ka), pos(&b, kb));
}

#[test]
fn count_one_is_a_plain_mesh() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("box").with_count(1));
    assert!(matches!(scene.get_node(key).unwrap().kind, NodeKind::Mesh(_)));
}

#[test]
fn replicated_container_carries_the_animation() {
    let descriptor = ObjectDescriptor::new("box").with_count(3).with_animation("spin");
    let (scene, key) = compile_one(&descriptor);

    let container = scene.get_node(key).unwrap();
    assert_eq!(container.animation.as_ref().map(|a| a.name()), Some("spin"));
    for &child in container.children() {
        assert!(scene.get_node(child).unwrap().animation.is_none());
    }
}

// ============================================================================
// Fallbacks and Defaults
// ============================================================================

#[test]
fn unknown_geometry_type_compiles_to_box() {
    let descriptor = ObjectDescriptor::new("dodecahedron-ish").with_size(&[10.0, 20.0, 30.0]);
    let (scene, key) = compile_one(&descriptor);
    let node = scene.get_node(key).unwrap();

    assert_eq!(geometry_kind(node), "box");
    let bb = node.geometry().unwrap().bounding_box().unwrap();
    assert_eq!(bb.size(), Vec3::new(10.0, 20.0, 30.0));
}

#[test]
fn missing_type_uses_default_box() {
    let (scene, key) = compile_one(&ObjectDescriptor::default());
    let node = scene.get_node(key).unwrap();
    assert_eq!(geometry_kind(node), "box");
    assert_eq!(node.material().unwrap().kind, MaterialKind::Wireframe);
    assert!(node.material().unwrap().wireframe_enabled());
}

#[test]
fn unknown_material_falls_back_to_opaque_basic() {
    let descriptor = ObjectDescriptor::new("box").with_material("velvet").with_color(0xFF0000);
    let (scene, key) = compile_one(&descriptor);
    let material = scene.get_node(key).unwrap().material().unwrap();
    assert_eq!(material.kind, MaterialKind::Basic);
    assert!(!material.transparent());
    assert_eq!(material.color, Color::from_hex(0xFF0000));
}

#[test]
fn named_materials_follow_their_presets() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("box").with_material("normal"));
    let normal = scene.get_node(key).unwrap().material().unwrap();
    assert!(normal.transparent());
    assert!(!normal.needs_update);

    let (scene, key) = compile_one(&ObjectDescriptor::new("box").with_material("basic"));
    let basic = scene.get_node(key).unwrap().material().unwrap();
    assert!(basic.transparent());
    assert_eq!(basic.color, Color::WHITE);
}

#[test]
fn plane_takes_default_size_and_position() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("plane"));
    let node = scene.get_node(key).unwrap();
    let params = node.geometry().unwrap().parameters;
    assert_eq!((params.width, params.height), (Some(1000.0), Some(1000.0)));
    assert_eq!(node.transform.position, Vec3::new(0.0, -500.0, 0.0));
}

#[test]
fn string_position_and_degree_rotation_resolve() {
    let descriptor: ObjectDescriptor =
        serde_json::from_str(r#"{"type": "box", "position": "1 2 3", "rotation": [90, 0, 0]}"#).unwrap();
    let (scene, key) = compile_one(&descriptor);
    let node = scene.get_node(key).unwrap();

    assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(node.transform.rotation.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), EPSILON));
}

#[test]
fn unknown_animation_leaves_node_unbound() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("box").with_animation("moonwalk"));
    assert!(scene.get_node(key).unwrap().animation.is_none());
}

#[test]
fn animation_type_wins_over_animation() {
    let mut descriptor = ObjectDescriptor::new("box").with_animation("spin");
    descriptor.animation_type = Some("pulse".to_string());
    let (scene, key) = compile_one(&descriptor);
    assert_eq!(scene.get_node(key).unwrap().animation.as_ref().map(|a| a.name()), Some("pulse"));
}

// ============================================================================
// Geometry Kinds
// ============================================================================

#[test]
fn tube_follows_its_path() {
    let descriptor = ObjectDescriptor::new("tube").with_path(vec![
        PathSegment::new(SegmentKind::Spline, 0.0, 0.0, 0.0),
        PathSegment::new(SegmentKind::Spline, 50.0, 50.0, 0.0),
        PathSegment::new(SegmentKind::Spline, 100.0, 0.0, 0.0),
    ]);
    let (scene, key) = compile_one(&descriptor);
    let geometry = scene.get_node(key).unwrap().geometry().unwrap();
    assert_eq!(geometry.kind, "tube");
    let bb = geometry.bounding_box().unwrap();
    assert!(bb.max.x > 95.0 && bb.min.x < 5.0);
}

#[test]
fn tube_accepts_a_runtime_curve() {
    let descriptor = ObjectDescriptor::new("tube").with_curve_handler(|t| Vec3::new(0.0, 0.0, t * 40.0));
    let (scene, key) = compile_one(&descriptor);
    let bb = scene.get_node(key).unwrap().geometry().unwrap().bounding_box().unwrap();
    assert!(bb.size().z > 39.0);
}

#[test]
fn every_builtin_kind_produces_vertices() {
    for kind in [
        "box", "sphere", "cone", "cylinder", "circle", "tube", "lathe", "plane", "heart", "parametric",
        "dodecahedron", "octahedron", "icosahedron",
    ] {
        let (scene, key) = compile_one(&ObjectDescriptor::new(kind));
        let node = scene.get_node(key).unwrap();
        let geometry = node.geometry().unwrap_or_else(|| panic!("{kind} has no geometry"));
        assert!(geometry.vertex_count() > 0, "{kind} produced no vertices");
    }
}

#[test]
fn parametric_handler_closure_is_sampled() {
    let descriptor = ObjectDescriptor::new("parametric")
        .with_parametric_handler(|u, v, size| Vec3::new(u * size, v * size, 0.0))
        .with_size(&[10.0]);
    let (scene, key) = compile_one(&descriptor);
    let bb = scene.get_node(key).unwrap().geometry().unwrap().bounding_box().unwrap();
    assert!((bb.size().x - 10.0).abs() < EPSILON);
    assert!((bb.size().y - 10.0).abs() < EPSILON);
}

#[test]
fn font_text_is_centred_horizontally() {
    let mut compiler = DescriptorCompiler::new();
    compiler.assets_mut().insert_font("block.json", Rc::new(BlockFont));

    let mut descriptor = ObjectDescriptor::new("font").with_material("normal");
    descriptor.title = Some("abc".to_string());

    let mut scene = Scene::new("text");
    let key = compiler.compile(&descriptor, &mut scene);
    let geometry = scene.get_node(key).unwrap().geometry().unwrap();
    assert_eq!(geometry.kind, "font");
    let bb = geometry.bounding_box().unwrap();
    assert!(bb.center().x.abs() < EPSILON);
}

#[test]
fn line_font_compiles_to_one_strip_per_glyph() {
    let mut compiler = DescriptorCompiler::new();
    compiler.assets_mut().insert_font("block.json", Rc::new(BlockFont));

    let mut descriptor = ObjectDescriptor::new("font").with_material("line").with_name("logo");
    descriptor.title = Some("hi".to_string());

    let mut scene = Scene::new("text");
    let key = compiler.compile(&descriptor, &mut scene);
    let group = scene.get_node(key).unwrap();
    assert!(group.is_group());
    assert_eq!(group.children().len(), 2);
    for &child in group.children() {
        let node = scene.get_node(child).unwrap();
        assert!(matches!(node.kind, NodeKind::Line(_)));
        assert_eq!(node.geometry().unwrap().topology, Topology::LineStrip);
    }
}

#[test]
fn font_without_loaded_font_falls_back_to_box() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("font"));
    assert_eq!(geometry_kind(scene.get_node(key).unwrap()), "box");
}

// ============================================================================
// Textures and Children
// ============================================================================

#[test]
fn preloaded_texture_is_attached() {
    let mut compiler = DescriptorCompiler::new();
    compiler.assets_mut().insert_texture(Texture::new("cover.png", 512, 256));

    let mut scene = Scene::new("textured");
    let key = compiler.compile(&ObjectDescriptor::new("plane").with_texture("cover.png"), &mut scene);
    let material = scene.get_node(key).unwrap().material().unwrap();
    assert_eq!(material.map.as_ref().map(|t| t.width), Some(512));
    assert!(material.transparent());
}

#[test]
fn missing_texture_compiles_untextured() {
    let (scene, key) = compile_one(&ObjectDescriptor::new("plane").with_texture("nowhere.png"));
    assert!(scene.get_node(key).unwrap().material().unwrap().map.is_none());
}

#[test]
fn children_nest_under_their_parent() {
    let descriptor = ObjectDescriptor::new("sphere")
        .with_name("sun")
        .with_child(ObjectDescriptor::new("sphere").with_name("planet").with_child(ObjectDescriptor::new("box").with_name("moon")));
    let (scene, key) = compile_one(&descriptor);

    assert_eq!(scene.top_level().len(), 1);
    let planet = scene.find_by_name("planet").unwrap();
    let moon = scene.find_by_name("moon").unwrap();
    assert_eq!(scene.get_node(planet).unwrap().parent(), Some(key));
    assert_eq!(scene.get_node(moon).unwrap().parent(), Some(planet));
}

// ============================================================================
// Fit To Screen
// ============================================================================

fn camera() -> Camera {
    let mut camera = Camera::new_perspective(60.0, 1.0, 0.01, 1000.0);
    camera.position = Vec3::new(0.0, 0.0, 200.0);
    camera
}

#[test]
fn fitting_mesh_needs_no_scale_change() {
    let (mut scene, key) = compile_one(&ObjectDescriptor::new("box").with_size(&[50.0, 50.0, 50.0]).with_position(Vec3::ZERO));
    let node = scene.get_node_mut(key).unwrap();
    let outcome = fit_on_screen(node, &camera());
    assert_eq!(
        outcome,
        FitOutcome::Fitted {
            scale_changes: 0,
            scale: 1.0
        }
    );
    assert_eq!(node.transform.scale, Vec3::ONE);
}

#[test]
fn mesh_twice_as_wide_needs_one_scale_change() {
    let visible = camera().visible_size_at(Vec3::ZERO);
    let descriptor = ObjectDescriptor::new("plane")
        .with_size(&[visible.x * 2.0, visible.y * 0.5])
        .with_position(Vec3::ZERO);
    let (mut scene, key) = compile_one(&descriptor);
    let node = scene.get_node_mut(key).unwrap();

    let outcome = fit_on_screen(node, &camera());
    assert_eq!(
        outcome,
        FitOutcome::Fitted {
            scale_changes: 1,
            scale: 0.5
        }
    );
    assert_eq!(node.transform.scale, Vec3::splat(0.5));
}

#[test]
fn fit_skips_geometry_without_extent() {
    let (mut scene, key) = compile_one(&ObjectDescriptor::new("tube"));
    let node = scene.get_node_mut(key).unwrap();
    assert_eq!(fit_on_screen(node, &camera()), FitOutcome::Skipped);
    assert_eq!(node.transform.scale, Vec3::ONE);
}

// ============================================================================
// End To End
// ============================================================================

#[test]
fn plane_and_group_of_three_boxes() {
    let descriptors = vec![
        ObjectDescriptor::new("plane").with_name("floor").with_size(&[10000.0, 10000.0]),
        ObjectDescriptor::new("box").with_name("crates").with_count(3),
    ];

    let mut manager = SceneManager::new();
    manager.create_scene("menu");
    manager.create_scene("main");

    let mut compiler = DescriptorCompiler::with_seed(42);
    let keys = compiler.compile_into(&mut manager, 1, &descriptors).unwrap();
    assert_eq!(keys.len(), 2);

    let scene = manager.scene_at(1).unwrap();
    assert_eq!(scene.top_level().len(), 2);

    let floor = scene.get_node(keys[0]).unwrap();
    assert_eq!(floor.name, "floor");
    assert_eq!(geometry_kind(floor), "plane");

    let crates = scene.get_node(keys[1]).unwrap();
    assert!(crates.is_group());
    assert_eq!(crates.children().len(), 3);
    assert!(crates.children().iter().all(|&k| geometry_kind(scene.get_node(k).unwrap()) == "box"));

    // menu scene untouched
    assert_eq!(manager.scene_at(0).unwrap().node_count(), 0);
}

#[test]
fn compile_into_missing_scene_fails() {
    let mut manager = SceneManager::new();
    let mut compiler = DescriptorCompiler::new();
    let result = compiler.compile_into(&mut manager, 3, &[ObjectDescriptor::new("box")]);
    assert!(matches!(result, Err(albumworld::WorldError::SceneNotFound(3))));
}
