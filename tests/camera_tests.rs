//! Camera, Fog & Renderer Configuration Tests
//!
//! Tests for:
//! - Camera setup from descriptors (defaults, naming, unknown types)
//! - Visible extent at depth and resize handling
//! - Fog setup
//! - Renderer settings resolution and the headless backend

use glam::{Vec2, Vec3};

use albumworld::render::{DEFAULT_CLEAR_COLOR, HeadlessRenderer, RenderBackend, RendererDescriptor, setup_renderer};
use albumworld::resources::{Color, Material, primitives::create_box};
use albumworld::scene::{Camera, CameraDescriptor, CameraRegistry, Fog, FogDescriptor, Node, Projection, Scene, setup_fog};
use albumworld::world::Viewport;

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Camera Setup
// ============================================================================

#[test]
fn default_camera_is_perspective_main() {
    let mut cameras = CameraRegistry::new();
    let index = cameras.setup_camera(&CameraDescriptor::default(), (1280.0, 720.0));
    let camera = cameras.get(index).unwrap();

    assert_eq!(camera.name, "main");
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 200.0));
    assert!(approx(camera.near, 0.01));
    assert!(approx(camera.far, 1000.0));
    match camera.projection {
        Projection::Perspective { fov, aspect } => {
            assert!(approx(fov, 60.0));
            assert!(approx(aspect, 1280.0 / 720.0));
        }
        Projection::Orthographic { .. } => panic!("expected a perspective camera"),
    }
}

#[test]
fn later_cameras_are_numbered() {
    let mut cameras = CameraRegistry::new();
    cameras.setup_camera(&CameraDescriptor::default(), (800.0, 600.0));
    cameras.setup_camera(&CameraDescriptor::default(), (800.0, 600.0));
    cameras.setup_camera(&CameraDescriptor::default(), (800.0, 600.0));
    let names: Vec<&str> = cameras.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["main", "cam_1", "cam_2"]);
    assert_eq!(cameras.active().unwrap().name, "main");
}

#[test]
fn unknown_camera_type_falls_back_to_perspective() {
    let mut cameras = CameraRegistry::new();
    let descriptor = CameraDescriptor {
        kind: Some("fisheye".to_string()),
        ..Default::default()
    };
    let index = cameras.setup_camera(&descriptor, (100.0, 100.0));
    assert!(matches!(cameras.get(index).unwrap().projection, Projection::Perspective { .. }));
}

#[test]
fn orthographic_camera_uses_viewport_extent() {
    let mut cameras = CameraRegistry::new();
    let descriptor = CameraDescriptor {
        kind: Some("orthographic".to_string()),
        ..Default::default()
    };
    let index = cameras.setup_camera(&descriptor, (640.0, 480.0));
    let camera = cameras.get(index).unwrap();
    assert_eq!(camera.visible_size_at_depth(1234.0), Vec2::new(640.0, 480.0));
}

// ============================================================================
// Visible Extent
// ============================================================================

#[test]
fn visible_height_grows_with_depth() {
    let mut camera = Camera::new_perspective(90.0, 2.0, 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 0.0, 100.0);

    // tan(45deg) == 1, so height == 2 * depth
    let size = camera.visible_size_at(Vec3::ZERO);
    assert!(approx(size.y, 200.0));
    assert!(approx(size.x, 400.0));

    let closer = camera.visible_size_at(Vec3::new(0.0, 0.0, 50.0));
    assert!(approx(closer.y, 100.0));
}

#[test]
fn resize_updates_aspect() {
    let mut cameras = CameraRegistry::new();
    cameras.setup_camera(&CameraDescriptor::default(), (1280.0, 720.0));
    cameras.resize(500.0, 500.0);
    let Projection::Perspective { aspect, .. } = cameras.active().unwrap().projection else {
        panic!("expected perspective");
    };
    assert!(approx(aspect, 1.0));

    let before = *cameras.active().unwrap().projection_matrix();
    cameras.resize(1000.0, 0.0);
    assert_eq!(*cameras.active().unwrap().projection_matrix(), before);
}

#[test]
fn set_aspect_changes_projection_matrix() {
    let mut camera = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    let before = *camera.projection_matrix();
    camera.set_aspect(2.0);
    assert_ne!(*camera.projection_matrix(), before);
}

// ============================================================================
// Fog
// ============================================================================

#[test]
fn linear_fog_ramps_between_near_and_far() {
    let fog = setup_fog(&FogDescriptor {
        near: 100.0,
        far: 200.0,
        ..Default::default()
    });
    assert!(matches!(fog, Fog::Linear { .. }));
    assert!(approx(fog.factor(50.0), 0.0));
    assert!(approx(fog.factor(150.0), 0.5));
    assert!(approx(fog.factor(500.0), 1.0));
    assert_eq!(fog.color(), Color::WHITE);
}

#[test]
fn exponential_fog_from_json() {
    let descriptor: FogDescriptor =
        serde_json::from_str(r#"{ "type": "exp2", "color": 16711680, "density": 0.01 }"#).unwrap();
    let fog = setup_fog(&descriptor);
    assert!(matches!(fog, Fog::Exponential { .. }));
    assert_eq!(fog.color(), Color::from_hex(0xFF0000));
    assert!(fog.factor(0.0).abs() < EPSILON);
    assert!(fog.factor(1000.0) > 0.99);
}

// ============================================================================
// Renderer
// ============================================================================

#[test]
fn renderer_defaults_to_blue_clear_color() {
    let settings = setup_renderer(&RendererDescriptor::default(), Viewport::default());
    assert_eq!(settings.clear_color.to_hex(), DEFAULT_CLEAR_COLOR);
    assert_eq!(settings.physical_size(), (1280, 720));
}

#[test]
fn renderer_descriptor_overrides_viewport() {
    let descriptor: RendererDescriptor =
        serde_json::from_str(r#"{ "color": "black", "width": 400, "pixelRatio": 2 }"#).unwrap();
    let settings = setup_renderer(&descriptor, Viewport::default());
    assert_eq!(settings.clear_color, Color::BLACK);
    assert_eq!(settings.physical_size(), (800, 1440));
}

#[test]
fn headless_renderer_counts_drawables() {
    let mut scene = Scene::new("stage");
    let group = scene.add_node(Node::group("g"));
    scene.add_to_parent(Node::mesh("a", create_box(1.0, 1.0, 1.0), Material::default()), group);
    let mut hidden = Node::mesh("b", create_box(1.0, 1.0, 1.0), Material::default());
    hidden.visible = false;
    scene.add_node(hidden);

    let mut backend = HeadlessRenderer::default();
    backend.configure(&setup_renderer(&RendererDescriptor::default(), Viewport::default()));
    backend.render(&scene, &Camera::new_perspective(60.0, 1.0, 0.1, 100.0));

    let frame = backend.last_frame.unwrap();
    assert_eq!(frame.scene, "stage");
    assert_eq!(frame.drawables, 1);
    assert_eq!(backend.frames_rendered, 1);
}
