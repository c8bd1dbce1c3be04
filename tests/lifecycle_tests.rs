//! World Lifecycle Tests
//!
//! Tests for:
//! - Lifecycle state machine: legal transitions, rejection, history
//! - Pipeline stage order with and without a sound configuration
//! - Single initialization per session (click trigger disarmed)
//! - Progress messages on the `world-message` topic
//! - Title rendering, preloader insertion and fade, scene switch
//! - A click while the title is still loading keeps the title out of the menu
//! - Texture preloading, asset failures and the empty-world error
//! - Frame-driven delays

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use glam::Vec2;

use albumworld::errors::WorldError;
use albumworld::resources::primitives::Shape;
use albumworld::resources::{Font, Texture};
use albumworld::world::{
    AssetLoader, AudioControllers, AudioInitializer, BUILDING_MESSAGE, Lifecycle, MessageBus, SilentAudio,
    SoundConfig, Stage, Timeouts, WORLD_MESSAGE, WorldConfig, WorldController,
};
use albumworld::{HeadlessRenderer, ObjectDescriptor};

const FRAME: Duration = Duration::from_millis(250);

/// Pipeline logs show up with `RUST_LOG=debug cargo test -- --nocapture`.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Test Collaborators
// ============================================================================

#[derive(Debug)]
struct BlockFont;

impl Font for BlockFont {
    fn generate_shapes(&self, text: &str, size: f32) -> Vec<Shape> {
        (0..text.len())
            .map(|i| {
                let x = i as f32 * size;
                Shape::new(vec![
                    Vec2::new(x, 0.0),
                    Vec2::new(x + size, 0.0),
                    Vec2::new(x + size, size),
                    Vec2::new(x, size),
                ])
            })
            .collect()
    }
}

/// Serves 800x600 textures; urls containing "missing" fail.
#[derive(Default)]
struct FakeLoader {
    requested: RefCell<Vec<String>>,
}

impl AssetLoader for FakeLoader {
    fn load_texture<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, albumworld::Result<Texture>> {
        self.requested.borrow_mut().push(url.to_string());
        let result = if url.contains("missing") {
            Err(WorldError::AssetLoad {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
        } else {
            Ok(Texture::new(url, 800, 600))
        };
        futures::future::ready(result).boxed_local()
    }

    fn load_font<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, albumworld::Result<Rc<dyn Font>>> {
        self.requested.borrow_mut().push(url.to_string());
        futures::future::ready(Ok(Rc::new(BlockFont) as Rc<dyn Font>)).boxed_local()
    }
}

/// Audio that resolves only once the test opens the gate.
struct GatedAudio {
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl GatedAudio {
    fn new() -> (Rc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Rc::new(Self {
                gate: RefCell::new(Some(rx)),
            }),
            tx,
        )
    }
}

impl AudioInitializer for GatedAudio {
    fn initialize<'a>(&'a self, sounds: &'a SoundConfig) -> LocalBoxFuture<'a, albumworld::Result<AudioControllers>> {
        let gate = self.gate.borrow_mut().take();
        async move {
            if let Some(gate) = gate {
                gate.await?;
            }
            let silent = SilentAudio;
            silent.initialize(sounds).await
        }
        .boxed_local()
    }
}

/// Textures that resolve only once the test opens the gate.
struct GatedLoader {
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl GatedLoader {
    fn new() -> (Rc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Rc::new(Self {
                gate: RefCell::new(Some(rx)),
            }),
            tx,
        )
    }
}

impl AssetLoader for GatedLoader {
    fn load_texture<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, albumworld::Result<Texture>> {
        let gate = self.gate.borrow_mut().take();
        async move {
            if let Some(gate) = gate {
                gate.await?;
            }
            Ok(Texture::new(url, 800, 600))
        }
        .boxed_local()
    }

    fn load_font<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, albumworld::Result<Rc<dyn Font>>> {
        futures::future::ready(Ok(Rc::new(BlockFont) as Rc<dyn Font>)).boxed_local()
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    pool: LocalPool,
    world: WorldController<HeadlessRenderer>,
    loader: Rc<FakeLoader>,
    messages: Rc<RefCell<Vec<String>>>,
    outcome: Rc<RefCell<Option<albumworld::Result<()>>>>,
}

impl Harness {
    fn new(config: WorldConfig) -> Self {
        Self::with_audio(config, Rc::new(SilentAudio))
    }

    fn with_audio(config: WorldConfig, audio: Rc<dyn AudioInitializer>) -> Self {
        init_logging();
        let bus = MessageBus::new();
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);
        bus.subscribe(WORLD_MESSAGE, move |msg| sink.borrow_mut().push(msg.message.clone()));

        let loader = Rc::new(FakeLoader::default());
        let world = WorldController::new(config, bus, audio, loader.clone(), HeadlessRenderer::default());
        Self {
            pool: LocalPool::new(),
            world,
            loader,
            messages,
            outcome: Rc::new(RefCell::new(None)),
        }
    }

    fn start(&mut self) {
        self.pool.run_until(self.world.start()).expect("menu renders");
    }

    /// Clicks and polls the pipeline until it waits. Returns whether the
    /// click started anything.
    fn click(&mut self) -> bool {
        let Some(pipeline) = self.world.handle_click() else {
            return false;
        };
        let outcome = Rc::clone(&self.outcome);
        self.pool
            .spawner()
            .spawn_local(pipeline.map(move |r| *outcome.borrow_mut() = Some(r)))
            .unwrap();
        self.pool.run_until_stalled();
        true
    }

    fn frames(&mut self, count: u32) {
        for _ in 0..count {
            self.world.frame(FRAME);
            self.pool.run_until_stalled();
        }
    }

    fn finished_ok(&self) -> bool {
        matches!(*self.outcome.borrow(), Some(Ok(())))
    }
}

fn world_config(json: &str) -> WorldConfig {
    WorldConfig::from_json(json).expect("test config parses")
}

fn simple_config() -> WorldConfig {
    world_config(
        r#"{
            "worldObjects": [
                { "type": "plane", "name": "floor", "size": [10000, 10000] },
                { "type": "box", "name": "crates", "count": 3 }
            ],
            "transition": { "fadeMs": 1000 }
        }"#,
    )
}

// ============================================================================
// State Machine
// ============================================================================

#[test]
fn lifecycle_accepts_pipeline_order() {
    let mut lifecycle = Lifecycle::new();
    for stage in [
        Stage::Preloading,
        Stage::LoadingAudio,
        Stage::BuildingScene,
        Stage::Transitioning,
        Stage::Active,
    ] {
        lifecycle.advance(stage).unwrap();
    }
    assert!(lifecycle.is_active());
    assert_eq!(lifecycle.history().len(), 6);
}

#[test]
fn lifecycle_rejects_skips_and_restarts() {
    let mut lifecycle = Lifecycle::new();
    assert!(matches!(
        lifecycle.advance(Stage::Active),
        Err(WorldError::InvalidTransition {
            from: Stage::Idle,
            to: Stage::Active
        })
    ));
    lifecycle.advance(Stage::Preloading).unwrap();
    assert!(lifecycle.advance(Stage::Preloading).is_err());
    assert!(lifecycle.advance(Stage::Idle).is_err());
    assert_eq!(lifecycle.history(), &[Stage::Idle, Stage::Preloading]);
}

#[test]
fn audio_stage_is_optional() {
    let mut lifecycle = Lifecycle::new();
    lifecycle.advance(Stage::Preloading).unwrap();
    lifecycle.advance(Stage::BuildingScene).unwrap();
    assert!(!Stage::BuildingScene.can_advance_to(Stage::LoadingAudio));
}

// ============================================================================
// Pipeline Order
// ============================================================================

#[test]
fn pipeline_without_sounds_skips_loading_audio() {
    let mut h = Harness::new(simple_config());
    h.start();
    assert!(h.click());
    assert_eq!(h.world.stage(), Stage::Transitioning);

    h.frames(5);
    assert_eq!(h.world.stage(), Stage::Active);
    assert!(h.finished_ok());
    assert_eq!(
        h.world.state().lifecycle.history(),
        &[
            Stage::Idle,
            Stage::Preloading,
            Stage::BuildingScene,
            Stage::Transitioning,
            Stage::Active
        ]
    );
}

#[test]
fn pipeline_with_sounds_waits_for_audio() {
    let mut config = simple_config();
    config.sounds = Some(SoundConfig {
        tracks: vec!["intro.ogg".to_string()],
        ..Default::default()
    });
    let (audio, gate) = GatedAudio::new();
    let mut h = Harness::with_audio(config, audio);
    h.start();
    h.click();

    assert_eq!(h.world.stage(), Stage::LoadingAudio);
    assert!(h.world.state().world_scene.is_none(), "world compiled before audio resolved");
    h.frames(10);
    assert_eq!(h.world.stage(), Stage::LoadingAudio);

    gate.send(()).unwrap();
    h.pool.run_until_stalled();
    assert_eq!(h.world.stage(), Stage::Transitioning);
    assert_eq!(h.world.state().audio.as_ref().map(|a| a.tracks.len()), Some(1));

    h.frames(5);
    assert_eq!(
        h.world.state().lifecycle.history(),
        &[
            Stage::Idle,
            Stage::Preloading,
            Stage::LoadingAudio,
            Stage::BuildingScene,
            Stage::Transitioning,
            Stage::Active
        ]
    );
}

#[test]
fn empty_track_list_counts_as_no_sounds() {
    let mut config = simple_config();
    config.sounds = Some(SoundConfig::default());
    let mut h = Harness::new(config);
    h.click();
    assert!(!h.world.state().lifecycle.history().contains(&Stage::LoadingAudio));
}

// ============================================================================
// Single Run Per Session
// ============================================================================

#[test]
fn second_click_is_ignored() {
    let mut h = Harness::new(simple_config());
    h.start();
    assert!(h.world.state().is_armed());
    assert!(h.click());
    assert!(!h.world.state().is_armed());
    assert!(!h.click());
    h.frames(5);
    assert!(!h.click());

    let history = h.world.state().lifecycle.history().to_vec();
    assert_eq!(history.iter().filter(|s| **s == Stage::Preloading).count(), 1);
    assert_eq!(h.world.state().scenes.len(), 2);
}

#[test]
fn direct_init_after_start_fails() {
    let mut h = Harness::new(simple_config());
    h.click();
    let again = h.pool.run_until(h.world.init_world());
    assert!(matches!(again, Err(WorldError::InvalidTransition { .. })));
}

// ============================================================================
// Scenes and Messages
// ============================================================================

#[test]
fn progress_messages_in_order() {
    let mut h = Harness::new(simple_config());
    h.start();
    h.click();
    h.frames(5);

    assert_eq!(
        *h.messages.borrow(),
        vec![
            "click the screen to start.".to_string(),
            BUILDING_MESSAGE.to_string(),
            String::new()
        ]
    );
}

#[test]
fn menu_stays_active_until_delay_elapses() {
    let mut h = Harness::new(simple_config());
    h.start();
    h.click();

    // 1000 ms fade at 250 ms per frame
    h.frames(3);
    assert_eq!(h.world.state().scenes.active_index(), Some(0));
    assert_eq!(h.world.backend().last_frame.as_ref().unwrap().scene, "menu");

    h.frames(2);
    assert_eq!(h.world.state().scenes.active_index(), Some(1));
    assert_eq!(h.world.backend().last_frame.as_ref().unwrap().scene, "main");
}

#[test]
fn world_scene_holds_the_compiled_objects() {
    let mut h = Harness::new(simple_config());
    h.click();
    h.frames(5);

    let state = h.world.state();
    let scene = state.scenes.scene_at(1).unwrap();
    assert_eq!(scene.name, "main");
    assert_eq!(scene.top_level().len(), 2);
    let crates = scene.find_top_level("crates").unwrap();
    assert_eq!(scene.get_node(crates).unwrap().children().len(), 3);
}

#[test]
fn preloader_replaces_title_and_fades() {
    let mut config = simple_config();
    config.menu.title = Some("cover.png".to_string());
    let mut h = Harness::new(config);
    h.start();

    {
        let state = h.world.state();
        let menu = state.scenes.scene_at(0).unwrap();
        let title = menu.get_node(menu.find_top_level("title").unwrap()).unwrap();
        let material = title.material().unwrap();
        assert_eq!(material.map.as_ref().map(|t| t.url.as_str()), Some("cover.png"));
        let params = title.geometry().unwrap().parameters;
        assert_eq!((params.width, params.height), (Some(800.0), Some(600.0)));
        // 800x600 does not fit 200 units from the camera
        assert!(title.transform.scale.x < 1.0);
    }

    h.click();
    let state = h.world.state();
    let menu = state.scenes.scene_at(0).unwrap();
    assert!(menu.find_top_level("title").is_none());
    let preloader = menu.get_node(menu.find_top_level("preloader").unwrap()).unwrap();
    assert_eq!(preloader.animation.as_ref().map(|a| a.name()), Some("fade"));
}

#[test]
fn click_during_title_load_drops_the_title() {
    init_logging();
    let mut config = simple_config();
    config.menu.title = Some("cover.png".to_string());
    let (loader, gate) = GatedLoader::new();
    let mut world = WorldController::new(
        config,
        MessageBus::new(),
        Rc::new(SilentAudio),
        loader,
        HeadlessRenderer::default(),
    );
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let started = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&started);
    spawner
        .spawn_local(world.start().map(move |r| *sink.borrow_mut() = Some(r)))
        .unwrap();
    pool.run_until_stalled();
    assert!(started.borrow().is_none(), "title load should be pending");

    let pipeline = world.handle_click().expect("first click starts the pipeline");
    spawner.spawn_local(pipeline.map(|r| r.unwrap())).unwrap();
    pool.run_until_stalled();
    assert_eq!(world.stage(), Stage::Transitioning);

    gate.send(()).unwrap();
    pool.run_until_stalled();
    assert!(matches!(*started.borrow(), Some(Ok(()))));

    let state = world.state();
    let menu = state.scenes.scene_at(0).unwrap();
    assert!(menu.find_top_level("title").is_none());
    assert!(menu.find_top_level("preloader").is_some());
}

#[test]
fn preloader_is_transparent_when_world_activates() {
    let mut h = Harness::new(simple_config());
    h.start();
    h.click();

    let preloader_opacity = |h: &Harness| {
        let state = h.world.state();
        let menu = state.scenes.scene_at(0).unwrap();
        let key = menu.find_top_level("preloader").unwrap();
        menu.get_node(key).unwrap().material().unwrap().opacity
    };

    // 1000 ms fade at 250 ms per frame
    h.frames(2);
    assert!((preloader_opacity(&h) - 0.5).abs() < 1e-4);
    assert_eq!(h.world.stage(), Stage::Transitioning);

    h.frames(2);
    assert_eq!(h.world.stage(), Stage::Active);
    assert!(preloader_opacity(&h).abs() < 1e-4);
}

#[test]
fn text_title_uses_menu_font() {
    let config = world_config(
        r#"{
            "menu": { "title": "Night Drive", "font": "fonts/helvetiker.json" },
            "worldObjects": [ { "type": "box" } ]
        }"#,
    );
    let mut h = Harness::new(config);
    h.start();

    assert_eq!(*h.loader.requested.borrow(), vec!["fonts/helvetiker.json".to_string()]);
    let state = h.world.state();
    let menu = state.scenes.scene_at(0).unwrap();
    let title = menu.get_node(menu.find_top_level("title").unwrap()).unwrap();
    assert_eq!(title.geometry().unwrap().kind, "font");
}

#[test]
fn world_fog_is_applied() {
    let mut config = simple_config();
    config.fog = Some(albumworld::scene::FogDescriptor::default());
    let mut h = Harness::new(config);
    h.click();
    let state = h.world.state();
    assert!(state.scenes.scene_at(1).unwrap().fog.is_some());
    assert!(state.scenes.scene_at(0).unwrap().fog.is_none());
}

// ============================================================================
// Assets and Failures
// ============================================================================

#[test]
fn nested_textures_are_preloaded_once() {
    let config = world_config(
        r#"{
            "worldObjects": [
                { "type": "plane", "material": "basic", "texture": "wood.jpg",
                  "children": [ { "type": "box", "texture": "wood.jpg" }, { "type": "box", "texture": "rust.png" } ] }
            ]
        }"#,
    );
    let mut h = Harness::new(config);
    h.click();

    assert_eq!(*h.loader.requested.borrow(), vec!["wood.jpg".to_string(), "rust.png".to_string()]);
    let state = h.world.state();
    let scene = state.scenes.scene_at(1).unwrap();
    let plane = scene.get_node(scene.top_level()[0]).unwrap();
    assert!(plane.material().unwrap().map.is_some());
}

#[test]
fn failed_asset_load_stops_the_pipeline() {
    let config = world_config(r#"{ "worldObjects": [ { "type": "plane", "texture": "missing.png" } ] }"#);
    let mut h = Harness::new(config);
    h.click();

    assert!(matches!(*h.outcome.borrow(), Some(Err(WorldError::AssetLoad { .. }))));
    assert_eq!(h.world.stage(), Stage::BuildingScene);
    assert_eq!(h.world.state().scenes.len(), 1);
}

#[test]
fn empty_world_reports_error() {
    let mut h = Harness::new(WorldConfig::default());
    h.start();
    h.click();

    assert!(matches!(*h.outcome.borrow(), Some(Err(WorldError::EmptyWorld))));
    assert_eq!(h.world.stage(), Stage::BuildingScene);
    let last = h.messages.borrow().last().cloned().unwrap();
    assert_eq!(last, WorldError::EmptyWorld.to_string());

    // frames keep running on the menu scene
    h.frames(3);
    assert_eq!(h.world.backend().last_frame.as_ref().unwrap().scene, "menu");
}

// ============================================================================
// Timeouts
// ============================================================================

#[test]
fn timeouts_fire_when_clock_reaches_deadline() {
    let timeouts = Timeouts::new();
    let mut rx = timeouts.after(Duration::from_millis(500));
    assert_eq!(timeouts.pending(), 1);

    timeouts.advance(Duration::from_millis(499));
    assert_eq!(rx.try_recv(), Ok(None));

    timeouts.advance(Duration::from_millis(500));
    assert_eq!(rx.try_recv(), Ok(Some(())));
    assert_eq!(timeouts.pending(), 0);
}

#[test]
fn clock_never_runs_backwards() {
    let timeouts = Timeouts::new();
    timeouts.advance(Duration::from_secs(5));
    timeouts.advance(Duration::from_secs(1));
    assert_eq!(timeouts.now(), Duration::from_secs(5));
}

#[test]
fn frame_counts_and_clock_advance() {
    let mut h = Harness::new(simple_config());
    h.frames(4);
    assert_eq!(h.world.backend().frames_rendered, 4);
    assert_eq!(h.world.state().clock.elapsed, FRAME * 4);
    assert!(h.world.backend().settings.is_some());
}

#[test]
fn descriptor_builders_feed_config() {
    let mut config = WorldConfig::default();
    config.world_objects.push(ObjectDescriptor::new("sphere").with_name("moon"));
    config.transition.fade_ms = 0;
    let mut h = Harness::new(config);
    h.click();
    h.frames(1);
    assert_eq!(h.world.stage(), Stage::Active);
}
