use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::animation::AnimationDispatcher;
use crate::animation::library::fade_over;
use crate::compiler::{DEFAULT_SEED, DescriptorCompiler, fit_on_screen};
use crate::descriptor::ObjectDescriptor;
use crate::errors::{Result, WorldError};
use crate::render::{RenderBackend, RendererSettings, setup_renderer};
use crate::resources::GeometryKind;
use crate::resources::texture::is_image_url;
use crate::scene::{CameraRegistry, Fog, NodeKey, SceneManager, setup_fog};
use crate::utils::FrameClock;
use crate::world::bus::{MessageBus, ProgressMessage, WORLD_MESSAGE};
use crate::world::collaborators::{AssetLoader, AudioControllers, AudioInitializer};
use crate::world::config::WorldConfig;
use crate::world::lifecycle::{Lifecycle, Stage};
use crate::world::timeouts::Timeouts;

/// Progress text shown while the world scene is being compiled.
pub const BUILDING_MESSAGE: &str = "building world. please wait";

/// Name of the menu scene (creation index 0).
pub const MENU_SCENE: &str = "menu";
/// Name of the world scene (creation index 1).
pub const WORLD_SCENE: &str = "main";

pub const TITLE_NODE: &str = "title";
pub const PRELOADER_NODE: &str = "preloader";

/// Everything the pipeline and the render loop share.
pub struct WorldState {
    pub scenes: SceneManager,
    pub cameras: CameraRegistry,
    pub compiler: DescriptorCompiler,
    pub dispatcher: AnimationDispatcher,
    pub lifecycle: Lifecycle,
    pub clock: FrameClock,
    pub renderer: RendererSettings,
    pub fog: Option<Fog>,
    pub audio: Option<AudioControllers>,
    pub preloader: Option<NodeKey>,
    /// Creation index of the compiled world scene.
    pub world_scene: Option<usize>,
    armed: bool,
}

impl WorldState {
    /// Whether a click would still start the pipeline.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Handles cloned into pipeline futures so they can outlive the borrow of
/// the controller.
#[derive(Clone)]
struct Shared {
    state: Rc<RefCell<WorldState>>,
    config: Rc<WorldConfig>,
    bus: MessageBus,
    timeouts: Timeouts,
    audio: Rc<dyn AudioInitializer>,
    loader: Rc<dyn AssetLoader>,
}

/// Orchestrates the menu, the one-shot world initialization pipeline, and
/// the per-frame loop.
///
/// ```rust,ignore
/// let mut world = WorldController::new(config, bus, audio, loader, HeadlessRenderer::default());
/// pool.run_until(world.start())?;
/// if let Some(pipeline) = world.handle_click() {
///     spawner.spawn_local(pipeline.map(|r| r.unwrap_or_else(|e| log::error!("{e}"))))?;
/// }
/// loop {
///     world.frame(Duration::from_millis(16));
///     pool.run_until_stalled();
/// }
/// ```
pub struct WorldController<B: RenderBackend> {
    shared: Shared,
    backend: B,
}

impl<B: RenderBackend> WorldController<B> {
    pub fn new(
        config: WorldConfig,
        bus: MessageBus,
        audio: Rc<dyn AudioInitializer>,
        loader: Rc<dyn AssetLoader>,
        mut backend: B,
    ) -> Self {
        let viewport = config.viewport;

        let mut cameras = CameraRegistry::new();
        cameras.setup_camera(&config.camera, (viewport.width, viewport.height));

        let renderer = setup_renderer(&config.renderer, viewport);
        backend.configure(&renderer);

        let mut scenes = SceneManager::new();
        scenes.create_scene(MENU_SCENE);

        let state = WorldState {
            scenes,
            cameras,
            compiler: DescriptorCompiler::with_seed(config.seed.unwrap_or(DEFAULT_SEED)),
            dispatcher: AnimationDispatcher::new(),
            lifecycle: Lifecycle::new(),
            clock: FrameClock::new(),
            renderer,
            fog: config.fog.as_ref().map(setup_fog),
            audio: None,
            preloader: None,
            world_scene: None,
            armed: true,
        };

        Self {
            shared: Shared {
                state: Rc::new(RefCell::new(state)),
                config: Rc::new(config),
                bus,
                timeouts: Timeouts::new(),
                audio,
                loader,
            },
            backend,
        }
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, WorldState> {
        self.shared.state.borrow()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.shared.state.borrow().lifecycle.stage()
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn bus(&self) -> &MessageBus {
        &self.shared.bus
    }

    #[must_use]
    pub fn timeouts(&self) -> &Timeouts {
        &self.shared.timeouts
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Renders the menu title into the menu scene and publishes the start
    /// prompt.
    pub fn start(&self) -> LocalBoxFuture<'static, Result<()>> {
        let shared = self.shared.clone();
        async move { shared.start().await }.boxed_local()
    }

    /// Canvas click. Returns the initialization pipeline on the first click
    /// only; the trigger is disarmed before the pipeline is handed out.
    pub fn handle_click(&self) -> Option<LocalBoxFuture<'static, Result<()>>> {
        {
            let mut state = self.shared.state.borrow_mut();
            if !state.armed {
                log::debug!("Click ignored: world already initializing");
                return None;
            }
            state.armed = false;
        }
        Some(self.init_world())
    }

    /// The initialization pipeline. Fails with
    /// [`WorldError::InvalidTransition`] if the world has already started.
    pub fn init_world(&self) -> LocalBoxFuture<'static, Result<()>> {
        let shared = self.shared.clone();
        async move { shared.init_world().await }.boxed_local()
    }

    /// One render-loop step: clock, due delays, animations, matrices, draw.
    pub fn frame(&mut self, delta: Duration) {
        let now = {
            let mut state = self.shared.state.borrow_mut();
            state.clock.tick_with(delta);
            state.clock.elapsed
        };
        self.shared.timeouts.advance(now);

        let mut state = self.shared.state.borrow_mut();
        let WorldState {
            scenes,
            cameras,
            dispatcher,
            clock,
            ..
        } = &mut *state;

        let Some(scene) = scenes.active_scene_mut() else {
            return;
        };
        dispatcher.tick(scene, clock.elapsed_seconds());
        scene.update_matrix_world();

        match cameras.active() {
            Some(camera) => self.backend.render(scene, camera),
            None => log::warn!("No active camera, frame {} not rendered", clock.frame_count),
        }
    }

    /// Viewport resize: camera aspect and renderer size.
    pub fn resize(&mut self, width: f32, height: f32) {
        let mut state = self.shared.state.borrow_mut();
        state.cameras.resize(width, height);
        state.renderer.width = width;
        state.renderer.height = height;
        self.backend.configure(&state.renderer);
    }
}

impl Shared {
    fn emit(&self, message: impl Into<String>) {
        self.bus.emit(WORLD_MESSAGE, &ProgressMessage::new(message));
    }

    async fn start(&self) -> Result<()> {
        if self.state.borrow().lifecycle.has_started() {
            log::warn!("start() called after the world began initializing");
            return Ok(());
        }

        let title = self.title_descriptor().await?;
        // A click may have landed while the title was loading.
        if self.state.borrow().lifecycle.has_started() {
            log::info!("Preloading began before the title loaded; dropping the title");
            return Ok(());
        }

        if let Some(descriptor) = title {
            let mut state = self.state.borrow_mut();
            let WorldState {
                scenes,
                cameras,
                compiler,
                ..
            } = &mut *state;
            let menu = scenes.scene_at_mut(0).ok_or(WorldError::SceneNotFound(0))?;
            let key = compiler.compile(&descriptor, menu);
            if let (Some(node), Some(camera)) = (menu.get_node_mut(key), cameras.active()) {
                fit_on_screen(node, camera);
            }
        }

        let prompt = self.state.borrow().compiler.defaults().preloader_message.clone();
        self.emit(prompt);
        Ok(())
    }

    /// Image titles become a white textured plane at the image's natural
    /// size; text titles need a font.
    async fn title_descriptor(&self) -> Result<Option<ObjectDescriptor>> {
        let Some(title) = self.config.menu.title.clone() else {
            return Ok(None);
        };

        if is_image_url(&title) {
            let texture = self.loader.load_texture(&title).await?;
            let size = [texture.width as f32, texture.height as f32];
            self.state.borrow_mut().compiler.assets_mut().insert_texture(texture);
            return Ok(Some(
                ObjectDescriptor::new("plane")
                    .with_name(TITLE_NODE)
                    .with_material("basic")
                    .with_color(0xFFFFFF)
                    .with_texture(title)
                    .with_size(&size)
                    .with_position(Vec3::ZERO),
            ));
        }

        let Some(font_url) = self.config.menu.font.clone() else {
            log::warn!("Title '{title}' is text but no menu font is configured; skipping");
            return Ok(None);
        };
        let font = self.loader.load_font(&font_url).await?;
        self.state.borrow_mut().compiler.assets_mut().insert_font(font_url.clone(), font);

        let mut descriptor = ObjectDescriptor::new("font")
            .with_name(TITLE_NODE)
            .with_material("normal")
            .with_position(Vec3::ZERO);
        descriptor.title = Some(title);
        descriptor.font = Some(font_url);
        Ok(Some(descriptor))
    }

    async fn init_world(&self) -> Result<()> {
        self.enter_preloading()?;

        if let Some(sounds) = self.config.active_sounds() {
            self.state.borrow_mut().lifecycle.advance(Stage::LoadingAudio)?;
            let controllers = self.audio.initialize(sounds).await?;
            log::info!("Audio ready: {} track(s)", controllers.tracks.len());
            self.state.borrow_mut().audio = Some(controllers);
        }

        self.state.borrow_mut().lifecycle.advance(Stage::BuildingScene)?;
        self.emit(BUILDING_MESSAGE);
        let world_index = self.build_world_scene().await?;

        self.state.borrow_mut().lifecycle.advance(Stage::Transitioning)?;
        let fade = self.config.transition.fade();
        self.fade_preloader(fade);
        self.timeouts.after(fade).await?;

        {
            let mut state = self.state.borrow_mut();
            state.scenes.set_active_index(world_index)?;
            state.lifecycle.advance(Stage::Active)?;
        }
        self.emit("");
        Ok(())
    }

    fn enter_preloading(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.lifecycle.advance(Stage::Preloading)?;
        state.armed = false;

        let WorldState {
            scenes, compiler, preloader, ..
        } = &mut *state;
        let menu = scenes.scene_at_mut(0).ok_or(WorldError::SceneNotFound(0))?;
        if menu.remove_by_name(TITLE_NODE).is_none() {
            log::debug!("No title node in the menu scene");
        }
        let descriptor = self.config.preloader_descriptor().with_name(PRELOADER_NODE);
        *preloader = Some(compiler.compile(&descriptor, menu));
        Ok(())
    }

    async fn build_world_scene(&self) -> Result<usize> {
        let objects = &self.config.world_objects;
        if objects.is_empty() {
            let err = WorldError::EmptyWorld;
            log::error!("{err}");
            self.emit(err.to_string());
            return Err(err);
        }

        self.preload_assets(objects).await?;

        let mut state = self.state.borrow_mut();
        let WorldState {
            scenes,
            compiler,
            fog,
            world_scene,
            ..
        } = &mut *state;

        let handle = scenes.create_scene(WORLD_SCENE);
        let index = scenes.index_of(handle).ok_or(WorldError::SceneNotFound(scenes.len()))?;
        let scene = scenes.get_scene_mut(handle).ok_or(WorldError::SceneNotFound(index))?;
        scene.fog.clone_from(fog);
        let keys = compiler.compile_all(objects, scene);
        log::info!(
            "World scene '{}' built: {} objects, {} nodes",
            scene.name,
            keys.len(),
            scene.node_count()
        );
        *world_scene = Some(index);
        Ok(index)
    }

    /// Loads every texture and font the descriptors reference that the
    /// compiler does not hold yet.
    async fn preload_assets(&self, objects: &[ObjectDescriptor]) -> Result<()> {
        let mut textures = Vec::new();
        let mut fonts = Vec::new();
        let mut seen = FxHashSet::default();
        collect_asset_urls(objects, &mut seen, &mut textures, &mut fonts);

        for url in textures {
            if self.state.borrow().compiler.assets().has_texture(&url) {
                continue;
            }
            let texture = self.loader.load_texture(&url).await?;
            self.state.borrow_mut().compiler.assets_mut().insert_texture(texture);
        }
        for url in fonts {
            let font = self.loader.load_font(&url).await?;
            self.state.borrow_mut().compiler.assets_mut().insert_font(url, font);
        }
        Ok(())
    }

    /// The fade starts now on the timeout clock and ends with the transition.
    fn fade_preloader(&self, duration: Duration) {
        let fade = fade_over(self.timeouts.now().as_secs_f32(), duration.as_secs_f32());
        let mut state = self.state.borrow_mut();
        let WorldState { scenes, preloader, .. } = &mut *state;
        let node = match *preloader {
            Some(key) => scenes.scene_at_mut(0).and_then(|menu| menu.get_node_mut(key)),
            None => None,
        };
        match node {
            Some(node) => node.animation = Some(fade),
            None => log::warn!("Preloader node missing, nothing to fade"),
        }
    }
}

fn collect_asset_urls(
    objects: &[ObjectDescriptor],
    seen: &mut FxHashSet<String>,
    textures: &mut Vec<String>,
    fonts: &mut Vec<String>,
) {
    for object in objects {
        if let Some(url) = &object.texture {
            if seen.insert(url.clone()) {
                textures.push(url.clone());
            }
        }
        if object.geometry_kind() == GeometryKind::Font {
            if let Some(url) = &object.font {
                if seen.insert(url.clone()) {
                    fonts.push(url.clone());
                }
            }
        }
        collect_asset_urls(&object.children, seen, textures, fonts);
    }
}
