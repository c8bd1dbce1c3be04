#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod compiler;
pub mod curves;
pub mod descriptor;
pub mod errors;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;
pub mod world;

pub use animation::{AnimationCallback, AnimationDispatcher, AnimationLibrary, AnimationState, AnimationTarget};
pub use assets::FileAssetLoader;
pub use compiler::{DescriptorCompiler, FitOutcome, fit_on_screen};
pub use curves::{Curve, CurvePath, build_curve_path};
pub use descriptor::{Defaults, ObjectDescriptor, PathSegment, SegmentKind};
pub use errors::{Result, WorldError};
pub use render::{HeadlessRenderer, RenderBackend, RendererSettings, setup_renderer};
pub use resources::{Color, Font, Geometry, GeometryKind, Material, MaterialKind, Texture};
pub use scene::{Camera, CameraRegistry, Fog, Node, NodeKey, NodeKind, Scene, SceneManager};
pub use world::{AssetLoader, AudioInitializer, Lifecycle, MessageBus, Stage, WorldConfig, WorldController};
