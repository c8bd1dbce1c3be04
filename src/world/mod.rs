//! World Lifecycle Orchestrator
//!
//! Owns the menu and world scenes and runs the one-shot initialization
//! pipeline:
//!
//! ```text
//! Idle -> Preloading -> [LoadingAudio] -> BuildingScene -> Transitioning -> Active
//! ```
//!
//! The pipeline is a single future; its waits (audio, assets, the fade delay)
//! are driven by the caller's executor and by [`WorldController::frame`],
//! which advances the frame-driven [`Timeouts`].

pub mod bus;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod lifecycle;
pub mod timeouts;

pub use bus::{MessageBus, ProgressMessage, SubscriptionId, WORLD_MESSAGE};
pub use collaborators::{AssetLoader, AudioControllers, AudioInitializer, AudioTrack, SilentAudio};
pub use config::{MenuConfig, SocialLink, SocialPlatform, SoundConfig, TransitionConfig, Viewport, WorldConfig};
pub use controller::{BUILDING_MESSAGE, WorldController, WorldState};
pub use lifecycle::{Lifecycle, Stage};
pub use timeouts::Timeouts;
