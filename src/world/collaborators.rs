//! Seams to the outside world: audio and asset loading.
//!
//! Both are asynchronous and single-threaded; futures are boxed as
//! [`LocalBoxFuture`] so implementors can hold `Rc` state.

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::errors::Result;
use crate::resources::{Font, Texture};
use crate::world::config::SoundConfig;

/// One playable track handle.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    pub url: String,
    pub volume: f32,
    pub looped: bool,
}

/// Opaque audio handles, owned by the controller for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioControllers {
    pub tracks: Vec<AudioTrack>,
}

impl AudioControllers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

pub trait AudioInitializer {
    fn initialize<'a>(&'a self, sounds: &'a SoundConfig) -> LocalBoxFuture<'a, Result<AudioControllers>>;
}

pub trait AssetLoader {
    fn load_texture<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Texture>>;
    fn load_font<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Rc<dyn Font>>>;
}

/// Audio collaborator that resolves immediately with one handle per track
/// and plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioInitializer for SilentAudio {
    fn initialize<'a>(&'a self, sounds: &'a SoundConfig) -> LocalBoxFuture<'a, Result<AudioControllers>> {
        let controllers = AudioControllers {
            tracks: sounds
                .tracks
                .iter()
                .map(|url| AudioTrack {
                    url: url.clone(),
                    volume: sounds.volume.unwrap_or(1.0),
                    looped: sounds.looped,
                })
                .collect(),
        };
        log::debug!("Silent audio prepared {} track(s)", controllers.tracks.len());
        futures::future::ready(Ok(controllers)).boxed_local()
    }
}
