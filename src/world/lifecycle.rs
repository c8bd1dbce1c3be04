use std::fmt;

use crate::errors::{Result, WorldError};

/// World initialization stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Menu scene rendering, waiting for the start click.
    #[default]
    Idle,
    /// Title removed, preloader inserted into the menu scene.
    Preloading,
    /// Waiting for audio controllers; skipped without sound configuration.
    LoadingAudio,
    /// World objects compiled into a new scene.
    BuildingScene,
    /// Preloader fading while the menu scene stays active.
    Transitioning,
    /// The world scene is active. Terminal.
    Active,
}

impl Stage {
    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Idle, Stage::Preloading)
                | (Stage::Preloading, Stage::LoadingAudio | Stage::BuildingScene)
                | (Stage::LoadingAudio, Stage::BuildingScene)
                | (Stage::BuildingScene, Stage::Transitioning)
                | (Stage::Transitioning, Stage::Active)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Stage::Active
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Preloading => "preloading",
            Stage::LoadingAudio => "loading-audio",
            Stage::BuildingScene => "building-scene",
            Stage::Transitioning => "transitioning",
            Stage::Active => "active",
        };
        f.write_str(name)
    }
}

/// Stage state machine with history.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    stage: Stage,
    history: Vec<Stage>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            history: vec![Stage::Idle],
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered so far, starting with `Idle`.
    #[must_use]
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Moves to `next`, rejecting transitions the pipeline does not allow.
    pub fn advance(&mut self, next: Stage) -> Result<()> {
        if !self.stage.can_advance_to(next) {
            return Err(WorldError::InvalidTransition {
                from: self.stage,
                to: next,
            });
        }
        log::info!("World lifecycle: {} -> {}", self.stage, next);
        self.stage = next;
        self.history.push(next);
        Ok(())
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.stage != Stage::Idle
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stage.is_terminal()
    }
}
