use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use glowcalm_core::audio::create_audio_channel;
use glowcalm_core::context::{AppConfig, AppConfigExt, AudioSettings, BackgroundTasks, config_dir};
use glowcalm_core::{
    AmbientPlayer, AudioService, PhaseSequencer, TechniqueCatalog, spawn_audio_companion,
};
use tokio::sync::{Mutex, RwLock};

/// Cycle target set by `start --cycles N`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionGoal {
    pub requested: u32,
    /// Cycle count at which the session ends
    pub target_count: u32,
}

impl SessionGoal {
    /// Goal of `requested` more cycles, counted from `current_count`
    pub fn new(current_count: u32, requested: u32) -> Self {
        Self {
            requested,
            target_count: current_count.saturating_add(requested),
        }
    }

    pub fn reached(&self, count: u32) -> bool {
        count >= self.target_count
    }

    pub fn remaining(&self, count: u32) -> u32 {
        self.target_count.saturating_sub(count)
    }
}

/// Holds all shared state for the REPL.
/// Logic lives in the core types; this only wires them together.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// Shared with the audio service so volume changes apply immediately
    pub audio_settings: Arc<RwLock<AudioSettings>>,
    pub catalog: Arc<TechniqueCatalog>,
    pub sequencer: Arc<Mutex<PhaseSequencer>>,
    /// Key of the technique `start` will run
    pub selected: Arc<RwLock<String>>,
    pub goal: Arc<RwLock<Option<SessionGoal>>>,
    pub started_at: Arc<RwLock<Option<DateTime<Local>>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl AppContext {
    /// Load config and techniques, then start the audio service.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let config = AppConfig::load();
        let config_dir = config_dir();

        let catalog = match config_dir.as_deref() {
            Some(dir) => TechniqueCatalog::load(dir).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring user techniques");
                TechniqueCatalog::builtin()
            }),
            None => TechniqueCatalog::builtin(),
        };

        let selected = if catalog.get(&config.default_technique).is_some() {
            config.default_technique.clone()
        } else {
            tracing::warn!(
                key = %config.default_technique,
                "Default technique not found, using built-in default"
            );
            AppConfig::default().default_technique
        };

        Self::from_parts(
            config,
            catalog,
            selected,
            config_dir.unwrap_or_default(),
            ambient_player(),
        )
    }

    /// Wire an already loaded config and catalog to a new sequencer and
    /// audio service playing through `player`.
    pub fn from_parts(
        config: AppConfig,
        catalog: TechniqueCatalog,
        selected: String,
        sounds_dir: PathBuf,
        player: Box<dyn AmbientPlayer>,
    ) -> Self {
        let audio_settings = Arc::new(RwLock::new(config.audio.clone()));
        let (audio_tx, audio_rx) = create_audio_channel();
        let service = AudioService::new(audio_rx, Arc::clone(&audio_settings), sounds_dir, player);

        let sequencer = PhaseSequencer::new();
        let tasks = BackgroundTasks {
            audio_service: Some(tokio::spawn(service.run())),
            audio_companion: Some(spawn_audio_companion(sequencer.subscribe(), audio_tx)),
            ..Default::default()
        };

        tracing::info!(
            techniques = catalog.len(),
            selected = %selected,
            "Glow Calm context ready"
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            audio_settings,
            catalog: Arc::new(catalog),
            sequencer: Arc::new(Mutex::new(sequencer)),
            selected: Arc::new(RwLock::new(selected)),
            goal: Arc::new(RwLock::new(None)),
            started_at: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    /// Stop the session and background tasks before exiting
    pub async fn shutdown(&self) {
        self.sequencer.lock().await.reset();
        self.tasks.lock().await.abort_all().await;
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "playback")]
fn ambient_player() -> Box<dyn AmbientPlayer> {
    Box::new(glowcalm_core::audio::RodioPlayer::new())
}

#[cfg(not(feature = "playback"))]
fn ambient_player() -> Box<dyn AmbientPlayer> {
    Box::new(glowcalm_core::SilentPlayer)
}

/// Context with built-in techniques, default settings and no audio device.
/// Must be called from within a Tokio runtime.
#[cfg(test)]
pub(crate) fn test_context() -> AppContext {
    AppContext::from_parts(
        AppConfig::default(),
        TechniqueCatalog::builtin(),
        glowcalm_core::context::DEFAULT_TECHNIQUE.to_string(),
        PathBuf::new(),
        Box::new(glowcalm_core::SilentPlayer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_counts_from_current_cycle() {
        let goal = SessionGoal::new(3, 2);
        assert_eq!(goal.target_count, 5);
        assert!(!goal.reached(4));
        assert_eq!(goal.remaining(4), 1);
        assert!(goal.reached(5));
        assert_eq!(goal.remaining(7), 0);
    }
}
