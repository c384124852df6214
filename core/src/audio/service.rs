//! Ambient audio service
//!
//! Runs in a background task, receiving AudioEvents via channel. Playback
//! failures are logged and dropped so they never reach the sequencer.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use glowcalm_types::AudioSettings;

use super::events::AudioEvent;
use super::player::AmbientPlayer;

/// Audio service that owns the ambient player
pub struct AudioService {
    /// Channel to receive audio events
    event_rx: mpsc::Receiver<AudioEvent>,

    /// Shared audio settings (can be updated at runtime)
    settings: Arc<RwLock<AudioSettings>>,

    /// Directory relative sound paths resolve against
    sounds_dir: PathBuf,

    player: Box<dyn AmbientPlayer>,
}

impl AudioService {
    pub fn new(
        event_rx: mpsc::Receiver<AudioEvent>,
        settings: Arc<RwLock<AudioSettings>>,
        sounds_dir: PathBuf,
        player: Box<dyn AmbientPlayer>,
    ) -> Self {
        Self {
            event_rx,
            settings,
            sounds_dir,
            player,
        }
    }

    /// Run until every sender is dropped
    pub async fn run(mut self) {
        while let Some(event) = self.event_rx.recv().await {
            // Clone settings so the guard is not held while talking to the player
            let settings = self.settings.read().await.clone();
            self.handle(event, &settings);
        }
        self.player.stop();
    }

    fn handle(&mut self, event: AudioEvent, settings: &AudioSettings) {
        match event {
            AudioEvent::Play => {
                // Master audio toggle
                if !settings.enabled {
                    return;
                }
                let Some(path) = self.resolve_sound(settings) else {
                    tracing::debug!("No ambient sound configured");
                    return;
                };
                if let Err(e) = self.player.play(&path, settings.gain(), settings.looping) {
                    tracing::debug!(error = %e, path = %path.display(), "Ambient playback failed");
                }
            }
            AudioEvent::Pause => self.player.pause(),
            AudioEvent::Stop => self.player.stop(),
        }
    }

    fn resolve_sound(&self, settings: &AudioSettings) -> Option<PathBuf> {
        let sound = settings.ambient_sound.as_deref()?.trim();
        if sound.is_empty() {
            return None;
        }
        let path = PathBuf::from(sound);
        if path.is_absolute() {
            Some(path)
        } else {
            Some(self.sounds_dir.join(path))
        }
    }
}

/// Sender handle for sending audio events
pub type AudioSender = mpsc::Sender<AudioEvent>;

/// Create a new audio channel
pub fn create_audio_channel() -> (AudioSender, mpsc::Receiver<AudioEvent>) {
    mpsc::channel(16)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;
    use crate::audio::AudioError;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(PathBuf, f32, bool),
        Pause,
        Stop,
    }

    #[derive(Clone, Default)]
    struct RecordingPlayer {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_play: bool,
    }

    impl AmbientPlayer for RecordingPlayer {
        fn play(&mut self, source: &Path, gain: f32, looping: bool) -> Result<(), AudioError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Play(source.to_path_buf(), gain, looping));
            if self.fail_play {
                Err(AudioError::Device("autoplay blocked".to_string()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.calls.lock().unwrap().push(Call::Pause);
        }

        fn stop(&mut self) {
            self.calls.lock().unwrap().push(Call::Stop);
        }
    }

    async fn run_with(
        player: RecordingPlayer,
        settings: AudioSettings,
        events: &[AudioEvent],
    ) -> Vec<Call> {
        let (tx, rx) = create_audio_channel();
        let service = AudioService::new(
            rx,
            Arc::new(RwLock::new(settings)),
            PathBuf::from("/sounds"),
            Box::new(player.clone()),
        );
        let handle = tokio::spawn(service.run());
        for event in events {
            tx.send(*event).await.unwrap();
        }
        drop(tx);
        handle.await.unwrap();
        let calls = player.calls.lock().unwrap().clone();
        calls
    }

    #[tokio::test]
    async fn plays_relative_sound_from_sounds_dir() {
        let calls = run_with(
            RecordingPlayer::default(),
            AudioSettings::default(),
            &[AudioEvent::Play, AudioEvent::Pause, AudioEvent::Stop],
        )
        .await;

        assert_eq!(
            calls,
            vec![
                Call::Play(PathBuf::from("/sounds/nature.mp3"), 0.8, true),
                Call::Pause,
                Call::Stop,
                // Channel closed
                Call::Stop,
            ]
        );
    }

    #[tokio::test]
    async fn disabled_audio_skips_play() {
        let settings = AudioSettings {
            enabled: false,
            ..AudioSettings::default()
        };
        let calls = run_with(
            RecordingPlayer::default(),
            settings,
            &[AudioEvent::Play, AudioEvent::Pause],
        )
        .await;
        assert_eq!(calls, vec![Call::Pause, Call::Stop]);
    }

    #[tokio::test]
    async fn missing_sound_skips_play() {
        let settings = AudioSettings {
            ambient_sound: Some("  ".to_string()),
            ..AudioSettings::default()
        };
        let calls = run_with(RecordingPlayer::default(), settings, &[AudioEvent::Play]).await;
        assert_eq!(calls, vec![Call::Stop]);
    }

    #[tokio::test]
    async fn playback_failure_is_swallowed() {
        let player = RecordingPlayer {
            fail_play: true,
            ..RecordingPlayer::default()
        };
        let settings = AudioSettings {
            ambient_sound: Some("/abs/rain.ogg".to_string()),
            looping: false,
            volume: 50,
            ..AudioSettings::default()
        };
        let calls = run_with(
            player,
            settings,
            &[AudioEvent::Play, AudioEvent::Play, AudioEvent::Pause],
        )
        .await;

        assert_eq!(
            calls,
            vec![
                Call::Play(PathBuf::from("/abs/rain.ogg"), 0.5, false),
                Call::Play(PathBuf::from("/abs/rain.ogg"), 0.5, false),
                Call::Pause,
                Call::Stop,
            ]
        );
    }
}
