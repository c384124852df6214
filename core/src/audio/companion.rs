//! Bridges sequencer activity to ambient audio

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use super::events::AudioEvent;
use super::service::AudioSender;
use crate::breathing::SequencerEvent;

/// Audio command for a sequencer event, if it affects playback
pub fn audio_event_for(event: &SequencerEvent) -> Option<AudioEvent> {
    match event {
        SequencerEvent::ActivityChanged { active: true } => Some(AudioEvent::Play),
        SequencerEvent::ActivityChanged { active: false } => Some(AudioEvent::Pause),
        SequencerEvent::Reset => Some(AudioEvent::Stop),
        SequencerEvent::PhaseChanged { .. } | SequencerEvent::CycleCompleted { .. } => None,
    }
}

/// Forward activity transitions to the audio service until either side closes
pub fn spawn_audio_companion(
    mut events: broadcast::Receiver<SequencerEvent>,
    audio: AudioSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let Some(command) = audio_event_for(&event) else {
                        continue;
                    };
                    if audio.send(command).await.is_err() {
                        tracing::debug!("Audio service closed, stopping companion");
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Audio companion lagged behind sequencer");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::create_audio_channel;
    use crate::breathing::{CycleConfig, Phase, PhaseSequencer};

    #[test]
    fn maps_only_activity_and_reset() {
        assert_eq!(
            audio_event_for(&SequencerEvent::ActivityChanged { active: true }),
            Some(AudioEvent::Play)
        );
        assert_eq!(
            audio_event_for(&SequencerEvent::ActivityChanged { active: false }),
            Some(AudioEvent::Pause)
        );
        assert_eq!(
            audio_event_for(&SequencerEvent::Reset),
            Some(AudioEvent::Stop)
        );
        assert_eq!(
            audio_event_for(&SequencerEvent::PhaseChanged {
                phase: Phase::Contract,
                duration_secs: 4.0
            }),
            None
        );
        assert_eq!(
            audio_event_for(&SequencerEvent::CycleCompleted { count: 3 }),
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn follows_sequencer_lifecycle() {
        let mut sequencer = PhaseSequencer::new();
        let (tx, mut rx) = create_audio_channel();
        let companion = spawn_audio_companion(sequencer.subscribe(), tx);

        sequencer.start(CycleConfig::new(1.0, 0.0, 1.0, 0.0)).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        sequencer.stop();
        sequencer.start(CycleConfig::new(1.0, 0.0, 1.0, 0.0)).unwrap();
        sequencer.reset();

        assert_eq!(rx.recv().await, Some(AudioEvent::Play));
        assert_eq!(rx.recv().await, Some(AudioEvent::Pause));
        assert_eq!(rx.recv().await, Some(AudioEvent::Play));
        assert_eq!(rx.recv().await, Some(AudioEvent::Pause));
        assert_eq!(rx.recv().await, Some(AudioEvent::Stop));

        drop(sequencer);
        companion.await.unwrap();
        assert_eq!(rx.recv().await, None);
    }
}
