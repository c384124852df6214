//! Ambient sound players
//!
//! `SilentPlayer` only logs; `RodioPlayer` (feature `playback`) plays through
//! the default output device on a dedicated thread, since the output stream
//! cannot move between threads.

use std::path::Path;

use super::error::AudioError;

/// Something that can play one looping ambient sound
pub trait AmbientPlayer: Send {
    /// Start `source` from position zero, replacing anything already playing
    fn play(&mut self, source: &Path, gain: f32, looping: bool) -> Result<(), AudioError>;

    fn pause(&mut self);

    /// Stop and rewind
    fn stop(&mut self);
}

/// Player used when no audio device is wanted
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl AmbientPlayer for SilentPlayer {
    fn play(&mut self, source: &Path, gain: f32, looping: bool) -> Result<(), AudioError> {
        if !source.exists() {
            return Err(AudioError::Open {
                path: source.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        tracing::debug!(source = %source.display(), gain, looping, "Ambient sound (silent)");
        Ok(())
    }

    fn pause(&mut self) {
        tracing::debug!("Ambient sound paused (silent)");
    }

    fn stop(&mut self) {
        tracing::debug!("Ambient sound stopped (silent)");
    }
}

#[cfg(feature = "playback")]
pub use rodio_player::RodioPlayer;

#[cfg(feature = "playback")]
mod rodio_player {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};
    use std::sync::mpsc;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::{AmbientPlayer, AudioError};

    enum Command {
        Play {
            path: PathBuf,
            gain: f32,
            looping: bool,
        },
        Pause,
        Stop,
    }

    /// Plays through the default output device
    pub struct RodioPlayer {
        tx: mpsc::Sender<Command>,
    }

    impl RodioPlayer {
        pub fn new() -> Self {
            let (tx, rx) = mpsc::channel();
            if let Err(e) = std::thread::Builder::new()
                .name("glowcalm-audio".to_string())
                .spawn(move || run(rx))
            {
                tracing::warn!(error = %e, "Failed to spawn audio thread");
            }
            Self { tx }
        }

        fn send(&self, command: Command) -> Result<(), AudioError> {
            self.tx.send(command).map_err(|_| AudioError::PlayerClosed)
        }
    }

    impl Default for RodioPlayer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AmbientPlayer for RodioPlayer {
        fn play(&mut self, source: &Path, gain: f32, looping: bool) -> Result<(), AudioError> {
            self.send(Command::Play {
                path: source.to_path_buf(),
                gain,
                looping,
            })
        }

        fn pause(&mut self) {
            let _ = self.send(Command::Pause);
        }

        fn stop(&mut self) {
            let _ = self.send(Command::Stop);
        }
    }

    fn run(rx: mpsc::Receiver<Command>) {
        let Ok((_stream, handle)) = OutputStream::try_default() else {
            tracing::warn!("No audio output device, ambient sound disabled");
            return;
        };

        let mut sink: Option<Sink> = None;
        while let Ok(command) = rx.recv() {
            match command {
                Command::Play {
                    path,
                    gain,
                    looping,
                } => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    match open(&handle, &path, gain, looping) {
                        Ok(new_sink) => sink = Some(new_sink),
                        Err(e) => tracing::debug!(error = %e, "Ambient playback failed"),
                    }
                }
                Command::Pause => {
                    if let Some(ref sink) = sink {
                        sink.pause();
                    }
                }
                Command::Stop => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                }
            }
        }
    }

    fn open(
        handle: &OutputStreamHandle,
        path: &Path,
        gain: f32,
        looping: bool,
    ) -> Result<Sink, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decode_err = |e: rodio::decoder::DecoderError| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let sink = Sink::try_new(handle).map_err(|e| AudioError::Device(e.to_string()))?;
        sink.set_volume(gain);
        if looping {
            sink.append(Decoder::new_looped(BufReader::new(file)).map_err(decode_err)?);
        } else {
            sink.append(Decoder::new(BufReader::new(file)).map_err(decode_err)?);
        }
        Ok(sink)
    }
}
