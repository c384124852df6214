//! Phase sequencer
//!
//! Drives an infinite breathing cycle on the Tokio runtime. Each run owns one
//! driver task that sleeps for the current phase, advances to the next one and
//! publishes a [`SequencerEvent`].
//!
//! # Cancellation
//!
//! Every run is tagged with an epoch. `stop`, `reset`, a restart and `Drop`
//! bump the epoch under the state lock before aborting the driver, and the
//! driver only mutates state or publishes while holding that lock with a
//! matching epoch. A driver that already woke up therefore cannot publish a
//! transition once cancellation has returned.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::cycle::{CycleConfig, PhaseSchedule};
use super::error::SequencerError;
use super::events::SequencerEvent;
use super::phase::Phase;

/// Buffered events per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 64;

/// Observable sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequencerState {
    pub active: bool,
    pub current_phase: Phase,
    pub cycle_count: u32,
}

#[derive(Debug, Default)]
struct Shared {
    state: SequencerState,
    /// Identifies the driver allowed to advance `state`
    epoch: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sequences breathing phases and counts completed cycles.
pub struct PhaseSequencer {
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<SequencerEvent>,
    config: Option<CycleConfig>,
    driver: Option<JoinHandle<()>>,
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseSequencer {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            events,
            config: None,
            driver: None,
        }
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SequencerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SequencerState {
        lock(&self.shared).state
    }

    pub fn is_active(&self) -> bool {
        self.snapshot().active
    }

    /// Configuration of the current or most recent run
    pub fn config(&self) -> Option<CycleConfig> {
        self.config
    }

    /// Begin cycling from `Expand`, replacing any run in progress.
    ///
    /// Starting with the configuration that is already running is a no-op.
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self, config: CycleConfig) -> Result<(), SequencerError> {
        let schedule = PhaseSchedule::new(&config)?;
        let first = schedule.step(0);

        let epoch = {
            let mut shared = lock(&self.shared);
            if shared.state.active && self.config == Some(config) {
                return Ok(());
            }

            shared.epoch += 1;
            let was_active = shared.state.active;
            let previous = shared.state.current_phase;
            shared.state.active = true;
            shared.state.current_phase = first.phase;

            if !was_active {
                let _ = self.events.send(SequencerEvent::ActivityChanged { active: true });
            }
            if previous != first.phase {
                let _ = self.events.send(SequencerEvent::PhaseChanged {
                    phase: first.phase,
                    duration_secs: first.duration_secs,
                });
            }
            shared.epoch
        };

        self.abort_driver();
        self.config = Some(config);

        tracing::info!(
            epoch,
            cycle = %config.timing_summary(),
            "Breathing sequence started"
        );

        self.driver = Some(tokio::spawn(drive(
            Arc::clone(&self.shared),
            self.events.clone(),
            schedule,
            epoch,
        )));
        Ok(())
    }

    /// Halt the sequence, keeping the current phase. No-op when inactive.
    pub fn stop(&mut self) {
        {
            let mut shared = lock(&self.shared);
            if !shared.state.active {
                return;
            }
            shared.epoch += 1;
            shared.state.active = false;
            let _ = self.events.send(SequencerEvent::ActivityChanged { active: false });
            tracing::info!(
                phase = %shared.state.current_phase,
                cycles = shared.state.cycle_count,
                "Breathing sequence stopped"
            );
        }
        self.abort_driver();
    }

    /// Halt and return to `{inactive, Expand, 0 cycles}`
    pub fn reset(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.epoch += 1;
            let was_active = shared.state.active;
            shared.state = SequencerState::default();
            if was_active {
                let _ = self.events.send(SequencerEvent::ActivityChanged { active: false });
            }
            let _ = self.events.send(SequencerEvent::Reset);
        }
        self.abort_driver();
        tracing::info!("Breathing sequence reset");
    }

    /// Apply new durations.
    ///
    /// Restarts from `Expand` only when active and the durations differ;
    /// otherwise the configuration is kept for the next `start`.
    pub fn update_config(&mut self, config: CycleConfig) -> Result<(), SequencerError> {
        config.validate()?;
        if self.config == Some(config) {
            return Ok(());
        }
        if self.is_active() {
            tracing::debug!("Cycle configuration changed while active, restarting");
            self.start(config)
        } else {
            self.config = Some(config);
            Ok(())
        }
    }

    fn abort_driver(&mut self) {
        if let Some(handle) = self.driver.take() {
            handle.abort();
        }
    }
}

impl Drop for PhaseSequencer {
    fn drop(&mut self) {
        lock(&self.shared).epoch += 1;
        self.abort_driver();
    }
}

/// Driver task for one run. Deadlines accumulate from the start instant so
/// phase boundaries do not drift.
async fn drive(
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<SequencerEvent>,
    schedule: PhaseSchedule,
    epoch: u64,
) {
    let mut index = 0;
    let mut deadline = Instant::now();

    loop {
        deadline += schedule.step(index).duration();
        sleep_until(deadline).await;

        index = schedule.next_index(index);
        let step = schedule.step(index);

        let mut guard = lock(&shared);
        if guard.epoch != epoch || !guard.state.active {
            return;
        }

        guard.state.current_phase = step.phase;
        let _ = events.send(SequencerEvent::PhaseChanged {
            phase: step.phase,
            duration_secs: step.duration_secs,
        });

        if index == 0 {
            guard.state.cycle_count += 1;
            let _ = events.send(SequencerEvent::CycleCompleted {
                count: guard.state.cycle_count,
            });
        }

        tracing::debug!(
            phase = %step.phase,
            duration_secs = step.duration_secs,
            cycles = guard.state.cycle_count,
            "Phase advanced"
        );
        drop(guard);
    }
}
