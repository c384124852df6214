//! Live session output
//!
//! Turns sequencer events into REPL lines and ends sessions that reach their
//! `start --cycles N` goal.

use glowcalm_core::app_info::SESSION_COMPLETED;
use glowcalm_core::{Phase, SequencerEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::context::AppContext;
use crate::display;

pub struct EventPrinter {
    ctx: AppContext,
    /// The opening Inhale was printed on activation
    expand_announced: bool,
}

impl EventPrinter {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            expand_announced: false,
        }
    }

    /// Lines to print for `event`, applying the cycle goal on the way
    pub async fn handle(&mut self, event: SequencerEvent) -> Vec<String> {
        let visual = self.ctx.config.read().await.visual.clone();
        let line = display::event_line(&event, &visual);

        match event {
            // A run always opens at Expand without announcing it
            SequencerEvent::ActivityChanged { active: true } => {
                let mut lines = vec![line];
                let running = self.ctx.sequencer.lock().await.config();
                if let Some(config) = running {
                    let opening = SequencerEvent::PhaseChanged {
                        phase: Phase::Expand,
                        duration_secs: config.expand_secs,
                    };
                    lines.push(display::event_line(&opening, &visual));
                    self.expand_announced = true;
                }
                lines
            }
            SequencerEvent::PhaseChanged { phase, .. } => {
                let announced = std::mem::take(&mut self.expand_announced);
                if phase == Phase::Expand && (announced || self.goal_reached().await) {
                    return Vec::new();
                }
                vec![line]
            }
            SequencerEvent::CycleCompleted { count } => {
                let reached = self.ctx.goal.read().await.is_some_and(|goal| goal.reached(count));
                if !reached {
                    return vec![line];
                }
                self.ctx.sequencer.lock().await.stop();
                *self.ctx.goal.write().await = None;
                tracing::info!(count, "Session goal reached");
                vec![line, SESSION_COMPLETED.to_string()]
            }
            SequencerEvent::ActivityChanged { active: false } | SequencerEvent::Reset => {
                self.expand_announced = false;
                vec![line]
            }
        }
    }

    /// Whether the running cycle count already meets the goal. The driver
    /// counts a wrap before its Expand reaches subscribers.
    async fn goal_reached(&self) -> bool {
        let count = self.ctx.sequencer.lock().await.snapshot().cycle_count;
        self.ctx.goal.read().await.is_some_and(|goal| goal.reached(count))
    }
}

/// Print sequencer events until the sequencer is dropped
pub async fn spawn_event_printer(ctx: &AppContext) -> JoinHandle<()> {
    let mut events = ctx.sequencer.lock().await.subscribe();
    let mut printer = EventPrinter::new(ctx.clone());

    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Event printer lagged behind sequencer");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            for line in printer.handle(event).await {
                println!("{line}");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glowcalm_core::context::VisualSettings;
    use tokio::sync::broadcast::Receiver;

    use super::*;
    use crate::commands;
    use crate::context::test_context;

    fn phase_line(phase: Phase, duration_secs: f32) -> String {
        display::event_line(
            &SequencerEvent::PhaseChanged {
                phase,
                duration_secs,
            },
            &VisualSettings::default(),
        )
    }

    /// Feed events to the printer until the sequencer goes inactive
    async fn print_until_paused(
        printer: &mut EventPrinter,
        rx: &mut Receiver<SequencerEvent>,
    ) -> Vec<String> {
        let mut output = Vec::new();
        loop {
            let event = rx.recv().await.unwrap();
            output.extend(printer.handle(event).await);
            if event == (SequencerEvent::ActivityChanged { active: false }) {
                return output;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_prints_the_opening_inhale() {
        let ctx = test_context();
        let mut printer = EventPrinter::new(ctx.clone());
        let mut rx = ctx.sequencer.lock().await.subscribe();

        commands::start_session(None, &ctx).await.unwrap();
        let first = rx.recv().await.unwrap();
        let lines = printer.handle(first).await;

        assert_eq!(
            lines,
            vec!["Session started".to_string(), phase_line(Phase::Expand, 4.0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn resume_from_hold_prints_inhale_once() {
        let ctx = test_context();
        let mut printer = EventPrinter::new(ctx.clone());
        let mut rx = ctx.sequencer.lock().await.subscribe();

        // box breathing: pause during the first hold
        commands::start_session(None, &ctx).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        commands::pause_session(&ctx).await.unwrap();
        print_until_paused(&mut printer, &mut rx).await;

        commands::start_session(None, &ctx).await.unwrap();
        let mut output = Vec::new();
        for _ in 0..2 {
            let event = rx.recv().await.unwrap();
            output.extend(printer.handle(event).await);
        }

        assert_eq!(
            output,
            vec!["Session started".to_string(), phase_line(Phase::Expand, 4.0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_goal_stops_the_session() {
        let ctx = test_context();
        let mut printer = EventPrinter::new(ctx.clone());
        let mut rx = ctx.sequencer.lock().await.subscribe();

        // energizing breath: 2s in, 2s out
        commands::select_technique("energizing_breath", &ctx).await.unwrap();
        commands::start_session(Some(2), &ctx).await.unwrap();
        let output = print_until_paused(&mut printer, &mut rx).await;

        let inhale = phase_line(Phase::Expand, 2.0);
        let exhale = phase_line(Phase::Contract, 2.0);
        assert_eq!(
            output,
            vec![
                "Session started".to_string(),
                inhale.clone(),
                exhale.clone(),
                inhale,
                "-- cycle 1 complete --".to_string(),
                exhale,
                "-- cycle 2 complete --".to_string(),
                SESSION_COMPLETED.to_string(),
                "Session paused".to_string(),
            ]
        );

        let state = ctx.sequencer.lock().await.snapshot();
        assert!(!state.active);
        assert_eq!(state.cycle_count, 2);
        assert_eq!(state.current_phase, Phase::Expand);
        assert!(ctx.goal.read().await.is_none());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ctx.sequencer.lock().await.snapshot().cycle_count, 2);
    }
}
