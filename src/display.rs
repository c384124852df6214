//! Text rendering for the REPL

use std::fmt::Write;

use chrono::{DateTime, Local};
use glowcalm_core::breathing::visual::target_scale;
use glowcalm_core::context::VisualSettings;
use glowcalm_core::{SequencerEvent, SequencerState, Technique, VisualCue};

use crate::context::SessionGoal;

/// One line of `list` output; `selected` marks the active technique
pub fn technique_row(technique: &Technique, selected: bool) -> String {
    format!(
        "{} {:<20} {:<20} {:<13} {:<11} {}",
        if selected { "*" } else { " " },
        technique.key,
        technique.name,
        technique.difficulty.to_string(),
        technique.category.to_string(),
        technique.cycle.timing_summary()
    )
}

pub fn technique_details(technique: &Technique) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", technique.name, technique.key);
    if !technique.description.is_empty() {
        let _ = writeln!(out, "  {}", technique.description);
    }
    let _ = writeln!(
        out,
        "  {} / {}",
        technique.category, technique.difficulty
    );
    let _ = writeln!(
        out,
        "  {} ({}s per cycle)",
        technique.cycle.timing_summary(),
        technique.cycle.total_cycle_secs()
    );
    if !technique.benefits.is_empty() {
        let _ = writeln!(out, "  Benefits: {}", technique.benefits.join(", "));
    }
    out
}

/// Line printed for a sequencer event
pub fn event_line(event: &SequencerEvent, visual: &VisualSettings) -> String {
    match event {
        SequencerEvent::PhaseChanged {
            phase,
            duration_secs,
        } => format!(
            "{:<7} {:>4}s  (scale {:.2})",
            phase.label(),
            duration_secs,
            target_scale(*phase, visual)
        ),
        SequencerEvent::CycleCompleted { count } => format!("-- cycle {count} complete --"),
        SequencerEvent::ActivityChanged { active: true } => "Session started".to_string(),
        SequencerEvent::ActivityChanged { active: false } => "Session paused".to_string(),
        SequencerEvent::Reset => "Session reset".to_string(),
    }
}

/// Multi-line `status` output
pub fn status(
    state: &SequencerState,
    technique: &Technique,
    cue: &VisualCue,
    goal: Option<SessionGoal>,
    started_at: Option<DateTime<Local>>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Technique: {} ({})", technique.name, technique.key);

    match cue.countdown_secs {
        Some(secs) => {
            let _ = writeln!(out, "Phase:     {} {}s", cue.label, secs);
        }
        None => {
            let _ = writeln!(out, "Phase:     {}", cue.label);
        }
    }
    let _ = writeln!(
        out,
        "Circle:    scale {:.2} over {}s",
        cue.scale, cue.transition_secs
    );
    let _ = writeln!(out, "Cycles:    {}", state.cycle_count);

    if let Some(goal) = goal {
        let _ = writeln!(
            out,
            "Goal:      {} cycles, {} remaining",
            goal.requested,
            goal.remaining(state.cycle_count)
        );
    }
    if let Some(started_at) = started_at {
        let elapsed = Local::now().signed_duration_since(started_at);
        let _ = writeln!(
            out,
            "Started:   {} ({}m {:02}s ago)",
            started_at.format("%H:%M:%S"),
            elapsed.num_minutes(),
            elapsed.num_seconds() % 60
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcalm_core::breathing::visual::cue;
    use glowcalm_core::{Phase, TechniqueCatalog};

    fn box_breathing() -> Technique {
        TechniqueCatalog::builtin()
            .get("box_breathing")
            .cloned()
            .expect("builtin preset")
    }

    #[test]
    fn row_marks_selected_technique() {
        let technique = box_breathing();
        let row = technique_row(&technique, true);
        assert!(row.starts_with("* box_breathing"));
        assert!(row.ends_with("Inhale 4s → Hold 4s → Exhale 4s → Hold 4s"));
        assert!(technique_row(&technique, false).starts_with("  box_breathing"));
    }

    #[test]
    fn details_include_cycle_length() {
        let details = technique_details(&box_breathing());
        assert!(details.contains("(16s per cycle)"));
        assert!(details.starts_with("Box Breathing (box_breathing)"));
    }

    #[test]
    fn event_lines() {
        let visual = VisualSettings::default();
        let line = event_line(
            &SequencerEvent::PhaseChanged {
                phase: Phase::Contract,
                duration_secs: 8.0,
            },
            &visual,
        );
        assert!(line.starts_with("Exhale"));
        assert!(line.ends_with("(scale 0.80)"));

        assert_eq!(
            event_line(&SequencerEvent::CycleCompleted { count: 2 }, &visual),
            "-- cycle 2 complete --"
        );
        assert_eq!(
            event_line(&SequencerEvent::ActivityChanged { active: false }, &visual),
            "Session paused"
        );
    }

    #[test]
    fn status_shows_goal_and_idle_cue() {
        let technique = box_breathing();
        let state = SequencerState {
            active: false,
            current_phase: Phase::Expand,
            cycle_count: 1,
        };
        let cue = cue(&state, &technique.cycle, &VisualSettings::default());
        let text = status(&state, &technique, &cue, Some(SessionGoal::new(0, 3)), None);

        assert!(text.contains("Phase:     Ready\n"));
        assert!(text.contains("Cycles:    1\n"));
        assert!(text.contains("Goal:      3 cycles, 2 remaining"));
        assert!(!text.contains("Started:"));
    }
}
