//! Maps sequencer state to an animation target for the breathing circle

use glowcalm_types::VisualSettings;

use super::cycle::CycleConfig;
use super::phase::Phase;
use super::sequencer::SequencerState;

/// Animation curve for a scale transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    EaseInOut,
    Linear,
}

impl Easing {
    /// Progress along the curve for `t` in `0.0..=1.0`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            // Cubic ease-in-out
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Where the circle should be heading and how to get there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualCue {
    pub scale: f32,
    pub transition_secs: f32,
    pub easing: Easing,
    /// Instruction text, `Ready` while inactive
    pub label: &'static str,
    /// Whole seconds shown next to the label while active
    pub countdown_secs: Option<u32>,
}

impl VisualCue {
    /// Scale reached after `elapsed_secs` of a transition from `from_scale`
    pub fn scale_at(&self, from_scale: f32, elapsed_secs: f32) -> f32 {
        if self.transition_secs <= 0.0 {
            return self.scale;
        }
        let progress = self.easing.apply(elapsed_secs / self.transition_secs);
        from_scale + (self.scale - from_scale) * progress
    }
}

/// Target scale for a phase
pub fn target_scale(phase: Phase, settings: &VisualSettings) -> f32 {
    if phase.is_expanded() {
        settings.expanded_scale
    } else {
        settings.contracted_scale
    }
}

pub fn easing_for(phase: Phase) -> Easing {
    if phase.is_hold() {
        Easing::Linear
    } else {
        Easing::EaseInOut
    }
}

/// Build the cue for the current sequencer state
pub fn cue(state: &SequencerState, config: &CycleConfig, settings: &VisualSettings) -> VisualCue {
    if !state.active {
        return VisualCue {
            scale: settings.idle_scale,
            transition_secs: settings.idle_transition_secs,
            easing: easing_for(state.current_phase),
            label: "Ready",
            countdown_secs: None,
        };
    }

    let duration = config.duration_secs(state.current_phase);
    VisualCue {
        scale: target_scale(state.current_phase, settings),
        transition_secs: duration,
        easing: easing_for(state.current_phase),
        label: state.current_phase.label(),
        countdown_secs: Some(duration.ceil() as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(phase: Phase) -> SequencerState {
        SequencerState {
            active: true,
            current_phase: phase,
            cycle_count: 0,
        }
    }

    #[test]
    fn phases_map_to_expanded_or_contracted_scale() {
        let settings = VisualSettings::default();
        let config = CycleConfig::new(4.0, 7.0, 8.0, 2.5);

        let inhale = cue(&active(Phase::Expand), &config, &settings);
        assert_eq!(inhale.scale, 1.5);
        assert_eq!(inhale.transition_secs, 4.0);
        assert_eq!(inhale.easing, Easing::EaseInOut);
        assert_eq!(inhale.label, "Inhale");

        let hold = cue(&active(Phase::HoldExpand), &config, &settings);
        assert_eq!(hold.scale, 1.5);
        assert_eq!(hold.easing, Easing::Linear);
        assert_eq!(hold.label, "Hold");

        let exhale = cue(&active(Phase::Contract), &config, &settings);
        assert_eq!(exhale.scale, 0.8);
        assert_eq!(exhale.transition_secs, 8.0);
        assert_eq!(exhale.label, "Exhale");

        let rest = cue(&active(Phase::HoldContract), &config, &settings);
        assert_eq!(rest.scale, 0.8);
        assert_eq!(rest.countdown_secs, Some(3));
    }

    #[test]
    fn inactive_state_is_ready_at_idle_scale() {
        let settings = VisualSettings::default();
        let state = SequencerState {
            active: false,
            current_phase: Phase::Contract,
            cycle_count: 4,
        };
        let idle = cue(&state, &CycleConfig::default(), &settings);
        assert_eq!(idle.scale, 1.0);
        assert_eq!(idle.transition_secs, 0.5);
        assert_eq!(idle.label, "Ready");
        assert_eq!(idle.countdown_secs, None);
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::EaseInOut.apply(0.1) < Easing::Linear.apply(0.1));
    }

    #[test]
    fn scale_interpolates_over_transition() {
        let settings = VisualSettings::default();
        let inhale = cue(&active(Phase::Expand), &CycleConfig::default(), &settings);
        assert_eq!(inhale.scale_at(0.8, 0.0), 0.8);
        assert!((inhale.scale_at(0.8, 2.0) - 1.15).abs() < 1e-5);
        assert_eq!(inhale.scale_at(0.8, 10.0), 1.5);
    }
}
