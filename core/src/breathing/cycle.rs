//! Cycle configuration and the phase schedule built from it

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::SequencerError;
use super::phase::Phase;

/// Longest accepted phase, one hour
pub const MAX_PHASE_SECS: f32 = 3600.0;

/// Durations, in seconds, of the four phases of a breathing cycle.
///
/// A zero hold removes that phase from the cycle entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleConfig {
    pub expand_secs: f32,
    #[serde(default)]
    pub hold_expand_secs: f32,
    pub contract_secs: f32,
    #[serde(default)]
    pub hold_contract_secs: f32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::new(4.0, 0.0, 4.0, 0.0)
    }
}

impl CycleConfig {
    pub const fn new(
        expand_secs: f32,
        hold_expand_secs: f32,
        contract_secs: f32,
        hold_contract_secs: f32,
    ) -> Self {
        Self {
            expand_secs,
            hold_expand_secs,
            contract_secs,
            hold_contract_secs,
        }
    }

    /// Check the invariants the sequencer relies on
    pub fn validate(&self) -> Result<(), SequencerError> {
        for (field, value) in [
            ("expand_secs", self.expand_secs),
            ("contract_secs", self.contract_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SequencerError::InvalidConfiguration {
                    field,
                    value,
                    reason: "must be a positive number of seconds",
                });
            }
            check_upper_bound(field, value)?;
        }

        for (field, value) in [
            ("hold_expand_secs", self.hold_expand_secs),
            ("hold_contract_secs", self.hold_contract_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SequencerError::InvalidConfiguration {
                    field,
                    value,
                    reason: "must be zero or a positive number of seconds",
                });
            }
            check_upper_bound(field, value)?;
        }

        Ok(())
    }

    /// Configured duration of a phase in seconds (zero for a skipped hold)
    pub fn duration_secs(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Expand => self.expand_secs,
            Phase::HoldExpand => self.hold_expand_secs,
            Phase::Contract => self.contract_secs,
            Phase::HoldContract => self.hold_contract_secs,
        }
    }

    /// Whether the phase takes part in the cycle
    pub fn includes(&self, phase: Phase) -> bool {
        !phase.is_hold() || self.duration_secs(phase) > 0.0
    }

    /// Active phases in cycle order. Always starts with `Expand` and
    /// contains `Contract`.
    pub fn phases(&self) -> Vec<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|&phase| self.includes(phase))
            .collect()
    }

    pub fn total_cycle_secs(&self) -> f32 {
        self.expand_secs + self.hold_expand_secs + self.contract_secs + self.hold_contract_secs
    }

    /// Human readable timing, e.g. `Inhale 4s → Hold 7s → Exhale 8s`
    pub fn timing_summary(&self) -> String {
        let mut out = String::new();
        for (i, phase) in self.phases().into_iter().enumerate() {
            if i > 0 {
                out.push_str(" → ");
            }
            let _ = write!(out, "{} {}s", phase.label(), self.duration_secs(phase));
        }
        out
    }
}

fn check_upper_bound(field: &'static str, value: f32) -> Result<(), SequencerError> {
    if value > MAX_PHASE_SECS {
        return Err(SequencerError::InvalidConfiguration {
            field,
            value,
            reason: "must not exceed one hour",
        });
    }
    Ok(())
}

/// One entry of a [`PhaseSchedule`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStep {
    pub phase: Phase,
    pub duration_secs: f32,
}

impl PhaseStep {
    /// Wait time for this step, clamped to `0..=MAX_PHASE_SECS`
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.duration_secs.clamp(0.0, MAX_PHASE_SECS))
            .unwrap_or_default()
    }
}

/// Ordered, filtered list of phases the sequencer steps through.
///
/// Built from a validated [`CycleConfig`]; index 0 is always `Expand`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSchedule {
    steps: Vec<PhaseStep>,
}

impl PhaseSchedule {
    pub fn new(config: &CycleConfig) -> Result<Self, SequencerError> {
        config.validate()?;
        let steps = config
            .phases()
            .into_iter()
            .map(|phase| PhaseStep {
                phase,
                duration_secs: config.duration_secs(phase),
            })
            .collect();
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> PhaseStep {
        self.steps[index % self.steps.len()]
    }

    /// Index that follows `index`, wrapping back to 0 at the end of a cycle
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.steps.len()
    }

    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_holds_are_skipped() {
        let config = CycleConfig::new(4.0, 0.0, 4.0, 0.0);
        assert_eq!(config.phases(), vec![Phase::Expand, Phase::Contract]);

        let config = CycleConfig::new(4.0, 7.0, 8.0, 0.0);
        assert_eq!(
            config.phases(),
            vec![Phase::Expand, Phase::HoldExpand, Phase::Contract]
        );

        let config = CycleConfig::new(4.0, 0.0, 4.0, 2.0);
        assert_eq!(
            config.phases(),
            vec![Phase::Expand, Phase::Contract, Phase::HoldContract]
        );
    }

    #[test]
    fn box_breathing_schedule() {
        let schedule = PhaseSchedule::new(&CycleConfig::new(4.0, 4.0, 4.0, 4.0)).unwrap();
        let phases: Vec<_> = schedule.steps().iter().map(|s| s.phase).collect();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert!(schedule.steps().iter().all(|s| s.duration_secs == 4.0));
        assert_eq!(schedule.next_index(3), 0);
    }

    #[test]
    fn rejects_non_positive_inhale_and_exhale() {
        let err = CycleConfig::new(0.0, 0.0, 4.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            SequencerError::InvalidConfiguration { field: "expand_secs", .. }
        ));

        let err = CycleConfig::new(4.0, 0.0, -1.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            SequencerError::InvalidConfiguration { field: "contract_secs", .. }
        ));

        assert!(CycleConfig::new(f32::NAN, 0.0, 4.0, 0.0).validate().is_err());
        assert!(CycleConfig::new(4.0, -2.0, 4.0, 0.0).validate().is_err());
        assert!(CycleConfig::new(4.0, 0.0, 4.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn rejects_phases_longer_than_an_hour() {
        let err = CycleConfig::new(1e20, 0.0, 4.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            SequencerError::InvalidConfiguration { field: "expand_secs", .. }
        ));
        assert!(CycleConfig::new(4.0, 0.0, 4.0, 3600.5).validate().is_err());
        assert!(CycleConfig::new(MAX_PHASE_SECS, 0.0, 4.0, 0.0).validate().is_ok());
    }

    #[test]
    fn step_duration_never_panics() {
        let huge = PhaseStep {
            phase: Phase::Expand,
            duration_secs: 1e20,
        };
        assert_eq!(huge.duration(), Duration::from_secs(3600));

        let nan = PhaseStep {
            phase: Phase::Contract,
            duration_secs: f32::NAN,
        };
        assert_eq!(nan.duration(), Duration::ZERO);
    }

    #[test]
    fn summary_and_total() {
        let config = CycleConfig::new(4.0, 7.0, 8.0, 0.0);
        assert_eq!(config.timing_summary(), "Inhale 4s → Hold 7s → Exhale 8s");
        assert_eq!(config.total_cycle_secs(), 19.0);

        let config = CycleConfig::new(4.0, 4.0, 4.0, 4.0);
        assert_eq!(
            config.timing_summary(),
            "Inhale 4s → Hold 4s → Exhale 4s → Hold 4s"
        );
        assert_eq!(config.total_cycle_secs(), 16.0);
    }

    #[test]
    fn fractional_durations_convert_to_millis() {
        let schedule = PhaseSchedule::new(&CycleConfig::new(5.5, 0.0, 5.5, 0.0)).unwrap();
        assert_eq!(schedule.step(0).duration(), Duration::from_millis(5500));
    }
}
