//! Error types for sequencer operations

use thiserror::Error;

/// Errors returned synchronously by the phase sequencer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequencerError {
    #[error("invalid cycle configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}
