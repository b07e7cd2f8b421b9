//! Error types for chain operations.

use thiserror::Error;

/// Errors that can occur while editing an effect chain.
///
/// Operations addressed by [`EffectId`](crate::EffectId) never fail on a stale
/// id; they are no-ops instead. Only malformed arguments are errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// Position outside the chain.
    #[error("invalid argument: index {index} is out of range for a chain of {len} effects")]
    InvalidArgument {
        /// The offending index.
        index: usize,
        /// Chain length at the time of the call.
        len: usize,
    },

    /// Parameter name not part of the effect's preset.
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParameter {
        /// Api name of the effect.
        effect: String,
        /// Name of the rejected parameter.
        param: String,
    },

    /// NaN or infinite parameter value.
    #[error("invalid value {value} for parameter '{param}': must be finite")]
    InvalidValue {
        /// Name of the parameter.
        param: String,
        /// The rejected value.
        value: f64,
    },
}
