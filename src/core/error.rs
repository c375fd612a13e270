use thiserror::Error;

/// Errors raised by the team formation engine
///
/// These signal broken internal invariants rather than bad input; input
/// problems are reported through the response envelope instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("team under construction mixes incompatible team preferences (anchor {anchor_id})")]
    MixedTeamPreference { anchor_id: String },

    #[error("participant pool invariant violated: {0}")]
    PoolInvariant(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
