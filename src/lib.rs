//! Team Algo - Team formation engine for case competition rosters
//!
//! This library groups normalized participants into teams of their exact
//! preferred size. Undergraduate and postgraduate cohorts are matched
//! separately, composition and availability rules are hard filters, and a
//! diversity score picks between eligible candidates.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::config::{LogLevel, MatchingOptions, Settings};
pub use crate::core::{
    EngineError, IterativeMatcher, Matcher, SequentialTeamIds, TeamFormationEngine, TeamIdSource,
    UuidTeamIds,
};
pub use crate::models::{
    IterativeMatchingResult, MatchTeamsRequest, MatchTeamsResponse, MatchingOutput, MatchingResult,
    Participant, Team,
};
