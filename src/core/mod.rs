// Core algorithm exports
pub mod bucket;
pub mod builder;
pub mod cohort;
pub mod engine;
pub mod error;
pub mod filters;
pub mod ids;
pub mod iterative;
pub mod matcher;
pub mod pool;
pub mod scoring;
pub mod warnings;

pub use bucket::{form_bucket, materialize_team, BucketOutcome};
pub use builder::TeamBuilder;
pub use cohort::{partition_by_cohort, Cohorts};
pub use engine::TeamFormationEngine;
pub use error::{EngineError, EngineResult};
pub use filters::{eligible_candidates, AvailabilityRule, FilterPolicy, SizeRule};
pub use ids::{SequentialTeamIds, TeamIdSource, UuidTeamIds};
pub use iterative::{IterativeMatcher, IterativeOutcome, StopReason};
pub use matcher::{Matcher, TEAM_SIZES};
pub use pool::{canonical_order, ParticipantPool};
pub use scoring::calculate_compatibility_score;
