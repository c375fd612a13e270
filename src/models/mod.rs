// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, AvailabilityLevel, CurrentYear, ExperienceLevel, IterationRecord,
    IterativeMatchingResult, MatchingOutput, MatchingResult, MatchingStatistics, Participant,
    Team, TeamPreference,
};
pub use requests::MatchTeamsRequest;
pub use responses::{ErrorResponse, HealthResponse, IterativeStats, MatchTeamsResponse, ParseStats};
