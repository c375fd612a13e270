use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::config::MatchingOptions;
use crate::models::domain::Participant;

/// Request to form teams from a normalized roster
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchTeamsRequest {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[validate(nested)]
    #[serde(default)]
    pub options: Option<MatchingOptions>,
}
