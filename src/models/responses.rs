use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::core::iterative::StopReason;
use crate::models::domain::MatchingOutput;

/// Summary of the normalized roster handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
    pub undergraduates: usize,
    pub postgraduates: usize,
    #[serde(rename = "preferredTeamSizes")]
    pub preferred_team_sizes: BTreeMap<usize, usize>,
    #[serde(rename = "missingFieldParticipants")]
    pub missing_field_participants: usize,
}

/// Extra observability for iterative runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeStats {
    pub iterations: usize,
    #[serde(rename = "stopReason")]
    pub stop_reason: Option<StopReason>,
    #[serde(rename = "fallbackUsed")]
    pub fallback_used: bool,
}

/// Response for the team matching endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTeamsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchingOutput>,
    #[serde(rename = "parseStats")]
    pub parse_stats: ParseStats,
    pub warnings: Vec<String>,
    #[serde(rename = "iterativeStats", skip_serializing_if = "Option::is_none")]
    pub iterative_stats: Option<IterativeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl MatchTeamsResponse {
    pub fn failure(
        error: impl Into<String>,
        details: impl Into<String>,
        parse_stats: ParseStats,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            result: None,
            parse_stats,
            warnings,
            iterative_stats: None,
            error: Some(error.into()),
            details: Some(details.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
