use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Year of study as reported on the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentYear {
    #[serde(rename = "1st Year", alias = "first_year")]
    FirstYear,
    #[serde(rename = "2nd Year", alias = "second_year")]
    SecondYear,
    #[serde(rename = "3rd Year", alias = "third_year")]
    ThirdYear,
    #[serde(rename = "4th Year", alias = "fourth_year")]
    FourthYear,
    #[serde(rename = "PG/MBA (1st Year)", alias = "pg_first_year")]
    PgFirstYear,
    #[serde(rename = "PG/MBA (2nd Year)", alias = "pg_second_year")]
    PgSecondYear,
}

impl CurrentYear {
    pub fn is_postgraduate(&self) -> bool {
        matches!(self, CurrentYear::PgFirstYear | CurrentYear::PgSecondYear)
    }
}

/// Self-reported weekly availability band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Fully Available (10-15 hrs/week)", alias = "fully_available")]
    FullyAvailable,
    #[serde(rename = "Partially Available (5-10 hrs/week)", alias = "partially_available")]
    PartiallyAvailable,
    #[serde(rename = "Very Limited Availability (1-5 hrs/week)", alias = "very_limited")]
    VeryLimited,
    #[serde(rename = "Not available", alias = "not_available")]
    NotAvailable,
}

impl Availability {
    /// Band rank used for ordering, higher means more available
    pub fn rank(&self) -> u8 {
        match self {
            Availability::FullyAvailable => 3,
            Availability::PartiallyAvailable => 2,
            Availability::VeryLimited => 1,
            Availability::NotAvailable => 0,
        }
    }

    /// Collapse the raw band into a compatibility level
    pub fn level(&self) -> AvailabilityLevel {
        match self {
            Availability::FullyAvailable => AvailabilityLevel::High,
            Availability::PartiallyAvailable => AvailabilityLevel::Medium,
            Availability::VeryLimited | Availability::NotAvailable => AvailabilityLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    Low,
    Medium,
    High,
}

impl AvailabilityLevel {
    /// High and Low are the only incompatible pairing
    #[inline]
    pub fn is_compatible_with(self, other: AvailabilityLevel) -> bool {
        !matches!(
            (self, other),
            (AvailabilityLevel::High, AvailabilityLevel::Low)
                | (AvailabilityLevel::Low, AvailabilityLevel::High)
        )
    }
}

/// Prior case competition experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "None", alias = "none")]
    None,
    #[serde(rename = "Participated in 1-2", alias = "participated")]
    Participated,
    #[serde(rename = "Participated in 3+", alias = "experienced")]
    Experienced,
    #[serde(rename = "Finalist/Winner in at least one", alias = "finalist")]
    Finalist,
}

impl ExperienceLevel {
    pub fn code(&self) -> u8 {
        match self {
            ExperienceLevel::None => 0,
            ExperienceLevel::Participated => 1,
            ExperienceLevel::Experienced => 2,
            ExperienceLevel::Finalist => 3,
        }
    }
}

/// Who a participant is willing to team up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamPreference {
    #[serde(rename = "Undergrads only", alias = "undergrads_only")]
    UndergradsOnly,
    #[serde(rename = "Postgrads only", alias = "postgrads_only")]
    PostgradsOnly,
    #[serde(rename = "Either UG or PG", alias = "either")]
    Either,
}

/// Normalized roster entry. Immutable for the duration of a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "collegeName", default)]
    pub college_name: String,
    #[serde(rename = "currentYear")]
    pub current_year: CurrentYear,
    #[serde(rename = "coreStrengths", default)]
    pub core_strengths: Vec<String>,
    #[serde(rename = "preferredRoles", default)]
    pub preferred_roles: Vec<String>,
    pub availability: Availability,
    pub experience: ExperienceLevel,
    #[serde(rename = "casePreferences", default)]
    pub case_preferences: Vec<String>,
    #[serde(rename = "preferredTeamSize")]
    pub preferred_team_size: usize,
    #[serde(rename = "teamPreference")]
    pub team_preference: TeamPreference,
}

impl Participant {
    pub fn is_postgraduate(&self) -> bool {
        self.current_year.is_postgraduate()
    }

    /// Names of required text fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.trim().is_empty() {
            missing.push("id");
        }
        if self.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.college_name.trim().is_empty() {
            missing.push("collegeName");
        }
        missing
    }
}

/// A fully formed team. Only ever built at its exact target size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub members: Vec<Participant>,
    #[serde(rename = "teamSize")]
    pub team_size: usize,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    #[serde(rename = "averageExperience")]
    pub average_experience: f64,
    #[serde(rename = "commonCaseTypes")]
    pub common_case_types: Vec<String>,
    #[serde(rename = "preferredTeamSizeMatch")]
    pub preferred_team_size_match: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    #[serde(rename = "totalParticipants")]
    pub total_participants: usize,
    #[serde(rename = "teamsFormed")]
    pub teams_formed: usize,
    #[serde(rename = "averageTeamSize")]
    pub average_team_size: f64,
    #[serde(rename = "matchingEfficiency")]
    pub matching_efficiency: f64,
    #[serde(rename = "teamSizeDistribution")]
    pub team_size_distribution: BTreeMap<usize, usize>,
    #[serde(rename = "caseTypeDistribution")]
    pub case_type_distribution: BTreeMap<String, usize>,
}

impl MatchingStatistics {
    pub fn from_teams(teams: &[Team], total_participants: usize) -> Self {
        let placed: usize = teams.iter().map(|t| t.members.len()).sum();

        let mut team_size_distribution = BTreeMap::new();
        let mut case_type_distribution = BTreeMap::new();
        for team in teams {
            *team_size_distribution.entry(team.team_size).or_insert(0) += 1;
            for case_type in &team.common_case_types {
                *case_type_distribution.entry(case_type.clone()).or_insert(0) += 1;
            }
        }

        let average_team_size = if teams.is_empty() {
            0.0
        } else {
            placed as f64 / teams.len() as f64
        };

        let matching_efficiency = if total_participants == 0 {
            0.0
        } else {
            100.0 * placed as f64 / total_participants as f64
        };

        Self {
            total_participants,
            teams_formed: teams.len(),
            average_team_size,
            matching_efficiency,
            team_size_distribution,
            case_type_distribution,
        }
    }
}

/// Outcome of one or more matching rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    pub teams: Vec<Team>,
    pub unmatched: Vec<Participant>,
    pub statistics: MatchingStatistics,
}

impl MatchingResult {
    pub fn new(teams: Vec<Team>, unmatched: Vec<Participant>, total_participants: usize) -> Self {
        let statistics = MatchingStatistics::from_teams(&teams, total_participants);
        Self {
            teams,
            unmatched,
            statistics,
        }
    }

    pub fn placed_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }
}

/// Audit entry for a single iteration of the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    #[serde(rename = "participantsProcessed")]
    pub participants_processed: usize,
    #[serde(rename = "teamsFormed")]
    pub teams_formed: usize,
    #[serde(rename = "participantsMatched")]
    pub participants_matched: usize,
    #[serde(rename = "remainingUnmatched")]
    pub remaining_unmatched: usize,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeMatchingResult {
    #[serde(flatten)]
    pub result: MatchingResult,
    pub iterations: usize,
    #[serde(rename = "iterationHistory")]
    pub iteration_history: Vec<IterationRecord>,
}

/// Either flavour of result, serialized without a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchingOutput {
    Iterative(IterativeMatchingResult),
    Single(MatchingResult),
}

impl MatchingOutput {
    pub fn matching(&self) -> &MatchingResult {
        match self {
            MatchingOutput::Iterative(it) => &it.result,
            MatchingOutput::Single(result) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_levels() {
        assert_eq!(Availability::FullyAvailable.level(), AvailabilityLevel::High);
        assert_eq!(Availability::PartiallyAvailable.level(), AvailabilityLevel::Medium);
        assert_eq!(Availability::VeryLimited.level(), AvailabilityLevel::Low);
        assert_eq!(Availability::NotAvailable.level(), AvailabilityLevel::Low);
    }

    #[test]
    fn test_availability_matrix() {
        use AvailabilityLevel::*;
        assert!(High.is_compatible_with(High));
        assert!(High.is_compatible_with(Medium));
        assert!(Medium.is_compatible_with(Medium));
        assert!(Medium.is_compatible_with(Low));
        assert!(Low.is_compatible_with(Low));
        assert!(!High.is_compatible_with(Low));
        assert!(!Low.is_compatible_with(High));
    }

    #[test]
    fn test_postgraduate_flag() {
        assert!(!CurrentYear::FirstYear.is_postgraduate());
        assert!(!CurrentYear::FourthYear.is_postgraduate());
        assert!(CurrentYear::PgFirstYear.is_postgraduate());
        assert!(CurrentYear::PgSecondYear.is_postgraduate());
    }

    #[test]
    fn test_participant_deserializes_roster_values() {
        let json = r#"{
            "id": "p1",
            "fullName": "Asha Rao",
            "email": "asha@example.edu",
            "collegeName": "IIT Delhi",
            "currentYear": "PG/MBA (1st Year)",
            "coreStrengths": ["Research", "Finance"],
            "preferredRoles": ["Lead"],
            "availability": "Partially Available (5-10 hrs/week)",
            "experience": "Participated in 3+",
            "casePreferences": ["Consulting"],
            "preferredTeamSize": 3,
            "teamPreference": "Either UG or PG"
        }"#;

        let participant: Participant = serde_json::from_str(json).unwrap();
        assert!(participant.is_postgraduate());
        assert_eq!(participant.experience.code(), 2);
        assert_eq!(participant.team_preference, TeamPreference::Either);
        assert!(participant.missing_fields().is_empty());
    }

    #[test]
    fn test_statistics_empty() {
        let stats = MatchingStatistics::from_teams(&[], 0);
        assert_eq!(stats.teams_formed, 0);
        assert_eq!(stats.matching_efficiency, 0.0);
        assert_eq!(stats.average_team_size, 0.0);
    }
}
