use crate::config::MatchingOptions;
use crate::core::{
    error::{EngineError, EngineResult},
    ids::TeamIdSource,
    iterative::{IterativeMatcher, IterativeOutcome},
    matcher::Matcher,
    warnings::{parse_stats, result_warnings, roster_warnings},
};
use crate::models::{IterativeStats, MatchTeamsResponse, MatchingOutput, ParseStats, Participant};
use std::collections::BTreeSet;
use tracing::{error, info, warn};
use validator::Validate;

/// Entry point used by the HTTP layer and library callers
///
/// Validates the roster, runs iterative (or single round) matching, falls
/// back to one plain round if the iterative run hits an internal error, and
/// wraps everything in a `MatchTeamsResponse`. Never panics on bad input.
#[derive(Debug, Clone, Default)]
pub struct TeamFormationEngine {
    options: MatchingOptions,
}

impl TeamFormationEngine {
    pub fn new(options: MatchingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchingOptions {
        &self.options
    }

    pub fn run(
        &self,
        participants: Vec<Participant>,
        ids: &mut dyn TeamIdSource,
    ) -> MatchTeamsResponse {
        let stats = parse_stats(&participants);

        if let Err(errors) = self.options.validate() {
            let e = EngineError::InvalidConfiguration(errors.to_string());
            return MatchTeamsResponse::failure("Invalid matching options", e.to_string(), stats, Vec::new());
        }

        if participants.is_empty() {
            return MatchTeamsResponse::failure(
                "No participants provided",
                "The participant list is empty; at least two participants are required to form a team",
                stats,
                Vec::new(),
            );
        }

        let duplicates = duplicate_ids(&participants);
        if !duplicates.is_empty() {
            return MatchTeamsResponse::failure(
                "Duplicate participant ids",
                format!("Each participant must appear once; duplicated ids: {}", duplicates.join(", ")),
                stats,
                Vec::new(),
            );
        }

        let mut warnings = roster_warnings(&participants, &self.options);

        info!(
            "Matching {} participants ({} UG, {} PG), iterative: {}",
            stats.total_participants,
            stats.undergraduates,
            stats.postgraduates,
            self.options.use_iterative_matching
        );

        let resolved = if self.options.use_iterative_matching {
            let attempt = IterativeMatcher::new(&self.options).run(participants.clone(), ids);
            self.with_fallback(attempt, participants, ids, &mut warnings)
        } else {
            self.single_round(participants, ids).map(|output| (output, None))
        };

        let (output, iterative_stats) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => return self.internal_failure(e, stats, warnings),
        };

        warnings.extend(result_warnings(output.matching()));

        let summary = &output.matching().statistics;
        info!(
            "Formed {} teams, {} unmatched, {:.1}% efficiency",
            summary.teams_formed,
            output.matching().unmatched.len(),
            summary.matching_efficiency
        );

        MatchTeamsResponse {
            success: true,
            result: Some(output),
            parse_stats: stats,
            warnings,
            iterative_stats,
            error: None,
            details: None,
        }
    }

    /// Use the iterative outcome, or rerun a single plain round if it failed
    fn with_fallback(
        &self,
        attempt: EngineResult<IterativeOutcome>,
        participants: Vec<Participant>,
        ids: &mut dyn TeamIdSource,
        warnings: &mut Vec<String>,
    ) -> EngineResult<(MatchingOutput, Option<IterativeStats>)> {
        match attempt {
            Ok(outcome) => {
                let iterative_stats = IterativeStats {
                    iterations: outcome.result.iterations,
                    stop_reason: Some(outcome.stop_reason),
                    fallback_used: false,
                };
                Ok((MatchingOutput::Iterative(outcome.result), Some(iterative_stats)))
            }
            Err(e) => {
                warn!("Iterative matching failed, falling back to a single round: {}", e);
                warnings.push(format!(
                    "Iterative matching failed ({}); fell back to a single matching round",
                    e
                ));
                let output = self.single_round(participants, ids)?;
                Ok((
                    output,
                    Some(IterativeStats {
                        iterations: 1,
                        stop_reason: None,
                        fallback_used: true,
                    }),
                ))
            }
        }
    }

    fn single_round(
        &self,
        participants: Vec<Participant>,
        ids: &mut dyn TeamIdSource,
    ) -> EngineResult<MatchingOutput> {
        Matcher::new(&self.options)
            .match_round(participants, 1, ids)
            .map(MatchingOutput::Single)
    }

    fn internal_failure(
        &self,
        error: EngineError,
        stats: ParseStats,
        warnings: Vec<String>,
    ) -> MatchTeamsResponse {
        error!("Team matching failed: {}", error);
        MatchTeamsResponse::failure("Team matching failed", error.to_string(), stats, warnings)
    }
}

fn duplicate_ids(participants: &[Participant]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for p in participants {
        if !seen.insert(p.id.as_str()) {
            duplicates.insert(p.id.clone());
        }
    }
    duplicates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialTeamIds;
    use crate::core::test_support::participant;

    #[test]
    fn test_empty_roster_is_input_error() {
        let response = TeamFormationEngine::default().run(vec![], &mut SequentialTeamIds::new());
        assert!(!response.success);
        assert!(response.result.is_none());
        assert_eq!(response.error.as_deref(), Some("No participants provided"));
        assert!(response.details.is_some());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let engine = TeamFormationEngine::new(MatchingOptions {
            min_participants_per_iteration: 0,
            ..MatchingOptions::default()
        });
        let response = engine.run(vec![participant("a", 2)], &mut SequentialTeamIds::new());
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Invalid matching options"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let response = TeamFormationEngine::default().run(
            vec![participant("a", 2), participant("a", 2)],
            &mut SequentialTeamIds::new(),
        );
        assert!(!response.success);
        assert!(response.details.unwrap().contains("a"));
    }

    #[test]
    fn test_single_round_mode() {
        let engine = TeamFormationEngine::new(MatchingOptions {
            use_iterative_matching: false,
            ..MatchingOptions::default()
        });
        let response = engine.run(
            vec![participant("a", 2), participant("b", 2)],
            &mut SequentialTeamIds::new(),
        );

        assert!(response.success);
        assert!(response.iterative_stats.is_none());
        assert!(matches!(response.result, Some(MatchingOutput::Single(_))));
    }

    #[test]
    fn test_iterative_mode_reports_stats() {
        let response = TeamFormationEngine::default().run(
            (0..5).map(|i| participant(&format!("p{}", i), 2)).collect(),
            &mut SequentialTeamIds::new(),
        );

        assert!(response.success);
        let stats = response.iterative_stats.unwrap();
        assert_eq!(stats.iterations, 1);
        assert!(!stats.fallback_used);
        assert!(response.warnings.iter().any(|w| w.contains("could not be placed")));
    }

    #[test]
    fn test_internal_error_falls_back_to_single_round() {
        let engine = TeamFormationEngine::default();
        let mut warnings = Vec::new();
        let failed = Err(EngineError::PoolInvariant("simulated".to_string()));

        let (output, stats) = engine
            .with_fallback(
                failed,
                vec![participant("a", 2), participant("b", 2)],
                &mut SequentialTeamIds::new(),
                &mut warnings,
            )
            .unwrap();

        let stats = stats.unwrap();
        assert!(stats.fallback_used);
        assert_eq!(stats.stop_reason, None);
        assert!(matches!(output, MatchingOutput::Single(ref r) if r.teams.len() == 1));
        assert!(warnings[0].contains("simulated"));
    }
}
