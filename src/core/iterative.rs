use crate::config::{LogLevel, MatchingOptions};
use crate::core::error::EngineResult;
use crate::core::ids::TeamIdSource;
use crate::core::matcher::Matcher;
use crate::models::{IterationRecord, IterativeMatchingResult, MatchingResult, Participant};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Zero-progress rounds tolerated before giving up on a small remainder
pub const MAX_CONSECUTIVE_FAILURES: usize = 8;

/// Remainders smaller than this may stop early after repeated stalls
pub const STALL_REMAINDER_THRESHOLD: usize = 4;

/// Why the orchestrator stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// Everyone was placed
    AllMatched,
    /// Fewer participants left than the per-iteration minimum
    BelowMinimum,
    /// Round limit reached
    MaxIterations,
    /// Too many consecutive rounds without progress on a small remainder
    Stalled,
}

/// Iterative result plus the reason the loop ended
#[derive(Debug, Clone)]
pub struct IterativeOutcome {
    pub result: IterativeMatchingResult,
    pub stop_reason: StopReason,
}

/// Re-runs single round matching on the shrinking unmatched pool
#[derive(Debug, Clone)]
pub struct IterativeMatcher {
    matcher: Matcher,
    min_participants: usize,
    options: MatchingOptions,
}

impl IterativeMatcher {
    pub fn new(options: &MatchingOptions) -> Self {
        Self {
            matcher: Matcher::new(options),
            min_participants: options.min_participants_per_iteration.max(2),
            options: options.clone(),
        }
    }

    pub fn run(
        &self,
        participants: Vec<Participant>,
        ids: &mut dyn TeamIdSource,
    ) -> EngineResult<IterativeOutcome> {
        let total = participants.len();
        let max_iterations = self.options.effective_max_iterations(total);

        let mut remaining = participants;
        let mut all_teams = Vec::new();
        let mut history = Vec::new();
        let mut iteration = 0;
        let mut consecutive_failures = 0;

        let stop_reason = loop {
            if remaining.is_empty() {
                break StopReason::AllMatched;
            }
            if remaining.len() < self.min_participants {
                break StopReason::BelowMinimum;
            }
            if iteration >= max_iterations {
                break StopReason::MaxIterations;
            }

            iteration += 1;
            let processed = remaining.len();
            let round = self.matcher.match_round(remaining, iteration, ids)?;

            let matched = round.placed_count();
            let record = IterationRecord {
                iteration,
                participants_processed: processed,
                teams_formed: round.teams.len(),
                participants_matched: matched,
                remaining_unmatched: round.unmatched.len(),
                efficiency: 100.0 * matched as f64 / processed as f64,
            };

            if self.options.log_level >= LogLevel::Detailed {
                debug!(
                    "Iteration {}: {} processed, {} teams, {} matched, {} remaining",
                    record.iteration,
                    record.participants_processed,
                    record.teams_formed,
                    record.participants_matched,
                    record.remaining_unmatched
                );
            }

            history.push(record);
            all_teams.extend(round.teams);
            remaining = round.unmatched;

            if matched == 0 {
                consecutive_failures += 1;
                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES
                    && remaining.len() < STALL_REMAINDER_THRESHOLD
                {
                    break StopReason::Stalled;
                }
            } else {
                consecutive_failures = 0;
            }
        };

        let result = MatchingResult::new(all_teams, remaining, total);

        info!(
            "Iterative matching finished after {} iterations ({:?}): {} teams, {:.1}% efficiency",
            iteration,
            stop_reason,
            result.statistics.teams_formed,
            result.statistics.matching_efficiency
        );

        Ok(IterativeOutcome {
            result: IterativeMatchingResult {
                result,
                iterations: iteration,
                iteration_history: history,
            },
            stop_reason,
        })
    }
}
