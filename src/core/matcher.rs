use crate::config::{LogLevel, MatchingOptions};
use crate::core::{
    bucket::form_bucket,
    builder::TeamBuilder,
    cohort::partition_by_cohort,
    error::{EngineError, EngineResult},
    filters::FilterPolicy,
    ids::TeamIdSource,
    pool::ParticipantPool,
};
use crate::models::{MatchingResult, Participant};
use tracing::debug;

/// Team sizes attempted in each cohort, in order
pub const TEAM_SIZES: [usize; 3] = [2, 3, 4];

/// Single round orchestrator
///
/// # Pipeline Stages
/// 1. Cohort partition (undergraduate / postgraduate)
/// 2. Per cohort, bucket formation for sizes 2, 3 and 4
/// 3. Aggregation of teams, leftovers and statistics
///
/// Leftovers are returned as-is; no cross-size or cross-preference fallback
/// is attempted.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    builder: TeamBuilder,
    log_level: LogLevel,
}

impl Matcher {
    pub fn new(options: &MatchingOptions) -> Self {
        let policy = FilterPolicy::from_options(options);
        Self {
            builder: TeamBuilder::new(policy, options.log_level),
            log_level: options.log_level,
        }
    }

    pub fn with_strict_policy() -> Self {
        Self {
            builder: TeamBuilder::default(),
            log_level: LogLevel::Minimal,
        }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.builder.policy()
    }

    /// Run one full matching round over `participants`
    ///
    /// # Arguments
    /// * `participants` - The pool for this round
    /// * `round` - 1-based round number, embedded in team ids
    /// * `ids` - Team id source
    ///
    /// # Returns
    /// MatchingResult whose teams and unmatched together hold every input participant
    pub fn match_round(
        &self,
        participants: Vec<Participant>,
        round: usize,
        ids: &mut dyn TeamIdSource,
    ) -> EngineResult<MatchingResult> {
        let total = participants.len();
        let cohorts = partition_by_cohort(participants);

        let mut teams = Vec::new();
        let mut unmatched = Vec::new();

        for (label, cohort) in [
            ("undergraduate", cohorts.undergraduates),
            ("postgraduate", cohorts.postgraduates),
        ] {
            let cohort_size = cohort.len();
            let mut pool = ParticipantPool::new(cohort);

            for size in TEAM_SIZES {
                let outcome = form_bucket(&mut pool, &self.builder, size, round, ids, self.log_level)?;

                if self.log_level >= LogLevel::Detailed {
                    debug!(
                        "Round {}: {} cohort size {} formed {} teams, {} left in bucket",
                        round,
                        label,
                        size,
                        outcome.teams.len(),
                        outcome.remaining
                    );
                }

                teams.extend(outcome.teams);
            }

            if pool.taken() + pool.len() != cohort_size {
                return Err(EngineError::PoolInvariant(format!(
                    "{} cohort lost participants: {} taken + {} live != {}",
                    label,
                    pool.taken(),
                    pool.len(),
                    cohort_size
                )));
            }

            unmatched.extend(pool.into_remaining());
        }

        let result = MatchingResult::new(teams, unmatched, total);

        if result.placed_count() + result.unmatched.len() != total {
            return Err(EngineError::PoolInvariant(format!(
                "round {} placed {} and left {} of {} participants",
                round,
                result.placed_count(),
                result.unmatched.len(),
                total
            )));
        }

        Ok(result)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_strict_policy()
    }
}
