use crate::config::LogLevel;
use crate::core::error::EngineResult;
use crate::core::filters::{eligible_candidates, matches_team_size, Candidate, FilterPolicy};
use crate::core::pool::ParticipantPool;
use crate::core::scoring::calculate_compatibility_score;
use crate::models::Participant;
use tracing::trace;

/// Builds a single team of an exact size from a pool
///
/// # Stages
/// 1. Anchor selection: first size-eligible participant in canonical order
/// 2. Greedy extension: filter the remaining candidates against the team,
///    then append the best scoring one
/// 3. Completion check: only a team of exactly the target size is returned
///
/// The pool is only read. A failed attempt leaves no trace.
#[derive(Debug, Clone, Copy)]
pub struct TeamBuilder {
    policy: FilterPolicy,
    log_level: LogLevel,
}

impl TeamBuilder {
    pub fn new(policy: FilterPolicy, log_level: LogLevel) -> Self {
        Self { policy, log_level }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Try to build one team of `target_size`.
    ///
    /// Returns the pool indices of the members in join order, or `None` if
    /// no full team can be formed from the current anchor.
    pub fn build(
        &self,
        pool: &ParticipantPool,
        target_size: usize,
    ) -> EngineResult<Option<Vec<usize>>> {
        let mut remaining: Vec<Candidate<'_>> = pool
            .live_participants()
            .filter(|(_, p)| matches_team_size(p, target_size, self.policy.size))
            .collect();

        if remaining.is_empty() || target_size == 0 {
            return Ok(None);
        }

        let anchor = remaining.remove(0);
        let mut team: Vec<Candidate<'_>> = vec![anchor];

        while team.len() < target_size && !remaining.is_empty() {
            let members: Vec<&Participant> = team.iter().map(|(_, p)| *p).collect();
            let eligible = eligible_candidates(&members, &remaining, target_size, self.policy)?;

            let Some(chosen) = select_best(&members, &eligible) else {
                if self.log_level >= LogLevel::Verbose {
                    trace!(
                        "No eligible candidate for team anchored by {} at {}/{} members",
                        anchor.1.id,
                        team.len(),
                        target_size
                    );
                }
                return Ok(None);
            };

            remaining.retain(|(i, _)| *i != chosen.0);
            team.push(chosen);
        }

        if team.len() != target_size {
            if self.log_level >= LogLevel::Verbose {
                trace!(
                    "Pool exhausted for team anchored by {} at {}/{} members",
                    anchor.1.id,
                    team.len(),
                    target_size
                );
            }
            return Ok(None);
        }

        Ok(Some(team.into_iter().map(|(i, _)| i).collect()))
    }
}

impl Default for TeamBuilder {
    fn default() -> Self {
        Self::new(FilterPolicy::STRICT, LogLevel::Minimal)
    }
}

/// Highest scoring eligible candidate. On equal scores the earliest one in
/// canonical order wins, so the choice is deterministic.
fn select_best<'a>(members: &[&Participant], eligible: &[Candidate<'a>]) -> Option<Candidate<'a>> {
    let mut best: Option<(Candidate<'a>, i32)> = None;

    for &candidate in eligible {
        let score = calculate_compatibility_score(members, candidate.1);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
