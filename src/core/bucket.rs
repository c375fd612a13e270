use crate::config::LogLevel;
use crate::core::builder::TeamBuilder;
use crate::core::error::EngineResult;
use crate::core::filters::matches_team_size;
use crate::core::ids::TeamIdSource;
use crate::core::pool::ParticipantPool;
use crate::core::scoring::{
    average_experience, common_case_types, preferred_size_match, team_compatibility_score,
};
use crate::models::{Participant, Team};
use tracing::trace;

/// Teams formed for one (cohort, size) bucket
#[derive(Debug, Clone, Default)]
pub struct BucketOutcome {
    pub teams: Vec<Team>,
    /// Size-eligible participants still live in the pool afterwards
    pub remaining: usize,
}

/// Turn a completed member list into a `Team`
pub fn materialize_team(id: String, members: Vec<Participant>, team_size: usize) -> Team {
    Team {
        id,
        compatibility_score: team_compatibility_score(&members),
        average_experience: average_experience(&members),
        common_case_types: common_case_types(&members),
        preferred_team_size_match: preferred_size_match(&members, team_size),
        team_size,
        members,
    }
}

/// Repeatedly build teams of `target_size` until the builder fails.
///
/// The pool is owned by the caller for the whole pass; members of each
/// formed team are taken out before the next attempt.
pub fn form_bucket(
    pool: &mut ParticipantPool,
    builder: &TeamBuilder,
    target_size: usize,
    round: usize,
    ids: &mut dyn TeamIdSource,
    log_level: LogLevel,
) -> EngineResult<BucketOutcome> {
    let mut teams = Vec::new();

    while let Some(indices) = builder.build(pool, target_size)? {
        let members = pool.take(&indices)?;
        let team = materialize_team(ids.next_id(round), members, target_size);

        if log_level >= LogLevel::Verbose {
            trace!(
                "Formed {} (size {}, score {:.1}) in round {}",
                team.id,
                team.team_size,
                team.compatibility_score,
                round
            );
        }

        teams.push(team);
    }

    let remaining = pool
        .live_participants()
        .filter(|(_, p)| matches_team_size(p, target_size, builder.policy().size))
        .count();

    Ok(BucketOutcome { teams, remaining })
}
