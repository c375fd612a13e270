use crate::config::MatchingOptions;
use crate::core::error::{EngineError, EngineResult};
use crate::models::{Participant, TeamPreference};

/// How a candidate's preferred team size must relate to the target size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    /// preferredTeamSize == target
    Exact,
    /// |preferredTeamSize - target| <= 1
    WithinOne,
}

/// Which existing members a candidate's availability must be compatible with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityRule {
    AllMembers,
    AnyMember,
}

/// Constraint relaxation level consumed by the eligibility filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    pub size: SizeRule,
    pub availability: AvailabilityRule,
}

impl FilterPolicy {
    pub const STRICT: FilterPolicy = FilterPolicy {
        size: SizeRule::Exact,
        availability: AvailabilityRule::AllMembers,
    };

    pub fn from_options(options: &MatchingOptions) -> Self {
        Self {
            size: if options.strict_team_size_matching {
                SizeRule::Exact
            } else {
                SizeRule::WithinOne
            },
            availability: if options.strict_availability_matching {
                AvailabilityRule::AllMembers
            } else {
                AvailabilityRule::AnyMember
            },
        }
    }

    pub fn is_strict(&self) -> bool {
        *self == Self::STRICT
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Stage 1: team size preference
#[inline]
pub fn matches_team_size(candidate: &Participant, target_size: usize, rule: SizeRule) -> bool {
    match rule {
        SizeRule::Exact => candidate.preferred_team_size == target_size,
        SizeRule::WithinOne => candidate.preferred_team_size.abs_diff(target_size) <= 1,
    }
}

/// Resolve the single composition preference a team is operating under.
///
/// `Either` members are wildcards. A team holding both an `UndergradsOnly`
/// and a `PostgradsOnly` member has no valid preference.
pub fn resolve_team_preference(team: &[&Participant]) -> EngineResult<TeamPreference> {
    let mut resolved = TeamPreference::Either;

    for member in team {
        match (resolved, member.team_preference) {
            (_, TeamPreference::Either) => {}
            (TeamPreference::Either, pref) => resolved = pref,
            (current, pref) if current == pref => {}
            _ => {
                let anchor_id = team.first().map(|p| p.id.clone()).unwrap_or_default();
                return Err(EngineError::MixedTeamPreference { anchor_id });
            }
        }
    }

    Ok(resolved)
}

/// Stage 2: team composition preference
#[inline]
pub fn matches_team_preference(
    candidate: &Participant,
    team: &[&Participant],
    team_preference: TeamPreference,
) -> bool {
    match team_preference {
        TeamPreference::UndergradsOnly => {
            !candidate.is_postgraduate()
                && candidate.team_preference != TeamPreference::PostgradsOnly
                && !team.iter().any(|m| m.is_postgraduate())
        }
        TeamPreference::PostgradsOnly => {
            candidate.is_postgraduate()
                && candidate.team_preference != TeamPreference::UndergradsOnly
                && team.iter().all(|m| m.is_postgraduate())
        }
        TeamPreference::Either => candidate.team_preference == TeamPreference::Either,
    }
}

/// Stage 3: availability compatibility against existing members
#[inline]
pub fn matches_availability(
    candidate: &Participant,
    team: &[&Participant],
    rule: AvailabilityRule,
) -> bool {
    let level = candidate.availability.level();
    match rule {
        AvailabilityRule::AllMembers => team
            .iter()
            .all(|m| level.is_compatible_with(m.availability.level())),
        AvailabilityRule::AnyMember => {
            team.is_empty()
                || team
                    .iter()
                    .any(|m| level.is_compatible_with(m.availability.level()))
        }
    }
}

/// A pool index paired with the participant stored there
pub type Candidate<'a> = (usize, &'a Participant);

/// Run the filter chain and return the eligible subset of `candidates`,
/// preserving their order. An empty result means the team cannot grow.
pub fn eligible_candidates<'a>(
    team: &[&Participant],
    candidates: &[Candidate<'a>],
    target_size: usize,
    policy: FilterPolicy,
) -> EngineResult<Vec<Candidate<'a>>> {
    let team_preference = resolve_team_preference(team)?;

    let eligible = candidates
        .iter()
        .copied()
        .filter(|(_, c)| matches_team_size(c, target_size, policy.size))
        .filter(|(_, c)| team.is_empty() || matches_team_preference(c, team, team_preference))
        .filter(|(_, c)| matches_availability(c, team, policy.availability))
        .collect();

    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::participant;
    use crate::models::{Availability, CurrentYear};

    fn pg(id: &str, size: usize) -> Participant {
        let mut p = participant(id, size);
        p.current_year = CurrentYear::PgFirstYear;
        p
    }

    #[test]
    fn test_exact_size_rule() {
        let p = participant("a", 3);
        assert!(matches_team_size(&p, 3, SizeRule::Exact));
        assert!(!matches_team_size(&p, 2, SizeRule::Exact));
        assert!(!matches_team_size(&p, 4, SizeRule::Exact));
    }

    #[test]
    fn test_within_one_size_rule() {
        let p = participant("a", 3);
        assert!(matches_team_size(&p, 2, SizeRule::WithinOne));
        assert!(matches_team_size(&p, 4, SizeRule::WithinOne));
        let q = participant("b", 2);
        assert!(!matches_team_size(&q, 4, SizeRule::WithinOne));
    }

    #[test]
    fn test_either_team_only_accepts_either() {
        let anchor = participant("a", 2);
        let mut ug_only = participant("b", 2);
        ug_only.team_preference = TeamPreference::UndergradsOnly;
        let either = participant("c", 2);

        let team = [&anchor];
        assert!(!matches_team_preference(&ug_only, &team, TeamPreference::Either));
        assert!(matches_team_preference(&either, &team, TeamPreference::Either));
    }

    #[test]
    fn test_undergrad_team_rejects_postgrads() {
        let mut anchor = participant("a", 2);
        anchor.team_preference = TeamPreference::UndergradsOnly;
        let ug_either = participant("b", 2);
        let pg_either = pg("c", 2);

        let team = [&anchor];
        assert!(matches_team_preference(&ug_either, &team, TeamPreference::UndergradsOnly));
        assert!(!matches_team_preference(&pg_either, &team, TeamPreference::UndergradsOnly));
    }

    #[test]
    fn test_undergrad_preference_with_postgrad_member_rejects_all() {
        let mut anchor = pg("a", 2);
        anchor.team_preference = TeamPreference::UndergradsOnly;
        let candidate = participant("b", 2);

        let team = [&anchor];
        assert!(!matches_team_preference(&candidate, &team, TeamPreference::UndergradsOnly));
    }

    #[test]
    fn test_postgrad_team_mirrors_undergrad_rule() {
        let mut anchor = pg("a", 2);
        anchor.team_preference = TeamPreference::PostgradsOnly;
        let mut pg_only = pg("b", 2);
        pg_only.team_preference = TeamPreference::PostgradsOnly;
        let mut pg_ug_only = pg("c", 2);
        pg_ug_only.team_preference = TeamPreference::UndergradsOnly;

        let team = [&anchor];
        assert!(matches_team_preference(&pg_only, &team, TeamPreference::PostgradsOnly));
        assert!(!matches_team_preference(&pg_ug_only, &team, TeamPreference::PostgradsOnly));
    }

    #[test]
    fn test_resolve_preference_mixed_is_error() {
        let mut a = participant("a", 2);
        a.team_preference = TeamPreference::UndergradsOnly;
        let mut b = participant("b", 2);
        b.team_preference = TeamPreference::PostgradsOnly;
        let c = participant("c", 2);

        assert_eq!(
            resolve_team_preference(&[&c, &a]).unwrap(),
            TeamPreference::UndergradsOnly
        );
        assert_eq!(
            resolve_team_preference(&[&a, &b]),
            Err(EngineError::MixedTeamPreference { anchor_id: "a".to_string() })
        );
    }

    #[test]
    fn test_availability_all_members() {
        let mut high = participant("a", 2);
        high.availability = Availability::FullyAvailable;
        let mut medium = participant("b", 2);
        medium.availability = Availability::PartiallyAvailable;
        let mut low = participant("c", 2);
        low.availability = Availability::NotAvailable;

        assert!(matches_availability(&medium, &[&high], AvailabilityRule::AllMembers));
        assert!(!matches_availability(&low, &[&high], AvailabilityRule::AllMembers));
        assert!(!matches_availability(&low, &[&high, &medium], AvailabilityRule::AllMembers));
        assert!(matches_availability(&low, &[&high, &medium], AvailabilityRule::AnyMember));
    }

    #[test]
    fn test_eligible_candidates_preserves_order() {
        let anchor = participant("a", 3);
        let b = participant("b", 3);
        let c = participant("c", 2);
        let d = participant("d", 3);

        let eligible = eligible_candidates(
            &[&anchor],
            &[(1, &b), (2, &c), (3, &d)],
            3,
            FilterPolicy::STRICT,
        )
        .unwrap();
        let ids: Vec<_> = eligible.iter().map(|(i, p)| (*i, p.id.as_str())).collect();
        assert_eq!(ids, vec![(1, "b"), (3, "d")]);
    }

    #[test]
    fn test_policy_from_options() {
        let strict = FilterPolicy::from_options(&MatchingOptions::default());
        assert!(strict.is_strict());

        let relaxed = FilterPolicy::from_options(&MatchingOptions {
            strict_team_size_matching: false,
            strict_availability_matching: false,
            ..MatchingOptions::default()
        });
        assert_eq!(relaxed.size, SizeRule::WithinOne);
        assert_eq!(relaxed.availability, AvailabilityRule::AnyMember);
    }
}
