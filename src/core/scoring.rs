use crate::models::Participant;
use std::collections::{BTreeMap, HashSet};

pub const EXPERIENCE_DIVERSITY_BONUS: i32 = 25;
pub const SHARED_CASE_BONUS: i32 = 15;
pub const UNIQUE_SKILL_BONUS: i32 = 10;
pub const AVAILABILITY_BONUS: i32 = 20;
pub const UNIQUE_ROLE_BONUS: i32 = 8;

/// Maximum number of shared case types reported on a team
pub const MAX_COMMON_CASE_TYPES: usize = 3;

/// Score how well `candidate` would extend `team`
///
/// Scoring formula:
/// score = (
///     25  if the candidate's experience level is new to the team +
///     15  per case preference shared with the team +
///     10  per core strength the team does not have yet +
///     20  if availability is compatible with at least one member +
///     8   per preferred role the team does not have yet
/// )
pub fn calculate_compatibility_score(team: &[&Participant], candidate: &Participant) -> i32 {
    let mut score = 0;

    if !team.iter().any(|m| m.experience == candidate.experience) {
        score += EXPERIENCE_DIVERSITY_BONUS;
    }

    let team_cases: HashSet<&str> = team
        .iter()
        .flat_map(|m| m.case_preferences.iter().map(String::as_str))
        .collect();
    let shared_cases = distinct(&candidate.case_preferences)
        .filter(|c| team_cases.contains(c))
        .count() as i32;
    score += SHARED_CASE_BONUS * shared_cases;

    let team_strengths: HashSet<&str> = team
        .iter()
        .flat_map(|m| m.core_strengths.iter().map(String::as_str))
        .collect();
    let new_strengths = distinct(&candidate.core_strengths)
        .filter(|s| !team_strengths.contains(s))
        .count() as i32;
    score += UNIQUE_SKILL_BONUS * new_strengths;

    let level = candidate.availability.level();
    if team
        .iter()
        .any(|m| level.is_compatible_with(m.availability.level()))
    {
        score += AVAILABILITY_BONUS;
    }

    let team_roles: HashSet<&str> = team
        .iter()
        .flat_map(|m| m.preferred_roles.iter().map(String::as_str))
        .collect();
    let new_roles = distinct(&candidate.preferred_roles)
        .filter(|r| !team_roles.contains(r))
        .count() as i32;
    score += UNIQUE_ROLE_BONUS * new_roles;

    score
}

fn distinct(values: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(move |v| seen.insert(*v))
}

/// Mean pairwise compatibility of a finished team, clamped to 0-100
pub fn team_compatibility_score(members: &[Participant]) -> f64 {
    let mut total = 0i64;
    let mut pairs = 0i64;

    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            total += calculate_compatibility_score(&[a], b) as i64;
            pairs += 1;
        }
    }

    if pairs == 0 {
        return 0.0;
    }

    (total as f64 / pairs as f64).clamp(0.0, 100.0)
}

/// Mean experience code (0-3) of the members
pub fn average_experience(members: &[Participant]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let sum: u32 = members.iter().map(|m| m.experience.code() as u32).sum();
    sum as f64 / members.len() as f64
}

/// Case types held by at least two members, most common first
pub fn common_case_types(members: &[Participant]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for member in members {
        for case_type in distinct(&member.case_preferences) {
            *counts.entry(case_type).or_insert(0) += 1;
        }
    }

    let mut shared: Vec<(&str, usize)> = counts.into_iter().filter(|(_, n)| *n >= 2).collect();
    // BTreeMap already yields names ascending, so a stable sort keeps that as the tie-break
    shared.sort_by(|a, b| b.1.cmp(&a.1));

    shared
        .into_iter()
        .take(MAX_COMMON_CASE_TYPES)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Percentage of members whose preferred size equals `team_size`
pub fn preferred_size_match(members: &[Participant], team_size: usize) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let matching = members
        .iter()
        .filter(|m| m.preferred_team_size == team_size)
        .count();
    100.0 * matching as f64 / members.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::participant;
    use crate::models::{Availability, ExperienceLevel};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_components() {
        let mut member = participant("a", 3);
        member.experience = ExperienceLevel::Finalist;
        member.case_preferences = strings(&["Consulting", "Marketing"]);
        member.core_strengths = strings(&["Finance"]);
        member.preferred_roles = strings(&["Lead"]);
        member.availability = Availability::FullyAvailable;

        let mut candidate = participant("b", 3);
        candidate.experience = ExperienceLevel::None;
        candidate.case_preferences = strings(&["Consulting", "Operations"]);
        candidate.core_strengths = strings(&["Finance", "Research", "Design"]);
        candidate.preferred_roles = strings(&["Lead", "Analyst"]);
        candidate.availability = Availability::PartiallyAvailable;

        // 25 experience + 15 one shared case + 20 two new skills + 20 availability + 8 one new role
        assert_eq!(calculate_compatibility_score(&[&member], &candidate), 88);
    }

    #[test]
    fn test_incompatible_availability_gets_no_bonus() {
        let mut member = participant("a", 2);
        member.availability = Availability::FullyAvailable;
        let mut candidate = participant("b", 2);
        candidate.availability = Availability::VeryLimited;

        // Same experience, nothing else set: no bonus at all
        assert_eq!(calculate_compatibility_score(&[&member], &candidate), 0);
    }

    #[test]
    fn test_duplicate_entries_count_once() {
        let member = participant("a", 2);
        let mut candidate = participant("b", 2);
        candidate.core_strengths = strings(&["Finance", "Finance"]);

        assert_eq!(
            calculate_compatibility_score(&[&member], &candidate),
            UNIQUE_SKILL_BONUS + AVAILABILITY_BONUS
        );
    }

    #[test]
    fn test_team_compatibility_clamped() {
        let mut a = participant("a", 2);
        a.core_strengths = strings(&["A", "B", "C"]);
        a.preferred_roles = strings(&["X", "Y"]);
        a.case_preferences = strings(&["P", "Q", "R"]);
        a.experience = ExperienceLevel::Finalist;
        let mut b = a.clone();
        b.id = "b".to_string();
        b.core_strengths = strings(&["D", "E", "F"]);
        b.preferred_roles = strings(&["Z", "W"]);
        b.experience = ExperienceLevel::None;

        // 25 + 45 + 30 + 20 + 16 = 136, clamped
        assert_eq!(team_compatibility_score(&[a, b]), 100.0);
    }

    #[test]
    fn test_common_case_types_ordering() {
        let mut a = participant("a", 4);
        a.case_preferences = strings(&["Strategy", "Finance", "Marketing"]);
        let mut b = participant("b", 4);
        b.case_preferences = strings(&["Finance", "Marketing", "Operations"]);
        let mut c = participant("c", 4);
        c.case_preferences = strings(&["Finance", "Operations", "Strategy"]);
        let mut d = participant("d", 4);
        d.case_preferences = strings(&["Product"]);

        let common = common_case_types(&[a, b, c, d]);
        assert_eq!(common, strings(&["Finance", "Marketing", "Operations"]));
    }

    #[test]
    fn test_average_experience_and_size_match() {
        let mut a = participant("a", 2);
        a.experience = ExperienceLevel::Finalist;
        let mut b = participant("b", 3);
        b.experience = ExperienceLevel::Participated;

        let members = vec![a, b];
        assert_eq!(average_experience(&members), 2.0);
        assert_eq!(preferred_size_match(&members, 2), 50.0);
    }
}
