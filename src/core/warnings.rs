use crate::config::MatchingOptions;
use crate::core::matcher::TEAM_SIZES;
use crate::models::{MatchingResult, Participant, ParseStats};

/// Efficiency below this percentage is reported
pub const LOW_EFFICIENCY_THRESHOLD: f64 = 80.0;

pub fn parse_stats(participants: &[Participant]) -> ParseStats {
    let mut stats = ParseStats {
        total_participants: participants.len(),
        ..ParseStats::default()
    };

    for p in participants {
        if p.is_postgraduate() {
            stats.postgraduates += 1;
        } else {
            stats.undergraduates += 1;
        }
        *stats.preferred_team_sizes.entry(p.preferred_team_size).or_insert(0) += 1;
        if !p.missing_fields().is_empty() {
            stats.missing_field_participants += 1;
        }
    }

    stats
}

/// Non-fatal issues visible before matching starts
pub fn roster_warnings(participants: &[Participant], options: &MatchingOptions) -> Vec<String> {
    let mut warnings = Vec::new();

    if !options.strict_education_separation {
        warnings.push(
            "strictEducationSeparation=false is not supported; undergraduate and postgraduate cohorts are still matched separately"
                .to_string(),
        );
    }

    for p in participants {
        let missing = p.missing_fields();
        if !missing.is_empty() {
            let label = if p.id.trim().is_empty() { "<no id>" } else { p.id.as_str() };
            warnings.push(format!(
                "Participant {} is missing required fields: {}",
                label,
                missing.join(", ")
            ));
        }
        if !TEAM_SIZES.contains(&p.preferred_team_size) {
            warnings.push(format!(
                "Participant {} prefers unsupported team size {}",
                p.id, p.preferred_team_size
            ));
        }
    }

    let (postgraduates, undergraduates): (Vec<&Participant>, Vec<&Participant>) =
        participants.iter().partition(|p| p.is_postgraduate());

    if !participants.is_empty() {
        if undergraduates.is_empty() {
            warnings.push("No undergraduate participants in roster".to_string());
        }
        if postgraduates.is_empty() {
            warnings.push("No postgraduate participants in roster".to_string());
        }
    }

    for (label, cohort) in [("undergraduate", &undergraduates), ("postgraduate", &postgraduates)] {
        for size in TEAM_SIZES {
            let count = cohort.iter().filter(|p| p.preferred_team_size == size).count();
            if count > 0 && count % size != 0 {
                warnings.push(format!(
                    "{} {} participants prefer teams of {}; at least {} will be left unmatched",
                    count,
                    label,
                    size,
                    count % size
                ));
            }
        }
    }

    warnings
}

/// Non-fatal issues about a finished result
pub fn result_warnings(result: &MatchingResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.statistics.total_participants > 0
        && result.statistics.matching_efficiency < LOW_EFFICIENCY_THRESHOLD
    {
        warnings.push(format!(
            "Matching efficiency {:.1}% is below {:.0}%",
            result.statistics.matching_efficiency, LOW_EFFICIENCY_THRESHOLD
        ));
    }

    if !result.unmatched.is_empty() {
        warnings.push(format!(
            "{} participants could not be placed in a team",
            result.unmatched.len()
        ));
    }

    warnings
}
