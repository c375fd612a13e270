use crate::models::Participant;

/// Undergraduate / postgraduate split of a roster
#[derive(Debug, Clone, Default)]
pub struct Cohorts {
    pub undergraduates: Vec<Participant>,
    pub postgraduates: Vec<Participant>,
}

impl Cohorts {
    pub fn len(&self) -> usize {
        self.undergraduates.len() + self.postgraduates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split participants into disjoint UG and PG cohorts, preserving input order
pub fn partition_by_cohort(participants: Vec<Participant>) -> Cohorts {
    let (postgraduates, undergraduates): (Vec<_>, Vec<_>) = participants
        .into_iter()
        .partition(|p| p.is_postgraduate());

    Cohorts {
        undergraduates,
        postgraduates,
    }
}
