use uuid::Uuid;

/// Source of team identifiers, injected into the engine
pub trait TeamIdSource {
    /// Next id for a team formed in `round` (1-based)
    fn next_id(&mut self, round: usize) -> String;
}

/// Deterministic `team-r{round}-{n}` ids with a run-wide counter
#[derive(Debug, Clone, Default)]
pub struct SequentialTeamIds {
    next: u64,
}

impl SequentialTeamIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TeamIdSource for SequentialTeamIds {
    fn next_id(&mut self, round: usize) -> String {
        self.next += 1;
        format!("team-r{}-{}", round, self.next)
    }
}

/// Random `team-r{round}-{uuid}` ids for the service
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTeamIds;

impl TeamIdSource for UuidTeamIds {
    fn next_id(&mut self, round: usize) -> String {
        format!("team-r{}-{}", round, Uuid::new_v4())
    }
}
