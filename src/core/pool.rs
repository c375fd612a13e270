use crate::core::error::{EngineError, EngineResult};
use crate::models::Participant;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Canonical participant ordering used for anchor selection and tie-breaks:
/// experience descending, availability band descending, id ascending.
pub fn canonical_order(a: &Participant, b: &Participant) -> Ordering {
    b.experience
        .code()
        .cmp(&a.experience.code())
        .then_with(|| b.availability.rank().cmp(&a.availability.rank()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Arena of participants plus the set of indices still available.
///
/// Every participant is either live in the pool or has been taken into a
/// team, never both. Taking is the only mutation and it is all-or-nothing.
#[derive(Debug, Clone)]
pub struct ParticipantPool {
    arena: Vec<Participant>,
    live: BTreeSet<usize>,
}

impl ParticipantPool {
    /// Build a pool; the arena is stored in canonical order
    pub fn new(mut participants: Vec<Participant>) -> Self {
        participants.sort_by(canonical_order);
        let live = (0..participants.len()).collect();
        Self {
            arena: participants,
            live,
        }
    }

    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn taken(&self) -> usize {
        self.arena.len() - self.live.len()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.arena.get(index)
    }

    pub fn is_live(&self, index: usize) -> bool {
        self.live.contains(&index)
    }

    /// Live participants in canonical order, paired with their index
    pub fn live_participants(&self) -> impl Iterator<Item = (usize, &Participant)> + '_ {
        self.live.iter().map(move |&i| (i, &self.arena[i]))
    }

    /// Remove `indices` from the pool and return clones of those participants.
    ///
    /// Fails without mutating anything if any index is not live or repeats.
    pub fn take(&mut self, indices: &[usize]) -> EngineResult<Vec<Participant>> {
        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        if unique.len() != indices.len() {
            return Err(EngineError::PoolInvariant(format!(
                "duplicate indices in take request {:?}",
                indices
            )));
        }
        if let Some(missing) = indices.iter().find(|i| !self.live.contains(*i)) {
            return Err(EngineError::PoolInvariant(format!(
                "index {} is not available",
                missing
            )));
        }

        let taken = indices
            .iter()
            .map(|&i| {
                self.live.remove(&i);
                self.arena[i].clone()
            })
            .collect();
        Ok(taken)
    }

    /// Participants still available, in canonical order
    pub fn into_remaining(self) -> Vec<Participant> {
        let Self { arena, live } = self;
        arena
            .into_iter()
            .enumerate()
            .filter(|(i, _)| live.contains(i))
            .map(|(_, p)| p)
            .collect()
    }
}
