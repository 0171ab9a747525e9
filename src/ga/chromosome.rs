//! Random chromosome construction.
//!
//! # Encoding
//!
//! A chromosome is a sequence of [`Assignment`]s, one per expanded session
//! unit. Construction shuffles the slot list and the session list
//! independently and pairs them positionally, so a fresh chromosome never
//! uses a slot twice. Rooms are drawn uniformly from the pool matching each
//! session's kind.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Assignment, Chromosome};
use crate::error::{Result, TimetableError};
use crate::problem::{SessionKind, SessionUnit, SlotGrid, SlotKey};

/// Builds random chromosomes for a fixed grid and session list.
#[derive(Debug, Clone)]
pub struct ChromosomeBuilder {
    grid: SlotGrid,
    slots: Vec<SlotKey>,
    sessions: Vec<SessionUnit>,
}

impl ChromosomeBuilder {
    /// Creates a builder after checking the setup can be satisfied.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::Capacity`] if there are more sessions than slots.
    /// - [`TimetableError::Configuration`] if the grid is malformed, there
    ///   are no sessions, or a session kind has an empty room pool.
    pub fn new(grid: SlotGrid, sessions: Vec<SessionUnit>) -> Result<Self> {
        grid.validate()?;
        if sessions.is_empty() {
            return Err(TimetableError::configuration("no sessions to schedule"));
        }
        grid.check_capacity(sessions.len())?;

        for kind in [SessionKind::Lecture, SessionKind::Lab] {
            let needed = sessions.iter().any(|s| s.kind == kind);
            if needed && grid.rooms_for(kind).is_empty() {
                return Err(TimetableError::configuration(format!(
                    "{kind} sessions require at least one {kind} room"
                )));
            }
        }

        let slots = grid.all_slots();
        Ok(Self {
            grid,
            slots,
            sessions,
        })
    }

    /// Number of genes every built chromosome has.
    pub fn chromosome_len(&self) -> usize {
        self.sessions.len()
    }

    /// The session units being placed.
    pub fn sessions(&self) -> &[SessionUnit] {
        &self.sessions
    }

    /// Builds one random chromosome.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let mut slots = self.slots.clone();
        slots.shuffle(rng);
        let mut sessions = self.sessions.clone();
        sessions.shuffle(rng);

        let mut genes = Vec::with_capacity(sessions.len());
        // `new` guarantees sessions.len() <= slots.len()
        for (unit, slot) in sessions.into_iter().zip(slots) {
            let room = pick_room(&self.grid, unit.kind, rng);
            genes.push(Assignment::new(unit, room, slot));
        }
        Chromosome::new(genes)
    }

    /// Checks length and room-pool membership of a chromosome.
    pub fn is_valid(&self, chromosome: &Chromosome) -> bool {
        chromosome.len() == self.sessions.len()
            && chromosome
                .iter()
                .all(|g| self.grid.rooms_for(g.kind).contains(&g.room))
    }
}

/// Draws a room uniformly from the pool matching `kind`.
///
/// The pool must be non-empty; [`ChromosomeBuilder::new`] checks this.
pub(crate) fn pick_room<R: Rng>(grid: &SlotGrid, kind: SessionKind, rng: &mut R) -> String {
    let rooms = grid.rooms_for(kind);
    rooms[rng.random_range(0..rooms.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sessions(lectures: usize, labs: usize) -> Vec<SessionUnit> {
        let mut units = Vec::new();
        for i in 0..lectures {
            units.push(SessionUnit::new(format!("C{}", i % 3), SessionKind::Lecture, "A"));
        }
        for i in 0..labs {
            units.push(SessionUnit::new(format!("C{}", i % 3), SessionKind::Lab, "B"));
        }
        units
    }

    #[test]
    fn test_build_length_and_rooms() {
        let builder = ChromosomeBuilder::new(SlotGrid::reference(), sessions(4, 2)).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = builder.build(&mut rng);

        assert_eq!(ch.len(), 6);
        assert!(builder.is_valid(&ch));
        for gene in &ch {
            match gene.kind {
                SessionKind::Lecture => assert!(gene.room.starts_with('R')),
                SessionKind::Lab => assert!(gene.room.starts_with("Lab")),
            }
        }
    }

    #[test]
    fn test_fresh_chromosome_uses_distinct_slots() {
        let builder = ChromosomeBuilder::new(SlotGrid::reference(), sessions(15, 10)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let ch = builder.build(&mut rng);

        let slots: HashSet<_> = ch.iter().map(|g| &g.slot).collect();
        assert_eq!(slots.len(), 25);
    }

    #[test]
    fn test_builder_keeps_session_multiset() {
        let units = sessions(3, 2);
        let builder = ChromosomeBuilder::new(SlotGrid::reference(), units.clone()).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let ch = builder.build(&mut rng);

        let mut built: Vec<(String, SessionKind, String)> = ch
            .iter()
            .map(|g| (g.course.clone(), g.kind, g.instructor.clone()))
            .collect();
        let mut expected: Vec<(String, SessionKind, String)> = units
            .into_iter()
            .map(|u| (u.course, u.kind, u.instructor))
            .collect();
        built.sort();
        expected.sort();
        assert_eq!(built, expected);
    }

    #[test]
    fn test_same_seed_same_chromosome() {
        let builder = ChromosomeBuilder::new(SlotGrid::reference(), sessions(4, 2)).unwrap();
        let a = builder.build(&mut SmallRng::seed_from_u64(99));
        let b = builder.build(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a.genes(), b.genes());
    }

    #[test]
    fn test_capacity_exact_fit_succeeds() {
        assert!(ChromosomeBuilder::new(SlotGrid::reference(), sessions(20, 5)).is_ok());
    }

    #[test]
    fn test_capacity_overflow_fails() {
        let err = ChromosomeBuilder::new(SlotGrid::reference(), sessions(20, 6)).unwrap_err();
        assert!(matches!(err, TimetableError::Capacity { sessions: 26, slots: 25 }));
    }

    #[test]
    fn test_empty_sessions_rejected() {
        let err = ChromosomeBuilder::new(SlotGrid::reference(), Vec::new()).unwrap_err();
        assert!(matches!(err, TimetableError::Configuration(_)));
    }

    #[test]
    fn test_missing_lab_rooms_rejected() {
        let mut grid = SlotGrid::reference();
        grid.lab_rooms.clear();
        let err = ChromosomeBuilder::new(grid.clone(), sessions(2, 1)).unwrap_err();
        assert!(err.to_string().contains("lab room"));
        // lectures alone do not need lab rooms
        assert!(ChromosomeBuilder::new(grid, sessions(2, 0)).is_ok());
    }

    proptest! {
        #[test]
        fn prop_built_chromosomes_are_valid(
            lectures in 0usize..15,
            labs in 0usize..10,
            seed in any::<u64>(),
        ) {
            prop_assume!(lectures + labs > 0);
            let builder = ChromosomeBuilder::new(SlotGrid::reference(), sessions(lectures, labs)).unwrap();
            let ch = builder.build(&mut SmallRng::seed_from_u64(seed));
            prop_assert_eq!(ch.len(), lectures + labs);
            prop_assert!(builder.is_valid(&ch));
        }
    }
}
