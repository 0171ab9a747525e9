//! Conflict-counting fitness.
//!
//! Two genes conflict when they share a (day, slot, room) key or a
//! (day, slot, instructor) key. Genes are scanned in order; every key already
//! seen adds one conflict, so three genes sharing a key add two.
//!
//! ```text
//! score = 1 / (1 + base_penalty + conflicts)
//! ```
//!
//! With the default `base_penalty = 1` a conflict-free chromosome scores
//! exactly `0.5`.

use std::collections::HashSet;

use super::types::Chromosome;

/// Conflict counts of one chromosome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictReport {
    /// Genes whose (slot, room) key was already taken.
    pub room: usize,
    /// Genes whose (slot, instructor) key was already taken.
    pub instructor: usize,
}

impl ConflictReport {
    /// Room plus instructor conflicts.
    pub fn total(&self) -> usize {
        self.room + self.instructor
    }

    /// Returns `true` if no conflict was found.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Scores chromosomes by counting conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessEvaluator {
    base_penalty: u32,
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self { base_penalty: 1 }
    }
}

impl FitnessEvaluator {
    /// Evaluator with the reference base penalty of `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with base penalty `0`: a conflict-free chromosome scores
    /// `1.0`, making thresholds up to `1.0` reachable.
    pub fn unbiased() -> Self {
        Self { base_penalty: 0 }
    }

    /// Sets the constant added to the conflict count.
    pub fn with_base_penalty(mut self, base_penalty: u32) -> Self {
        self.base_penalty = base_penalty;
        self
    }

    /// Constant added to the conflict count.
    pub fn base_penalty(&self) -> u32 {
        self.base_penalty
    }

    /// Best achievable score (zero conflicts).
    pub fn ceiling(&self) -> f64 {
        1.0 / (1.0 + self.base_penalty as f64)
    }

    /// Counts room and instructor conflicts.
    pub fn conflicts(&self, chromosome: &Chromosome) -> ConflictReport {
        let mut rooms = HashSet::with_capacity(chromosome.len());
        let mut instructors = HashSet::with_capacity(chromosome.len());
        let mut report = ConflictReport::default();

        for gene in chromosome {
            if !rooms.insert(gene.room_key()) {
                report.room += 1;
            }
            if !instructors.insert(gene.instructor_key()) {
                report.instructor += 1;
            }
        }
        report
    }

    /// Scores a chromosome in `(0, 1]`. Higher is better.
    pub fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        let penalty = self.base_penalty as f64 + self.conflicts(chromosome).total() as f64;
        1.0 / (1.0 + penalty)
    }
}
