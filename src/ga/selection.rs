//! Truncation selection of parent pairs.
//!
//! Parents are drawn from the mating pool: the top `K` chromosomes of a
//! population sorted best-first. Each pair is two distinct chromosomes
//! sampled uniformly without replacement.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms" (truncation selection)

use rand::seq::index;
use rand::Rng;

use crate::error::{Result, TimetableError};

/// Mating pool of the top `size` chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatingPool {
    size: usize,
}

impl MatingPool {
    /// Pool of the top `size` chromosomes.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Configured pool size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pool size actually usable with a population of `population` chromosomes.
    pub fn effective_size(&self, population: usize) -> usize {
        self.size.min(population)
    }

    /// Fails if the pool cannot supply two distinct parents.
    pub fn check(&self, population: usize) -> Result<()> {
        let pool = self.effective_size(population);
        if pool < 2 {
            return Err(TimetableError::DegenerateSelection { pool });
        }
        Ok(())
    }

    /// Samples two distinct indices from `0..min(size, population)`.
    ///
    /// Indices refer to a population sorted best-first.
    pub fn sample_pair<R: Rng>(&self, population: usize, rng: &mut R) -> Result<(usize, usize)> {
        self.check(population)?;
        let picks = index::sample(rng, self.effective_size(population), 2);
        Ok((picks.index(0), picks.index(1)))
    }
}

impl Default for MatingPool {
    fn default() -> Self {
        Self::new(25)
    }
}
