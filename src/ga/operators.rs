//! Crossover and mutation for timetable chromosomes.
//!
//! Neither operator repairs its output. Crossover can join two halves that
//! reuse a slot, and mutation ignores the one-slot-per-gene property of fresh
//! chromosomes; the fitness function alone detects the resulting conflicts.

use rand::Rng;

use super::chromosome::pick_room;
use super::types::Chromosome;
use crate::error::Result;
use crate::problem::{SlotGrid, SlotKey};

/// Single-point crossover and per-gene re-placement mutation over a grid.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_timetable::ga::{ChromosomeBuilder, GeneticOperators};
/// use u_timetable::problem::{SessionKind, SessionUnit, SlotGrid};
///
/// let grid = SlotGrid::reference();
/// let sessions = vec![
///     SessionUnit::new("Networks", SessionKind::Lecture, "A"),
///     SessionUnit::new("Networks", SessionKind::Lecture, "A"),
///     SessionUnit::new("Networks", SessionKind::Lab, "B"),
/// ];
/// let builder = ChromosomeBuilder::new(grid.clone(), sessions).unwrap();
/// let ops = GeneticOperators::new(&grid).unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let p1 = builder.build(&mut rng);
/// let p2 = builder.build(&mut rng);
/// let child = ops.crossover(&p1, &p2, &mut rng);
/// let child = ops.mutate(child, 0.3, &mut rng);
/// assert_eq!(child.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    grid: SlotGrid,
    slots: Vec<SlotKey>,
}

impl GeneticOperators {
    /// Creates operators drawing slots and rooms from `grid`.
    ///
    /// # Errors
    /// [`TimetableError::Configuration`](crate::TimetableError::Configuration)
    /// if the grid fails [`SlotGrid::validate`].
    pub fn new(grid: &SlotGrid) -> Result<Self> {
        grid.validate()?;
        Ok(Self {
            grid: grid.clone(),
            slots: grid.all_slots(),
        })
    }

    /// Single-point crossover: `parent1[..cut] ++ parent2[cut..]`.
    ///
    /// The cut is uniform in `[1, len - 2]`. Chromosomes with fewer than three
    /// genes have no such cut and the child is a copy of `parent1`.
    ///
    /// # Panics
    /// Panics if the parents differ in length.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Chromosome {
        assert_eq!(
            parent1.len(),
            parent2.len(),
            "crossover parents must have equal length"
        );

        let len = parent1.len();
        if len < 3 {
            return Chromosome::new(parent1.genes().to_vec());
        }

        let cut = rng.random_range(1..=len - 2);
        let genes = parent1.genes()[..cut]
            .iter()
            .chain(&parent2.genes()[cut..])
            .cloned()
            .collect();
        Chromosome::new(genes)
    }

    /// Re-places each gene with probability `rate`.
    ///
    /// A re-placed gene gets a uniformly random slot from the full grid and a
    /// uniformly random room from its kind's pool. `rate` is clamped to
    /// `[0, 1]` (NaN counts as `0`). At `rate = 0` the chromosome is returned
    /// as is, cached fitness included.
    ///
    /// # Panics
    /// Panics if a re-placed gene's kind has an empty room pool in the grid.
    /// [`ChromosomeBuilder::new`](super::ChromosomeBuilder::new) rejects such
    /// setups.
    pub fn mutate<R: Rng>(&self, chromosome: Chromosome, rate: f64, rng: &mut R) -> Chromosome {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        if rate == 0.0 {
            return chromosome;
        }

        let mut genes = Vec::with_capacity(chromosome.len());
        for gene in chromosome.into_genes() {
            if rng.random_bool(rate) {
                let slot = self.slots[rng.random_range(0..self.slots.len())].clone();
                let room = pick_room(&self.grid, gene.kind, rng);
                genes.push(gene.placed(slot, room));
            } else {
                genes.push(gene);
            }
        }
        Chromosome::new(genes)
    }
}
