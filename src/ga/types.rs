//! Core types of the timetabling GA.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop and a problem. [`Assignment`] and [`Chromosome`] are the
//! timetable encoding used by [`TimetableProblem`](super::TimetableProblem).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::problem::{SessionKind, SessionUnit, SlotKey};

/// A candidate solution in the GA population.
///
/// Individuals carry a cached fitness. The engine calls
/// [`GaProblem::evaluate`] for individuals whose fitness is `None` and stores
/// the score via [`set_fitness`](Individual::set_fitness). Higher is better.
pub trait Individual: Clone + Send + Sync {
    /// Cached fitness, `None` until evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Stores the evaluated fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// Covers the four things the generational loop needs:
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to score them (higher is better)
/// 3. **Crossover**: how to recombine two parents into one child
/// 4. **Mutation**: how to perturb a child
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because evaluation may run on rayon
/// workers when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual. Must be a pure function of the individual.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Consumes an individual and returns its mutated successor.
    ///
    /// `rate` is the per-gene mutation probability.
    fn mutate<R: Rng>(&self, individual: Self::Individual, rate: f64, rng: &mut R) -> Self::Individual;

    /// Best score any individual can reach, if known.
    ///
    /// The engine uses it to warn about early-stop thresholds that can never
    /// trigger.
    fn fitness_ceiling(&self) -> Option<f64> {
        None
    }

    /// Called once per generation with the best score of that generation.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

/// One scheduled session (a gene): a session unit bound to a room and slot.
///
/// Assignments are values. Re-placing a session produces a new assignment
/// via [`placed`](Assignment::placed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Course name.
    pub course: String,
    /// Lecture or lab.
    pub kind: SessionKind,
    /// Lecturer or teaching assistant.
    pub instructor: String,
    /// Room drawn from the pool matching `kind`.
    pub room: String,
    /// Day and time range.
    pub slot: SlotKey,
}

impl Assignment {
    /// Binds a session unit to a room and slot.
    pub fn new(unit: SessionUnit, room: impl Into<String>, slot: SlotKey) -> Self {
        Self {
            course: unit.course,
            kind: unit.kind,
            instructor: unit.instructor,
            room: room.into(),
            slot,
        }
    }

    /// The same session moved to another slot and room.
    pub fn placed(&self, slot: SlotKey, room: impl Into<String>) -> Self {
        Self {
            course: self.course.clone(),
            kind: self.kind,
            instructor: self.instructor.clone(),
            room: room.into(),
            slot,
        }
    }

    /// Day name.
    pub fn day(&self) -> &str {
        &self.slot.day
    }

    /// Time-range name.
    pub fn time(&self) -> &str {
        &self.slot.time
    }

    /// Key under which two genes clash on a room.
    pub fn room_key(&self) -> (&SlotKey, &str) {
        (&self.slot, &self.room)
    }

    /// Key under which two genes clash on an instructor.
    pub fn instructor_key(&self) -> (&SlotKey, &str) {
        (&self.slot, &self.instructor)
    }
}

/// A complete candidate timetable: one assignment per session unit.
///
/// Genes are never modified in place; operators build new chromosomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<Assignment>,
    #[serde(skip)]
    fitness: Option<f64>,
}

impl Chromosome {
    /// Wraps a gene sequence. Fitness starts unevaluated.
    pub fn new(genes: Vec<Assignment>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// The ordered gene sequence.
    pub fn genes(&self) -> &[Assignment] {
        &self.genes
    }

    /// Takes the gene sequence out of the chromosome.
    pub fn into_genes(self) -> Vec<Assignment> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates over the genes.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.genes.iter()
    }
}

impl Individual for Chromosome {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

impl<'a> IntoIterator for &'a Chromosome {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}
