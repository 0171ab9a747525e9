//! Timetabling GA problem definition.
//!
//! Binds a grid and an expanded session list to the generic loop: the
//! builder seeds the population, the evaluator scores it, and the operators
//! produce children.

use rand::Rng;
use tracing::debug;

use super::chromosome::ChromosomeBuilder;
use super::fitness::{ConflictReport, FitnessEvaluator};
use super::operators::GeneticOperators;
use super::types::{Chromosome, GaProblem};
use crate::error::Result;
use crate::problem::{CourseRequirements, SessionUnit, SlotGrid};
use crate::timetable::Timetable;

/// GA problem for course timetabling.
///
/// All setup checks (grid shape, capacity, room pools) run in the
/// constructor, before any chromosome is built.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    grid: SlotGrid,
    builder: ChromosomeBuilder,
    evaluator: FitnessEvaluator,
    operators: GeneticOperators,
}

impl TimetableProblem {
    /// Creates a problem from a grid and expanded session units.
    ///
    /// # Errors
    /// See [`ChromosomeBuilder::new`].
    pub fn new(grid: SlotGrid, sessions: Vec<SessionUnit>) -> Result<Self> {
        let builder = ChromosomeBuilder::new(grid.clone(), sessions)?;
        let operators = GeneticOperators::new(&grid)?;
        debug!(
            sessions = builder.chromosome_len(),
            slots = grid.slot_count(),
            "timetable problem ready"
        );
        Ok(Self {
            grid,
            builder,
            evaluator: FitnessEvaluator::default(),
            operators,
        })
    }

    /// Validates and expands `requirements`, then creates the problem.
    ///
    /// Capacity is checked on the session count before any unit is
    /// allocated, so oversized hour counts fail with
    /// [`TimetableError::Capacity`](crate::TimetableError::Capacity).
    pub fn from_requirements(grid: SlotGrid, requirements: &CourseRequirements) -> Result<Self> {
        requirements.validate()?;
        grid.validate()?;
        grid.check_capacity(requirements.session_count())?;
        let sessions = requirements.expand()?;
        Self::new(grid, sessions)
    }

    /// Replaces the fitness evaluator.
    pub fn with_evaluator(mut self, evaluator: FitnessEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// The slot grid.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Expanded session units.
    pub fn sessions(&self) -> &[SessionUnit] {
        self.builder.sessions()
    }

    /// The chromosome builder.
    pub fn builder(&self) -> &ChromosomeBuilder {
        &self.builder
    }

    /// The fitness evaluator.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// The genetic operators.
    pub fn operators(&self) -> &GeneticOperators {
        &self.operators
    }

    /// Conflict breakdown of a chromosome.
    pub fn conflicts(&self, chromosome: &Chromosome) -> ConflictReport {
        self.evaluator.conflicts(chromosome)
    }

    /// Grid view of a chromosome for rendering.
    pub fn timetable(&self, chromosome: &Chromosome) -> Timetable {
        Timetable::from_chromosome(&self.grid, chromosome)
    }
}

impl GaProblem for TimetableProblem {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        self.builder.build(rng)
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        self.evaluator.evaluate(individual)
    }

    fn crossover<R: Rng>(&self, parent1: &Chromosome, parent2: &Chromosome, rng: &mut R) -> Chromosome {
        self.operators.crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: Chromosome, rate: f64, rng: &mut R) -> Chromosome {
        self.operators.mutate(individual, rate, rng)
    }

    fn fitness_ceiling(&self) -> Option<f64> {
        Some(self.evaluator.ceiling())
    }
}
