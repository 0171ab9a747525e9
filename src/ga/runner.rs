//! Generational loop execution.
//!
//! [`EvolutionEngine`] orchestrates the complete evolutionary process:
//!
//! ```text
//! Init ─▶ Evaluate ─▶ (threshold or cap?) ─yes─▶ Terminated
//!            ▲                 │ no
//!            │                 ▼
//!            └── Reproduce ◀── SelectElite
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::EvolutionConfig;
use super::selection::MatingPool;
use super::types::{GaProblem, Individual};
use crate::error::{Result, TimetableError};

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<I: Individual> {
    /// Best individual of the last evaluated generation.
    pub best: I,

    /// Score of `best`.
    pub best_fitness: f64,

    /// Generations actually evaluated.
    pub generations: usize,

    /// Whether the run stopped because the threshold was reached.
    pub converged: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score of each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Drives a [`GaProblem`] through the generational loop.
///
/// # Usage
///
/// ```
/// use u_timetable::ga::{EvolutionConfig, EvolutionEngine, TimetableProblem};
/// use u_timetable::problem::{CourseRequirement, CourseRequirements, SlotGrid};
///
/// let requirements = CourseRequirements::new()
///     .with_course("Networks", CourseRequirement::new().with_lectures(2, "A").with_labs(1, "B"));
/// let problem = TimetableProblem::from_requirements(SlotGrid::reference(), &requirements).unwrap();
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
///
/// let engine = EvolutionEngine::new(problem, config).unwrap();
/// let result = engine.run().unwrap();
/// assert_eq!(result.best.len(), 3);
/// assert_eq!(result.fitness_history.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<P: GaProblem> {
    problem: P,
    config: EvolutionConfig,
    pool: MatingPool,
}

impl<P: GaProblem> EvolutionEngine<P> {
    /// Creates an engine after validating `config`.
    pub fn new(problem: P, config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        if let Some(ceiling) = problem.fitness_ceiling() {
            if config.fitness_threshold > ceiling {
                warn!(
                    threshold = config.fitness_threshold,
                    ceiling, "fitness threshold is unreachable; every run uses the full generation cap"
                );
            }
        }
        let pool = config.mating_pool();
        Ok(Self {
            problem,
            config,
            pool,
        })
    }

    /// The problem being optimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The run configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs with a generator seeded from `config.seed` (random if unset).
    pub fn run(&self) -> Result<EvolutionResult<P::Individual>> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<EvolutionResult<P::Individual>> {
        self.run_with_cancel(rng, None)
    }

    /// Runs with an optional cancellation flag.
    ///
    /// The flag is checked after each generation is evaluated; once set, the
    /// run stops and returns the best individual of that generation.
    pub fn run_with_cancel<R: Rng>(
        &self,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult<P::Individual>> {
        let config = &self.config;
        info!(
            population = config.population_size,
            max_generations = config.max_generations,
            elite = config.elite_count,
            mating_pool = self.pool.effective_size(config.population_size),
            mutation_rate = config.mutation_rate,
            "starting evolution"
        );

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| self.problem.create_individual(rng))
            .collect();

        let mut fitness_history = Vec::with_capacity(config.max_generations);
        let mut converged = false;
        let mut cancelled = false;

        for generation in 0..config.max_generations {
            evaluate_population(&self.problem, &mut population, config.parallel);
            sort_best_first(&mut population);

            let best_fitness = population
                .first()
                .and_then(|ind| ind.fitness())
                .ok_or_else(|| TimetableError::configuration("population is empty"))?;
            fitness_history.push(best_fitness);
            debug!(generation = generation + 1, best_fitness, "generation evaluated");
            self.problem.on_generation(generation + 1, best_fitness);

            if best_fitness >= config.fitness_threshold {
                converged = true;
                break;
            }
            if generation + 1 == config.max_generations {
                break;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            population = self.next_generation(&population, rng)?;
        }

        let best_fitness = fitness_history.last().copied().unwrap_or_default();
        let best = population
            .into_iter()
            .next()
            .ok_or_else(|| TimetableError::configuration("population is empty"))?;

        info!(
            generations = fitness_history.len(),
            best_fitness, converged, cancelled, "evolution finished"
        );

        Ok(EvolutionResult {
            best,
            best_fitness,
            generations: fitness_history.len(),
            converged,
            cancelled,
            fitness_history,
        })
    }

    /// Builds the next population from one sorted best-first.
    ///
    /// The top `elite_count` individuals are carried over verbatim, cached
    /// fitness included; the rest are mutated children of pool pairs.
    fn next_generation<R: Rng>(
        &self,
        population: &[P::Individual],
        rng: &mut R,
    ) -> Result<Vec<P::Individual>> {
        let size = self.config.population_size;
        let elite_count = self.config.elite_count.min(population.len());

        let mut next = Vec::with_capacity(size);
        next.extend_from_slice(&population[..elite_count]);

        while next.len() < size {
            let (a, b) = self.pool.sample_pair(population.len(), rng)?;
            let child = self.problem.crossover(&population[a], &population[b], rng);
            let child = self.problem.mutate(child, self.config.mutation_rate, rng);
            next.push(child);
        }
        Ok(next)
    }
}

/// Stable descending sort; ties keep their previous order so elites stay ahead.
fn sort_best_first<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Evaluates individuals without a cached fitness.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| ind.fitness().is_none())
            .for_each(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluates individuals without a cached fitness.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(problem: &P, population: &mut [P::Individual], _parallel: bool) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut().filter(|ind| ind.fitness().is_none()) {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

// ============================================================================
// Tests
// ============================================================================
