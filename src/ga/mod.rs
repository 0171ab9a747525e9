//! Genetic Algorithm for course timetabling.
//!
//! A generational GA with elitism and truncation selection. The loop is
//! written against the [`GaProblem`] trait; [`TimetableProblem`] is the
//! timetabling implementation.
//!
//! # Core Traits
//!
//! - [`Individual`]: a candidate solution carrying a cached fitness
//! - [`GaProblem`]: problem definition (initialization, evaluation, operators)
//!
//! # Key Types
//!
//! - [`Chromosome`] / [`Assignment`]: timetable encoding, one gene per session hour
//! - [`ChromosomeBuilder`]: shuffle-and-pair random construction
//! - [`FitnessEvaluator`]: conflict-counting score in `(0, 1]`
//! - [`GeneticOperators`]: single-point crossover, per-gene mutation
//! - [`EvolutionConfig`]: run parameters (population, elites, pool, rates)
//! - [`EvolutionEngine`]: executes the generational loop
//! - [`EvolutionResult`]: best chromosome and per-generation fitness trace
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling", *EJOR* 140(2)

mod chromosome;
mod config;
mod fitness;
mod operators;
mod problem;
mod runner;
mod selection;
mod types;

pub use chromosome::ChromosomeBuilder;
pub use config::EvolutionConfig;
pub use fitness::{ConflictReport, FitnessEvaluator};
pub use operators::GeneticOperators;
pub use problem::TimetableProblem;
pub use runner::{EvolutionEngine, EvolutionResult};
pub use selection::MatingPool;
pub use types::{Assignment, Chromosome, GaProblem, Individual};
