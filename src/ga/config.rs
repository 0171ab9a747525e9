//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generational
//! loop.

use crate::error::{Result, TimetableError};

use super::selection::MatingPool;

/// Configuration for the evolutionary run.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.elite_count, 10);
/// assert_eq!(config.mating_pool_size, 25);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    /// Number of chromosomes in every generation.
    pub population_size: usize,

    /// Generation cap.
    pub max_generations: usize,

    /// Chromosomes copied unchanged into the next generation.
    ///
    /// With `0` the recorded best fitness may decrease between generations.
    pub elite_count: usize,

    /// Parents are drawn from the top `mating_pool_size` chromosomes
    /// (capped at the population size).
    pub mating_pool_size: usize,

    /// Per-gene probability of re-placement in a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Stop as soon as the best score reaches this value.
    pub fitness_threshold: f64,

    /// Whether to evaluate chromosomes in parallel. Needs the `parallel`
    /// feature; ignored otherwise.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            elite_count: 10,
            mating_pool_size: 25,
            mutation_rate: 0.3,
            fitness_threshold: 0.99,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mating pool size.
    pub fn with_mating_pool_size(mut self, n: usize) -> Self {
        self.mating_pool_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the early-stop threshold.
    pub fn with_fitness_threshold(mut self, threshold: f64) -> Self {
        self.fitness_threshold = threshold;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The mating pool described by this configuration.
    pub fn mating_pool(&self) -> MatingPool {
        MatingPool::new(self.mating_pool_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::DegenerateSelection`] if the mating pool (capped
    ///   at the population size) holds fewer than two chromosomes.
    /// - [`TimetableError::Configuration`] for any other invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(TimetableError::configuration(
                "max_generations must be at least 1",
            ));
        }
        self.mating_pool().check(self.population_size)?;
        if self.elite_count >= self.population_size {
            return Err(TimetableError::configuration(
                "elite_count too high: elites fill entire population",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TimetableError::configuration(
                "mutation_rate must be within [0, 1]",
            ));
        }
        if self.fitness_threshold.is_nan() {
            return Err(TimetableError::configuration(
                "fitness_threshold must be a number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.elite_count, 10);
        assert_eq!(config.mating_pool_size, 25);
        assert!((config.mutation_rate - 0.3).abs() < 1e-10);
        assert!((config.fitness_threshold - 0.99).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_elite_count(5)
            .with_mating_pool_size(40)
            .with_mutation_rate(0.05)
            .with_fitness_threshold(0.5)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.mating_pool_size, 40);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.fitness_threshold - 0.5).abs() < 1e-10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_pool_larger_than_population_is_fine() {
        let config = EvolutionConfig::default().with_population_size(20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EvolutionConfig::default()
            .with_population_size(1)
            .with_elite_count(0);
        assert!(matches!(
            config.validate(),
            Err(TimetableError::DegenerateSelection { pool: 1 })
        ));
    }

    #[test]
    fn test_validate_pool_too_small() {
        let config = EvolutionConfig::default().with_mating_pool_size(1);
        assert!(matches!(
            config.validate(),
            Err(TimetableError::DegenerateSelection { pool: 1 })
        ));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = EvolutionConfig::default().with_max_generations(0);
        assert!(matches!(config.validate(), Err(TimetableError::Configuration(_))));
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(matches!(config.validate(), Err(TimetableError::Configuration(_))));
    }

    #[test]
    fn test_zero_elite_allowed() {
        let config = EvolutionConfig::default().with_elite_count(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_mutation_rate() {
        let config = EvolutionConfig::default().with_mutation_rate(2.0);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        let config = EvolutionConfig::default().with_mutation_rate(-1.0);
        assert!(config.mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_unclamped_rate() {
        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let config = EvolutionConfig::default().with_fitness_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }
}
