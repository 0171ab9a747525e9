//! Command-line timetabler.
//!
//! Loads a course requirement document, evolves a timetable, and prints the
//! grid followed by the final fitness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use u_timetable::ga::{EvolutionConfig, EvolutionEngine, FitnessEvaluator, TimetableProblem};
use u_timetable::problem::{CourseRequirements, SlotGrid};
use u_timetable::Result;

#[derive(Debug, Parser)]
#[command(name = "timetable", about = "Evolve a course timetable with a genetic algorithm")]
struct Args {
    /// Course requirement document (JSON).
    requirements: PathBuf,

    /// Grid document (JSON with days, time_slots, lecture_rooms, lab_rooms).
    /// Defaults to 5 days × 5 slots with rooms R1-R3 and Lab1-Lab3.
    #[arg(long)]
    grid: Option<PathBuf>,

    #[arg(long, default_value_t = 50)]
    population: usize,

    #[arg(long, default_value_t = 100)]
    generations: usize,

    #[arg(long, default_value_t = 10)]
    elite: usize,

    #[arg(long, default_value_t = 25)]
    mating_pool: usize,

    #[arg(long, default_value_t = 0.3)]
    mutation_rate: f64,

    /// Stop once the best score reaches this value.
    #[arg(long, default_value_t = 0.99)]
    threshold: f64,

    #[arg(long)]
    seed: Option<u64>,

    /// Score conflict-free timetables as 1.0 instead of 0.5.
    #[arg(long)]
    unbiased_fitness: bool,

    /// Print the best score of every generation.
    #[arg(long)]
    history: bool,
}

fn main() -> ExitCode {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let requirements = CourseRequirements::from_path(&args.requirements)?;
    let grid = match &args.grid {
        Some(path) => SlotGrid::from_path(path)?,
        None => SlotGrid::reference(),
    };

    let evaluator = if args.unbiased_fitness {
        FitnessEvaluator::unbiased()
    } else {
        FitnessEvaluator::new()
    };
    let problem = TimetableProblem::from_requirements(grid, &requirements)?.with_evaluator(evaluator);

    let mut config = EvolutionConfig::default()
        .with_population_size(args.population)
        .with_max_generations(args.generations)
        .with_elite_count(args.elite)
        .with_mating_pool_size(args.mating_pool)
        .with_mutation_rate(args.mutation_rate)
        .with_fitness_threshold(args.threshold);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let engine = EvolutionEngine::new(problem, config)?;
    let result = engine.run()?;
    let problem = engine.problem();

    print!("{}", problem.timetable(&result.best));
    let conflicts = problem.conflicts(&result.best);
    println!("Final Fitness: {}", result.best_fitness);
    println!(
        "Conflicts: {} room, {} instructor ({} generations)",
        conflicts.room, conflicts.instructor, result.generations
    );

    if args.history {
        for (generation, score) in result.fitness_history.iter().enumerate() {
            println!("{:>4} {score:.4}", generation + 1);
        }
    }
    Ok(())
}
