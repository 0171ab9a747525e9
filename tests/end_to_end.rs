//! Full runs from a requirement document to a timetable.

use u_timetable::ga::{
    EvolutionConfig, EvolutionEngine, GaProblem, Individual, TimetableProblem,
};
use u_timetable::problem::{CourseRequirement, CourseRequirements, SessionKind, SlotGrid};
use u_timetable::TimetableError;

const TWO_COURSES: &str = r#"{
    "Networks": {
        "lectures": { "hours": 2, "lecturer": "A" },
        "labs": { "hours": 1, "ta": "B" }
    },
    "Compilers": {
        "lectures": { "hours": 2, "lecturer": "A" },
        "labs": { "hours": 1, "ta": "B" }
    }
}"#;

#[test]
fn two_courses_run_the_full_generation_cap() {
    let requirements = CourseRequirements::from_json_str(TWO_COURSES).unwrap();
    let grid = SlotGrid::reference();
    let problem = TimetableProblem::from_requirements(grid.clone(), &requirements).unwrap();
    assert_eq!(problem.sessions().len(), 6);

    let config = EvolutionConfig::default()
        .with_population_size(20)
        .with_max_generations(30)
        .with_seed(2024);
    let engine = EvolutionEngine::new(problem, config).unwrap();
    let result = engine.run().unwrap();

    // the 0.99 threshold is above the 0.5 ceiling, so no early stop
    assert!(!result.converged);
    assert_eq!(result.generations, 30);
    assert_eq!(result.fitness_history.len(), 30);
    for window in result.fitness_history.windows(2) {
        assert!(window[1] >= window[0]);
    }
    for score in &result.fitness_history {
        assert!(*score > 0.0 && *score <= 0.5);
    }

    let best = &result.best;
    assert_eq!(best.len(), 6);
    for gene in best {
        assert!(grid.rooms_for(gene.kind).contains(&gene.room));
    }
    assert_eq!(best.iter().filter(|g| g.kind == SessionKind::Lab).count(), 2);
    assert_eq!(engine.problem().evaluate(best), result.best_fitness);
    assert_eq!(best.fitness(), Some(result.best_fitness));
}

#[test]
fn seeded_runs_are_reproducible() {
    let requirements = CourseRequirements::from_json_str(TWO_COURSES).unwrap();
    let run = || {
        let problem =
            TimetableProblem::from_requirements(SlotGrid::reference(), &requirements).unwrap();
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_seed(11);
        EvolutionEngine::new(problem, config).unwrap().run().unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.fitness_history, b.fitness_history);
    assert_eq!(a.best.genes(), b.best.genes());
}

#[test]
fn exactly_full_grid_is_accepted() {
    let requirements = CourseRequirements::new()
        .with_course("A", CourseRequirement::new().with_lectures(10, "P").with_labs(5, "Q"))
        .with_course("B", CourseRequirement::new().with_lectures(5, "R").with_labs(5, "S"));
    let problem = TimetableProblem::from_requirements(SlotGrid::reference(), &requirements).unwrap();
    assert_eq!(problem.sessions().len(), 25);

    let config = EvolutionConfig::default()
        .with_population_size(12)
        .with_elite_count(2)
        .with_max_generations(5)
        .with_seed(1);
    let result = EvolutionEngine::new(problem, config).unwrap().run().unwrap();
    assert_eq!(result.best.len(), 25);
}

#[test]
fn one_session_over_capacity_is_rejected() {
    let requirements = CourseRequirements::new()
        .with_course("A", CourseRequirement::new().with_lectures(10, "P").with_labs(5, "Q"))
        .with_course("B", CourseRequirement::new().with_lectures(6, "R").with_labs(5, "S"));
    match TimetableProblem::from_requirements(SlotGrid::reference(), &requirements) {
        Err(TimetableError::Capacity { sessions, slots }) => {
            assert_eq!(sessions, 26);
            assert_eq!(slots, 25);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

#[test]
fn rendered_timetable_lists_every_session() {
    let requirements = CourseRequirements::from_json_str(TWO_COURSES).unwrap();
    let problem = TimetableProblem::from_requirements(SlotGrid::reference(), &requirements).unwrap();
    let config = EvolutionConfig::default()
        .with_population_size(20)
        .with_max_generations(10)
        .with_seed(5);
    let engine = EvolutionEngine::new(problem, config).unwrap();
    let result = engine.run().unwrap();

    let table = engine.problem().timetable(&result.best);
    let text = table.to_string();
    assert!(text.contains("Networks (Lec)"));
    assert!(text.contains("Compilers (Lab)"));
    assert!(text.contains("Saturday"));
}
