//! Course timetabling with a genetic algorithm.
//!
//! Assigns required teaching hours (lectures and labs) to a fixed grid of
//! day/time slots and rooms. Instead of exact constraint solving, a
//! generational GA searches for a timetable with few conflicts:
//!
//! - **Room conflict**: two sessions in the same room at the same slot.
//! - **Instructor conflict**: one lecturer or TA booked twice in a slot.
//!
//! # Modules
//!
//! - **`problem`**: course requirement schema, session expansion, slot grid
//! - **`ga`**: chromosome encoding, fitness, operators, and the evolution engine
//! - **`timetable`**: day × slot view of a chromosome with text rendering
//! - **`error`**: the [`TimetableError`] taxonomy
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{EvolutionConfig, EvolutionEngine, TimetableProblem};
//! use u_timetable::problem::{CourseRequirements, SlotGrid};
//!
//! let requirements = CourseRequirements::from_json_str(r#"{
//!     "Networks": { "lectures": { "hours": 2, "lecturer": "A" },
//!                   "labs": { "hours": 1, "ta": "B" } }
//! }"#).unwrap();
//!
//! let problem = TimetableProblem::from_requirements(SlotGrid::reference(), &requirements).unwrap();
//! let engine = EvolutionEngine::new(problem, EvolutionConfig::default().with_seed(7)).unwrap();
//! let result = engine.run().unwrap();
//!
//! println!("{}", engine.problem().timetable(&result.best));
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling", *Artificial
//!   Intelligence Review* 13(2)

pub mod error;
pub mod ga;
pub mod problem;
pub mod timetable;

pub use error::{Result, TimetableError};
