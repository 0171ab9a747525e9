//! Timetabling problem inputs.
//!
//! Everything the search engine consumes but never changes: the course
//! requirement document, the session units expanded from it, and the
//! day/time/room grid they are placed into.
//!
//! # Data flow
//!
//! ```text
//! CourseRequirements ──expand()──▶ Vec<SessionUnit>
//!                                        │
//! SlotGrid ─────────────────────────────▶ ChromosomeBuilder
//! ```

mod grid;
mod requirements;
mod session;

pub use grid::{SlotGrid, SlotKey};
pub use requirements::{CourseRequirement, CourseRequirements, LabSpec, LectureSpec};
pub use session::{SessionKind, SessionUnit};
