//! Atomic session units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of teaching session. Decides which room pool a session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Taught by a lecturer in a lecture room.
    Lecture,
    /// Run by a teaching assistant in a lab room.
    Lab,
}

impl SessionKind {
    /// Short label used in rendered timetables.
    pub fn short_label(self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lec",
            SessionKind::Lab => "Lab",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Lecture => f.write_str("lecture"),
            SessionKind::Lab => f.write_str("lab"),
        }
    }
}

/// One required teaching hour: (course, kind, instructor).
///
/// Derived once per run from the requirement document and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionUnit {
    /// Course name.
    pub course: String,
    /// Lecture or lab.
    pub kind: SessionKind,
    /// Lecturer for lectures, teaching assistant for labs.
    pub instructor: String,
}

impl SessionUnit {
    /// Creates a session unit.
    pub fn new(course: impl Into<String>, kind: SessionKind, instructor: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            kind,
            instructor: instructor.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&SessionKind::Lecture).unwrap(), "\"lecture\"");
        let kind: SessionKind = serde_json::from_str("\"lab\"").unwrap();
        assert_eq!(kind, SessionKind::Lab);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(SessionKind::Lecture.short_label(), "Lec");
        assert_eq!(SessionKind::Lab.short_label(), "Lab");
    }
}
