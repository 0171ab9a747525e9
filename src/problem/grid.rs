//! The fixed day/time grid and room pools.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SessionKind;
use crate::error::{Result, TimetableError};

/// An immutable (day, time-range) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Day name.
    pub day: String,
    /// Time-range name, e.g. `"8-10"`.
    pub time: String,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

/// Structural configuration: ordered days, ordered time slots, and the two
/// room pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotGrid {
    /// Day names in display order.
    pub days: Vec<String>,
    /// Time-range names in display order.
    pub time_slots: Vec<String>,
    /// Rooms available to lectures.
    pub lecture_rooms: Vec<String>,
    /// Rooms available to labs.
    pub lab_rooms: Vec<String>,
}

impl SlotGrid {
    /// Creates a grid from its four sequences.
    pub fn new(
        days: Vec<String>,
        time_slots: Vec<String>,
        lecture_rooms: Vec<String>,
        lab_rooms: Vec<String>,
    ) -> Self {
        Self {
            days,
            time_slots,
            lecture_rooms,
            lab_rooms,
        }
    }

    /// The reference grid: 5 days × 5 time ranges, 3 lecture rooms and
    /// 3 lab rooms.
    pub fn reference() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            days: owned(&["Saturday", "Sunday", "Monday", "Tuesday", "Wednesday"]),
            time_slots: owned(&["8-10", "10-12", "12-2", "2-4", "4-6"]),
            lecture_rooms: owned(&["R1", "R2", "R3"]),
            lab_rooms: owned(&["Lab1", "Lab2", "Lab3"]),
        }
    }

    /// Loads a grid from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a grid from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Number of distinct slots (`days × time_slots`).
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.time_slots.len()
    }

    /// All slots, day-major.
    pub fn all_slots(&self) -> Vec<SlotKey> {
        self.days
            .iter()
            .flat_map(|day| self.time_slots.iter().map(move |time| SlotKey::new(day, time)))
            .collect()
    }

    /// Room pool matching a session kind.
    pub fn rooms_for(&self, kind: SessionKind) -> &[String] {
        match kind {
            SessionKind::Lecture => &self.lecture_rooms,
            SessionKind::Lab => &self.lab_rooms,
        }
    }

    /// Checks that `sessions` sessions can each get a distinct slot.
    pub fn check_capacity(&self, sessions: usize) -> Result<()> {
        let slots = self.slot_count();
        if sessions > slots {
            return Err(TimetableError::Capacity { sessions, slots });
        }
        Ok(())
    }

    /// Rejects grids with no slots, blank names, or duplicate entries.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.days.is_empty() {
            problems.push("grid has no days".to_string());
        }
        if self.time_slots.is_empty() {
            problems.push("grid has no time slots".to_string());
        }
        for (label, names) in [
            ("day", &self.days),
            ("time slot", &self.time_slots),
            ("lecture room", &self.lecture_rooms),
            ("lab room", &self.lab_rooms),
        ] {
            let mut seen = std::collections::HashSet::new();
            for name in names {
                if name.trim().is_empty() {
                    problems.push(format!("blank {label} name"));
                } else if !seen.insert(name.as_str()) {
                    problems.push(format!("duplicate {label} '{name}'"));
                }
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(TimetableError::configuration(problems.join("; ")))
        }
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::reference()
    }
}
