//! Course requirement schema and expansion into session units.
//!
//! The document maps course names to optional lecture and lab records:
//!
//! ```json
//! {
//!   "Algorithms": {
//!     "lectures": { "hours": 2, "lecturer": "Dr. Hany" },
//!     "labs": { "hours": 1, "ta": "Eng. Mona" }
//!   }
//! }
//! ```
//!
//! Course order in the document is preserved so expansion is deterministic.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::Read;

use super::{SessionKind, SessionUnit};
use crate::error::{Result, TimetableError};

/// Lecture hours for a course and the lecturer teaching them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LectureSpec {
    /// Lecture hours per term cycle. Signed so negatives are reported, not
    /// rejected by the parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    /// Lecturer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<String>,
}

/// Lab hours for a course and the teaching assistant running them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabSpec {
    /// Lab hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    /// Teaching assistant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ta: Option<String>,
}

/// Requirements of one course.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseRequirement {
    /// Lecture requirement, if the course has lectures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lectures: Option<LectureSpec>,
    /// Lab requirement, if the course has labs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labs: Option<LabSpec>,
}

impl CourseRequirement {
    /// Creates an empty requirement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets lecture hours and lecturer.
    pub fn with_lectures(mut self, hours: i64, lecturer: impl Into<String>) -> Self {
        self.lectures = Some(LectureSpec {
            hours: Some(hours),
            lecturer: Some(lecturer.into()),
        });
        self
    }

    /// Sets lab hours and teaching assistant.
    pub fn with_labs(mut self, hours: i64, ta: impl Into<String>) -> Self {
        self.labs = Some(LabSpec {
            hours: Some(hours),
            ta: Some(ta.into()),
        });
        self
    }
}

/// Ordered course → requirement mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseRequirements {
    courses: Vec<(String, CourseRequirement)>,
}

impl CourseRequirements {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a course. A repeated name replaces the earlier entry in place.
    pub fn with_course(mut self, name: impl Into<String>, requirement: CourseRequirement) -> Self {
        self.insert(name, requirement);
        self
    }

    /// Inserts a course, replacing any earlier entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, requirement: CourseRequirement) {
        let name = name.into();
        match self.courses.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = requirement,
            None => self.courses.push((name, requirement)),
        }
    }

    /// Courses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CourseRequirement)> {
        self.courses.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` if no courses are defined.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Parses a requirement document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a requirement document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a requirement file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serializes the mapping back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every course, collecting all problems found.
    ///
    /// Rejects blank course names, courses with neither lectures nor labs,
    /// missing or negative hours, and missing or blank instructor names.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        for (name, req) in self.iter() {
            if name.trim().is_empty() {
                problems.push("course with blank name".to_string());
            }
            if req.lectures.is_none() && req.labs.is_none() {
                problems.push(format!("course '{name}' has neither lectures nor labs"));
            }
            if let Some(lec) = &req.lectures {
                check_part(&mut problems, name, "lectures", lec.hours, "lecturer", lec.lecturer.as_deref());
            }
            if let Some(lab) = &req.labs {
                check_part(&mut problems, name, "labs", lab.hours, "ta", lab.ta.as_deref());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TimetableError::configuration(problems.join("; ")))
        }
    }

    /// Number of session units [`expand`](Self::expand) would produce.
    ///
    /// Counted without allocating, saturating at `usize::MAX`. Negative or
    /// missing hours count as zero.
    pub fn session_count(&self) -> usize {
        self.iter()
            .flat_map(|(_, req)| {
                let lectures = req.lectures.as_ref().and_then(|lec| lec.hours);
                let labs = req.labs.as_ref().and_then(|lab| lab.hours);
                [lectures, labs]
            })
            .flatten()
            .map(|hours| usize::try_from(hours.max(0)).unwrap_or(usize::MAX))
            .fold(0usize, usize::saturating_add)
    }

    /// Expands requirements into one [`SessionUnit`] per required hour.
    ///
    /// For each course in insertion order, lecture units come first, then
    /// lab units. Zero hours yield no units.
    ///
    /// Allocates one unit per hour. Check [`session_count`](Self::session_count)
    /// against the grid before expanding untrusted documents.
    pub fn expand(&self) -> Result<Vec<SessionUnit>> {
        self.validate()?;

        let mut units = Vec::new();
        for (name, req) in self.iter() {
            if let Some(lec) = &req.lectures {
                push_units(&mut units, name, SessionKind::Lecture, lec.hours, lec.lecturer.as_deref());
            }
            if let Some(lab) = &req.labs {
                push_units(&mut units, name, SessionKind::Lab, lab.hours, lab.ta.as_deref());
            }
        }
        Ok(units)
    }
}

fn check_part(
    problems: &mut Vec<String>,
    course: &str,
    part: &str,
    hours: Option<i64>,
    person_field: &str,
    person: Option<&str>,
) {
    match hours {
        None => problems.push(format!("course '{course}' {part}: missing 'hours'")),
        Some(h) if h < 0 => problems.push(format!("course '{course}' {part}: negative hours ({h})")),
        Some(_) => {}
    }
    match person {
        None => problems.push(format!("course '{course}' {part}: missing '{person_field}'")),
        Some(p) if p.trim().is_empty() => {
            problems.push(format!("course '{course}' {part}: empty '{person_field}'"))
        }
        Some(_) => {}
    }
}

// Only called after `validate`, so hours and person are present and sane.
fn push_units(
    units: &mut Vec<SessionUnit>,
    course: &str,
    kind: SessionKind,
    hours: Option<i64>,
    person: Option<&str>,
) {
    let (Some(hours), Some(person)) = (hours, person) else {
        return;
    };
    for _ in 0..hours.max(0) {
        units.push(SessionUnit::new(course, kind, person));
    }
}

impl Serialize for CourseRequirements {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.courses.len()))?;
        for (name, req) in &self.courses {
            map.serialize_entry(name, req)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CourseRequirements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = CourseRequirements;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of course names to requirements")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut reqs = CourseRequirements::new();
                while let Some((name, req)) = access.next_entry::<String, CourseRequirement>()? {
                    reqs.insert(name, req);
                }
                Ok(reqs)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}
