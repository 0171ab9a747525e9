//! Day × time-slot grid view of a chromosome.
//!
//! Rendering is plain text: one header row of time slots, then three lines
//! per day (course and kind, instructor, room). A cell holding several
//! assignments (a conflict) lists them separated by `/`.

use std::fmt;

use crate::ga::{Assignment, Chromosome};
use crate::problem::SlotGrid;

const DAY_WIDTH: usize = 12;
const CELL_WIDTH: usize = 25;

/// Assignments arranged by day and time slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    days: Vec<String>,
    time_slots: Vec<String>,
    // cells[day][time]
    cells: Vec<Vec<Vec<Assignment>>>,
}

impl Timetable {
    /// Places every gene into its (day, time) cell. Genes whose day or time
    /// is not part of `grid` are skipped.
    pub fn from_chromosome(grid: &SlotGrid, chromosome: &Chromosome) -> Self {
        let mut cells = vec![vec![Vec::new(); grid.time_slots.len()]; grid.days.len()];
        for gene in chromosome {
            let day = grid.days.iter().position(|d| d == gene.day());
            let time = grid.time_slots.iter().position(|t| t == gene.time());
            if let (Some(d), Some(t)) = (day, time) {
                cells[d][t].push(gene.clone());
            }
        }
        Self {
            days: grid.days.clone(),
            time_slots: grid.time_slots.clone(),
            cells,
        }
    }

    /// Assignments placed at `day` / `time`; empty if none or unknown.
    pub fn cell(&self, day: &str, time: &str) -> &[Assignment] {
        let d = self.days.iter().position(|x| x == day);
        let t = self.time_slots.iter().position(|x| x == time);
        match (d, t) {
            (Some(d), Some(t)) => &self.cells[d][t],
            _ => &[],
        }
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    fn separator(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(DAY_WIDTH + self.time_slots.len() * (CELL_WIDTH + 3)))
    }

    fn row(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        day: usize,
        text: impl Fn(&Assignment) -> String,
    ) -> fmt::Result {
        write!(f, "{label:<DAY_WIDTH$}")?;
        for cell in &self.cells[day] {
            let joined = cell.iter().map(&text).collect::<Vec<_>>().join(" / ");
            write!(f, "| {joined:^CELL_WIDTH$}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<DAY_WIDTH$}", "Day")?;
        for slot in &self.time_slots {
            write!(f, "| {slot:^CELL_WIDTH$}")?;
        }
        writeln!(f)?;
        self.separator(f)?;

        for (d, day) in self.days.iter().enumerate() {
            self.row(f, day, d, |a| format!("{} ({})", a.course, a.kind.short_label()))?;
            self.row(f, "", d, |a| a.instructor.clone())?;
            self.row(f, "", d, |a| a.room.clone())?;
            self.separator(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{SessionKind, SessionUnit, SlotKey};

    fn chromosome() -> Chromosome {
        Chromosome::new(vec![
            Assignment::new(
                SessionUnit::new("Networks", SessionKind::Lecture, "A"),
                "R1",
                SlotKey::new("Monday", "8-10"),
            ),
            Assignment::new(
                SessionUnit::new("Networks", SessionKind::Lab, "B"),
                "Lab2",
                SlotKey::new("Monday", "8-10"),
            ),
            Assignment::new(
                SessionUnit::new("Compilers", SessionKind::Lecture, "A"),
                "R2",
                SlotKey::new("Wednesday", "4-6"),
            ),
        ])
    }

    #[test]
    fn test_cells() {
        let table = Timetable::from_chromosome(&SlotGrid::reference(), &chromosome());
        assert_eq!(table.cell("Monday", "8-10").len(), 2);
        assert_eq!(table.cell("Wednesday", "4-6")[0].course, "Compilers");
        assert!(table.cell("Sunday", "8-10").is_empty());
        assert!(table.cell("Friday", "8-10").is_empty());
        assert_eq!(table.occupied(), 2);
    }

    #[test]
    fn test_render() {
        let table = Timetable::from_chromosome(&SlotGrid::reference(), &chromosome());
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Day"));
        assert!(lines[0].contains("8-10"));
        // header + separator + 5 days × (3 rows + separator)
        assert_eq!(lines.len(), 2 + 5 * 4);
        assert!(text.contains("Networks (Lec) / Networks (Lab)"));
        assert!(text.contains("Lab2"));
        assert!(text.contains("Compilers (Lec)"));
        let width = DAY_WIDTH + 5 * (CELL_WIDTH + 2);
        assert_eq!(lines[0].chars().count(), width);
    }
}
