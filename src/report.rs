use crate::schedule::{DayPlan, Plan, WindowPlan};
use core::fmt;

impl fmt::Display for WindowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "On {}, from {} to {}:",
            self.window.day, self.window.start, self.window.end
        )?;

        if self.suggestions.is_empty() {
            return writeln!(f, "  - No meeting point shared by everyone");
        }

        for suggestion in self.suggestions.iter() {
            writeln!(f, "  - Meet at {}", suggestion.point)?;
            for (id, distance) in suggestion.distances_km.iter() {
                writeln!(f, "    - {} is {:.2} km away", id, distance)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.windows.is_empty() {
            return writeln!(f, "No common times on {}.", self.day);
        }

        self.windows
            .iter()
            .try_for_each(|window| write!(f, "{}", window))
    }
}

/// Renders the plan grouped by day, Monday first
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Suggested Meeting Times and Locations ---")?;
        self.days.iter().try_for_each(|day| write!(f, "{}", day))
    }
}
