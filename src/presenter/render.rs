use std::fmt;

use super::model::{Panel, Presentation};

// ============================================================================
// Text rendering for terminals
// ============================================================================

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scenario {
            Some(scenario) => writeln!(f, "== {} ==", scenario)?,
            None => return writeln!(f, "(nothing to show)"),
        }
        for panel in &self.panels {
            writeln!(f)?;
            write!(f, "{}", panel)?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  {}", self.description)?;

        for action in &self.actions {
            writeln!(f, "  [{}]", action.label)?;
        }

        if !self.is_table() {
            return Ok(());
        }

        let widths = self.column_widths();
        writeln!(f, "  {}", pad_cells(self.columns.iter().copied(), &widths))?;
        writeln!(f, "  {}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"))?;

        if self.rows.is_empty() {
            if let Some(message) = self.empty_message {
                writeln!(f, "  {}", message)?;
            }
            return Ok(());
        }

        for row in &self.rows {
            let mut line = pad_cells(row.cells.iter().map(String::as_str), &widths);
            for action in &row.actions {
                line.push_str(&format!("  [{}]", action.label));
            }
            writeln!(f, "  {}", line.trim_end())?;
        }
        Ok(())
    }
}

impl Panel {
    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn pad_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
}
