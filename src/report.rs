//! Plain-text rendering of an analysis for terminal output.

use crate::relevance::AnalysisResult;
use std::fmt;

/// Terminal view of an analysis. Scores and column markers come from the
/// per-table details, so tables sharing a name each show their own data.
pub struct TextReport<'r, 'a>(pub &'r AnalysisResult<'a>);

impl fmt::Display for TextReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Query: \"{}\"", result.query)?;
        writeln!(f, "Confidence: {:.0}%", result.confidence * 100.0)?;
        writeln!(f, "{}", "-".repeat(60))?;

        if result.is_empty() {
            return writeln!(f, "No relevant tables found. Try different keywords.");
        }

        writeln!(f, "Relevant tables ({}):", result.relevant_tables.len())?;
        for (rank, (table, detail)) in result.ranked().enumerate() {
            writeln!(
                f,
                "{:>3}. {} (score {:.1}, {} columns)",
                rank + 1,
                table.name,
                detail.total,
                table.columns.len()
            )?;

            for column in &table.columns {
                let marker = if detail.column_matches.contains(&column.name) { "*" } else { " " };
                write!(f, "     {} {}: {}", marker, column.name, column.data_type)?;
                if let Some(ref constraints) = column.constraints {
                    if !constraints.is_empty() {
                        write!(f, " [{}]", constraints.join(", "))?;
                    }
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

pub fn render_text(result: &AnalysisResult<'_>) -> String {
    TextReport(result).to_string()
}
