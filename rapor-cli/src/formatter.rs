//! Terminal output formatting

use colored::*;

/// Prints status lines and simple aligned tables to stdout
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".bright_green().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".bright_red().bold(), message.bright_red());
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".bright_yellow().bold(), message.bright_yellow());
    }

    /// Print a section heading
    pub fn print_heading(&self, title: &str) {
        println!("\n{}", title.bold().underline());
    }

    /// Print a `label: value` line
    pub fn print_metric(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<20} {}", format!("{label}:").dimmed(), value);
    }

    /// Print a table with headers and rows
    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if rows.is_empty() {
            println!("  {}", "No data to display".dimmed());
            return;
        }

        let widths = column_widths(headers, rows);

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<width$}", h, width = *w))
            .collect();
        println!("  {}", header_line.join("  ").bold());

        for row in rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
                .collect();
            println!("  {}", line.join("  "));
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_fit_longest_cell() {
        let rows = vec![
            vec!["hepsiburada".to_string(), "1".to_string()],
            vec!["n11".to_string(), "12345".to_string()],
        ];
        assert_eq!(column_widths(&["Channel", "Count"], &rows), vec![11, 5]);
    }
}
