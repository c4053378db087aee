//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Create a table from a header and rows of strings.
    ///
    /// Every column after the first is right-aligned, which suits the
    /// count columns of the summary table.
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        for i in 1..headers.len() {
            table.with(Modify::new(Columns::single(i)).with(Alignment::right()));
        }

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_from_rows() {
        let headers = ["Unit", "Added"];
        let rows = vec![
            vec!["MyLib".to_string(), "2".to_string()],
            vec!["Other".to_string(), "0".to_string()],
        ];

        let config = OutputConfig::new(OutputFormat::Table);
        let output = TableOutput::from_rows(&headers, &rows, &config);

        assert!(output.contains("Unit"));
        assert!(output.contains("Added"));
        assert!(output.contains("MyLib"));
        assert!(output.contains("Other"));
    }

    #[test]
    fn test_empty_rows() {
        let config = OutputConfig::new(OutputFormat::Table);
        let output = TableOutput::from_rows(&["Unit"], &[], &config);
        assert_eq!(output, "(no results)");
    }
}
