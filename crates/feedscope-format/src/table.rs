//! Plain-text table output.

use feedscope_types::Observation;
use std::io::Write;

use crate::formatter::TIMESTAMP_FORMAT;
use crate::{FormatError, Formatter};

const HEADERS: [&str; 3] = ["Block", "Value", "Timestamp"];

/// Column-aligned table for terminal output.
///
/// Block numbers and values are right-aligned so decimal magnitudes line up.
#[derive(Debug, Clone, Copy)]
pub struct TableFormatter {
    include_header: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Creates a table formatter with a header row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_header: true,
        }
    }

    /// Sets whether to include the header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for TableFormatter {
    fn write_observations<W: Write + Send>(
        &self,
        observations: &[Observation],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let rows: Vec<[String; 3]> = observations
            .iter()
            .map(|o| {
                [
                    o.block_number.to_string(),
                    o.value.clone(),
                    o.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                ]
            })
            .collect();

        let mut widths = if self.include_header {
            HEADERS.map(str::len)
        } else {
            [0; 3]
        };
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        let [wb, wv, wt] = widths;

        if self.include_header {
            writeln!(
                writer,
                "{:>wb$}  {:>wv$}  {}",
                HEADERS[0], HEADERS[1], HEADERS[2]
            )?;
            writeln!(writer, "{}  {}  {}", "-".repeat(wb), "-".repeat(wv), "-".repeat(wt))?;
        }
        for [block, value, timestamp] in &rows {
            writeln!(writer, "{block:>wb$}  {value:>wv$}  {timestamp}")?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
