//! Text-table chart renderer.
//!
//! Each chart is printed as one table: bucket labels down the left, one
//! column per series. Missing cells print as `-`.

use std::io::Write;

use popdash_core::chart::ChartRenderer;
use popdash_core::error::CoreError;
use popdash_core::series::ChartData;

const LABEL_WIDTH: usize = 16;
const CELL_WIDTH: usize = 14;

/// Draws charts to a writer (stdout in the binary).
pub struct TerminalRenderer<W: Write> {
    out: W,
    next_id: u64,
    live: Option<u64>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_id: 0,
            live: None,
        }
    }

    /// Handle of the chart currently on screen, if any.
    pub fn live(&self) -> Option<u64> {
        self.live
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> ChartRenderer for TerminalRenderer<W> {
    type Handle = u64;

    fn create(&mut self, canvas: &str, data: &ChartData) -> Result<u64, CoreError> {
        let table = format_table(canvas, data)?;
        self.out
            .write_all(table.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| CoreError::Render(format!("write to terminal failed: {e}")))?;

        self.next_id += 1;
        self.live = Some(self.next_id);
        tracing::debug!(canvas, handle = self.next_id, "Chart drawn");
        Ok(self.next_id)
    }

    fn destroy(&mut self, handle: u64) {
        if self.live == Some(handle) {
            self.live = None;
        }
        tracing::debug!(handle, "Chart released");
    }
}

/// Format `data` as a fixed-width table under a `== canvas ==` heading.
///
/// Fails if any series is not aligned to the labels.
pub fn format_table(canvas: &str, data: &ChartData) -> Result<String, CoreError> {
    if let Some(bad) = data.series.iter().find(|s| s.values.len() != data.labels.len()) {
        return Err(CoreError::Render(format!(
            "series '{}' has {} values for {} labels",
            bad.name,
            bad.values.len(),
            data.labels.len()
        )));
    }

    let mut table = format!("== {canvas} ==\n{:<LABEL_WIDTH$}", "bucket");
    for series in &data.series {
        table.push_str(&format!(" {:>CELL_WIDTH$}", truncate(&series.name, CELL_WIDTH)));
    }
    table.push('\n');

    for (row, label) in data.labels.iter().enumerate() {
        table.push_str(&format!("{label:<LABEL_WIDTH$}"));
        for series in &data.series {
            let cell = match series.values[row] {
                Some(v) => format!("{v:.1}"),
                None => "-".to_string(),
            };
            table.push_str(&format!(" {cell:>CELL_WIDTH$}"));
        }
        table.push('\n');
    }
    Ok(table)
}

fn truncate(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}
