//! Paginated display of the working table's raw rows.

use crate::config::ExplorerConfig;
use crate::console::Console;
use crate::error::Result;
use crate::loader::{ROW_NUMBER, has_column};
use polars::prelude::*;
use tracing::debug;

const SCROLL_PROMPT: &str = "Scroll down? Enter yes or no: ";
const END_OF_DATA: &str = "(no more rows)";

/// Shows the table a page at a time for as long as the user asks for more.
#[derive(Debug, Clone, Copy)]
pub struct RawDataBrowser {
    page_size: usize,
}

impl RawDataBrowser {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self::with_page_size(config.page_size)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Rows `[offset, offset + page_size)`; empty once `offset` passes the end.
    pub fn page(&self, df: &DataFrame, offset: usize) -> DataFrame {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        df.slice(offset, self.page_size)
    }

    /// Print pages starting at row 0 until the user declines to scroll.
    pub fn browse(&self, df: &DataFrame, console: &mut dyn Console) -> Result<()> {
        let mut offset = 0;
        loop {
            let page = self.page(df, offset);
            debug!("Showing rows {}..{}", offset, offset + page.height());
            console.say(&render_page(&page, offset)?)?;
            offset += self.page_size;

            if !console.confirm(SCROLL_PROMPT)? {
                return Ok(());
            }
        }
    }
}

/// Render a page as an aligned text table with every column shown.
///
/// Rows are labelled from the `row_number` column when the table has one,
/// otherwise with their position in the table, starting at `first_row`.
pub fn render_page(page: &DataFrame, first_row: usize) -> Result<String> {
    let mut columns: Vec<Vec<String>> = Vec::with_capacity(page.width() + 1);

    let index: Vec<String> = std::iter::once(String::new())
        .chain(row_labels(page, first_row)?)
        .collect();
    columns.push(index);

    for column in page.get_columns() {
        if column.name().as_str() == ROW_NUMBER {
            continue;
        }
        let series = column.as_materialized_series();
        let mut cells = Vec::with_capacity(page.height() + 1);
        cells.push(series.name().to_string());
        for row in 0..page.height() {
            cells.push(cell_text(&series.get(row)?));
        }
        columns.push(cells);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();

    let mut lines = Vec::with_capacity(page.height() + 2);
    for line in 0..=page.height() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(cells, width)| format!("{:>width$}", cells[line], width = width))
            .collect();
        lines.push(cells.join("  ").trim_end().to_string());
    }

    if page.height() == 0 {
        lines.push(END_OF_DATA.to_string());
    }
    Ok(lines.join("\n"))
}

fn row_labels(page: &DataFrame, first_row: usize) -> Result<Vec<String>> {
    if !has_column(page, ROW_NUMBER) {
        return Ok((first_row..first_row + page.height())
            .map(|i| i.to_string())
            .collect());
    }

    let labels = page
        .column(ROW_NUMBER)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;
    Ok(labels
        .u64()?
        .into_iter()
        .map(|label| label.map(|n| n.to_string()).unwrap_or_default())
        .collect())
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "NaN".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}
