//! Per-column width derivation from header and cell measurements.

use crate::grid::Grid;
use crate::metrics::TextMetrics;
use crate::optimal::OptimalWidthFinder;
use crate::style::StyleProvider;
use crate::trace::{debug_line, Trace};
use crate::types::{ColumnType, SizingConfig};

/// Outcome of measuring one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnMeasure {
    /// Working width after every text in the column has been considered.
    pub width: f64,
    /// Largest natural width of any text in the column.
    pub content_ceiling: f64,
}

/// Per-pass facts about a column consumed by distribution and adjustment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnPlan {
    /// A fixed width was declared; the column is never resized.
    pub fixed: bool,
    /// The column takes spare space before the others.
    pub prioritized: bool,
    pub column_type: ColumnType,
    /// Declared or default minimum width.
    pub min_width: f64,
    /// Largest natural width of the column's texts this pass.
    pub content_ceiling: f64,
}

impl ColumnPlan {
    /// A flexible column with no declared overrides.
    pub fn flexible(column_type: ColumnType, min_width: f64, content_ceiling: f64) -> Self {
        ColumnPlan {
            fixed: false,
            prioritized: false,
            column_type,
            min_width,
            content_ceiling,
        }
    }

    pub fn fixed(width: f64) -> Self {
        ColumnPlan {
            fixed: true,
            prioritized: false,
            column_type: ColumnType::Text,
            min_width: width,
            content_ceiling: width,
        }
    }

    pub fn prioritized(mut self) -> Self {
        self.prioritized = true;
        self
    }
}

/// Derives each column's width from its header and cells.
pub struct ColumnWidthCalculator<'a> {
    grid: &'a Grid,
    metrics: &'a dyn TextMetrics,
    styles: &'a dyn StyleProvider,
    config: &'a SizingConfig,
}

impl<'a> ColumnWidthCalculator<'a> {
    pub fn new(
        grid: &'a Grid,
        metrics: &'a dyn TextMetrics,
        styles: &'a dyn StyleProvider,
        config: &'a SizingConfig,
    ) -> Self {
        ColumnWidthCalculator {
            grid,
            metrics,
            styles,
            config,
        }
    }

    /// Measure `column`, treating its content as `column_type`.
    ///
    /// A declared fixed width is returned verbatim without measuring. All
    /// other columns take the widest clamped optimal width among the
    /// header and every cell.
    pub fn calculate(
        &self,
        column: usize,
        column_type: ColumnType,
        trace: &mut Trace,
    ) -> ColumnMeasure {
        let Some(header) = self.grid.header(column) else {
            return ColumnMeasure {
                width: 0.0,
                content_ceiling: 0.0,
            };
        };
        let overrides = &header.overrides;

        if let Some(fixed) = overrides.effective_fixed_width() {
            debug_line!(trace, "column {}: fixed width {}px", column, fixed);
            return ColumnMeasure {
                width: fixed,
                content_ceiling: fixed,
            };
        }

        let wrap_ratio = self.config.wrap_ratio_for(overrides, column_type);
        let min_width = self.config.min_width_for(overrides);
        let finder = OptimalWidthFinder::new(wrap_ratio, min_width)
            .step(self.config.width_step)
            .force_single_line(column_type.forces_single_line());

        debug_line!(
            trace,
            "column {}: header \"{}\", type {}, wrap ratio {}",
            column,
            header.text,
            column_type,
            wrap_ratio
        );

        let header_style = self.styles.header_style(column);
        let mut width = self.config.clamp_width(
            finder.find(self.metrics, &header.text, &header_style, trace),
            min_width,
        );
        let mut content_ceiling = self.metrics.natural_width(&header.text, &header_style);
        debug_line!(trace, "column {}: header width {}px", column, width);

        for (row, text) in self.grid.column_cells(column) {
            let cell_style = self.styles.cell_style(column, row);
            let cell_width = self
                .config
                .clamp_width(finder.find(self.metrics, text, &cell_style, trace), min_width);
            width = width.max(cell_width);
            content_ceiling = content_ceiling.max(self.metrics.natural_width(text, &cell_style));
            debug_line!(
                trace,
                "column {}: cell \"{}\" width {}px, column width {}px",
                column,
                text,
                cell_width,
                width
            );
        }

        debug_line!(
            trace,
            "column {}: final width {}px, content ceiling {}px",
            column,
            width,
            content_ceiling
        );
        ColumnMeasure {
            width,
            content_ceiling,
        }
    }
}
