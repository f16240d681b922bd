//! Shrink-to-fit for modest overflows.
//!
//! When the columns overflow the container by less than the adjustment
//! threshold, text columns give up width in proportion to how much text
//! they carry. Larger overflows are left for the layout to handle.

use crate::calculate::ColumnPlan;
use crate::distribute::join;
use crate::grid::Grid;
use crate::metrics::TextMetrics;
use crate::optimal::{word_count, SHORT_TEXT_WORDS};
use crate::style::StyleProvider;
use crate::trace::{debug_line, Trace};
use crate::types::{ColumnType, SizingConfig};

/// A column allowed to shrink this pass.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Shrinkable {
    index: usize,
    weight: f64,
    floor: f64,
}

/// Shrinks text columns when the total width modestly overflows.
pub struct FitAdjuster<'a> {
    grid: &'a Grid,
    metrics: &'a dyn TextMetrics,
    styles: &'a dyn StyleProvider,
    config: &'a SizingConfig,
}

impl<'a> FitAdjuster<'a> {
    pub fn new(
        grid: &'a Grid,
        metrics: &'a dyn TextMetrics,
        styles: &'a dyn StyleProvider,
        config: &'a SizingConfig,
    ) -> Self {
        FitAdjuster {
            grid,
            metrics,
            styles,
            config,
        }
    }

    /// The narrowest a column may be shrunk to.
    ///
    /// Short headers (two words or fewer) are never squeezed below their
    /// own unwrapped width.
    pub fn effective_min_width(&self, column: usize, min_width: f64) -> f64 {
        let header_floor = match self.grid.header(column) {
            Some(header) => {
                let text = header.text.trim();
                if word_count(text) <= SHORT_TEXT_WORDS {
                    self.metrics
                        .natural_width(text, &self.styles.header_style(column))
                } else {
                    self.config.default_min_width
                }
            }
            None => self.config.default_min_width,
        };
        min_width.max(header_floor)
    }

    /// Character count of the longest trimmed cell in `column`.
    fn longest_cell(&self, column: usize) -> usize {
        self.grid
            .column_cells(column)
            .map(|(_, text)| text.trim().chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Shrink eligible columns to absorb an overflow below the threshold.
    ///
    /// Eligible columns are flexible text columns wider than their
    /// effective minimum. Each is visited once, in index order, giving up
    /// `min(remaining, (width - floor) * weight / total_weight)` where the
    /// weight is the text wrap ratio times its longest cell length. Any
    /// overflow left after that single pass stays unresolved.
    pub fn adjust(
        &self,
        mut widths: Vec<f64>,
        available: f64,
        columns: &[ColumnPlan],
        trace: &mut Trace,
    ) -> Vec<f64> {
        let total: f64 = widths.iter().sum();
        let overflow = total - available;
        if !(overflow > 0.0 && overflow < self.config.adjustment_threshold) {
            debug_line!(
                trace,
                "no adjustment: overflow {}px, threshold {}px",
                overflow,
                self.config.adjustment_threshold
            );
            return widths;
        }

        debug_line!(
            trace,
            "total width {}px exceeds available {}px by less than {}px, adjusting",
            total,
            available,
            self.config.adjustment_threshold
        );

        let mut shrinkable = Vec::new();
        for (index, (plan, width)) in columns.iter().zip(&widths).enumerate() {
            if plan.fixed || plan.column_type != ColumnType::Text {
                continue;
            }
            let floor = self.effective_min_width(index, plan.min_width);
            if *width > floor {
                let ratio = self.config.wrap_ratios.get(plan.column_type);
                let longest = self.longest_cell(index);
                let weight = ratio * longest as f64;
                debug_line!(
                    trace,
                    "column {} adjustable: wrap ratio {}, text length {}, weight {}",
                    index,
                    ratio,
                    longest,
                    weight
                );
                shrinkable.push(Shrinkable {
                    index,
                    weight,
                    floor,
                });
            } else {
                debug_line!(
                    trace,
                    "column {} cannot shrink: width {}px, effective min {}px",
                    index,
                    width,
                    floor
                );
            }
        }

        let total_weight: f64 = shrinkable.iter().map(|c| c.weight).sum();
        debug_line!(trace, "total weight {}", total_weight);
        if total_weight <= 0.0 {
            debug_line!(trace, "no weighted column to shrink, overflow left unresolved");
            return widths;
        }

        let mut remaining = overflow;
        for column in &shrinkable {
            if remaining <= 0.0 {
                break;
            }
            let share = column.weight / total_weight;
            let capacity = widths[column.index] - column.floor;
            let shrink = remaining.min(capacity * share);
            widths[column.index] -= shrink;
            remaining -= shrink;
            debug_line!(
                trace,
                "column {} shrunk by {}px ({}% of capacity) to {}px, {}px left",
                column.index,
                shrink,
                share * 100.0,
                widths[column.index],
                remaining
            );
        }

        debug_line!(trace, "widths after adjustment: {}", join(&widths));
        debug_line!(trace, "unresolved overflow: {}px", remaining.max(0.0));
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Header;
    use crate::metrics::MonospaceMetrics;
    use crate::style::Stylesheet;
    use crate::types::VisualParams;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::new(1.0, 2.0)
    }

    fn styles() -> Stylesheet {
        Stylesheet::uniform(VisualParams::new(10.0))
    }

    fn grid() -> Grid {
        // longest cells: 20 chars, 30 chars, 2 chars
        Grid::new(vec![
            Header::new("Notes"),
            Header::new("Description"),
            Header::new("Qty"),
        ])
        .rows(vec![
            vec!["aaaaaaaaaaaaaaaaaaaa", "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", "12"],
            vec!["short", "short", "3"],
        ])
    }

    fn plans() -> Vec<ColumnPlan> {
        vec![
            ColumnPlan::flexible(ColumnType::Text, 50.0, 200.0),
            ColumnPlan::flexible(ColumnType::Text, 50.0, 300.0),
            ColumnPlan::flexible(ColumnType::Number, 50.0, 30.0),
        ]
    }

    fn adjust(widths: Vec<f64>, available: f64) -> Vec<f64> {
        let g = grid();
        let m = metrics();
        let s = styles();
        let config = SizingConfig::default();
        FitAdjuster::new(&g, &m, &s, &config).adjust(
            widths,
            available,
            &plans(),
            &mut Trace::disabled(),
        )
    }

    #[test]
    fn short_header_sets_floor() {
        let g = grid();
        let m = metrics();
        let s = styles();
        let config = SizingConfig::default();
        let adjuster = FitAdjuster::new(&g, &m, &s, &config);
        assert_eq!(adjuster.effective_min_width(0, 50.0), 50.0);
        assert_eq!(adjuster.effective_min_width(1, 50.0), 110.0);
        assert_eq!(adjuster.effective_min_width(2, 50.0), 50.0);
    }

    #[test]
    fn long_header_uses_default_min() {
        let g = Grid::new(vec![Header::new("Date of first published algorithm")]);
        let m = metrics();
        let s = styles();
        let config = SizingConfig::default();
        let adjuster = FitAdjuster::new(&g, &m, &s, &config);
        assert_eq!(adjuster.effective_min_width(0, 20.0), 50.0);
        assert_eq!(adjuster.effective_min_width(0, 80.0), 80.0);
    }

    #[test]
    fn small_overflow_shrinks_text_columns_to_fit() {
        // weights 90 and 135: column 0 may give 40% of its 250px capacity
        let widths = adjust(vec![300.0, 400.0, 60.0], 710.0);
        assert_eq!(widths, vec![250.0, 400.0, 60.0]);
        assert_eq!(widths.iter().sum::<f64>(), 710.0);
    }

    #[test]
    fn overflow_spreads_by_weight_when_first_column_runs_short() {
        // capacity shares: column 0 gives 0.4 * 50 = 20, column 1 gives the rest
        let widths = adjust(vec![100.0, 400.0, 60.0], 530.0);
        assert!((widths[0] - 80.0).abs() < 1e-9);
        assert!((widths[1] - 390.0).abs() < 1e-9);
        assert_eq!(widths[2], 60.0);
    }

    #[test]
    fn single_pass_leaves_residual_overflow() {
        // column 0 gives 0.4 * 10 = 4, column 1 gives 0.6 * 10 = 6
        let widths = adjust(vec![60.0, 120.0, 60.0], 100.0 + 90.0);
        assert!((widths[0] - 56.0).abs() < 1e-9);
        assert!((widths[1] - 114.0).abs() < 1e-9);
        assert!(widths.iter().sum::<f64>() > 190.0);
    }

    #[test]
    fn large_overflow_is_left_alone() {
        let widths = adjust(vec![300.0, 400.0, 60.0], 460.0);
        assert_eq!(widths, vec![300.0, 400.0, 60.0]);
    }

    #[test]
    fn overflow_equal_to_threshold_is_left_alone() {
        let widths = adjust(vec![300.0, 400.0, 60.0], 560.0);
        assert_eq!(widths, vec![300.0, 400.0, 60.0]);
    }

    #[test]
    fn no_overflow_is_left_alone() {
        let widths = adjust(vec![300.0, 400.0, 60.0], 900.0);
        assert_eq!(widths, vec![300.0, 400.0, 60.0]);
    }

    #[test]
    fn columns_without_text_weight_are_skipped() {
        let g = Grid::new(vec![Header::new("Notes")]);
        let m = metrics();
        let s = styles();
        let config = SizingConfig::default();
        let plans = [ColumnPlan::flexible(ColumnType::Text, 50.0, 0.0)];
        let widths = FitAdjuster::new(&g, &m, &s, &config).adjust(
            vec![300.0],
            250.0,
            &plans,
            &mut Trace::disabled(),
        );
        assert_eq!(widths, vec![300.0]);
    }
}
