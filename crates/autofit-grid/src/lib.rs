//! # autofit-grid - content-aware column widths for data grids
//!
//! `autofit-grid` decides how wide each column of a data table should be,
//! given a container width and the text in every header and cell. Columns
//! are sized so their text wraps into comfortably wide blocks rather than
//! tall, narrow ones; leftover space goes to the columns whose content can
//! use it; and a modest overflow is recovered by shrinking the text
//! columns that carry the most text.
//!
//! ## Quick start
//!
//! ```rust
//! use autofit_grid::{Container, Grid, GridSizer, Header, MonospaceMetrics};
//!
//! let grid = Grid::new(vec![
//!     Header::new("ID"),
//!     Header::new("Full Name"),
//!     Header::new("Created At"),
//! ])
//! .rows(vec![
//!     vec!["1", "Ada Lovelace", "2024-01-01 10:00"],
//!     vec!["2", "Grace Brewster Murray Hopper", "2024-02-03 11:30"],
//! ]);
//!
//! let sizer = GridSizer::builder()
//!     .container(Container::new(600.0))
//!     .grid(grid)
//!     .metrics(MonospaceMetrics::default())
//!     .build()?;
//!
//! assert_eq!(sizer.widths().len(), 3);
//! # Ok::<(), autofit_grid::GridError>(())
//! ```
//!
//! ## A sizing pass
//!
//! 1. Column types are resolved once, when the sizer is built. Declared
//!    types win; the rest are classified from a sample of cells
//!    ([`ColumnTypeClassifier`]).
//! 2. [`ColumnWidthCalculator`] measures the header and every cell with
//!    [`OptimalWidthFinder`] and keeps the widest clamped result. Numbers
//!    and dates are never wrapped.
//! 3. [`SpaceDistributor`] grows columns toward their content ceiling,
//!    prioritized columns first.
//! 4. [`FitAdjuster`] shrinks text columns if the total overflows by less
//!    than the adjustment threshold.
//! 5. The widths go to a [`LayoutSink`], followed by the width of every
//!    header group.
//!
//! Resize notifications are debounced: [`GridSizer::notify_resize`] arms a
//! deadline and [`GridSizer::poll`] runs the pass once it has passed.
//!
//! ## Collaborators
//!
//! Sizing never renders text. Hosts supply a [`TextMetrics`] to measure
//! strings and a [`StyleProvider`] for fonts and box metrics.
//! [`MonospaceMetrics`] and [`Stylesheet`] cover headless use.

mod adjust;
mod calculate;
mod classify;
mod debounce;
mod distribute;
mod driver;
mod error;
mod grid;
mod groups;
mod metrics;
mod optimal;
mod sink;
mod style;
mod trace;
mod types;

pub use adjust::FitAdjuster;
pub use calculate::{ColumnMeasure, ColumnPlan, ColumnWidthCalculator};
pub use classify::{
    classify_value, is_date, is_datetime, is_email, is_number, majority, ColumnTypeClassifier,
    DEFAULT_SAMPLE_LIMIT,
};
pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use distribute::SpaceDistributor;
pub use driver::{GridSizer, GridSizerBuilder, SizingOutcome};
pub use error::{GridError, Result};
pub use grid::{Grid, Header, HeaderGroup};
pub use groups::group_widths;
pub use metrics::{MonospaceMetrics, TextMetrics, TextSize};
pub use optimal::{word_count, OptimalWidthFinder, SHORT_TEXT_WORDS};
pub use sink::{grid_template_columns, LayoutSink, NullSink, RecordingSink};
pub use style::{StyleProvider, Stylesheet};
pub use trace::{DebugLog, DebugSink, Trace};
pub use types::{
    attr, BoxMetrics, ColumnOverrides, ColumnType, Container, SizingConfig, VisualParams,
    WrapRatios,
};
