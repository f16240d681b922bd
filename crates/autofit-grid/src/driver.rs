//! The sizing driver.
//!
//! [`GridSizer`] owns a grid and its collaborators and runs full sizing
//! passes: measure every column, grow columns into spare space, shrink
//! text columns on a modest overflow, then hand the widths and header
//! group widths to the [`LayoutSink`].
//!
//! Column types are resolved once, at construction. Every pass after that
//! starts from scratch, so running it twice on unchanged input produces
//! the same widths.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::adjust::FitAdjuster;
use crate::calculate::{ColumnPlan, ColumnWidthCalculator};
use crate::classify::ColumnTypeClassifier;
use crate::debounce::Debouncer;
use crate::distribute::{join, SpaceDistributor};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::groups::group_widths;
use crate::metrics::{MonospaceMetrics, TextMetrics};
use crate::sink::{grid_template_columns, LayoutSink, NullSink};
use crate::style::{StyleProvider, Stylesheet};
use crate::trace::{debug_line, DebugSink, Trace};
use crate::types::{ColumnType, Container, SizingConfig};

/// Result of one sizing pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizingOutcome {
    /// Final width of every column, in column order.
    pub widths: Vec<f64>,
    /// Width of every header group with at least one member.
    pub group_widths: BTreeMap<String, f64>,
    /// Container width left for the columns after padding, border and gaps.
    pub available_width: f64,
}

impl SizingOutcome {
    /// The widths as a grid track list.
    pub fn template_columns(&self) -> String {
        grid_template_columns(&self.widths)
    }

    pub fn total(&self) -> f64 {
        self.widths.iter().sum()
    }
}

/// Builder for [`GridSizer`].
///
/// Only the container is required. Metrics default to
/// [`MonospaceMetrics`], styles to an empty [`Stylesheet`], and widths are
/// discarded unless a sink is given.
#[derive(Default)]
pub struct GridSizerBuilder {
    container: Option<Container>,
    grid: Grid,
    config: SizingConfig,
    metrics: Option<Box<dyn TextMetrics>>,
    styles: Option<Box<dyn StyleProvider>>,
    sink: Option<Box<dyn LayoutSink>>,
    debug_sink: Option<Box<dyn DebugSink>>,
}

impl GridSizerBuilder {
    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn config(mut self, config: SizingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn metrics<M: TextMetrics + 'static>(mut self, metrics: M) -> Self {
        self.metrics = Some(Box::new(metrics));
        self
    }

    pub fn styles<S: StyleProvider + 'static>(mut self, styles: S) -> Self {
        self.styles = Some(Box::new(styles));
        self
    }

    pub fn sink<L: LayoutSink + 'static>(mut self, sink: L) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Surface that receives trace lines while debugging is enabled.
    pub fn debug_sink<D: DebugSink + 'static>(mut self, sink: D) -> Self {
        self.debug_sink = Some(Box::new(sink));
        self
    }

    /// Validate the inputs, resolve column types and run the first pass.
    ///
    /// # Errors
    ///
    /// - [`GridError::MissingContainer`] if no container was given
    /// - [`GridError::NoColumns`] if the grid has no headers
    /// - [`GridError::InvalidConfig`] for a non-finite or negative container
    ///   width, or a configuration rejected by [`SizingConfig::validate`]
    pub fn build(self) -> Result<GridSizer> {
        let container = self.container.ok_or(GridError::MissingContainer)?;
        check_width(container.width)?;
        if self.grid.column_count() == 0 {
            return Err(GridError::NoColumns);
        }
        self.config.validate()?;

        let trace = Trace::new(self.config.show_debug, self.debug_sink);
        let debouncer = Debouncer::new(Duration::from_millis(self.config.debounce_ms));
        let columns = self.grid.column_count();

        let mut sizer = GridSizer {
            container,
            grid: self.grid,
            config: self.config,
            metrics: self
                .metrics
                .unwrap_or_else(|| Box::new(MonospaceMetrics::default())),
            styles: self.styles.unwrap_or_else(|| Box::new(Stylesheet::default())),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            trace,
            debouncer,
            types: Vec::with_capacity(columns),
            widths: vec![0.0; columns],
            ceilings: vec![0.0; columns],
            group_widths: BTreeMap::new(),
        };
        sizer.resolve_types();
        sizer.recompute();
        Ok(sizer)
    }
}

fn check_width(width: f64) -> Result<()> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidConfig(format!(
            "container width must be a finite, non-negative number, got {}",
            width
        )))
    }
}

/// Sizes the columns of one grid against one container.
pub struct GridSizer {
    container: Container,
    grid: Grid,
    config: SizingConfig,
    metrics: Box<dyn TextMetrics>,
    styles: Box<dyn StyleProvider>,
    sink: Box<dyn LayoutSink>,
    trace: Trace,
    debouncer: Debouncer,
    types: Vec<ColumnType>,
    widths: Vec<f64>,
    ceilings: Vec<f64>,
    group_widths: BTreeMap<String, f64>,
}

impl fmt::Debug for GridSizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSizer")
            .field("container", &self.container)
            .field("config", &self.config)
            .field("types", &self.types)
            .field("widths", &self.widths)
            .field("group_widths", &self.group_widths)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

impl GridSizer {
    pub fn builder() -> GridSizerBuilder {
        GridSizerBuilder::default()
    }

    /// Resolve each column's type, classifying the undeclared ones and
    /// recording the result as if it had been declared.
    fn resolve_types(&mut self) {
        let classifier = ColumnTypeClassifier::default();
        self.types.clear();
        for column in 0..self.grid.column_count() {
            let declared = self
                .grid
                .header(column)
                .and_then(|h| h.overrides.column_type);
            let column_type = match declared {
                Some(ty) => {
                    debug_line!(self.trace, "column {}: declared type {}", column, ty);
                    ty
                }
                None => {
                    let ty = classifier.classify(&self.grid, column);
                    debug_line!(self.trace, "column {}: detected type {}", column, ty);
                    if let Some(header) = self.grid.header_mut(column) {
                        header.overrides.column_type = Some(ty);
                    }
                    ty
                }
            };
            self.types.push(column_type);
        }
    }

    /// Container width minus its padding, border and the gaps between
    /// columns.
    pub fn available_width(&self) -> f64 {
        let frame = self.styles.container_box();
        let gaps = frame.gap * self.grid.column_count().saturating_sub(1) as f64;
        self.container.width - frame.horizontal() - gaps
    }

    /// Run a full sizing pass and apply the result to the sink.
    pub fn recompute(&mut self) -> SizingOutcome {
        self.trace.separator();
        let available = self.available_width();
        debug_line!(
            self.trace,
            "sizing {} columns in {}px ({}px available)",
            self.grid.column_count(),
            self.container.width,
            available
        );

        let metrics = &*self.metrics;
        let styles = &*self.styles;
        let calculator = ColumnWidthCalculator::new(&self.grid, metrics, styles, &self.config);

        let mut widths = Vec::with_capacity(self.types.len());
        let mut plans = Vec::with_capacity(self.types.len());
        for (column, &column_type) in self.types.iter().enumerate() {
            let measure = calculator.calculate(column, column_type, &mut self.trace);
            let plan = match self.grid.header(column) {
                Some(header) if header.overrides.effective_fixed_width().is_some() => {
                    ColumnPlan::fixed(measure.width)
                }
                Some(header) => {
                    let plan = ColumnPlan::flexible(
                        column_type,
                        self.config.min_width_for(&header.overrides),
                        measure.content_ceiling,
                    );
                    if header.overrides.prioritize_spare_space {
                        plan.prioritized()
                    } else {
                        plan
                    }
                }
                None => ColumnPlan::flexible(column_type, self.config.default_min_width, 0.0),
            };
            widths.push(measure.width);
            plans.push(plan);
        }
        debug_line!(self.trace, "calculated widths: {}", join(&widths));

        let widths = SpaceDistributor::new(&self.config).distribute(
            widths,
            available,
            &plans,
            &mut self.trace,
        );
        let widths = FitAdjuster::new(&self.grid, metrics, styles, &self.config).adjust(
            widths,
            available,
            &plans,
            &mut self.trace,
        );

        self.sink.apply_column_widths(&widths);
        debug_line!(
            self.trace,
            "applied grid-template-columns: {}",
            grid_template_columns(&widths)
        );

        let groups = group_widths(&self.grid, &widths, styles, &mut self.trace);
        for (name, width) in &groups {
            self.sink.apply_group_width(name, *width);
        }

        self.ceilings = plans.iter().map(|p| p.content_ceiling).collect();
        self.widths = widths;
        self.group_widths = groups;

        SizingOutcome {
            widths: self.widths.clone(),
            group_widths: self.group_widths.clone(),
            available_width: available,
        }
    }

    /// Record a resize to `width` at `now`. The pass runs from [`poll`]
    /// once no further resize arrives for the quiet period.
    ///
    /// [`poll`]: GridSizer::poll
    pub fn notify_resize(&mut self, width: f64, now: Instant) -> Result<()> {
        self.set_container_width(width)?;
        self.debouncer.notify(now);
        Ok(())
    }

    /// Run the pending pass if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<SizingOutcome> {
        if self.debouncer.poll(now) {
            Some(self.recompute())
        } else {
            None
        }
    }

    /// When the pending pass becomes due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Change the container width. Takes effect on the next pass.
    pub fn set_container_width(&mut self, width: f64) -> Result<()> {
        check_width(width)?;
        self.container.width = width;
        Ok(())
    }

    /// Replace the row-major cell list. Column types stay as resolved at
    /// construction; the new content takes effect on the next pass.
    pub fn replace_cells(&mut self, cells: Vec<String>) {
        self.grid.set_cells(cells);
    }

    /// Turn trace output on or off, showing or hiding the debug surface.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.config.show_debug = enabled;
        self.trace.set_enabled(enabled);
    }

    pub fn is_debug(&self) -> bool {
        self.trace.is_enabled()
    }

    /// Widths from the last pass.
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Group widths from the last pass.
    pub fn group_widths(&self) -> &BTreeMap<String, f64> {
        &self.group_widths
    }

    pub fn column_type(&self, column: usize) -> Option<ColumnType> {
        self.types.get(column).copied()
    }

    /// Largest natural width seen in `column` during the last pass.
    pub fn content_ceiling(&self, column: usize) -> Option<f64> {
        self.ceilings.get(column).copied()
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }
}
