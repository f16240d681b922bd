//! Where computed widths go.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Applies computed widths to the visual layout.
pub trait LayoutSink {
    /// One width in px per column, in column order.
    fn apply_column_widths(&mut self, widths: &[f64]);

    /// The combined width of a header group.
    fn apply_group_width(&mut self, group: &str, width: f64);
}

/// Render widths as a grid track list, e.g. `"120px 80.5px"`.
pub fn grid_template_columns(widths: &[f64]) -> String {
    widths
        .iter()
        .map(|w| format!("{}px", w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A [`LayoutSink`] that remembers the last application.
///
/// Clones share state, so a host can keep one handle while the sizer owns
/// another.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    inner: Rc<RefCell<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    columns: Vec<f64>,
    groups: BTreeMap<String, f64>,
    applications: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_widths(&self) -> Vec<f64> {
        self.inner.borrow().columns.clone()
    }

    pub fn group_width(&self, group: &str) -> Option<f64> {
        self.inner.borrow().groups.get(group).copied()
    }

    pub fn group_widths(&self) -> BTreeMap<String, f64> {
        self.inner.borrow().groups.clone()
    }

    /// How many times column widths have been applied.
    pub fn applications(&self) -> usize {
        self.inner.borrow().applications
    }

    /// The applied widths as a track list.
    pub fn template_columns(&self) -> String {
        grid_template_columns(&self.inner.borrow().columns)
    }
}

impl LayoutSink for RecordingSink {
    fn apply_column_widths(&mut self, widths: &[f64]) {
        let mut inner = self.inner.borrow_mut();
        inner.columns = widths.to_vec();
        inner.applications += 1;
    }

    fn apply_group_width(&mut self, group: &str, width: f64) {
        self.inner
            .borrow_mut()
            .groups
            .insert(group.to_string(), width);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LayoutSink for NullSink {
    fn apply_column_widths(&mut self, _widths: &[f64]) {}

    fn apply_group_width(&mut self, _group: &str, _width: f64) {}
}
