//! Style lookup for headers, cells, the container and header groups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{BoxMetrics, VisualParams};

/// Supplies the computed style metrics sizing needs.
///
/// Styles are read fresh on every pass, so a provider may change its
/// answers between passes (a theme switch, a font-size change).
pub trait StyleProvider {
    /// Style of the header for `column`.
    fn header_style(&self, column: usize) -> VisualParams;

    /// Style of the cell at `row` in `column`.
    fn cell_style(&self, column: usize, row: usize) -> VisualParams;

    /// Box metrics of the grid container.
    fn container_box(&self) -> BoxMetrics;

    /// Box metrics of a header group. `gap` is the gap between its members.
    fn group_box(&self, group: &str) -> BoxMetrics;
}

/// A static [`StyleProvider`].
///
/// Uniform header and cell styles with optional per-column replacements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stylesheet {
    pub header: VisualParams,
    pub cell: VisualParams,
    pub column_headers: HashMap<usize, VisualParams>,
    pub column_cells: HashMap<usize, VisualParams>,
    pub container: BoxMetrics,
    pub groups: HashMap<String, BoxMetrics>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same style for headers and cells.
    pub fn uniform(params: VisualParams) -> Self {
        Stylesheet {
            header: params.clone(),
            cell: params,
            ..Default::default()
        }
    }

    pub fn header(mut self, params: VisualParams) -> Self {
        self.header = params;
        self
    }

    pub fn cell(mut self, params: VisualParams) -> Self {
        self.cell = params;
        self
    }

    pub fn column_header(mut self, column: usize, params: VisualParams) -> Self {
        self.column_headers.insert(column, params);
        self
    }

    pub fn column_cell(mut self, column: usize, params: VisualParams) -> Self {
        self.column_cells.insert(column, params);
        self
    }

    pub fn container(mut self, metrics: BoxMetrics) -> Self {
        self.container = metrics;
        self
    }

    pub fn group(mut self, name: impl Into<String>, metrics: BoxMetrics) -> Self {
        self.groups.insert(name.into(), metrics);
        self
    }
}

impl StyleProvider for Stylesheet {
    fn header_style(&self, column: usize) -> VisualParams {
        self.column_headers
            .get(&column)
            .unwrap_or(&self.header)
            .clone()
    }

    fn cell_style(&self, column: usize, _row: usize) -> VisualParams {
        self.column_cells.get(&column).unwrap_or(&self.cell).clone()
    }

    fn container_box(&self) -> BoxMetrics {
        self.container
    }

    fn group_box(&self, group: &str) -> BoxMetrics {
        self.groups.get(group).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_column_styles_replace_uniform() {
        let sheet = Stylesheet::uniform(VisualParams::new(12.0))
            .column_header(1, VisualParams::new(14.0).font_weight(700))
            .column_cell(2, VisualParams::new(10.0));

        assert_eq!(sheet.header_style(0).font_size, 12.0);
        assert_eq!(sheet.header_style(1).font_weight, 700);
        assert_eq!(sheet.cell_style(2, 5).font_size, 10.0);
        assert_eq!(sheet.cell_style(0, 5).font_size, 12.0);
    }

    #[test]
    fn unknown_group_has_empty_box() {
        let sheet = Stylesheet::new().group("contact", BoxMetrics::new().padding(4.0));
        assert_eq!(sheet.group_box("contact").horizontal(), 8.0);
        assert_eq!(sheet.group_box("missing"), BoxMetrics::default());
    }

    #[test]
    fn deserializes_partial_yaml() {
        let sheet: Stylesheet = serde_yaml::from_str(
            "header:\n  font_size: 14\n  padding_left: 8\ncontainer:\n  gap: 4\n",
        )
        .unwrap();
        assert_eq!(sheet.header.font_size, 14.0);
        assert_eq!(sheet.header.padding_left, 8.0);
        assert_eq!(sheet.cell, VisualParams::default());
        assert_eq!(sheet.container.gap, 4.0);
    }
}
