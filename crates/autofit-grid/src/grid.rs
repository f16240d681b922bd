//! The grid content model: headers, a flat row-major cell list, and
//! header groups.

use serde::{Deserialize, Serialize};

use crate::types::ColumnOverrides;

/// A column header: its text and declared overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub text: String,
    #[serde(default)]
    pub overrides: ColumnOverrides,
}

impl Header {
    pub fn new(text: impl Into<String>) -> Self {
        Header {
            text: text.into(),
            overrides: ColumnOverrides::default(),
        }
    }

    /// Create a header whose overrides are parsed from attribute pairs.
    pub fn from_attributes<I, K, V>(text: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Header {
            text: text.into(),
            overrides: ColumnOverrides::from_attributes(attributes),
        }
    }

    pub fn with_overrides(mut self, overrides: ColumnOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// A named set of columns sharing a spanning header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGroup {
    pub name: String,
}

impl HeaderGroup {
    pub fn new(name: impl Into<String>) -> Self {
        HeaderGroup { name: name.into() }
    }
}

/// Grid content.
///
/// Cells are stored row-major: cell `i` sits in column `i % N` of row
/// `i / N`, where `N` is the header count. The last row may be short.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    headers: Vec<Header>,
    cells: Vec<String>,
    groups: Vec<HeaderGroup>,
}

impl Grid {
    pub fn new(headers: Vec<Header>) -> Self {
        Grid {
            headers,
            cells: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append rows of cell text.
    ///
    /// Rows longer than the header count are truncated. A short row is
    /// padded with empty cells once another row follows it, so only the
    /// final row may be partial.
    pub fn rows<R, S>(mut self, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = self.headers.len();
        if columns == 0 {
            return self;
        }
        for row in rows {
            self.pad_partial_row();
            self.cells
                .extend(row.into_iter().take(columns).map(Into::into));
        }
        self
    }

    fn pad_partial_row(&mut self) {
        let columns = self.headers.len();
        let partial = self.cells.len() % columns;
        if partial != 0 {
            let len = self.cells.len() + columns - partial;
            self.cells.resize(len, String::new());
        }
    }

    /// Replace the flat cell list.
    pub fn cells(mut self, cells: Vec<String>) -> Self {
        self.cells = cells;
        self
    }

    pub fn group(mut self, group: HeaderGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows, counting a trailing partial row.
    pub fn row_count(&self) -> usize {
        match self.column_count() {
            0 => 0,
            n => self.cells.len().div_ceil(n),
        }
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn header(&self, column: usize) -> Option<&Header> {
        self.headers.get(column)
    }

    pub(crate) fn header_mut(&mut self, column: usize) -> Option<&mut Header> {
        self.headers.get_mut(column)
    }

    pub fn cell_list(&self) -> &[String] {
        &self.cells
    }

    pub fn header_groups(&self) -> &[HeaderGroup] {
        &self.groups
    }

    pub(crate) fn set_cells(&mut self, cells: Vec<String>) {
        self.cells = cells;
    }

    /// Cell text at `row`, `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let n = self.column_count();
        if column >= n {
            return None;
        }
        self.cells.get(row * n + column).map(String::as_str)
    }

    /// Cells of one column as `(row, text)`, top to bottom.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        let n = self.column_count().max(1);
        let start = if column < self.column_count() {
            column
        } else {
            self.cells.len()
        };
        self.cells
            .iter()
            .enumerate()
            .skip(start)
            .step_by(n)
            .map(move |(i, text)| (i / n, text.as_str()))
    }

    /// Indices of the columns whose group override names `group`.
    pub fn group_members(&self, group: &str) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.overrides.group.as_deref() == Some(group))
            .map(|(i, _)| i)
            .collect()
    }
}
