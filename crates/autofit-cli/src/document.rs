//! Grid documents: everything needed to size one grid, in JSON or YAML.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use autofit_grid::{
    Container, Grid, GridSizer, Header, HeaderGroup, MonospaceMetrics, SizingConfig, Stylesheet,
};
use serde::Deserialize;

/// Document syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    /// YAML for `.yaml` and `.yml`, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Syntax::Yaml
            }
            _ => Syntax::Json,
        }
    }
}

/// A header: bare text, or text plus declarative attributes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum HeaderEntry {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        attributes: BTreeMap<String, String>,
    },
}

impl HeaderEntry {
    fn into_header(self) -> Header {
        match self {
            HeaderEntry::Text(text) => Header::new(text),
            HeaderEntry::Full { text, attributes } => Header::from_attributes(text, attributes),
        }
    }
}

/// A cell value. Numbers and booleans are accepted so documents can be
/// written naturally.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty(()),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Float(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Empty(()) => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GridDocument {
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub config: SizingConfig,
    pub headers: Vec<HeaderEntry>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
    #[serde(default)]
    pub styles: Stylesheet,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub metrics: MonospaceMetrics,
}

impl GridDocument {
    pub fn parse(text: &str, syntax: Syntax) -> Result<Self> {
        match syntax {
            Syntax::Json => serde_json::from_str(text).context("invalid JSON grid document"),
            Syntax::Yaml => serde_yaml::from_str(text).context("invalid YAML grid document"),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text, Syntax::from_path(path))
            .with_context(|| format!("failed to load {}", path.display()))
    }

    /// Header texts in column order.
    pub fn header_texts(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| match h {
                HeaderEntry::Text(text) | HeaderEntry::Full { text, .. } => text.clone(),
            })
            .collect()
    }

    pub fn grid(&self) -> Grid {
        let headers = self
            .headers
            .iter()
            .cloned()
            .map(HeaderEntry::into_header)
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>());
        self.groups
            .iter()
            .fold(Grid::new(headers).rows(rows), |grid, name| {
                grid.group(HeaderGroup::new(name.as_str()))
            })
    }

    /// Build a sizer, optionally replacing the container width.
    pub fn sizer(&self, width: Option<f64>, debug: bool) -> Result<GridSizer> {
        let mut builder = GridSizer::builder()
            .grid(self.grid())
            .config(self.config.clone().show_debug(debug || self.config.show_debug))
            .metrics(self.metrics)
            .styles(self.styles.clone());
        if let Some(container) = width.map(Container::new).or(self.container) {
            builder = builder.container(container);
        }
        builder.build().context("cannot size grid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofit_grid::ColumnType;
    use std::io::Write;

    const YAML: &str = r#"
container:
  width: 600
config:
  default_min_width: 10
headers:
  - ID
  - text: Full Name
    attributes:
      data-for: person
  - text: Created At
    attributes:
      data-type: datetime
rows:
  - [1001, "Grace Brewster Murray Hopper, rear admiral and computing pioneer", "2024-01-01 10:00"]
  - [1002, Ada Lovelace, "2024-02-03 11:30"]
groups: [person]
styles:
  header: { font_size: 10 }
  cell: { font_size: 10 }
metrics:
  advance_ratio: 1.0
  line_height_ratio: 2.0
"#;

    #[test]
    fn syntax_follows_extension() {
        assert_eq!(Syntax::from_path(Path::new("grid.yaml")), Syntax::Yaml);
        assert_eq!(Syntax::from_path(Path::new("grid.YML")), Syntax::Yaml);
        assert_eq!(Syntax::from_path(Path::new("grid.json")), Syntax::Json);
        assert_eq!(Syntax::from_path(Path::new("grid")), Syntax::Json);
    }

    #[test]
    fn yaml_document_builds_grid() {
        let doc = GridDocument::parse(YAML, Syntax::Yaml).unwrap();
        let grid = doc.grid();
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell(0, 0), Some("1001"));
        assert_eq!(grid.group_members("person"), vec![1]);
        assert_eq!(
            grid.header(2).unwrap().overrides.column_type,
            Some(ColumnType::DateTime)
        );
        assert_eq!(doc.header_texts()[1], "Full Name");
    }

    #[test]
    fn document_sizes_like_the_library() {
        let doc = GridDocument::parse(YAML, Syntax::Yaml).unwrap();
        let sizer = doc.sizer(None, false).unwrap();
        let widths = sizer.widths();
        assert_eq!(widths[0], 40.0);
        assert_eq!(widths[2], 160.0);
        assert!((widths[1] - 400.0).abs() < 1e-6);
        assert_eq!(sizer.group_widths().get("person"), Some(&widths[1]));
    }

    #[test]
    fn width_flag_replaces_container() {
        let doc = GridDocument::parse(YAML, Syntax::Yaml).unwrap();
        let sizer = doc.sizer(Some(900.0), false).unwrap();
        assert_eq!(sizer.container().width, 900.0);
    }

    #[test]
    fn missing_container_is_an_error() {
        let doc = GridDocument::parse(r#"{"headers": ["A"]}"#, Syntax::Json).unwrap();
        let err = doc.sizer(None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("container is required"));
    }

    #[test]
    fn short_rows_are_padded_to_the_header_count() {
        let doc = GridDocument::parse(
            r#"{"headers": ["Name", "Amount"], "rows": [["Ada"], ["Grace", 12]]}"#,
            Syntax::Json,
        )
        .unwrap();
        let grid = doc.grid();
        assert_eq!(grid.cell(0, 1), Some(""));
        assert_eq!(grid.cell(1, 0), Some("Grace"));
        assert_eq!(grid.cell(1, 1), Some("12"));
    }

    #[test]
    fn json_cells_accept_scalars() {
        let doc = GridDocument::parse(
            r#"{"headers": ["A", "B", "C", "D"], "rows": [["x", 2, 2.5, true]]}"#,
            Syntax::Json,
        )
        .unwrap();
        let grid = doc.grid();
        assert_eq!(grid.cell_list(), &["x", "2", "2.5", "true"]);
    }

    #[test]
    fn load_reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();

        let doc = GridDocument::load(&path).unwrap();
        assert_eq!(doc.container, Some(Container::new(600.0)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GridDocument::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
