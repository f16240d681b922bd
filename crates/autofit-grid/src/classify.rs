//! Column type detection from cell samples.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::grid::Grid;
use crate::types::ColumnType;

/// Most rows sampled per column.
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Infers a [`ColumnType`] from a sample of a column's cells.
#[derive(Clone, Copy, Debug)]
pub struct ColumnTypeClassifier {
    sample_limit: usize,
}

impl Default for ColumnTypeClassifier {
    fn default() -> Self {
        ColumnTypeClassifier {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

impl ColumnTypeClassifier {
    pub fn new(sample_limit: usize) -> Self {
        ColumnTypeClassifier { sample_limit }
    }

    /// Number of rows sampled: `ceil(min(limit, cells / columns))`.
    ///
    /// A trailing partial row counts, so rows that exist only for some
    /// columns are still sampled where they have a cell.
    pub fn sample_size(&self, grid: &Grid) -> usize {
        let columns = grid.column_count();
        if columns == 0 {
            return 0;
        }
        let rows = grid.cell_list().len() as f64 / columns as f64;
        rows.min(self.sample_limit as f64).ceil() as usize
    }

    /// Classify one column.
    ///
    /// Each sampled value is classified on its own; the type with the
    /// highest count wins, ties going to the type earlier in
    /// [`ColumnType::PRECEDENCE`]. A column with no samples is text.
    pub fn classify(&self, grid: &Grid, column: usize) -> ColumnType {
        let columns = grid.column_count();
        if column >= columns {
            return ColumnType::Text;
        }

        let samples = (0..self.sample_size(grid))
            .filter_map(|row| grid.cell_list().get(row * columns + column))
            .map(|text| classify_value(text));

        majority(samples)
    }
}

/// Pick the most frequent type, breaking ties by precedence.
pub fn majority(samples: impl IntoIterator<Item = ColumnType>) -> ColumnType {
    let mut counts = [0usize; ColumnType::PRECEDENCE.len()];
    for sample in samples {
        if let Some(slot) = ColumnType::PRECEDENCE.iter().position(|t| *t == sample) {
            counts[slot] += 1;
        }
    }

    let mut best = ColumnType::Text;
    let mut best_count = 0;
    for (column_type, count) in ColumnType::PRECEDENCE.iter().zip(counts) {
        if count > best_count {
            best = *column_type;
            best_count = count;
        }
    }
    best
}

/// Classify a single value in precedence order:
/// datetime, date, number, email, text.
pub fn classify_value(text: &str) -> ColumnType {
    let text = text.trim();
    if is_datetime(text) {
        ColumnType::DateTime
    } else if is_date(text) {
        ColumnType::Date
    } else if is_number(text) {
        ColumnType::Number
    } else if is_email(text) {
        ColumnType::Email
    } else {
        ColumnType::Text
    }
}

/// Parses as a date and carries a time (contains a colon).
pub fn is_datetime(text: &str) -> bool {
    text.contains(':') && parses_as_date(text)
}

/// Parses as a date and has no time component.
pub fn is_date(text: &str) -> bool {
    !text.contains(':') && parses_as_date(text)
}

/// A finite numeric literal.
pub fn is_number(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.parse::<f64>().is_ok_and(f64::is_finite)
}

/// A simple `local@domain.tld` address.
pub fn is_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

fn parses_as_date(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_rfc2822(text).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(text, f).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(text, f).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Header;

    fn single_column(values: &[&str]) -> Grid {
        Grid::new(vec![Header::new("Value")]).rows(values.iter().map(|v| vec![*v]))
    }

    #[test]
    fn value_precedence() {
        assert_eq!(classify_value("2024-01-01T10:00"), ColumnType::DateTime);
        assert_eq!(classify_value("2024-01-01 10:00:30"), ColumnType::DateTime);
        assert_eq!(classify_value("2024-01-01T10:00:00Z"), ColumnType::DateTime);
        assert_eq!(classify_value("2024-01-01"), ColumnType::Date);
        assert_eq!(classify_value("March 5, 2024"), ColumnType::Date);
        assert_eq!(classify_value("42"), ColumnType::Number);
        assert_eq!(classify_value("-3.5e2"), ColumnType::Number);
        assert_eq!(classify_value("a@b.com"), ColumnType::Email);
        assert_eq!(classify_value("hello world"), ColumnType::Text);
        assert_eq!(classify_value(""), ColumnType::Text);
    }

    #[test]
    fn non_finite_numbers_are_text() {
        assert!(!is_number("inf"));
        assert!(!is_number("NaN"));
        assert!(!is_number(""));
        assert!(is_number(" 7 "));
    }

    #[test]
    fn email_requires_domain_dot() {
        assert!(is_email("someone@example.org"));
        assert!(!is_email("someone@localhost"));
        assert!(!is_email("some one@example.org"));
    }

    #[test]
    fn datetime_wins_ties_by_precedence() {
        let grid = single_column(&[
            "2024-01-01T10:00",
            "2024-01-01",
            "42",
            "a@b.com",
            "hello world",
        ]);
        assert_eq!(
            ColumnTypeClassifier::default().classify(&grid, 0),
            ColumnType::DateTime
        );
    }

    #[test]
    fn majority_beats_precedence() {
        let grid = single_column(&["1", "2", "3", "2024-01-01"]);
        assert_eq!(
            ColumnTypeClassifier::default().classify(&grid, 0),
            ColumnType::Number
        );
    }

    #[test]
    fn empty_column_is_text() {
        let grid = single_column(&[]);
        assert_eq!(
            ColumnTypeClassifier::default().classify(&grid, 0),
            ColumnType::Text
        );
    }

    #[test]
    fn samples_at_most_limit_rows() {
        let mut values = vec!["x"; 10];
        values.extend(vec!["1"; 15]);
        let grid = single_column(&values);
        assert_eq!(ColumnTypeClassifier::default().sample_size(&grid), 10);
        assert_eq!(
            ColumnTypeClassifier::default().classify(&grid, 0),
            ColumnType::Text
        );
        assert_eq!(ColumnTypeClassifier::new(25).classify(&grid, 0), ColumnType::Number);
    }

    #[test]
    fn fractional_sample_size_rounds_up_and_skips_missing_cells() {
        let grid = Grid::new(vec![Header::new("A"), Header::new("B")])
            .rows(vec![vec!["1", "x"], vec!["2", "y"], vec!["3"]]);
        // 5 cells / 2 columns = 2.5 rows
        assert_eq!(ColumnTypeClassifier::default().sample_size(&grid), 3);
        let classifier = ColumnTypeClassifier::default();
        assert_eq!(classifier.classify(&grid, 0), ColumnType::Number);
        assert_eq!(classifier.classify(&grid, 1), ColumnType::Text);
    }
}
