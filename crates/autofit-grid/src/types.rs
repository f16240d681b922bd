//! Core types for grid sizing configuration.
//!
//! This module defines the data structures that drive width resolution:
//! semantic column types, the wrap-ratio table, per-column overrides,
//! visual parameters handed to the text measurer, and the sizing config.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Semantic type of a column's content.
///
/// The type selects the wrap ratio and decides whether the column is
/// forced onto a single line.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text. The only type the fit adjuster may shrink.
    #[default]
    Text,
    /// Numeric literal.
    Number,
    /// Calendar date without a time component.
    Date,
    /// Date with a time component.
    DateTime,
    /// Email address.
    Email,
}

impl ColumnType {
    /// Classification precedence, strongest first.
    pub const PRECEDENCE: [ColumnType; 5] = [
        ColumnType::DateTime,
        ColumnType::Date,
        ColumnType::Number,
        ColumnType::Email,
        ColumnType::Text,
    ];

    /// The lowercase name used in attributes and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Email => "email",
        }
    }

    /// Structured values are never wrapped on purpose.
    pub fn forces_single_line(self) -> bool {
        matches!(
            self,
            ColumnType::Number | ColumnType::Date | ColumnType::DateTime
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "datetime" => Ok(ColumnType::DateTime),
            "email" => Ok(ColumnType::Email),
            other => Err(format!(
                "Invalid column type: '{}'. Expected text, number, date, datetime or email.",
                other
            )),
        }
    }
}

/// Per-type wrap-ratio thresholds.
///
/// A wrap ratio is the minimum rendered `width / height` a text box must
/// reach before its width is accepted. Higher ratios favour wider columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapRatios {
    pub text: f64,
    pub date: f64,
    pub datetime: f64,
    pub number: f64,
    pub email: f64,
}

impl Default for WrapRatios {
    fn default() -> Self {
        WrapRatios {
            text: 4.5,
            date: 8.0,
            datetime: 7.0,
            number: 7.0,
            email: 12.0,
        }
    }
}

impl WrapRatios {
    /// Look up the ratio for a column type.
    pub fn get(&self, column_type: ColumnType) -> f64 {
        match column_type {
            ColumnType::Text => self.text,
            ColumnType::Date => self.date,
            ColumnType::DateTime => self.datetime,
            ColumnType::Number => self.number,
            ColumnType::Email => self.email,
        }
    }

    /// Replace the ratio for one type. Non-positive or non-finite ratios
    /// are ignored and the current value is kept.
    pub fn set(&mut self, column_type: ColumnType, ratio: f64) {
        if !is_positive(ratio) {
            return;
        }
        let slot = match column_type {
            ColumnType::Text => &mut self.text,
            ColumnType::Date => &mut self.date,
            ColumnType::DateTime => &mut self.datetime,
            ColumnType::Number => &mut self.number,
            ColumnType::Email => &mut self.email,
        };
        *slot = ratio;
    }

    /// Builder form of [`WrapRatios::set`].
    pub fn with(mut self, column_type: ColumnType, ratio: f64) -> Self {
        self.set(column_type, ratio);
        self
    }

    /// Merge a partial mapping over the current ratios.
    pub fn merge<'a>(&mut self, overrides: impl IntoIterator<Item = (&'a ColumnType, &'a f64)>) {
        for (column_type, ratio) in overrides {
            self.set(*column_type, *ratio);
        }
    }
}

/// Declared overrides for a single column.
///
/// Overrides come from whatever declarative source the host has: a typed
/// struct, JSON/YAML, or markup attributes via
/// [`ColumnOverrides::from_attributes`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    /// Exact width in px. Bypasses measurement, distribution and adjustment.
    pub fixed_width: Option<f64>,
    /// Explicit type. When absent the type is detected from cell samples.
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    /// Wrap ratio used instead of the table entry for the column type.
    pub wrap_ratio: Option<f64>,
    /// Minimum width in px used instead of the configured default.
    pub min_width: Option<f64>,
    /// Receive spare space before all other columns.
    pub prioritize_spare_space: bool,
    /// Name of the header group this column belongs to.
    pub group: Option<String>,
}

/// Attribute names understood by [`ColumnOverrides::from_attributes`].
pub mod attr {
    pub const FIXED_WIDTH: &str = "data-fixed-width";
    pub const TYPE: &str = "data-type";
    pub const WRAP_RATIO: &str = "data-wrap-ratio";
    pub const MIN_WIDTH: &str = "data-min-width";
    pub const PRIORITIZE_SPARE_SPACE: &str = "data-prioritize-spare-space";
    pub const GROUP: &str = "data-for";
}

impl ColumnOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from declarative attribute pairs.
    ///
    /// Numbers are read with a leading-prefix parse, so `"120px"` yields
    /// `120`. Values that do not parse are ignored rather than rejected,
    /// and unknown attribute names are skipped.
    ///
    /// ```rust
    /// use autofit_grid::{ColumnOverrides, ColumnType};
    ///
    /// let overrides = ColumnOverrides::from_attributes([
    ///     ("data-fixed-width", "120px"),
    ///     ("data-type", "number"),
    ///     ("data-min-width", "wide"),
    /// ]);
    /// assert_eq!(overrides.fixed_width, Some(120.0));
    /// assert_eq!(overrides.column_type, Some(ColumnType::Number));
    /// assert_eq!(overrides.min_width, None);
    /// ```
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = ColumnOverrides::default();
        for (key, value) in attributes {
            let value = value.as_ref();
            match key.as_ref() {
                attr::FIXED_WIDTH => {
                    overrides.fixed_width = parse_leading_float(value).filter(|w| *w >= 0.0)
                }
                attr::TYPE => overrides.column_type = value.parse().ok(),
                attr::WRAP_RATIO => {
                    overrides.wrap_ratio = parse_leading_float(value).filter(|r| is_positive(*r))
                }
                attr::MIN_WIDTH => {
                    overrides.min_width = parse_leading_float(value).filter(|w| *w >= 0.0)
                }
                attr::PRIORITIZE_SPARE_SPACE => {
                    overrides.prioritize_spare_space = value.trim() == "true"
                }
                attr::GROUP => {
                    let name = value.trim();
                    overrides.group = (!name.is_empty()).then(|| name.to_string());
                }
                _ => {}
            }
        }
        overrides
    }

    /// Set a fixed width.
    pub fn fixed_width(mut self, width: f64) -> Self {
        self.fixed_width = Some(width);
        self
    }

    /// Declare the column type.
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Set a custom wrap ratio.
    pub fn wrap_ratio(mut self, ratio: f64) -> Self {
        self.wrap_ratio = Some(ratio);
        self
    }

    /// Set a custom minimum width.
    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Give this column first claim on spare space.
    pub fn prioritize_spare_space(mut self) -> Self {
        self.prioritize_spare_space = true;
        self
    }

    /// Place the column in a header group.
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.group = Some(name.into());
        self
    }

    /// The fixed width, if one was declared and is usable.
    pub fn effective_fixed_width(&self) -> Option<f64> {
        self.fixed_width.filter(|w| w.is_finite() && *w >= 0.0)
    }
}

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
});

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
pub(crate) fn parse_leading_float(s: &str) -> Option<f64> {
    let m = LEADING_FLOAT.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Font and box-model parameters for measuring a piece of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualParams {
    pub font_family: String,
    /// Font size in px.
    pub font_size: f64,
    pub font_weight: u16,
    pub padding_left: f64,
    pub padding_right: f64,
    pub border_left: f64,
    pub border_right: f64,
}

impl Default for VisualParams {
    fn default() -> Self {
        VisualParams {
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            font_weight: 400,
            padding_left: 0.0,
            padding_right: 0.0,
            border_left: 0.0,
            border_right: 0.0,
        }
    }
}

impl VisualParams {
    /// Create parameters for a font size with no padding or border.
    pub fn new(font_size: f64) -> Self {
        VisualParams {
            font_size,
            ..Default::default()
        }
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn font_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    /// Symmetric horizontal padding.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_left = padding;
        self.padding_right = padding;
        self
    }

    /// Symmetric horizontal border width.
    pub fn border(mut self, border: f64) -> Self {
        self.border_left = border;
        self.border_right = border;
        self
    }

    /// Horizontal padding plus border.
    pub fn horizontal_extent(&self) -> f64 {
        self.padding_left + self.padding_right + self.border_left + self.border_right
    }
}

/// Horizontal box metrics of a container or header group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxMetrics {
    pub padding_left: f64,
    pub padding_right: f64,
    pub border_left: f64,
    pub border_right: f64,
    /// Gap between adjacent tracks.
    pub gap: f64,
}

impl BoxMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_left = padding;
        self.padding_right = padding;
        self
    }

    pub fn border(mut self, border: f64) -> Self {
        self.border_left = border;
        self.border_right = border;
        self
    }

    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Horizontal padding plus border, excluding gaps.
    pub fn horizontal(&self) -> f64 {
        self.padding_left + self.padding_right + self.border_left + self.border_right
    }
}

/// The element whose width is shared among the columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Outer width in px, including padding and border.
    pub width: f64,
}

impl Container {
    pub fn new(width: f64) -> Self {
        Container { width }
    }
}

/// Options that shape every sizing pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizingConfigRaw", into = "SizingConfigRaw")]
pub struct SizingConfig {
    /// Grow columns into leftover container space.
    pub distribute_remaining_space: bool,
    /// Emit trace lines for every decision.
    pub show_debug: bool,
    /// Overflow in px below which shrinking is attempted.
    pub adjustment_threshold: f64,
    pub wrap_ratios: WrapRatios,
    pub default_min_width: f64,
    /// Upper clamp for measured widths. Unbounded by default.
    pub default_max_width: f64,
    /// Increment in px used when searching for an optimal width.
    pub width_step: f64,
    /// Quiet period before a resize triggers a pass.
    pub debounce_ms: u64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            distribute_remaining_space: true,
            show_debug: false,
            adjustment_threshold: 200.0,
            wrap_ratios: WrapRatios::default(),
            default_min_width: 50.0,
            default_max_width: f64::INFINITY,
            width_step: 10.0,
            debounce_ms: 100,
        }
    }
}

impl SizingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from YAML. Missing keys take their defaults.
    ///
    /// ```rust
    /// use autofit_grid::{ColumnType, SizingConfig};
    ///
    /// let config = SizingConfig::from_yaml(r#"
    /// adjustment_threshold: 120
    /// wrap_ratios:
    ///   text: 3.0
    /// "#).unwrap();
    /// assert_eq!(config.adjustment_threshold, 120.0);
    /// assert_eq!(config.wrap_ratios.get(ColumnType::Text), 3.0);
    /// assert_eq!(config.wrap_ratios.get(ColumnType::Email), 12.0);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn distribute_remaining_space(mut self, enabled: bool) -> Self {
        self.distribute_remaining_space = enabled;
        self
    }

    pub fn show_debug(mut self, enabled: bool) -> Self {
        self.show_debug = enabled;
        self
    }

    pub fn adjustment_threshold(mut self, threshold: f64) -> Self {
        self.adjustment_threshold = threshold;
        self
    }

    pub fn wrap_ratio(mut self, column_type: ColumnType, ratio: f64) -> Self {
        self.wrap_ratios.set(column_type, ratio);
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.default_min_width = width;
        self
    }

    pub fn max_width(mut self, width: f64) -> Self {
        self.default_max_width = width;
        self
    }

    pub fn width_step(mut self, step: f64) -> Self {
        self.width_step = step;
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Minimum width for a column: its declared minimum, else the default.
    pub fn min_width_for(&self, overrides: &ColumnOverrides) -> f64 {
        overrides
            .min_width
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(self.default_min_width)
    }

    /// Wrap ratio for a column: its custom ratio, else the table entry.
    pub fn wrap_ratio_for(&self, overrides: &ColumnOverrides, column_type: ColumnType) -> f64 {
        overrides
            .wrap_ratio
            .filter(|r| is_positive(*r))
            .unwrap_or_else(|| self.wrap_ratios.get(column_type))
    }

    /// Clamp a width into `[min, default_max_width]`.
    pub fn clamp_width(&self, width: f64, min: f64) -> f64 {
        width.max(min).min(self.default_max_width)
    }

    /// Reject values no sizing pass can work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_min_width.is_nan() || self.default_min_width < 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "default_min_width must be a non-negative number, got {}",
                self.default_min_width
            )));
        }
        if self.default_max_width.is_nan() || self.default_max_width < self.default_min_width {
            return Err(GridError::InvalidConfig(format!(
                "default_max_width ({}) must not be below default_min_width ({})",
                self.default_max_width, self.default_min_width
            )));
        }
        if !is_positive(self.width_step) {
            return Err(GridError::InvalidConfig(format!(
                "width_step must be positive, got {}",
                self.width_step
            )));
        }
        Ok(())
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct SizingConfigRaw {
    #[serde(skip_serializing_if = "Option::is_none")]
    distribute_remaining_space: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjustment_threshold: Option<f64>,
    wrap_ratios: BTreeMap<ColumnType, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debounce_ms: Option<u64>,
}

impl From<SizingConfigRaw> for SizingConfig {
    fn from(raw: SizingConfigRaw) -> Self {
        let defaults = SizingConfig::default();
        let mut wrap_ratios = defaults.wrap_ratios;
        wrap_ratios.merge(&raw.wrap_ratios);
        SizingConfig {
            distribute_remaining_space: raw
                .distribute_remaining_space
                .unwrap_or(defaults.distribute_remaining_space),
            show_debug: raw.show_debug.unwrap_or(defaults.show_debug),
            adjustment_threshold: raw
                .adjustment_threshold
                .filter(|v| is_positive(*v))
                .unwrap_or(defaults.adjustment_threshold),
            wrap_ratios,
            default_min_width: raw
                .default_min_width
                .filter(|v| is_positive(*v))
                .unwrap_or(defaults.default_min_width),
            default_max_width: raw
                .default_max_width
                .filter(|v| is_positive(*v))
                .unwrap_or(defaults.default_max_width),
            width_step: raw
                .width_step
                .filter(|v| is_positive(*v))
                .unwrap_or(defaults.width_step),
            debounce_ms: raw.debounce_ms.unwrap_or(defaults.debounce_ms),
        }
    }
}

impl From<SizingConfig> for SizingConfigRaw {
    fn from(config: SizingConfig) -> Self {
        let ratios = config.wrap_ratios;
        SizingConfigRaw {
            distribute_remaining_space: Some(config.distribute_remaining_space),
            show_debug: Some(config.show_debug),
            adjustment_threshold: Some(config.adjustment_threshold),
            wrap_ratios: ColumnType::PRECEDENCE
                .iter()
                .map(|t| (*t, ratios.get(*t)))
                .collect(),
            default_min_width: Some(config.default_min_width),
            default_max_width: config
                .default_max_width
                .is_finite()
                .then_some(config.default_max_width),
            width_step: Some(config.width_step),
            debounce_ms: Some(config.debounce_ms),
        }
    }
}
