//! Text measurement.
//!
//! Sizing never renders anything itself. It asks a [`TextMetrics`]
//! implementation how large a string would be under a set of
//! [`VisualParams`], optionally constrained to a width. Hosts plug in a
//! real layout engine; [`MonospaceMetrics`] is a pure geometric
//! approximation for headless targets and tests.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::types::VisualParams;

/// Rendered size of a text box in px.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    pub fn new(width: f64, height: f64) -> Self {
        TextSize { width, height }
    }

    /// `width / height`. Zero height yields infinity for non-empty widths.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Measures the rendered size of text.
///
/// `constrained_width` is the content width the text is laid out in; when
/// `None` the text is measured on its natural, unwrapped lines. The
/// returned width is the full box width, padding and border included.
///
/// Implementations are consulted synchronously and one request at a time.
pub trait TextMetrics {
    fn measure(&self, text: &str, params: &VisualParams, constrained_width: Option<f64>)
        -> TextSize;

    /// Natural single-line width of `text`.
    fn natural_width(&self, text: &str, params: &VisualParams) -> f64 {
        self.measure(text, params, None).width
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(
        &self,
        text: &str,
        params: &VisualParams,
        constrained_width: Option<f64>,
    ) -> TextSize {
        (**self).measure(text, params, constrained_width)
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for Box<T> {
    fn measure(
        &self,
        text: &str,
        params: &VisualParams,
        constrained_width: Option<f64>,
    ) -> TextSize {
        (**self).measure(text, params, constrained_width)
    }
}

/// Geometric text measurement for fixed-advance fonts.
///
/// Every display column (per Unicode width, so CJK counts double) advances
/// by `font_size * advance_ratio`, and each line is
/// `font_size * line_height_ratio` tall. Constrained text is word-wrapped
/// greedily; a word wider than the line overflows onto its own line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonospaceMetrics {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl MonospaceMetrics {
    pub fn new(advance_ratio: f64, line_height_ratio: f64) -> Self {
        MonospaceMetrics {
            advance_ratio,
            line_height_ratio,
        }
    }

    fn advance(&self, params: &VisualParams) -> f64 {
        params.font_size * self.advance_ratio
    }

    fn line_height(&self, params: &VisualParams) -> f64 {
        params.font_size * self.line_height_ratio
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(
        &self,
        text: &str,
        params: &VisualParams,
        constrained_width: Option<f64>,
    ) -> TextSize {
        let advance = self.advance(params);
        let extent = params.horizontal_extent();

        if text.is_empty() {
            return TextSize::new(constrained_width.unwrap_or(0.0) + extent, 0.0);
        }

        match constrained_width {
            None => {
                let longest = text.split('\n').map(|l| l.width()).max().unwrap_or(0);
                let lines = text.split('\n').count();
                TextSize::new(
                    longest as f64 * advance + extent,
                    lines as f64 * self.line_height(params),
                )
            }
            Some(width) => {
                let lines: usize = text
                    .split('\n')
                    .map(|paragraph| wrapped_line_count(paragraph, width, advance))
                    .sum();
                TextSize::new(width + extent, lines as f64 * self.line_height(params))
            }
        }
    }
}

/// Number of lines `paragraph` occupies when wrapped at `width` px.
fn wrapped_line_count(paragraph: &str, width: f64, advance: f64) -> usize {
    let mut lines = 1;
    let mut current = 0.0_f64;
    let mut line_started = false;

    for word in paragraph.split_whitespace() {
        let word_width = word.width() as f64 * advance;
        if !line_started {
            current = word_width;
            line_started = true;
        } else if current + advance + word_width <= width {
            current += advance + word_width;
        } else {
            lines += 1;
            current = word_width;
        }
    }

    lines
}
