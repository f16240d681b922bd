//! Optimal width search for a single piece of text.
//!
//! The optimal width is the narrowest width, at or above a floor, at which
//! the wrapped text box is at least `wrap_ratio` times wider than it is
//! tall. Short labels and structured values skip the search and keep
//! their natural single-line width.

use crate::metrics::TextMetrics;
use crate::trace::{debug_line, Trace};
use crate::types::VisualParams;

/// Words in `text`, counting runs separated by single spaces.
///
/// Consecutive spaces produce empty words, and the empty string has one
/// word, so this is a cheap length heuristic rather than a tokenizer.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Texts with at most this many words are never wrapped on purpose.
pub const SHORT_TEXT_WORDS: usize = 2;

/// Search parameters shared by every text in a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimalWidthFinder {
    pub wrap_ratio: f64,
    pub min_width: f64,
    pub step: f64,
    pub force_single_line: bool,
}

impl OptimalWidthFinder {
    pub fn new(wrap_ratio: f64, min_width: f64) -> Self {
        OptimalWidthFinder {
            wrap_ratio,
            min_width,
            step: 10.0,
            force_single_line: false,
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn force_single_line(mut self, force: bool) -> Self {
        self.force_single_line = force;
        self
    }

    /// Find the optimal width of `text` in whole px.
    ///
    /// Starting at `min_width`, the width grows by `step` while it does not
    /// exceed the natural width. The first width whose rendered aspect
    /// ratio reaches `wrap_ratio` is returned. If none does, the last width
    /// tried is returned (`min_width` when the loop never runs).
    pub fn find(
        &self,
        metrics: &dyn TextMetrics,
        text: &str,
        params: &VisualParams,
        trace: &mut Trace,
    ) -> f64 {
        let words = word_count(text);
        let natural = metrics.natural_width(text, params);

        if words <= SHORT_TEXT_WORDS || self.force_single_line {
            debug_line!(
                trace,
                "\"{}\": {} word(s) or forced single line, natural width {}px, using {}px",
                text,
                words,
                natural,
                natural.ceil()
            );
            return natural.ceil();
        }

        debug_line!(trace, "\"{}\": natural width {}px", text, natural);

        let step = if self.step > 0.0 { self.step } else { 10.0 };
        let mut width = self.min_width;
        let mut last_tried = None;

        while width <= natural {
            let size = metrics.measure(text, params, Some(width));
            let ratio = size.aspect_ratio();
            debug_line!(
                trace,
                "width {}px, height {}px, ratio {}",
                width,
                size.height,
                ratio
            );
            if ratio >= self.wrap_ratio {
                debug_line!(trace, "ratio {} reached at {}px", self.wrap_ratio, width);
                return width.ceil();
            }
            last_tried = Some(width);
            width += step;
        }

        let best = last_tried.unwrap_or(self.min_width);
        debug_line!(
            trace,
            "ratio {} never reached, using {}px",
            self.wrap_ratio,
            best.ceil()
        );
        best.ceil()
    }
}
