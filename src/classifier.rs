//! Figure-label classification heuristics.
//!
//! A label is judged bad when it has no or almost no embedded text, when
//! all of its text hugs the top or bottom border (a caption artifact
//! bleeding into the figure), or when text covers most of the figure.
//! The rules run in a fixed order and the first match wins.

use tracing::debug;

use crate::geometry::BBox;
use crate::record::{FigureRecord, TextBox};

/// Thresholds for the classification rules.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Fraction of the figure height treated as the top/bottom border strip.
    pub border_fraction: f64,
    /// Bad when summed text area exceeds this fraction of the figure area.
    pub max_text_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            border_fraction: 0.05,
            max_text_ratio: 0.5,
        }
    }
}

/// Why a label was judged bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadLabelReason {
    /// No text boxes at all.
    NoText,
    /// A single text box, typically a stray caption fragment.
    SingleText,
    /// Every text box sits in the top or bottom border strip.
    TextOnlyInBorder,
    /// Summed text area exceeds the configured share of the figure.
    MostlyText,
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Bad(BadLabelReason),
}

impl Verdict {
    pub fn is_bad(&self) -> bool {
        matches!(self, Verdict::Bad(_))
    }
}

/// Classify a record with the default thresholds.
pub fn check(record: &FigureRecord) -> Verdict {
    check_with_config(record, &ClassifierConfig::default())
}

/// Classify a record.
///
/// Rules are evaluated in order and the first match decides the verdict.
/// Pure and reentrant; the same record always yields the same verdict.
pub fn check_with_config(record: &FigureRecord, config: &ClassifierConfig) -> Verdict {
    let texts = &record.image_text;

    if texts.is_empty() {
        debug!("no text");
        return Verdict::Bad(BadLabelReason::NoText);
    }

    if texts.len() == 1 {
        debug!("one text label");
        return Verdict::Bad(BadLabelReason::SingleText);
    }

    if all_in_border(&record.image_bb, texts, config.border_fraction) {
        debug!("all text in top or bottom border");
        return Verdict::Bad(BadLabelReason::TextOnlyInBorder);
    }

    // Crude coverage estimate: plain sum of box areas, overlapping boxes
    // double-counted. Must stay a sum, not a union of rectangles.
    if is_sum_larger(record.image_bb.area() * config.max_text_ratio, texts) {
        debug!("text covers most of the image");
        return Verdict::Bad(BadLabelReason::MostlyText);
    }

    Verdict::Good
}

/// True when no text box sits clear of both border strips.
///
/// The figure box is shrunk by `border_fraction` of its height, once from
/// the top and once from the bottom. A text box strictly inside the
/// top-shrunk region is clear of the top strip, likewise for the bottom;
/// seeing both proves some text sits away from each border and the scan
/// exits early with `false`. Containment is strict, so a box touching the
/// shrunk edge still counts as border text.
///
/// A single mid-figure box is clear of both strips at once and yields
/// `false`; [`check_with_config`] never reaches this predicate with fewer
/// than two boxes, rules 1 and 2 reject those records first.
pub fn all_in_border(bounds: &BBox, texts: &[TextBox], border_fraction: f64) -> bool {
    let margin = bounds.height() * border_fraction;

    let not_top_border = BBox::new(bounds.x0, bounds.y0 + margin, bounds.x1, bounds.y1);
    let not_bottom_border = BBox::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1 - margin);

    let mut clear_of_top = false;
    let mut clear_of_bottom = false;

    for text in texts {
        if text.text_bb.is_inside(&not_top_border) {
            clear_of_top = true;
        }
        if text.text_bb.is_inside(&not_bottom_border) {
            clear_of_bottom = true;
        }
        if clear_of_top && clear_of_bottom {
            return false;
        }
    }

    true
}

/// True when the areas of `texts`, summed in input order, exceed `max_area`.
///
/// Short-circuits at the first crossing. A sum exactly equal to
/// `max_area` is not larger.
pub fn is_sum_larger(max_area: f64, texts: &[TextBox]) -> bool {
    let mut sum_so_far = 0.0;
    for text in texts {
        sum_so_far += text.text_bb.area();
        if sum_so_far > max_area {
            return true;
        }
    }
    false
}
