//! Figure-label records parsed from per-figure JSON documents.
//!
//! Each record carries the full figure bounding box and the embedded text
//! boxes found inside it. Records are parsed once, classified, and
//! discarded; nothing is mutated after construction.

use serde::Deserialize;

use crate::geometry::BBox;
use crate::RaterError;

/// One embedded-text hit inside a figure.
///
/// The extraction pipeline writes more fields per hit (the text itself,
/// font info); only the bounding box matters here and everything else is
/// ignored on parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextBox {
    /// Bounding box of the text, in the same coordinate space as the figure.
    #[serde(rename = "TextBB")]
    pub text_bb: BBox,
}

/// A parsed figure-label record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FigureRecord {
    /// Full extent of the source figure.
    #[serde(rename = "ImageBB")]
    pub image_bb: BBox,
    /// Embedded text boxes in extraction order.
    #[serde(rename = "ImageText")]
    pub image_text: Vec<TextBox>,
}

impl FigureRecord {
    /// Parse a record from raw JSON text.
    ///
    /// Missing keys, non-numeric box components and syntax errors all
    /// surface as [`RaterError::MalformedRecord`]; a parse failure never
    /// turns into a verdict.
    pub fn from_json(json: &str) -> Result<Self, RaterError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record() {
        let json = r#"{
            "ImageBB": [0.0, 0.0, 100.0, 100.0],
            "ImageText": [
                {"TextBB": [10.0, 10.0, 20.0, 20.0]},
                {"TextBB": [30.0, 30.0, 40.0, 40.0]}
            ]
        }"#;
        let record = FigureRecord::from_json(json).unwrap();
        assert_eq!(record.image_bb, BBox::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(record.image_text.len(), 2);
        assert_eq!(record.image_text[1].text_bb.x0, 30.0);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"{
            "ImageBB": [0, 0, 50, 50],
            "ImageText": [
                {"TextBB": [1, 1, 2, 2], "Text": "caption", "Rotation": 0}
            ],
            "Caption": "Figure 1",
            "DPI": 300
        }"#;
        let record = FigureRecord::from_json(json).unwrap();
        assert_eq!(record.image_text.len(), 1);
    }

    #[test]
    fn test_parse_preserves_text_order() {
        let json = r#"{
            "ImageBB": [0, 0, 10, 10],
            "ImageText": [
                {"TextBB": [3, 3, 4, 4]},
                {"TextBB": [1, 1, 2, 2]}
            ]
        }"#;
        let record = FigureRecord::from_json(json).unwrap();
        assert_eq!(record.image_text[0].text_bb.x0, 3.0);
        assert_eq!(record.image_text[1].text_bb.x0, 1.0);
    }

    #[test]
    fn test_missing_image_text_is_malformed() {
        let err = FigureRecord::from_json(r#"{"ImageBB": [0, 0, 10, 10]}"#).unwrap_err();
        assert!(matches!(err, RaterError::MalformedRecord(_)));
    }

    #[test]
    fn test_missing_image_bb_is_malformed() {
        let err = FigureRecord::from_json(r#"{"ImageText": []}"#).unwrap_err();
        assert!(matches!(err, RaterError::MalformedRecord(_)));
    }

    #[test]
    fn test_non_numeric_box_is_malformed() {
        let json = r#"{"ImageBB": [0, 0, "wide", 10], "ImageText": []}"#;
        let err = FigureRecord::from_json(json).unwrap_err();
        assert!(matches!(err, RaterError::MalformedRecord(_)));
    }

    #[test]
    fn test_short_box_is_malformed() {
        let json = r#"{"ImageBB": [0, 0, 10], "ImageText": []}"#;
        let err = FigureRecord::from_json(json).unwrap_err();
        assert!(matches!(err, RaterError::MalformedRecord(_)));
    }

    #[test]
    fn test_invalid_syntax_is_malformed() {
        let err = FigureRecord::from_json("not json at all").unwrap_err();
        assert!(matches!(err, RaterError::MalformedRecord(_)));
    }
}
