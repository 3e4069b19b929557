//! Figure-label quality rating over PDF figure-extraction corpora
//!
//! This crate provides:
//! - A pure heuristic classifier judging figure-label records good or bad
//! - Figure identifier extraction from record file names
//! - Sequential corpus scanning over a local directory or an S3 bucket prefix
//!
//! A record is a per-figure JSON document carrying the figure's bounding
//! box and the text boxes embedded in it. The classifier applies four
//! ordered rules (no text, single text, text confined to the top/bottom
//! border, text covering most of the figure); the scanners print the
//! figure identifier of every record judged bad.

pub mod classifier;
pub mod corpus;
pub mod figure_id;
pub mod geometry;
pub mod record;

pub use classifier::{
    all_in_border, check, check_with_config, is_sum_larger, BadLabelReason, ClassifierConfig,
    Verdict,
};
pub use corpus::{check_file, scan_bucket, scan_local_dir, ScanSummary, Shard, StoreConfig};
pub use figure_id::figure_id;
pub use geometry::BBox;
pub use record::{FigureRecord, TextBox};

#[derive(Debug, thiserror::Error)]
pub enum RaterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("unsupported corpus entry: {0}")]
    UnsupportedEntry(String),
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
}

impl From<serde_json::Error> for RaterError {
    fn from(e: serde_json::Error) -> Self {
        RaterError::MalformedRecord(e.to_string())
    }
}

impl From<s3::error::S3Error> for RaterError {
    fn from(e: s3::error::S3Error) -> Self {
        RaterError::SourceUnavailable(e.to_string())
    }
}
