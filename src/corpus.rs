//! Corpus iteration over figure-label records.
//!
//! Two sources are supported: a flat local directory of `.json` files and
//! an S3 bucket prefix. Scanning is sequential; a bucket scan can be
//! split across independent processes with a [`Shard`], where instance
//! `chunk` of `of` owns every key whose listing index satisfies
//! `index % of == chunk`. Instances share nothing, their stdout streams
//! merge by concatenation.

use std::fs;
use std::path::Path;
use std::time::Instant;

use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{error, info, warn};

use crate::classifier::{check, Verdict};
use crate::figure_id::figure_id;
use crate::record::FigureRecord;
use crate::RaterError;

/// Modulo split of a corpus across independent scanner instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    /// Which slice this instance owns.
    pub chunk: usize,
    /// Total number of slices.
    pub of: usize,
}

impl Default for Shard {
    fn default() -> Self {
        Self { chunk: 0, of: 1 }
    }
}

impl Shard {
    pub fn new(chunk: usize, of: usize) -> Self {
        Self { chunk, of }
    }

    /// True when this instance owns the entry at `index`.
    pub fn owns(&self, index: usize) -> bool {
        index % self.of == self.chunk
    }
}

/// Object-store access configuration.
///
/// Passed into [`scan_bucket`] explicitly; there is no process-wide
/// credential state.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl StoreConfig {
    /// Read credentials and region from the environment.
    ///
    /// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` are required,
    /// `AWS_REGION` defaults to `us-east-1`, `AWS_ENDPOINT_URL` selects an
    /// S3-compatible endpoint.
    pub fn from_env() -> Result<Self, RaterError> {
        let access_key = std::env::var("AWS_ACCESS_KEY_ID").map_err(|_| {
            RaterError::SourceUnavailable("AWS_ACCESS_KEY_ID is not set".to_string())
        })?;
        let secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").map_err(|_| {
            RaterError::SourceUnavailable("AWS_SECRET_ACCESS_KEY is not set".to_string())
        })?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let endpoint = std::env::var("AWS_ENDPOINT_URL").ok();

        Ok(Self {
            access_key,
            secret_key,
            region,
            endpoint,
        })
    }

    fn region(&self) -> Region {
        match &self.endpoint {
            Some(endpoint) => Region::Custom {
                region: self.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => self.region.parse().unwrap_or(Region::UsEast1),
        }
    }
}

/// Counters from one corpus scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records parsed and classified.
    pub records: usize,
    /// Records judged bad.
    pub bad: usize,
    /// Entries skipped over (unsupported, unreadable or malformed).
    pub skipped: usize,
}

/// Classify a single record file.
///
/// Backs the `check` CLI command; unlike the scanners, problems are
/// surfaced to the caller instead of being logged and skipped.
pub fn check_file<P: AsRef<Path>>(path: P) -> Result<Verdict, RaterError> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(RaterError::UnsupportedEntry(format!(
            "not a json file: {}",
            path.display()
        )));
    }
    let json = fs::read_to_string(path)?;
    classify_text(&json)
}

/// Scan a local directory of per-figure JSON records.
///
/// Calls `emit` with the figure identifier of every bad record whose file
/// name carries one. Subdirectories and entries without a `.json`
/// extension are skipped; a record that cannot be read or parsed is
/// logged and skipped. A directory that cannot be listed is fatal.
pub fn scan_local_dir<P: AsRef<Path>>(
    dir: P,
    emit: &mut dyn FnMut(&str),
) -> Result<ScanSummary, RaterError> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        RaterError::SourceUnavailable(format!("cannot list {}: {}", dir.display(), e))
    })?;

    let mut summary = ScanSummary::default();

    for entry in entries {
        let entry = entry.map_err(|e| {
            RaterError::SourceUnavailable(format!("cannot list {}: {}", dir.display(), e))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                warn!("skipping unreadable record {}: {}", path.display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        match classify_text(&json) {
            Ok(verdict) => {
                summary.records += 1;
                if verdict.is_bad() {
                    summary.bad += 1;
                    let name = entry.file_name();
                    if let Some(id) = figure_id(&name.to_string_lossy()) {
                        emit(id);
                    }
                }
            }
            Err(e) => {
                warn!("skipping malformed record {}: {}", path.display(), e);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Scan the records under `prefix` in an S3 bucket.
///
/// Keys are enumerated in listing order and `shard` selects the slice of
/// the key stream this instance owns; indices count every listed key,
/// including the prefix marker and non-JSON keys. The prefix marker key
/// itself is ignored, any other non-JSON key is reported as an error and
/// skipped, and a record that cannot be fetched or parsed is logged and
/// skipped. A listing failure is fatal.
pub fn scan_bucket(
    config: &StoreConfig,
    bucket_name: &str,
    prefix: &str,
    shard: Shard,
    emit: &mut dyn FnMut(&str),
) -> Result<ScanSummary, RaterError> {
    let credentials = Credentials::new(
        Some(&config.access_key),
        Some(&config.secret_key),
        None,
        None,
        None,
    )
    .map_err(|e| RaterError::SourceUnavailable(format!("bad credentials: {e}")))?;
    let bucket = Bucket::new(bucket_name, config.region(), credentials)?;

    info!(
        "run {} of {} over s3://{}/{}",
        shard.chunk, shard.of, bucket_name, prefix
    );

    let start = Instant::now();
    let mut summary = ScanSummary::default();
    let mut index = 0usize;

    let pages = bucket.list(prefix.to_string(), None)?;

    for page in &pages {
        for object in &page.contents {
            let key = object.key.as_str();

            if index % 1000 == 0 {
                info!(
                    "processing key {} after {:.0} seconds",
                    index,
                    start.elapsed().as_secs_f64()
                );
            }

            let owned = shard.owns(index);
            index += 1;
            if !owned {
                continue;
            }

            // The listing reports the prefix "directory" itself as a key.
            if key.trim_matches('/') == prefix.trim_matches('/') {
                continue;
            }

            if Path::new(key).extension().and_then(|e| e.to_str()) != Some("json") {
                error!("not a json key: {}", key);
                summary.skipped += 1;
                continue;
            }

            let response = match bucket.get_object(key) {
                Ok(response) => response,
                Err(e) => {
                    warn!("skipping unreadable object {}: {}", key, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let json = match response.as_str() {
                Ok(json) => json,
                Err(e) => {
                    warn!("skipping non-utf8 object {}: {}", key, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            match classify_text(json) {
                Ok(verdict) => {
                    summary.records += 1;
                    if verdict.is_bad() {
                        summary.bad += 1;
                        if let Some(id) = figure_id(basename(key)) {
                            emit(id);
                        }
                    }
                }
                Err(e) => {
                    warn!("skipping malformed record {}: {}", key, e);
                    summary.skipped += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn classify_text(json: &str) -> Result<Verdict, RaterError> {
    let record = FigureRecord::from_json(json)?;
    Ok(check(&record))
}

fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
