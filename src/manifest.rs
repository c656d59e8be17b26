//! Manifest reading - parses the CSV test configuration
//!
//! A manifest is a CSV file with at least an `asset_rel_path` column. Row
//! order is meaningful: it determines the order files are later yielded in.

use crate::common::ASSET_PATH_FIELD;
use crate::errors::{FixtureError, Result};
use path_clean::PathClean;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

/// One row of the manifest. Extra CSV columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRecord {
    pub asset_rel_path: String,
}

impl ManifestRecord {
    /// Cleaned path of this asset relative to the root folder
    pub fn rel_path(&self) -> std::result::Result<PathBuf, String> {
        clean_relative(&self.asset_rel_path)
    }
}

/// Normalize a manifest path and reject entries that would resolve
/// outside the root folder.
pub fn clean_relative(raw: &str) -> std::result::Result<PathBuf, String> {
    if raw.trim().is_empty() {
        return Err("empty asset path".to_string());
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return Err(format!("absolute asset path: {}", raw));
    }
    let cleaned = path.clean();
    if cleaned.components().next() == Some(Component::ParentDir) {
        return Err(format!("asset path escapes the root folder: {}", raw));
    }
    Ok(cleaned)
}

/// Lazy, order-preserving iterator over manifest rows
pub struct ManifestReader {
    path: PathBuf,
    rows: csv::DeserializeRecordsIntoIter<File, ManifestRecord>,
}

impl ManifestReader {
    /// Path of the config file this reader was opened on
    pub fn config_path(&self) -> &Path {
        &self.path
    }
}

// the inner csv iterator carries no useful state to show
impl fmt::Debug for ManifestReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestReader")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Iterator for ManifestReader {
    type Item = Result<ManifestRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let item = row
            .map_err(|e| FixtureError::parse(&self.path, e.to_string()))
            .and_then(|record| match record.rel_path() {
                Ok(_) => Ok(record),
                Err(message) => Err(FixtureError::parse(&self.path, message)),
            });
        Some(item)
    }
}

/// Open a manifest and validate its header.
///
/// Fails with `ConfigNotFound` when the path does not exist and with
/// `ConfigParse` when the `asset_rel_path` column is missing. Row-level
/// problems surface while iterating.
pub fn read_config(config_file_path: impl AsRef<Path>) -> Result<ManifestReader> {
    let path = config_file_path.as_ref();
    if !path.is_file() {
        return Err(FixtureError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| FixtureError::parse(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| FixtureError::parse(path, e.to_string()))?;
    if !headers.iter().any(|h| h == ASSET_PATH_FIELD) {
        return Err(FixtureError::parse(
            path,
            format!("missing required column `{}`", ASSET_PATH_FIELD),
        ));
    }

    Ok(ManifestReader {
        path: path.to_path_buf(),
        rows: reader.into_deserialize(),
    })
}

/// Parse a whole manifest up front, preserving row order.
///
/// Used where schema errors must surface before any file is touched.
pub fn read_config_eager(config_file_path: impl AsRef<Path>) -> Result<Vec<ManifestRecord>> {
    read_config(config_file_path)?.collect()
}
