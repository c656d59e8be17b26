//! File yielding - resolves manifest rows against a root folder
//!
//! The manifest is parsed up front so config-level errors abort before any
//! file is yielded; after that, files are resolved lazily in row order.
//! A missing file on disk is a per-file condition: it is skipped with one
//! INFO log and never aborts the rest of the enumeration.

use crate::errors::{FixtureError, Result};
use crate::exif_comment::add_exif_comment;
use crate::manifest::{self, ManifestRecord};
use crate::utils::PathExt;
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A resolved media file under the root folder.
///
/// Constructed per yield; each one corresponds to exactly one manifest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub rel_path: PathBuf,
    pub abs_path: PathBuf,
}

/// Lazy sequence of resolved `MediaFile`s in manifest row order
#[derive(Debug)]
pub struct MediaFileIter {
    pending: std::vec::IntoIter<MediaFile>,
    annotate: bool,
}

impl MediaFileIter {
    /// Stamp the EXIF comment onto each file before yielding it
    pub fn annotated(mut self) -> Self {
        self.annotate = true;
        self
    }
}

impl Iterator for MediaFileIter {
    type Item = MediaFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let media = self.pending.next()?;
            if !media.abs_path.is_file() {
                info!("skipping missing media file {:?}", media.abs_path);
                continue;
            }
            if self.annotate {
                if let Err(e) = add_exif_comment(&media.abs_path) {
                    warn!("skipping {:?}: annotation failed: {}", media.abs_path, e);
                    continue;
                }
            }
            return Some(media);
        }
    }
}

/// Enumerate the media files a manifest describes under `root_folder`.
///
/// Config-level failures (`ConfigNotFound`, `ConfigParse`) return an error
/// here; the returned iterator itself never fails, it only skips.
pub fn yield_files_from_config(
    config_file_path: impl AsRef<Path>,
    root_folder: impl AsRef<Path>,
) -> Result<MediaFileIter> {
    let config = config_file_path.as_ref();
    let root = root_folder.as_ref();

    let records = manifest::read_config_eager(config)?;
    let mut pending = Vec::with_capacity(records.len());
    for record in &records {
        pending.push(resolve(config, root, record)?);
    }

    Ok(MediaFileIter {
        pending: pending.into_iter(),
        annotate: false,
    })
}

fn resolve(config: &Path, root: &Path, record: &ManifestRecord) -> Result<MediaFile> {
    let rel_path = record
        .rel_path()
        .map_err(|message| FixtureError::parse(config, message))?;
    let abs_path = root.join(&rel_path);
    Ok(MediaFile { rel_path, abs_path })
}

/// Walk `root` recursively and report media files absent from the manifest.
///
/// Non-media files (manifests, sidecars) are ignored. Unreadable directory
/// entries are skipped rather than treated as fatal.
pub fn scan_unlisted(root_folder: impl AsRef<Path>, listed: &[MediaFile]) -> Vec<PathBuf> {
    let root = root_folder.as_ref();
    let known: HashSet<&Path> = listed.iter().map(|m| m.rel_path.as_path()).collect();

    let mut unlisted = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || !path.is_media_file() {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        if !known.contains(rel) {
            unlisted.push(rel.to_path_buf());
        }
    }
    unlisted.sort();
    unlisted
}
