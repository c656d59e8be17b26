//! Fixture seeding - materializes manifest entries from a template file
//!
//! Each asset is produced by copying one template media file to its
//! manifest path under the root folder, optionally stamping the copy's own
//! path into its EXIF `UserComment`.

use crate::errors::{FixtureError, Result};
use crate::exif_comment::add_exif_comment;
use crate::manifest::{self, clean_relative};
use crate::yielder::MediaFile;
use log::debug;
use std::fs;
use std::path::Path;

/// Create one media file at `root_folder/relative_file_path` by copying the
/// template, stamping the copy when `annotate` is set.
pub fn yield_local_media_file(
    root_folder: impl AsRef<Path>,
    relative_file_path: &str,
    template_media_file_path: impl AsRef<Path>,
    annotate: bool,
) -> Result<MediaFile> {
    let root = root_folder.as_ref();
    let template = template_media_file_path.as_ref();

    let rel_path = clean_relative(relative_file_path)
        .map_err(|message| FixtureError::parse(root, message))?;
    let abs_path = root.join(&rel_path);

    if let Some(parent) = abs_path.parent() {
        fs::create_dir_all(parent).map_err(|e| FixtureError::io(parent, e))?;
    }
    fs::copy(template, &abs_path).map_err(|e| FixtureError::io(template, e))?;
    debug!("seeded {:?} from template {:?}", abs_path, template);

    if annotate {
        add_exif_comment(&abs_path)?;
    }

    Ok(MediaFile { rel_path, abs_path })
}

/// Seed every manifest row under `root_folder` from one template.
///
/// Seeding is setup, not enumeration: the first failure aborts, a
/// half-built fixture tree is useless for a test run.
pub fn seed_from_config(
    config_file_path: impl AsRef<Path>,
    root_folder: impl AsRef<Path>,
    template_media_file_path: impl AsRef<Path>,
    annotate: bool,
) -> Result<Vec<MediaFile>> {
    let records = manifest::read_config_eager(config_file_path)?;
    let mut seeded = Vec::with_capacity(records.len());
    for record in &records {
        seeded.push(yield_local_media_file(
            root_folder.as_ref(),
            &record.asset_rel_path,
            template_media_file_path.as_ref(),
            annotate,
        )?);
    }
    Ok(seeded)
}
