//! mediaseed - CSV-manifest media fixture tooling for sync test runs
//!
//! Reads a CSV manifest of expected media assets, enumerates the matching
//! files under a root folder in row order, and can seed the fixture tree
//! from a template file, stamp EXIF `UserComment` annotations, and verify
//! that every enumerated file shares one content digest.

pub mod common;
pub mod digest;
pub mod errors;
pub mod exif_comment;
pub mod fixture;
pub mod manifest;
pub mod settings;
pub mod utils;
pub mod yielder;

pub use digest::{DigestReport, digest_file, verify_uniform_digest};
pub use errors::{FixtureError, Result};
pub use exif_comment::{add_exif_comment, read_user_comment};
pub use fixture::{seed_from_config, yield_local_media_file};
pub use manifest::{ManifestReader, ManifestRecord, read_config};
pub use settings::{Settings, init_logger};
pub use yielder::{MediaFile, MediaFileIter, scan_unlisted, yield_files_from_config};
