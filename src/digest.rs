//! Content digest verification
//!
//! The sync test fixtures are built from one template, so every enumerated
//! file is expected to carry the same fingerprint. This replaces the manual
//! `find . -type f -exec md5 {} \;` step the original test flow used.

use crate::errors::{FixtureError, Result};
use crate::yielder::MediaFile;
use arrayvec::ArrayString;
use blake3::Hasher;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Compute the Blake3 hash of a file in streaming chunks
pub fn digest_file(path: impl AsRef<Path>) -> Result<ArrayString<64>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| FixtureError::io(path, e))?;

    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 512 * 1024];
    loop {
        let n = file
            .read(&mut buffer)
            .map_err(|e| FixtureError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize().to_hex())
}

/// Outcome of a uniform-digest check over one enumeration
#[derive(Debug)]
pub struct DigestReport {
    /// Number of files digested
    pub files: usize,
    /// Digest of the first file, the expected value for all others
    pub digest: Option<ArrayString<64>>,
    /// Files whose digest differs from the first, with their digests
    pub mismatches: Vec<(PathBuf, ArrayString<64>)>,
}

impl DigestReport {
    pub fn is_uniform(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Digest every file and check they all share one fingerprint.
///
/// The first file's digest is taken as the expected value; per-file read
/// failures are fatal here, a verification pass must see every file.
pub fn verify_uniform_digest(files: &[MediaFile]) -> Result<DigestReport> {
    let mut expected: Option<ArrayString<64>> = None;
    let mut mismatches = Vec::new();

    for media in files {
        let digest = digest_file(&media.abs_path)?;
        match expected {
            None => expected = Some(digest),
            Some(reference) if digest != reference => {
                mismatches.push((media.rel_path.clone(), digest));
            }
            Some(_) => {}
        }
    }

    Ok(DigestReport {
        files: files.len(),
        digest: expected,
        mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn media(dir: &TempDir, name: &str, bytes: &[u8]) -> MediaFile {
        let abs = dir.path().join(name);
        fs::write(&abs, bytes).unwrap();
        MediaFile {
            rel_path: PathBuf::from(name),
            abs_path: abs,
        }
    }

    #[test]
    fn identical_files_share_one_digest() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            media(&dir, "a.jpg", b"same-bytes"),
            media(&dir, "b.jpg", b"same-bytes"),
            media(&dir, "c.jpg", b"same-bytes"),
        ];

        let report = verify_uniform_digest(&files).unwrap();
        assert_eq!(report.files, 3);
        assert!(report.is_uniform());
        assert_eq!(report.digest, Some(digest_file(&files[0].abs_path).unwrap()));
    }

    #[test]
    fn differing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            media(&dir, "a.jpg", b"same-bytes"),
            media(&dir, "b.jpg", b"other-bytes"),
        ];

        let report = verify_uniform_digest(&files).unwrap();
        assert!(!report.is_uniform());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].0, PathBuf::from("b.jpg"));
    }

    #[test]
    fn empty_enumeration_is_trivially_uniform() {
        let report = verify_uniform_digest(&[]).unwrap();
        assert_eq!(report.files, 0);
        assert!(report.digest.is_none());
        assert!(report.is_uniform());
    }
}
