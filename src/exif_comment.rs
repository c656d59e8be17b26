//! EXIF annotation - stamps a file path into the `UserComment` tag
//!
//! The stamp is carried in a freshly built APP1 segment spliced into the
//! JPEG marker stream. Any pre-existing Exif segment is dropped: fixtures
//! are stamped template copies and the stamp is the only metadata that
//! matters for the sync test runs.

use crate::errors::{FixtureError, Result};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::ImageFormat;
use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Charset prefix required by the Exif spec for `UserComment` payloads
const COMMENT_CHARSET_ASCII: &[u8; 8] = b"ASCII\0\0\0";

/// Identifier at the start of an Exif APP1 segment body
const EXIF_APP1_HEADER: &[u8; 6] = b"Exif\0\0";

/// Add the file's own path as the `UserComment` EXIF property.
///
/// Only JPEG containers are supported; anything else fails with
/// `UnsupportedFormat`. The file is rewritten in place.
pub fn add_exif_comment(media_file_path: impl AsRef<Path>) -> Result<()> {
    let path = media_file_path.as_ref();
    let bytes = fs::read(path).map_err(|e| FixtureError::io(path, e))?;

    match image::guess_format(&bytes) {
        Ok(ImageFormat::Jpeg) => {}
        _ => {
            return Err(FixtureError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }

    let comment = path.to_string_lossy();
    let segment = build_user_comment_segment(comment.as_bytes())
        .map_err(|e| FixtureError::exif(path, e))?;

    let spliced = splice_app1(&bytes, &segment).ok_or_else(|| FixtureError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    fs::write(path, spliced).map_err(|e| FixtureError::io(path, e))
}

/// Read the `UserComment` stamp back, if any.
pub fn read_user_comment(media_file_path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = media_file_path.as_ref();
    let file = File::open(path).map_err(|e| FixtureError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let exif_data = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(data) => data,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(source) => return Err(FixtureError::exif(path, source)),
    };

    let Some(field) = exif_data.get_field(Tag::UserComment, In::PRIMARY) else {
        return Ok(None);
    };
    match &field.value {
        Value::Undefined(bytes, _) => {
            let text = bytes
                .strip_prefix(COMMENT_CHARSET_ASCII.as_slice())
                .unwrap_or(bytes);
            Ok(Some(String::from_utf8_lossy(text).into_owned()))
        }
        _ => Ok(None),
    }
}

/// Serialize a single-field Exif block holding the comment and wrap it in
/// the APP1 body layout (`Exif\0\0` + TIFF structure).
fn build_user_comment_segment(comment: &[u8]) -> std::result::Result<Vec<u8>, exif::Error> {
    let mut value = Vec::with_capacity(COMMENT_CHARSET_ASCII.len() + comment.len());
    value.extend_from_slice(COMMENT_CHARSET_ASCII);
    value.extend_from_slice(comment);

    let field = Field {
        tag: Tag::UserComment,
        ifd_num: In::PRIMARY,
        value: Value::Undefined(value, 0),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);

    let mut cursor = Cursor::new(Vec::new());
    writer.write(&mut cursor, false)?;
    let tiff = cursor.into_inner();

    let mut segment = Vec::with_capacity(EXIF_APP1_HEADER.len() + tiff.len());
    segment.extend_from_slice(EXIF_APP1_HEADER);
    segment.extend_from_slice(&tiff);
    Ok(segment)
}

/// Rebuild the JPEG marker stream with `segment` as the sole Exif APP1.
///
/// The new segment lands right after SOI; an existing Exif APP1 is dropped.
/// Returns `None` when the input is not a well-formed JPEG stream.
fn splice_app1(jpeg: &[u8], segment: &[u8]) -> Option<Vec<u8>> {
    if jpeg.len() < 2 || jpeg[0] != 0xFF || jpeg[1] != 0xD8 {
        return None;
    }
    if segment.len() + 2 > u16::MAX as usize {
        return None;
    }

    let mut out = Vec::with_capacity(jpeg.len() + segment.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((segment.len() as u16 + 2).to_be_bytes()));
    out.extend_from_slice(segment);

    let mut i = 2;
    while i + 1 < jpeg.len() {
        if jpeg[i] != 0xFF {
            return None;
        }
        let marker = jpeg[i + 1];
        match marker {
            // fill byte before a marker
            0xFF => i += 1,
            // a second SOI is malformed
            0xD8 => return None,
            // EOI or SOS: entropy-coded data follows, copy the rest verbatim
            0xD9 | 0xDA => {
                out.extend_from_slice(&jpeg[i..]);
                return Some(out);
            }
            // standalone markers carry no length field
            0x01 | 0xD0..=0xD7 => {
                out.extend_from_slice(&jpeg[i..i + 2]);
                i += 2;
            }
            _ => {
                if i + 4 > jpeg.len() {
                    return None;
                }
                let len = u16::from_be_bytes([jpeg[i + 2], jpeg[i + 3]]) as usize;
                if len < 2 || i + 2 + len > jpeg.len() {
                    return None;
                }
                let body = &jpeg[i + 4..i + 2 + len];
                let is_old_exif = marker == 0xE1 && body.starts_with(EXIF_APP1_HEADER);
                if !is_old_exif {
                    out.extend_from_slice(&jpeg[i..i + 2 + len]);
                }
                i += 2 + len;
            }
        }
    }

    // ran off the end without SOS/EOI
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SOI + APP0(JFIF stub) + EOI; not decodable but structurally valid
    fn stub_jpeg() -> Vec<u8> {
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07]);
        jpeg.extend_from_slice(b"JFIF\0");
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    #[test]
    fn splice_inserts_app1_after_soi() {
        let jpeg = stub_jpeg();
        let segment = build_user_comment_segment(b"hello").unwrap();
        let out = splice_app1(&jpeg, &segment).unwrap();

        assert_eq!(&out[..2], &[0xFF, 0xD8]);
        assert_eq!(&out[2..4], &[0xFF, 0xE1]);
        let len = u16::from_be_bytes([out[4], out[5]]) as usize;
        assert_eq!(len, segment.len() + 2);
        assert_eq!(&out[6..12], EXIF_APP1_HEADER);
        // the original APP0 and EOI survive after the inserted segment
        assert_eq!(&out[out.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn splice_replaces_existing_exif_segment() {
        let first = build_user_comment_segment(b"old comment").unwrap();
        let jpeg = splice_app1(&stub_jpeg(), &first).unwrap();
        let second = build_user_comment_segment(b"new").unwrap();
        let out = splice_app1(&jpeg, &second).unwrap();

        let old_count = out
            .windows(first.len())
            .filter(|w| *w == first.as_slice())
            .count();
        assert_eq!(old_count, 0, "old Exif APP1 must be dropped");
    }

    #[test]
    fn splice_rejects_non_jpeg_bytes() {
        let segment = build_user_comment_segment(b"x").unwrap();
        assert!(splice_app1(b"\x89PNG\r\n\x1a\n", &segment).is_none());
        assert!(splice_app1(b"", &segment).is_none());
    }

    #[test]
    fn comment_segment_carries_charset_prefix() {
        let segment = build_user_comment_segment(b"abc").unwrap();
        assert!(segment.starts_with(EXIF_APP1_HEADER));
        let needle = b"ASCII\0\0\0abc";
        assert!(segment.windows(needle.len()).any(|w| w == needle));
    }
}
