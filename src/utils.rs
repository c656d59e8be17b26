use std::path::Path;

use crate::common::{VALID_IMAGE_EXTENSIONS, VALID_VIDEO_EXTENSIONS};

pub trait PathExt {
    fn ext_lower(&self) -> String;
    fn is_media_file(&self) -> bool;
}

impl PathExt for Path {
    fn ext_lower(&self) -> String {
        self.extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn is_media_file(&self) -> bool {
        let ext = self.ext_lower();
        VALID_IMAGE_EXTENSIONS.contains(&ext.as_str())
            || VALID_VIDEO_EXTENSIONS.contains(&ext.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_lower_normalizes_case() {
        assert_eq!(Path::new("a/b/PHOTO.JPG").ext_lower(), "jpg");
        assert_eq!(Path::new("clip.Mp4").ext_lower(), "mp4");
        assert_eq!(Path::new("no_extension").ext_lower(), "");
    }

    #[test]
    fn media_file_detection() {
        assert!(Path::new("x/a.jpeg").is_media_file());
        assert!(Path::new("x/b.mkv").is_media_file());
        assert!(!Path::new("x/manifest.csv").is_media_file());
    }
}
