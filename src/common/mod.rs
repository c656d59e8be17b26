pub const VALID_IMAGE_EXTENSIONS: &'static [&'static str] = &[
    "jpg", "jpeg", "jfif", "jpe", "png", "tif", "tiff", "webp", "bmp",
];

pub const VALID_VIDEO_EXTENSIONS: &'static [&'static str] = &[
    "gif", "mp4", "webm", "mkv", "mov", "avi", "flv", "wmv", "mpeg",
];

/// CSV column holding the asset path relative to the root folder
pub const ASSET_PATH_FIELD: &'static str = "asset_rel_path";
