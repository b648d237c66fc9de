//! Extension allow-list for video files.

use crate::{Result, VidshelfError};

/// File extensions accepted for upload and download, in message order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mpg4", "mpg", "mpeg"];

/// Extract the extension of a filename.
///
/// Returns the text after the last `.` of the final path segment, or an
/// empty string if that segment has no `.`. Unlike [`std::path::Path::extension`],
/// a leading dot counts (`.mp4` has extension `mp4`).
pub fn extract_extension(file_name: &str) -> &str {
    let segment = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match segment.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}

/// Check that `file_name` has one of the [`SUPPORTED_EXTENSIONS`].
///
/// The comparison is case-sensitive: `clip.MP4` is rejected.
pub fn validate_extension(file_name: &str) -> Result<()> {
    let ext = extract_extension(file_name);
    if SUPPORTED_EXTENSIONS.contains(&ext) {
        Ok(())
    } else {
        Err(VidshelfError::unsupported_media_type())
    }
}
