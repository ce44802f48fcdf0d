use std::path::Path;

use crate::core::OutputFormat;

/// Strip the final extension from a file name.
///
/// Mirrors the behavior of `Path::file_stem`: a leading dot does not start
/// an extension, so `.hidden` keeps its name unchanged.
pub fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// Build the output file name for a stamped image.
///
/// The original extension is replaced with an explicit `_stamped` suffix and
/// the extension of the resolved output format, e.g. `photo.png` becomes
/// `photo_stamped.jpg`.
pub fn stamped_file_name(original: &str, format: OutputFormat) -> String {
    format!("{}_stamped.{}", file_stem(original), format.extension())
}
