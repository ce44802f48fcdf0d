//! ZIP archive packing for bulk download.

use std::io::{Cursor, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::EXPORT_SUBFOLDER;
use crate::core::StampedImage;
use crate::utils::{StamperError, StamperResult};

/// Deflate level 6: the usual size/speed middle ground.
const COMPRESSION_LEVEL: i64 = 6;

/// A fully encoded archive ready for delivery.
pub struct StampArchive {
    /// `stamped-images-<epoch-millis>.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Packs the result files into one compressed ZIP blob.
///
/// Every file is placed under a fixed `stamped-images/` top-level folder.
/// The whole encode completes before any delivery is attempted, so a failed
/// build never leaves a partially downloaded archive behind.
pub fn build_archive(results: &[StampedImage]) -> StamperResult<StampArchive> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    writer.add_directory(EXPORT_SUBFOLDER, options)?;
    for result in results {
        writer.start_file(format!("{}/{}", EXPORT_SUBFOLDER, result.file_name), options)?;
        writer
            .write_all(&result.bytes)
            .map_err(|e| StamperError::archive(format!("Failed to write archive entry: {}", e)))?;
    }

    let bytes = writer.finish()?.into_inner();
    let file_name = format!("stamped-images-{}.zip", epoch_millis());
    debug!(
        "Built archive {} with {} entries ({} bytes)",
        file_name,
        results.len(),
        bytes.len()
    );

    Ok(StampArchive { file_name, bytes })
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn result(name: &str, bytes: &[u8]) -> StampedImage {
        StampedImage {
            file_name: name.to_string(),
            mime_type: "image/jpeg",
            bytes: bytes.to_vec(),
            original_name: name.replace("_stamped.jpg", ".png"),
        }
    }

    #[test]
    fn archive_contains_entries_under_fixed_folder() {
        let results = vec![
            result("a_stamped.jpg", b"aaaa"),
            result("b_stamped.jpg", b"bbbb"),
        ];
        let archive = build_archive(&results).unwrap();

        assert!(archive.file_name.starts_with("stamped-images-"));
        assert!(archive.file_name.ends_with(".zip"));

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        let mut entry = zip.by_name("stamped-images/a_stamped.jpg").unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"aaaa");
        drop(entry);

        assert!(zip.by_name("stamped-images/b_stamped.jpg").is_ok());
    }

    #[test]
    fn empty_input_still_produces_a_valid_archive() {
        let archive = build_archive(&[]).unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        // Only the fixed top-level folder entry is present.
        assert_eq!(zip.len(), 1);
    }
}
