//! Export strategies for delivering stamped images to local storage.
//!
//! Three cooperating paths: writing into a user-picked directory, writing
//! into an already-known directory, and the universal download path (a
//! single ZIP archive, falling back to per-file delivery). Failing paths
//! degrade gracefully toward the download path; only the last resort
//! surfaces its error.

mod archive;
mod download;

pub use archive::{build_archive, StampArchive};
pub use download::DownloadSink;

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::StampedImage;
use crate::utils::StamperResult;

/// Fixed subfolder created under the chosen export directory, also the
/// top-level folder inside exported archives.
pub const EXPORT_SUBFOLDER: &str = "stamped-images";

/// Native "pick a folder" capability.
///
/// `Ok(None)` means the user cancelled the prompt, which is a benign abort
/// of that export path, not an error.
pub trait DirectoryPicker: Send + Sync {
    fn pick_directory(&self) -> StamperResult<Option<PathBuf>>;
}

/// Selects an export strategy at call time and chains fallbacks.
pub struct Exporter {
    picker: Option<Box<dyn DirectoryPicker>>,
    sink: DownloadSink,
}

impl Exporter {
    /// Creates an exporter without a directory picker; directory exports
    /// degrade straight to the download path.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            picker: None,
            sink: DownloadSink::new(download_dir),
        }
    }

    pub fn with_picker(mut self, picker: impl DirectoryPicker + 'static) -> Self {
        self.picker = Some(Box::new(picker));
        self
    }

    /// Lets the user pick a target directory and writes the results there.
    ///
    /// Falls back to [`Exporter::download`] when no picker is available or
    /// when the picker or the directory write fails. User cancellation
    /// returns silently.
    pub async fn save_to_directory(&self, results: &[StampedImage]) -> StamperResult<()> {
        if results.is_empty() {
            return Ok(());
        }

        let Some(picker) = &self.picker else {
            debug!("Directory picking not supported, using download path");
            return self.download(results).await;
        };

        match picker.pick_directory() {
            Ok(Some(dir)) => match self.write_into(&dir, results).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("Directory write failed ({}), falling back to download", e);
                    self.download(results).await
                }
            },
            Ok(None) => {
                debug!("Directory picker cancelled by user");
                Ok(())
            }
            Err(e) => {
                warn!("Directory picker failed ({}), falling back to download", e);
                self.download(results).await
            }
        }
    }

    /// Writes the results under an already-obtained directory, no prompt.
    pub async fn save_to_specific_directory(
        &self,
        results: &[StampedImage],
        dir: &Path,
    ) -> StamperResult<()> {
        if results.is_empty() {
            return Ok(());
        }

        match self.write_into(dir, results).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Directory write failed ({}), falling back to download", e);
                self.download(results).await
            }
        }
    }

    /// Universal fallback: delivers a single compressed archive, or each
    /// file individually if the archive cannot be produced or delivered.
    pub async fn download(&self, results: &[StampedImage]) -> StamperResult<()> {
        if results.is_empty() {
            return Ok(());
        }

        match build_archive(results) {
            Ok(archive) => match self.sink.deliver(&archive.file_name, &archive.bytes).await {
                Ok(()) => {
                    info!("Delivered archive {} ({} files)", archive.file_name, results.len());
                    Ok(())
                }
                Err(e) => {
                    warn!("Archive delivery failed ({}), downloading files individually", e);
                    self.download_each(results).await
                }
            },
            Err(e) => {
                warn!("Archive build failed ({}), downloading files individually", e);
                self.download_each(results).await
            }
        }
    }

    async fn download_each(&self, results: &[StampedImage]) -> StamperResult<()> {
        for result in results {
            self.sink.deliver(&result.file_name, &result.bytes).await?;
        }
        info!("Delivered {} files individually", results.len());
        Ok(())
    }

    async fn write_into(&self, dir: &Path, results: &[StampedImage]) -> StamperResult<()> {
        let target = dir.join(EXPORT_SUBFOLDER);
        fs::create_dir_all(&target).await?;

        for result in results {
            fs::write(target.join(&result.file_name), &result.bytes).await?;
        }
        info!("Wrote {} files to {}", results.len(), target.display());
        Ok(())
    }
}
