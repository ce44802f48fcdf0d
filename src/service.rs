//! Caller-facing stamping service.

use std::path::Path;

use crate::core::{InputImage, StampOptions, StampedImage, StampingProgress};
use crate::engine::{EngineBinding, EngineLoader};
use crate::export::{DirectoryPicker, Exporter};
use crate::processing;
use crate::utils::StamperResult;

/// One service instance owning the engine binding and the export strategies.
///
/// Usage follows a fixed sequence: `initialize()`, `set_stamp()`, then any
/// number of batch and export calls. The service is not reentrant; concurrent
/// calls on the same instance must be serialized by the caller.
pub struct StampingService {
    binding: EngineBinding,
    exporter: Exporter,
}

impl StampingService {
    /// Creates a service backed by the built-in engine; downloads land in
    /// `download_dir`.
    pub fn new(download_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            binding: EngineBinding::new(),
            exporter: Exporter::new(download_dir),
        }
    }

    /// Replaces the engine loader, e.g. with a test double.
    pub fn with_engine_loader(mut self, loader: impl EngineLoader + 'static) -> Self {
        self.binding = EngineBinding::with_loader(loader);
        self
    }

    /// Enables the native directory-picker export path.
    pub fn with_directory_picker(mut self, picker: impl DirectoryPicker + 'static) -> Self {
        self.exporter = self.exporter.with_picker(picker);
        self
    }

    /// Loads the engine on first call; idempotent afterwards.
    pub async fn initialize(&mut self) -> StamperResult<()> {
        self.binding.initialize().await
    }

    /// Configures the watermark image from raw bytes.
    pub async fn set_stamp(&mut self, stamp_bytes: &[u8]) -> StamperResult<()> {
        self.binding.set_stamp(stamp_bytes).await
    }

    /// Stamps every image in the batch, reporting progress per file.
    ///
    /// See [`processing::apply_stamp_to_images`] for the ordering and
    /// failure semantics.
    pub async fn apply_stamp_to_images<F>(
        &self,
        images: &[Option<InputImage>],
        options: &StampOptions,
        on_progress: F,
    ) -> StamperResult<Vec<StampedImage>>
    where
        F: FnMut(&StampingProgress),
    {
        processing::apply_stamp_to_images(&self.binding, images, options, on_progress).await
    }

    /// Exports via the directory picker, with download fallback.
    pub async fn save_stamped_images_to_directory(
        &self,
        results: &[StampedImage],
    ) -> StamperResult<()> {
        self.exporter.save_to_directory(results).await
    }

    /// Exports into an already-known directory, with download fallback.
    pub async fn save_stamped_images_to_specific_directory(
        &self,
        results: &[StampedImage],
        dir: &Path,
    ) -> StamperResult<()> {
        self.exporter.save_to_specific_directory(results, dir).await
    }

    /// Exports through the universal download path.
    pub async fn download_stamped_images(&self, results: &[StampedImage]) -> StamperResult<()> {
        self.exporter.download(results).await
    }
}
