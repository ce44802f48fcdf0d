//! Engine binding: lazy loading and lifecycle of the image-processing engine.
//!
//! The engine itself is opaque to the rest of the library; it is reached only
//! through the [`StampEngine`] trait. [`EngineBinding`] owns one engine
//! instance per service, created on the first `initialize()` call and kept
//! for the lifetime of the owning service.

mod stamper;
mod text;

pub use stamper::ImageStamper;

use tracing::debug;

use crate::core::OutputFormat;
use crate::utils::{StamperError, StamperResult};

/// Interface of the image-processing engine.
///
/// Byte buffers cross this boundary as raw binary slices; the engine decodes,
/// composites and re-encodes entirely on its own.
pub trait StampEngine: Send {
    /// Stores the watermark image, replacing any previously configured stamp.
    fn set_stamp(&mut self, stamp_bytes: &[u8]) -> StamperResult<()>;

    /// Applies the configured stamp to one source image and returns the
    /// encoded result bytes.
    fn apply_stamp(
        &self,
        image_bytes: &[u8],
        quality: u8,
        format: OutputFormat,
        label: &str,
        opacity: u8,
    ) -> StamperResult<Vec<u8>>;
}

/// Constructs a stamping-capable engine instance.
///
/// This is the seam where the engine module is fetched and instantiated;
/// a failing loader surfaces as [`StamperError::EngineLoad`].
pub trait EngineLoader: Send {
    fn load(&self) -> StamperResult<Box<dyn StampEngine>>;
}

/// Loads the built-in [`ImageStamper`] engine.
#[derive(Default)]
pub struct NativeEngineLoader {
    font_bytes: Option<Vec<u8>>,
}

impl NativeEngineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies TTF/OTF font bytes for watermark label rendering.
    ///
    /// Without a font the engine skips label drawing.
    pub fn with_font(mut self, font_bytes: Vec<u8>) -> Self {
        self.font_bytes = Some(font_bytes);
        self
    }
}

impl EngineLoader for NativeEngineLoader {
    fn load(&self) -> StamperResult<Box<dyn StampEngine>> {
        let mut stamper = ImageStamper::new();
        if let Some(bytes) = &self.font_bytes {
            stamper
                .set_label_font(bytes)
                .map_err(|e| StamperError::engine_load(e.to_string()))?;
        }
        Ok(Box::new(stamper))
    }
}

/// Per-service engine state: the loaded engine and the configured stamp.
pub struct EngineBinding {
    loader: Box<dyn EngineLoader>,
    engine: Option<Box<dyn StampEngine>>,
    stamp_set: bool,
}

impl EngineBinding {
    /// Creates a binding backed by the built-in engine.
    pub fn new() -> Self {
        Self::with_loader(NativeEngineLoader::new())
    }

    /// Creates a binding backed by a custom engine loader.
    pub fn with_loader(loader: impl EngineLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            engine: None,
            stamp_set: false,
        }
    }

    /// Loads and instantiates the engine on first call; no-op afterwards.
    ///
    /// A load failure is surfaced to the caller and is not retried
    /// automatically; the next `initialize()` call starts a fresh attempt.
    pub async fn initialize(&mut self) -> StamperResult<()> {
        if self.engine.is_some() {
            debug!("Engine already initialized, skipping load");
            return Ok(());
        }
        let engine = self.loader.load()?;
        self.engine = Some(engine);
        debug!("Engine module loaded and instantiated");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Transmits the raw watermark image bytes to the engine.
    pub async fn set_stamp(&mut self, stamp_bytes: &[u8]) -> StamperResult<()> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(StamperError::NotInitialized("call initialize() first"))?;
        engine.set_stamp(stamp_bytes)?;
        self.stamp_set = true;
        debug!("Stamp image configured ({} bytes)", stamp_bytes.len());
        Ok(())
    }

    /// Returns the engine, requiring both initialization and a configured
    /// stamp. Violations are precondition failures, not recoverable states.
    pub fn ready_engine(&self) -> StamperResult<&dyn StampEngine> {
        let engine = self
            .engine
            .as_deref()
            .ok_or(StamperError::NotInitialized("call initialize() first"))?;
        if !self.stamp_set {
            return Err(StamperError::NotInitialized(
                "no stamp configured, call set_stamp() first",
            ));
        }
        Ok(engine)
    }
}

impl Default for EngineBinding {
    fn default() -> Self {
        Self::new()
    }
}
