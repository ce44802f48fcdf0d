// Module declarations in dependency order
pub mod core;
pub mod engine;
pub mod export;
pub mod processing;
pub mod service;
pub mod utils;

// Public exports for external consumers
pub use core::{InputImage, OutputFormat, StampOptions, StampedImage, StampingProgress};
pub use engine::{EngineBinding, EngineLoader, ImageStamper, NativeEngineLoader, StampEngine};
pub use export::{build_archive, DirectoryPicker, DownloadSink, Exporter, StampArchive};
pub use service::StampingService;
pub use utils::{StamperError, StamperResult};
