//! Core types used throughout the library:
//! - [`StampOptions`] / [`ResolvedOptions`]: per-invocation stamping options
//! - [`InputImage`] / [`StampedImage`]: batch inputs and results
//! - [`StampingProgress`]: per-file progress notifications

mod progress;
mod types;

pub use progress::StampingProgress;
pub use types::{InputImage, OutputFormat, ResolvedOptions, StampOptions, StampedImage};
