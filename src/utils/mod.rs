pub mod error;
pub mod fs;

pub use error::{StamperError, StamperResult};
pub use fs::{file_stem, stamped_file_name};
