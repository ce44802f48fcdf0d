//! Delivery of exported files into the local download directory.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::utils::StamperResult;

/// Writes delivered files into a fixed download directory.
///
/// Bytes are staged in a temporary `.part` file and renamed into place, so a
/// failed delivery never leaves a half-written file under the final name.
/// The staged file is removed exactly once on every exit path.
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Delivers one file under `file_name`, overwriting an existing file of
    /// the same name.
    pub async fn deliver(&self, file_name: &str, bytes: &[u8]) -> StamperResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let staged = self.dir.join(format!("{}.part", file_name));
        let target = self.dir.join(file_name);

        if let Err(e) = fs::write(&staged, bytes).await {
            let _ = fs::remove_file(&staged).await;
            return Err(e.into());
        }

        match fs::rename(&staged, &target).await {
            Ok(()) => {
                debug!("Delivered {} ({} bytes)", file_name, bytes.len());
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&staged).await;
                Err(e.into())
            }
        }
    }
}
