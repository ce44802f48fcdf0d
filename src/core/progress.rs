//! Progress reporting for batch stamping.

use serde::{Deserialize, Serialize};

/// Progress notification emitted once before each processed file.
///
/// `current` is 1-based and strictly increasing over the processed files of
/// one batch; `total` is fixed at the input list length. Notifications are
/// invoked synchronously from the sequential loop, never batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampingProgress {
    /// 1-based index of the file about to be processed
    pub current: usize,
    /// Total number of entries in the input list
    pub total: usize,
    /// Name of the file about to be processed
    pub current_file_name: String,
}
