//! Aggregate progress for a batch of concurrent uploads.

use std::collections::HashMap;
use std::sync::RwLock;

/// Callback invoked with an upload percentage (0-100).
pub type ProgressFn = Box<dyn Fn(f64) + Send + Sync>;

/// Tracks per-file percentages for one batch (thread-safe).
///
/// Overall progress weights each file by its size, so one large file does not
/// appear stalled behind a crowd of small ones.
pub struct BatchProgress {
    inner: RwLock<HashMap<String, FileState>>,
}

struct FileState {
    size: u64,
    percentage: f64,
}

impl BatchProgress {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a file at 0% before its upload starts.
    pub fn register(&self, name: &str, size: u64) {
        let mut inner = self.inner.write().unwrap();
        inner.insert(
            name.to_string(),
            FileState {
                size,
                percentage: 0.0,
            },
        );
    }

    /// Records the latest percentage for a file. Unregistered names are
    /// ignored.
    pub fn set_percentage(&self, name: &str, percentage: f64) {
        let mut inner = self.inner.write().unwrap();
        if let Some(state) = inner.get_mut(name) {
            state.percentage = percentage;
        }
    }

    /// Marks a file as fully transferred.
    ///
    /// Whole-file uploads never invoke the chunk callback, so this is how
    /// they land at 100%.
    pub fn finish(&self, name: &str) {
        self.set_percentage(name, 100.0);
    }

    /// Latest percentage for one file.
    pub fn percentage(&self, name: &str) -> Option<f64> {
        let inner = self.inner.read().unwrap();
        inner.get(name).map(|state| state.percentage)
    }

    /// Size-weighted overall percentage across all registered files.
    ///
    /// Returns 0.0 when nothing is registered or all files are empty.
    pub fn overall(&self) -> f64 {
        let inner = self.inner.read().unwrap();
        let total: u64 = inner.values().map(|state| state.size).sum();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = inner
            .values()
            .map(|state| state.percentage * state.size as f64)
            .sum();
        weighted / total as f64
    }
}

impl Default for BatchProgress {
    fn default() -> Self {
        Self::new()
    }
}
