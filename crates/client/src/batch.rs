//! Batch upload orchestration.
//!
//! Screens a submitted batch, dispatches every accepted file concurrently,
//! waits for all of them to settle, then refreshes the listing exactly once.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use filedrop_protocol::FileEntry;
use filedrop_transfer::{BatchProgress, LocalFile, ProgressFn, UploadRules, screen_batch};

use crate::client::{Client, Error};

/// Event emitted while a batch is being processed.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// Part or all of the batch was turned away by the screening gate.
    Rejected { message: String },
    /// A chunk of `file` was confirmed; percentages are 0-100.
    Progress {
        file: String,
        percentage: f64,
        overall: f64,
    },
    /// One file finished uploading.
    Completed { file: String },
    /// One file failed; its siblings keep going.
    Failed { file: String, error: String },
}

/// Result of one file's upload within a batch.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub file: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Outcome of a settled batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-file outcomes, one per accepted file.
    pub results: Vec<FileResult>,
    /// Fresh listing fetched after everything settled; `None` when no upload
    /// was dispatched.
    pub files: Option<Vec<FileEntry>>,
}

impl BatchReport {
    /// True when every dispatched upload succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }
}

/// Orchestrates uploads for one upload area.
///
/// Holds the area's screening rules and a shared [`Client`]; emits
/// [`UploadEvent`]s on a channel the caller can take with
/// [`take_events`](Self::take_events).
pub struct UploadManager {
    client: Arc<Client>,
    rules: UploadRules,
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
}

impl UploadManager {
    /// Creates a manager applying `rules` to every submitted batch.
    pub fn new(client: Client, rules: UploadRules) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            client: Arc::new(client),
            rules,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Screens `batch`, uploads every accepted file concurrently, waits for
    /// all of them to settle, then refreshes the listing once.
    ///
    /// A failed file never aborts its siblings: the failure is logged,
    /// carried in the report, and the refresh still happens so the other
    /// files' success becomes visible.
    pub async fn upload_batch(&self, batch: Vec<LocalFile>) -> Result<BatchReport, Error> {
        let screened = screen_batch(batch, &self.rules);

        if let Some(rejection) = &screened.rejection {
            warn!(message = %rejection.message(), "screening turned files away");
            let _ = self
                .events_tx
                .send(UploadEvent::Rejected {
                    message: rejection.message().to_string(),
                })
                .await;
        }

        if screened.accepted.is_empty() {
            return Ok(BatchReport {
                results: Vec::new(),
                files: None,
            });
        }

        let progress = Arc::new(BatchProgress::new());
        for file in &screened.accepted {
            progress.register(&file.name, file.size);
        }

        let names: Vec<String> = screened.accepted.iter().map(|f| f.name.clone()).collect();
        let mut handles = Vec::with_capacity(screened.accepted.len());
        for file in screened.accepted {
            let client = Arc::clone(&self.client);
            let progress = Arc::clone(&progress);
            let events_tx = self.events_tx.clone();
            handles.push(tokio::spawn(upload_one(client, file, progress, events_tx)));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (joined, name) in join_all(handles).await.into_iter().zip(names) {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => results.push(FileResult {
                    file: name,
                    success: false,
                    error: Some(format!("task join error: {e}")),
                }),
            }
        }

        // One refresh per settled batch, never per file.
        let files = self.client.list_files().await?;

        Ok(BatchReport {
            results,
            files: Some(files),
        })
    }

    /// Deletes a file, then refreshes the listing.
    ///
    /// The delete response carries a listing too, but the cache policy is
    /// invalidate-and-refetch, so the fresh state always comes from
    /// `GET /api/files`.
    pub async fn delete(&self, name: &str) -> Result<Vec<FileEntry>, Error> {
        self.client.delete_file(name).await?;
        info!(file = %name, "file deleted");
        self.client.list_files().await
    }
}

/// Uploads one file and reports its outcome.
async fn upload_one(
    client: Arc<Client>,
    file: LocalFile,
    progress: Arc<BatchProgress>,
    events_tx: mpsc::Sender<UploadEvent>,
) -> FileResult {
    let name = file.name.clone();

    let on_progress: ProgressFn = {
        let progress = Arc::clone(&progress);
        let events_tx = events_tx.clone();
        let file_name = name.clone();
        Box::new(move |percentage| {
            progress.set_percentage(&file_name, percentage);
            // The callback runs inside the upload future; a full buffer just
            // drops the event rather than stalling the transfer.
            let _ = events_tx.try_send(UploadEvent::Progress {
                file: file_name.clone(),
                percentage,
                overall: progress.overall(),
            });
        })
    };

    match client.upload(&file, Some(&on_progress)).await {
        Ok(resp) => {
            progress.finish(&name);
            info!(file = %name, message = %resp.message, "upload completed");
            let _ = events_tx
                .send(UploadEvent::Completed { file: name.clone() })
                .await;
            FileResult {
                file: name,
                success: true,
                error: None,
            }
        }
        Err(e) => {
            let err_msg = e.to_string();
            error!(file = %name, error = %err_msg, "upload failed");
            let _ = events_tx
                .send(UploadEvent::Failed {
                    file: name.clone(),
                    error: err_msg.clone(),
                })
                .await;
            FileResult {
                file: name,
                success: false,
                error: Some(err_msg),
            }
        }
    }
}
