//! File manager API client.
//!
//! Async HTTP client using `reqwest` multipart requests for uploads and
//! plain GET/DELETE for listing management.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use filedrop_protocol::constants::{
    CHUNK_SIZE, FIELD_CHUNK_INDEX, FIELD_FILE, FIELD_TOTAL_CHUNKS, FILES_PATH, UPLOAD_CHUNK_PATH,
    UPLOAD_SINGLE_PATH,
};
use filedrop_protocol::{FileEntry, FilesResponse, UploadResponse};
use filedrop_transfer::{ChunkReader, LocalFile, ProgressFn, TransferError};

/// Message returned after the last chunk lands. Per-chunk response bodies
/// carry no final acknowledgement, so the client supplies its own.
const CHUNKED_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Errors from the file manager client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("upload failed: {0}")]
    Upload(String),
}

/// File manager API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client for the server at `base_url` (scheme + authority,
    /// no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Uploads a file, choosing whole-file or chunked transfer by size.
    ///
    /// Files at or below [`CHUNK_SIZE`] go out as one request and never
    /// invoke `on_progress`; larger files are sent chunk by chunk, strictly
    /// in order, with a percentage callback after each confirmed chunk.
    pub async fn upload(
        &self,
        file: &LocalFile,
        on_progress: Option<&ProgressFn>,
    ) -> Result<UploadResponse, Error> {
        if file.size <= CHUNK_SIZE as u64 {
            self.upload_single(file).await
        } else {
            self.upload_chunks(file, on_progress).await
        }
    }

    /// Uploads a file in one multipart request.
    pub async fn upload_single(&self, file: &LocalFile) -> Result<UploadResponse, Error> {
        let path = file.path.clone();
        let data = tokio::task::spawn_blocking(move || std::fs::read(&path))
            .await
            .map_err(|e| Error::Upload(format!("task join error: {e}")))?
            .map_err(TransferError::Io)?;

        let form = Form::new().part(FIELD_FILE, Part::bytes(data).file_name(file.name.clone()));
        let body = self.post_multipart(UPLOAD_SINGLE_PATH, form).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Uploads a file as a sequence of fixed-size chunks, one in-flight
    /// request at a time.
    ///
    /// The first non-success response aborts the sequence; chunks already on
    /// the server are left to its own cleanup policy.
    pub async fn upload_chunks(
        &self,
        file: &LocalFile,
        on_progress: Option<&ProgressFn>,
    ) -> Result<UploadResponse, Error> {
        let source = file.clone();
        let mut reader = tokio::task::spawn_blocking(move || ChunkReader::open(&source))
            .await
            .map_err(|e| Error::Upload(format!("task join error: {e}")))??;

        let total = reader.total_chunks();

        loop {
            // Disk reads stay off the async executor.
            let (returned, next) = tokio::task::spawn_blocking(move || {
                let mut r = reader;
                let chunk = r.next_chunk();
                (r, chunk)
            })
            .await
            .map_err(|e| Error::Upload(format!("task join error: {e}")))?;
            reader = returned;

            let Some(chunk) = next? else {
                break;
            };
            let index = chunk.index;

            let form = Form::new()
                .part(
                    FIELD_FILE,
                    Part::bytes(chunk.data).file_name(file.name.clone()),
                )
                .text(FIELD_CHUNK_INDEX, index.to_string())
                .text(FIELD_TOTAL_CHUNKS, total.to_string());

            // Per-chunk response bodies are not surfaced.
            let _ = self.post_multipart(UPLOAD_CHUNK_PATH, form).await?;

            debug!(file = %file.name, chunk = index + 1, total, "chunk confirmed");

            if let Some(cb) = on_progress {
                cb((index + 1) as f64 / total as f64 * 100.0);
            }
        }

        Ok(UploadResponse {
            message: CHUNKED_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Fetches the server's file listing.
    pub async fn list_files(&self) -> Result<Vec<FileEntry>, Error> {
        let url = format!("{}{}", self.base_url, FILES_PATH);
        let resp = self.http.get(&url).send().await?;
        let body = check(resp).await?;
        let listing: FilesResponse = serde_json::from_slice(&body)?;

        Ok(listing.files)
    }

    /// Deletes a file by name.
    pub async fn delete_file(&self, name: &str) -> Result<FilesResponse, Error> {
        let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC).to_string();
        let url = format!("{}{}/{}", self.base_url, FILES_PATH, encoded);
        let resp = self.http.delete(&url).send().await?;
        let body = check(resp).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Posts a multipart form and returns the raw response body.
    async fn post_multipart(&self, endpoint: &str, form: Form) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.post(&url).multipart(form).send().await?;
        check(resp).await
    }
}

/// Treats any non-2xx status as a uniform failure, no 4xx/5xx distinction.
async fn check(resp: reqwest::Response) -> Result<Vec<u8>, Error> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.bytes().await?.to_vec())
}
