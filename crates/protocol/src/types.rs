use serde::{Deserialize, Serialize};

/// A stored file as reported by the server's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Listing payload returned by `GET /api/files` and by the delete endpoint.
///
/// The order of `files` is server-defined and preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesResponse {
    pub files: Vec<FileEntry>,
}

/// Server acknowledgement for a completed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
}
