/// Chunk size for chunked uploads (1 MiB).
///
/// Doubles as the whole-file cutoff: files at or below this size go out as a
/// single request, anything larger is split into slices of this size. One
/// constant for both uses, so the two sites cannot drift apart.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Endpoint for whole-file uploads.
pub const UPLOAD_SINGLE_PATH: &str = "/api/upload-single";

/// Endpoint for chunk uploads.
pub const UPLOAD_CHUNK_PATH: &str = "/api/upload-chunk";

/// Endpoint for listing files; a file name segment is appended for deletion.
pub const FILES_PATH: &str = "/api/files";

/// Multipart field carrying file bytes (whole file or one slice).
pub const FIELD_FILE: &str = "file";

/// Multipart field carrying the 0-based index of the slice being sent.
pub const FIELD_CHUNK_INDEX: &str = "currentChunkIndex";

/// Multipart field carrying the total slice count for the file.
pub const FIELD_TOTAL_CHUNKS: &str = "totalChunks";
