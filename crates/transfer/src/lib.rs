//! Upload screening, chunk mechanics and progress tracking.
//!
//! Everything here is transport-agnostic: the screening gate classifies a
//! batch, the chunk reader slices files, and the progress tracker aggregates
//! percentages. The HTTP side lives in `filedrop-client`.

mod chunked;
mod format;
mod progress;
mod validation;

pub use chunked::{ChunkReader, FileChunk, LocalFile, total_chunks};
pub use format::{
    file_extension, format_allowed_extensions, format_file_size, format_max_file_size,
    is_image_file,
};
pub use progress::{BatchProgress, ProgressFn};
pub use validation::{
    BatchRejection, ScreenedBatch, UploadRules, batch_error_message, has_valid_extension,
    is_valid_file, is_valid_file_size, screen_batch,
};

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("file name unavailable: {0}")]
    NoFileName(String),
}
