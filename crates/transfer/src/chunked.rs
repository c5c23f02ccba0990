use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use filedrop_protocol::constants::CHUNK_SIZE;

use crate::TransferError;

/// A file selected for upload.
///
/// Carries just the attributes screening and dispatch need; the bytes stay on
/// disk until a [`ChunkReader`] pulls them. Never mutated by this crate.
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// File name as presented to the server (no directory part).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Location on disk.
    pub path: PathBuf,
}

impl LocalFile {
    /// Stats `path` and captures its name and size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransferError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(TransferError::NotAFile(path.display().to_string()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TransferError::NoFileName(path.display().to_string()))?;

        Ok(Self {
            name,
            size: metadata.len(),
            path: path.to_path_buf(),
        })
    }
}

/// Number of chunks needed to cover `size` bytes.
pub fn total_chunks(size: u64) -> u64 {
    size.div_ceil(CHUNK_SIZE as u64)
}

/// A contiguous slice of a file, staged for one chunk request.
#[derive(Debug, Clone)]
pub struct FileChunk {
    /// 0-based position in the chunk sequence.
    pub index: u64,
    /// Total number of chunks for the whole file.
    pub total_chunks: u64,
    /// Raw slice bytes.
    pub data: Vec<u8>,
    /// Name of the originating file.
    pub file_name: String,
}

/// Reads a file as a sequence of fixed-size chunks.
///
/// Slices are contiguous, non-overlapping and cover the file exactly once;
/// every chunk is [`CHUNK_SIZE`] bytes except possibly the last.
pub struct ChunkReader {
    file: File,
    file_name: String,
    file_size: u64,
    index: u64,
    total: u64,
}

impl ChunkReader {
    /// Opens `source` for chunked reading.
    pub fn open(source: &LocalFile) -> Result<Self, TransferError> {
        let file = File::open(&source.path)?;
        Ok(Self {
            file,
            file_name: source.name.clone(),
            file_size: source.size,
            index: 0,
            total: total_chunks(source.size),
        })
    }

    /// Reads the next chunk. Returns `None` once the file is exhausted.
    pub fn next_chunk(&mut self) -> Result<Option<FileChunk>, TransferError> {
        if self.index >= self.total {
            return Ok(None);
        }

        let offset = self.index * CHUNK_SIZE as u64;
        let len = std::cmp::min(CHUNK_SIZE as u64, self.file_size - offset) as usize;
        let mut buf = vec![0u8; len];
        self.file.read_exact(&mut buf)?;

        let chunk = FileChunk {
            index: self.index,
            total_chunks: self.total,
            data: buf,
            file_name: self.file_name.clone(),
        };
        self.index += 1;
        Ok(Some(chunk))
    }

    /// Total number of chunks this reader will produce.
    pub fn total_chunks(&self) -> u64 {
        self.total
    }

    /// Total file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.file_size
            .saturating_sub(self.index * CHUNK_SIZE as u64)
    }
}
