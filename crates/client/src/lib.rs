//! HTTP client for the filedrop file manager API.
//!
//! This crate implements the **client-side core** of the file manager:
//! screening a submitted batch, dispatching whole-file or chunked uploads,
//! and keeping the listing fresh. It is a library crate with no UI
//! dependencies — an input adapter hands it a plain batch of [`LocalFile`]s.
//!
//! # Pipeline
//!
//! 1. **Screen** — size/extension gate over the submitted batch
//! 2. **Dispatch** — whole-file or chunked transfer per accepted file
//! 3. **Settle** — wait for every upload, success or failure
//! 4. **Refresh** — one listing fetch for the whole batch

pub mod batch;
pub mod client;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export primary types for convenience.
pub use batch::{BatchReport, FileResult, UploadEvent, UploadManager};
pub use client::{Client, Error};
pub use filedrop_transfer::{LocalFile, UploadRules};
