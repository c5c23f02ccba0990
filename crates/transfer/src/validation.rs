//! Batch screening before any network transfer.
//!
//! The gate only classifies: it reads file names and sizes, never the bytes,
//! and never mutates the batch.

use serde::{Deserialize, Serialize};

use crate::chunked::LocalFile;

/// Notification shown when a multi-file batch hits a single-file area.
pub const MULTIPLE_NOT_ALLOWED: &str = "Only one file can be uploaded at a time.";

/// Screening rules for an upload area. Immutable per area instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRules {
    /// Maximum accepted file size in bytes (`None` = no limit).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    /// Allowed extensions, lowercase, without the leading dot (`None` = any).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
    /// Whether more than one file may be submitted at once.
    #[serde(default)]
    pub accepts_multiple: bool,
}

/// Why a batch (or part of it) was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRejection {
    /// More than one file submitted to a single-file area; nothing proceeds.
    MultipleNotAllowed,
    /// Some files were filtered out; the message names each one.
    InvalidFiles { message: String },
}

impl BatchRejection {
    /// Text to surface to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::MultipleNotAllowed => MULTIPLE_NOT_ALLOWED,
            Self::InvalidFiles { message } => message,
        }
    }
}

/// Outcome of screening one batch.
#[derive(Debug)]
pub struct ScreenedBatch {
    /// Files that passed both checks, in original batch order.
    pub accepted: Vec<LocalFile>,
    /// Set whenever at least one file was turned away.
    pub rejection: Option<BatchRejection>,
}

/// Passes iff no size limit is set or the file fits under it.
pub fn is_valid_file_size(size: u64, max_file_size: Option<u64>) -> bool {
    match max_file_size {
        Some(max) => size <= max,
        None => true,
    }
}

/// Passes iff no extension list is set or the name, case-insensitively, ends
/// with `.` + one of the allowed extensions.
pub fn has_valid_extension(name: &str, allowed: Option<&[String]>) -> bool {
    let Some(allowed) = allowed else {
        return true;
    };
    let lower = name.to_lowercase();
    allowed
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext.to_lowercase())))
}

/// Both checks at once; both must pass for acceptance.
pub fn is_valid_file(file: &LocalFile, rules: &UploadRules) -> bool {
    is_valid_file_size(file.size, rules.max_file_size)
        && has_valid_extension(&file.name, rules.allowed_extensions.as_deref())
}

/// Aggregate message naming every filtered file, one line each: all too-large
/// lines first, then all invalid-extension lines, each group in batch order.
///
/// A file failing both checks appears in both groups.
pub fn batch_error_message(files: &[LocalFile], rules: &UploadRules) -> String {
    let too_large = files
        .iter()
        .filter(|f| !is_valid_file_size(f.size, rules.max_file_size))
        .map(|f| format!("File {} is too large.", f.name));
    let invalid = files
        .iter()
        .filter(|f| !has_valid_extension(&f.name, rules.allowed_extensions.as_deref()))
        .map(|f| format!("File {} is invalid.", f.name));

    too_large.chain(invalid).collect::<Vec<_>>().join("\n")
}

/// Screens a batch against the rules.
///
/// - No size limit and no extension list: the whole batch is accepted without
///   per-file checks.
/// - Multiple files into a single-file area: nothing is accepted.
/// - Otherwise files failing either check are filtered out; a non-empty
///   accepted subset proceeds even when some files were rejected.
pub fn screen_batch(files: Vec<LocalFile>, rules: &UploadRules) -> ScreenedBatch {
    if rules.max_file_size.is_none() && rules.allowed_extensions.is_none() {
        return ScreenedBatch {
            accepted: files,
            rejection: None,
        };
    }

    if !rules.accepts_multiple && files.len() > 1 {
        return ScreenedBatch {
            accepted: Vec::new(),
            rejection: Some(BatchRejection::MultipleNotAllowed),
        };
    }

    let accepted: Vec<LocalFile> = files
        .iter()
        .filter(|f| is_valid_file(f, rules))
        .cloned()
        .collect();

    let rejection = if accepted.len() == files.len() {
        None
    } else {
        Some(BatchRejection::InvalidFiles {
            message: batch_error_message(&files, rules),
        })
    };

    ScreenedBatch {
        accepted,
        rejection,
    }
}
