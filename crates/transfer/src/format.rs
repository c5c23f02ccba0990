//! Human-readable formatting for file sizes and upload constraints.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Extensions treated as images for display purposes.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Formats a byte count into a readable string.
pub fn format_file_size(size: u64) -> String {
    if size < KIB {
        format!("{size} bytes")
    } else if size < MIB {
        format!("{:.1} KB", size as f64 / KIB as f64)
    } else if size < GIB {
        format!("{:.1} MB", size as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GIB as f64)
    }
}

/// Formats a configured size limit in megabytes, or `"No limit."` when unset.
pub fn format_max_file_size(max_file_size: Option<u64>) -> String {
    match max_file_size {
        Some(max) => format!("{:.2} MB", max as f64 / 1024.0 / 1024.0),
        None => "No limit.".to_string(),
    }
}

/// Formats an extension list as `".jpg, .png"`, or `"Any file type."` when
/// unset.
pub fn format_allowed_extensions(extensions: Option<&[String]>) -> String {
    match extensions {
        Some(exts) => exts
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", "),
        None => "Any file type.".to_string(),
    }
}

/// Uppercase final extension of a file name, or `""` when there is none.
///
/// Extensionless names, hidden files (`.hiddenfile`) and trailing-dot names
/// all count as having no extension.
pub fn file_extension(file_name: &str) -> String {
    let pieces: Vec<&str> = file_name.split('.').collect();
    if pieces.len() == 1 || (pieces[0].is_empty() && pieces.len() == 2) {
        return String::new();
    }
    pieces
        .last()
        .map(|piece| piece.to_uppercase())
        .unwrap_or_default()
}

/// Whether the name looks like an image, by extension alone.
pub fn is_image_file(file_name: &str) -> bool {
    file_name
        .split('.')
        .next_back()
        .map(|ext| {
            let lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|img| *img == lower)
        })
        .unwrap_or(false)
}
