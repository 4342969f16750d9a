//! File-extension to media-type mapping for downloads.

/// Fallback media type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Resolve the media type for a file name from its extension.
///
/// Matching is case-insensitive on the extension. Names without an
/// extension fall back to `application/octet-stream`.
pub fn media_type_for(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return OCTET_STREAM,
    };

    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => OCTET_STREAM,
    }
}
