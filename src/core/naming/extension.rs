//! File extension inference
//!
//! Documents are stored as bare blobs, often without a usable file name.
//! The extension is taken from the first source that yields one:
//!
//! 1. the explicit name, when it already carries an extension (nothing is appended)
//! 2. the trailing segment of a stored URL or file path
//! 3. the declared content type
//! 4. the payload's leading magic bytes
//! 5. the category default

use url::Url;

/// Schemes whose values are parsed as URLs rather than plain paths.
const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "file"];

/// Content types with a known extension. Keys are lowercase.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("application/pdf", ".pdf"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/msword", ".doc"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    ("application/vnd.ms-excel", ".xls"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
    ("application/vnd.ms-powerpoint", ".ppt"),
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("text/plain", ".txt"),
    ("text/csv", ".csv"),
];

/// Minimum payload length before magic bytes are inspected.
const MIN_SNIFF_LENGTH: usize = 4;

/// Returns the extension to append to `explicit_name`.
///
/// The result is empty when `explicit_name` already has an extension;
/// otherwise it is a dotted extension such as `".pdf"`. Never fails: an
/// unknown content type or unrecognised payload falls through to
/// `default_extension`.
pub fn resolve_extension(
    explicit_name: Option<&str>,
    declared_path: Option<&str>,
    content_type: Option<&str>,
    payload: &[u8],
    default_extension: &str,
) -> String {
    if explicit_name.is_some_and(has_extension) {
        return String::new();
    }

    declared_path
        .and_then(trailing_segment)
        .and_then(|segment| extension_of(&segment).map(str::to_string))
        .or_else(|| content_type.and_then(extension_for_content_type).map(str::to_string))
        .or_else(|| sniff_extension(payload).map(str::to_string))
        .unwrap_or_else(|| default_extension.to_string())
}

/// Whether `name` ends in a dot followed by at least one character
pub fn has_extension(name: &str) -> bool {
    extension_of(name).is_some()
}

/// Dotted extension of the last segment of `name`, if any
pub fn extension_of(name: &str) -> Option<&str> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let dot = file.rfind('.')?;
    if dot + 1 < file.len() {
        Some(&file[dot..])
    } else {
        None
    }
}

/// Last non-empty segment of a URL or file path
///
/// Values with a URL scheme ignore their query and fragment. Everything
/// else is split on both `/` and `\`.
pub fn trailing_segment(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(value) {
        if URL_SCHEMES.contains(&url.scheme()) {
            return url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string);
        }
    }

    value
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Looks up a content type, ignoring case and parameters
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    CONTENT_TYPES
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
}

/// Guesses an extension from the payload's leading bytes
pub fn sniff_extension(payload: &[u8]) -> Option<&'static str> {
    if payload.len() < MIN_SNIFF_LENGTH {
        return None;
    }

    match payload {
        [0x25, 0x50, 0x44, 0x46, ..] => Some(".pdf"),
        // ZIP container; the common case in these tables is an Office document
        [0x50, 0x4B, ..] => Some(".docx"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(".png"),
        [0xFF, 0xD8, ..] => Some(".jpg"),
        _ => None,
    }
}
