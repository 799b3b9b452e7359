//! Filename sanitization for client-supplied names.

use unicode_normalization::UnicodeNormalization;

/// Device names Windows refuses to create as regular files.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Make a client-supplied filename safe to join onto a storage directory.
///
/// Accents are decomposed and the remaining non-ASCII characters dropped,
/// path separators become word breaks, words are joined with `_`, and anything
/// outside `[A-Za-z0-9_.-]` is removed. Leading and trailing dots and
/// underscores are stripped, so the result can never be `.`, `..` or a hidden
/// file. Returns `None` when nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_ascii_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    let stem = trimmed.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
    {
        return Some(format!("_{}", trimmed));
    }

    Some(trimmed.to_string())
}

/// Check that a requested filename names a single entry inside a directory.
///
/// Used on the serving routes, where the name comes from the URL.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
