//! String-level path helpers.
//!
//! Navigation keeps paths as plain strings (they are shown to the user and
//! compared for equality), so these helpers never touch the file system and
//! never fail.

use std::path::MAIN_SEPARATOR;

const FILE_SCHEME: &str = "file://";

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Append `name` to `dir` with the platform separator.
///
/// `..` segments are kept as-is.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with(is_separator) {
        format!("{dir}{name}")
    } else {
        format!("{dir}{MAIN_SEPARATOR}{name}")
    }
}

/// Drop the last segment of `path`.
///
/// Returns `None` when there is nothing left to ascend to: a bare name, an
/// empty string, or a root such as `/` or `C:`.
pub fn parent_of(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return None;
    }

    let cut = trimmed.rfind(is_separator)?;
    let parent = trimmed[..cut].trim_end_matches(is_separator);
    if parent.is_empty() {
        // "/music" -> "/"
        Some(trimmed[..=cut].to_string())
    } else {
        Some(parent.to_string())
    }
}

/// Last segment of `path`; a root displays as itself.
pub fn display_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return path;
    }
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
}

/// File name without its final extension (`"01 Intro.flac"` -> `"01 Intro"`).
pub fn title_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => &name[..dot],
        _ => name,
    }
}

/// Map a local path to the source URI handed to the audio device.
///
/// The URI only travels between this resolver and the audio thread, so the
/// path is not percent-encoded.
pub fn source_uri(path: &str) -> String {
    format!("{FILE_SCHEME}{path}")
}

/// Inverse of [`source_uri`]. Only `file://` URIs are understood.
pub fn path_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(FILE_SCHEME).filter(|p| !p.is_empty())
}
