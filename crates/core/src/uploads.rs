//! Naming and size rules for uploaded files (avatars, chat attachments).

use crate::error::CoreError;

/// URL prefix under which stored uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Default upload size cap (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Longest extension kept from the original file name.
const MAX_EXTENSION_LEN: usize = 10;

/// Extract a safe, lowercase extension from a client-supplied file name.
///
/// Only ASCII alphanumeric extensions are kept; anything else yields `None`
/// so a hostile name can never inject path separators.
pub fn safe_extension(original_name: &str) -> Option<String> {
    let (_, ext) = original_name.rsplit_once('.')?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Build the on-disk file name for an upload.
///
/// Convention: `{unix_millis}-{nonce}{.ext}`. The nonce keeps two uploads in
/// the same millisecond apart.
pub fn stored_file_name(original_name: &str, unix_millis: i64, nonce: &str) -> String {
    match safe_extension(original_name) {
        Some(ext) => format!("{unix_millis}-{nonce}.{ext}"),
        None => format!("{unix_millis}-{nonce}"),
    }
}

/// Public URL of a stored upload.
pub fn public_url(stored_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{stored_name}")
}

/// Recover the stored file name from a public URL produced by [`public_url`].
///
/// Returns `None` for URLs outside the upload prefix or containing path
/// separators, so callers never touch files outside the upload directory.
pub fn stored_name_from_url(url: &str) -> Option<&str> {
    let name = url.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return None;
    }
    Some(name)
}

/// Reject uploads larger than `max_bytes`.
pub fn validate_size(len: usize, max_bytes: usize) -> Result<(), CoreError> {
    if len > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large ({len} bytes). Maximum is {max_bytes} bytes"
        )));
    }
    Ok(())
}
