//! Direct-message rules: attachment classification and content checks.

use crate::error::CoreError;
use crate::types::DbId;

pub const ATTACHMENT_IMAGE: &str = "IMAGE";
pub const ATTACHMENT_FILE: &str = "FILE";

/// Maximum length of a message body in characters.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Kind of file attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    File,
}

impl AttachmentKind {
    /// Classify an upload by its MIME type. Anything `image/*` is an image.
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime {
            Some(m) if m.trim().to_ascii_lowercase().starts_with("image/") => Self::Image,
            _ => Self::File,
        }
    }

    /// Database representation stored in `messages.attachment_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => ATTACHMENT_IMAGE,
            Self::File => ATTACHMENT_FILE,
        }
    }
}

/// Validate a message body.
///
/// A message needs non-blank content unless it carries an attachment, in
/// which case the content may be empty.
pub fn validate_message(content: &str, has_attachment: bool) -> Result<(), CoreError> {
    if content.trim().is_empty() && !has_attachment {
        return Err(CoreError::Validation(
            "Message must have content or an attachment".into(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(CoreError::Validation(format!(
            "Message content exceeds {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate that a user is not messaging themselves.
pub fn validate_participants(sender_id: DbId, receiver_id: DbId) -> Result<(), CoreError> {
    if sender_id == receiver_id {
        return Err(CoreError::Validation(
            "Cannot send a message to yourself".into(),
        ));
    }
    Ok(())
}

/// Name of the real-time room a user's sockets join.
pub fn room_for(user_id: DbId) -> String {
    format!("user:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_is_image() {
        assert_eq!(AttachmentKind::from_mime(Some("image/png")), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_mime(Some("IMAGE/JPEG")), AttachmentKind::Image);
    }

    #[test]
    fn other_mime_is_file() {
        assert_eq!(AttachmentKind::from_mime(Some("application/pdf")), AttachmentKind::File);
        assert_eq!(AttachmentKind::from_mime(None), AttachmentKind::File);
    }

    #[test]
    fn kind_db_strings() {
        assert_eq!(AttachmentKind::Image.as_str(), "IMAGE");
        assert_eq!(AttachmentKind::File.as_str(), "FILE");
    }

    #[test]
    fn empty_content_without_attachment_fails() {
        assert!(validate_message("   ", false).is_err());
    }

    #[test]
    fn empty_content_with_attachment_passes() {
        assert!(validate_message("", true).is_ok());
    }

    #[test]
    fn overlong_content_fails() {
        let body = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert!(validate_message(&body, false).is_err());
    }

    #[test]
    fn self_messaging_is_rejected() {
        assert!(validate_participants(3, 3).is_err());
        assert!(validate_participants(3, 4).is_ok());
    }

    #[test]
    fn room_name_is_per_user() {
        assert_eq!(room_for(12), "user:12");
    }
}
