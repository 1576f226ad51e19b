//! Profile photo history.
//!
//! A user keeps one previous photo so a replaced avatar can be restored.

use crate::error::CoreError;
use crate::uploads::PUBLIC_PREFIX;

/// The `(photo_url, previous_photo_url)` pair stored on a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPair {
    pub current: Option<String>,
    pub previous: Option<String>,
}

impl PhotoPair {
    pub fn new(current: Option<String>, previous: Option<String>) -> Self {
        Self { current, previous }
    }

    /// Apply an optional incoming photo URL.
    ///
    /// When the incoming URL differs from the current one, the current photo
    /// becomes the previous one. No incoming URL leaves the pair unchanged.
    pub fn replace_with(self, incoming: Option<String>) -> Self {
        match incoming {
            Some(url) if self.current.as_deref() != Some(url.as_str()) => Self {
                previous: self.current,
                current: Some(url),
            },
            _ => self,
        }
    }

    /// Check a photo URL typed in by the user.
    ///
    /// External links are always accepted. A link into the upload directory
    /// must already be one of this pair's photos, since anything that leaves
    /// the pair is deleted from disk.
    pub fn check_linked_url(&self, url: &str) -> Result<(), CoreError> {
        let own = self.current.as_deref() == Some(url) || self.previous.as_deref() == Some(url);
        if url.starts_with(PUBLIC_PREFIX) && !own {
            return Err(CoreError::Validation(
                "photo_url may only point to an uploaded file through the photo field".into(),
            ));
        }
        Ok(())
    }

    /// Swap current and previous so the user can toggle back again.
    pub fn revert(self) -> Result<Self, CoreError> {
        if self.previous.is_none() {
            return Err(CoreError::Validation(
                "No previous photo to revert to".into(),
            ));
        }
        Ok(Self {
            current: self.previous,
            previous: self.current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pair(current: Option<&str>, previous: Option<&str>) -> PhotoPair {
        PhotoPair::new(current.map(String::from), previous.map(String::from))
    }

    #[test]
    fn new_photo_pushes_current_to_previous() {
        let result = pair(Some("/uploads/a.png"), None).replace_with(Some("/uploads/b.png".into()));
        assert_eq!(result, pair(Some("/uploads/b.png"), Some("/uploads/a.png")));
    }

    #[test]
    fn same_photo_keeps_history() {
        let result = pair(Some("/uploads/a.png"), Some("/uploads/old.png"))
            .replace_with(Some("/uploads/a.png".into()));
        assert_eq!(result, pair(Some("/uploads/a.png"), Some("/uploads/old.png")));
    }

    #[test]
    fn no_incoming_photo_is_noop() {
        let original = pair(Some("/uploads/a.png"), Some("/uploads/old.png"));
        assert_eq!(original.clone().replace_with(None), original);
    }

    #[test]
    fn first_photo_has_no_previous() {
        let result = pair(None, None).replace_with(Some("/uploads/a.png".into()));
        assert_eq!(result, pair(Some("/uploads/a.png"), None));
    }

    #[test]
    fn revert_swaps_photos() {
        let result = pair(Some("/uploads/b.png"), Some("/uploads/a.png"))
            .revert()
            .unwrap();
        assert_eq!(result, pair(Some("/uploads/a.png"), Some("/uploads/b.png")));
    }

    #[test]
    fn linked_external_url_is_accepted() {
        let photos = pair(Some("/uploads/mine.png"), None);
        assert!(photos
            .check_linked_url("https://cdn.example.org/avatar.jpg")
            .is_ok());
    }

    #[test]
    fn linked_upload_must_be_own_photo() {
        let photos = pair(Some("/uploads/mine.png"), Some("/uploads/older.png"));
        assert!(photos.check_linked_url("/uploads/mine.png").is_ok());
        assert!(photos.check_linked_url("/uploads/older.png").is_ok());
        assert_matches!(
            photos.check_linked_url("/uploads/someone-elses.pdf"),
            Err(CoreError::Validation(_))
        );
        assert!(pair(None, None).check_linked_url("/uploads/x.png").is_err());
    }

    #[test]
    fn revert_without_previous_fails() {
        assert!(pair(Some("/uploads/b.png"), None).revert().is_err());
    }
}
