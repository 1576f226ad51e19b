//! Well-known role and student category constants.
//!
//! These must match the `CHECK` constraints on `users.role` and
//! `users.category` in `20260301000001_create_users.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USTAZ: &str = "USTAZ";
pub const ROLE_STUDENT: &str = "STUDENT";

/// Student just starting memorization.
pub const CATEGORY_BEGINNER: &str = "Beginner";
/// Student who has completed memorization (hafidh).
pub const CATEGORY_HAFIDH: &str = "Hafidh";
/// Student in the revision (muraja) track.
pub const CATEGORY_MURAJA: &str = "Muraja";

/// Category assigned to students who register without choosing one.
pub const DEFAULT_CATEGORY: &str = CATEGORY_BEGINNER;

/// Roles a visitor may pick on the registration form.
const REGISTRABLE_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_USTAZ];

const VALID_CATEGORIES: &[&str] = &[CATEGORY_BEGINNER, CATEGORY_HAFIDH, CATEGORY_MURAJA];

/// Validate that `role` can be chosen at self-registration.
///
/// Admin accounts are never self-registered.
pub fn validate_registrable_role(role: &str) -> Result<(), CoreError> {
    if REGISTRABLE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {REGISTRABLE_ROLES:?}"
        )))
    }
}

/// Resolve the category to store for a new account.
///
/// Students get the requested category (or [`DEFAULT_CATEGORY`]); every
/// other role stores `None` and may not send one.
pub fn resolve_category(role: &str, category: Option<&str>) -> Result<Option<String>, CoreError> {
    match (role, category) {
        (ROLE_STUDENT, None) => Ok(Some(DEFAULT_CATEGORY.to_string())),
        (ROLE_STUDENT, Some(c)) if VALID_CATEGORIES.contains(&c) => Ok(Some(c.to_string())),
        (ROLE_STUDENT, Some(c)) => Err(CoreError::Validation(format!(
            "Invalid category '{c}'. Must be one of: {VALID_CATEGORIES:?}"
        ))),
        (_, None) => Ok(None),
        (_, Some(_)) => Err(CoreError::Validation(
            "Only students have a category".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn student_and_ustaz_are_registrable() {
        assert!(validate_registrable_role(ROLE_STUDENT).is_ok());
        assert!(validate_registrable_role(ROLE_USTAZ).is_ok());
    }

    #[test]
    fn admin_is_not_registrable() {
        assert_matches!(
            validate_registrable_role(ROLE_ADMIN),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(validate_registrable_role("student").is_err());
    }

    #[test]
    fn student_without_category_gets_default() {
        let category = resolve_category(ROLE_STUDENT, None).unwrap();
        assert_eq!(category.as_deref(), Some(CATEGORY_BEGINNER));
    }

    #[test]
    fn student_keeps_valid_category() {
        let category = resolve_category(ROLE_STUDENT, Some(CATEGORY_MURAJA)).unwrap();
        assert_eq!(category.as_deref(), Some(CATEGORY_MURAJA));
    }

    #[test]
    fn student_with_unknown_category_is_rejected() {
        assert!(resolve_category(ROLE_STUDENT, Some("Expert")).is_err());
    }

    #[test]
    fn ustaz_has_no_category() {
        assert_eq!(resolve_category(ROLE_USTAZ, None).unwrap(), None);
        assert!(resolve_category(ROLE_USTAZ, Some(CATEGORY_HAFIDH)).is_err());
    }
}
