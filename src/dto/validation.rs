//! Validation helpers for DTOs and path segments.

use validator::ValidationError;

/// Longest accepted user name, in characters.
pub const MAX_USER_NAME_CHARS: usize = 64;

/// Message returned when the name is missing or blank.
pub const NAME_REQUIRED_MESSAGE: &str = "Name is required";

/// Validates a user name, ignoring surrounding whitespace.
///
/// Names become file names and HTML content, so only letters, digits, spaces, `-`, `_` and `.`
/// are accepted, and a name may not start with `.`.
///
/// # Examples
///
/// ```ignore
/// validate_user_name("Alice")       // Ok
/// validate_user_name("  ")          // Err - blank
/// validate_user_name("../etc")      // Err - separator
/// validate_user_name("<b>Bob</b>")  // Err - markup
/// ```
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        let mut err = ValidationError::new("name_required");
        err.message = Some(NAME_REQUIRED_MESSAGE.into());
        return Err(err);
    }

    let length = name.chars().count();
    if length > MAX_USER_NAME_CHARS {
        let mut err = ValidationError::new("name_length");
        err.message = Some(
            format!("Name must be at most {MAX_USER_NAME_CHARS} characters (got {length})").into(),
        );
        return Err(err);
    }

    if name.starts_with('.')
        || !name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
    {
        let mut err = ValidationError::new("name_format");
        err.message = Some(
            "Name may only contain letters, digits, spaces, '-', '_' and '.' and may not start with '.'"
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Whether `slug` can name a game page (`[A-Za-z0-9_-]+`).
pub fn is_game_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name_valid() {
        assert!(validate_user_name("Alice").is_ok());
        assert!(validate_user_name("  Alice  ").is_ok());
        assert!(validate_user_name("Jean-Luc O.Picard_2").is_ok());
        assert!(validate_user_name("Zoë").is_ok());
        assert!(validate_user_name(&"a".repeat(MAX_USER_NAME_CHARS)).is_ok());
    }

    #[test]
    fn test_validate_user_name_blank() {
        let err = validate_user_name("   ").unwrap_err();
        assert_eq!(err.code, "name_required");
        assert_eq!(err.message.unwrap(), NAME_REQUIRED_MESSAGE);
        assert!(validate_user_name("").is_err());
    }

    #[test]
    fn test_validate_user_name_too_long() {
        let err = validate_user_name(&"a".repeat(MAX_USER_NAME_CHARS + 1)).unwrap_err();
        assert_eq!(err.code, "name_length");
    }

    #[test]
    fn test_validate_user_name_invalid_format() {
        for name in ["../names", "a/b", "<script>", "Bob\"", ".hidden", "tab\tname"] {
            let err = validate_user_name(name).unwrap_err();
            assert_eq!(err.code, "name_format", "{name} should be rejected");
        }
    }

    #[test]
    fn test_is_game_slug() {
        assert!(is_game_slug("snake"));
        assert!(is_game_slug("tic-tac-toe"));
        assert!(is_game_slug("color_memory2"));
        assert!(!is_game_slug(""));
        assert!(!is_game_slug(".."));
        assert!(!is_game_slug("../index"));
        assert!(!is_game_slug("snake.html"));
    }
}
