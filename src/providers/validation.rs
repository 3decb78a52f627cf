use crate::errors::InternalError;

pub const USERNAME_MAX_LEN: usize = 150;
pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const STATUS_MAX_LEN: usize = 50;

/// Reject empty or whitespace-only values
pub fn require_non_empty(field: &str, value: &str) -> Result<(), InternalError> {
    if value.trim().is_empty() {
        return Err(InternalError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

/// Reject values longer than `max` characters
pub fn require_max_len(field: &str, value: &str, max: usize) -> Result<(), InternalError> {
    if value.chars().count() > max {
        return Err(InternalError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), InternalError> {
    require_non_empty("username", username)?;
    require_max_len("username", username, USERNAME_MAX_LEN)
}

pub fn validate_password(password: &str) -> Result<(), InternalError> {
    if password.is_empty() {
        return Err(InternalError::validation("password", "password is required"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), InternalError> {
    require_non_empty("title", title)?;
    require_max_len("title", title, TITLE_MAX_LEN)
}

pub fn validate_description(description: &str) -> Result<(), InternalError> {
    require_max_len("description", description, DESCRIPTION_MAX_LEN)
}

pub fn validate_status(status: &str) -> Result<(), InternalError> {
    require_non_empty("status", status)?;
    require_max_len("status", status, STATUS_MAX_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_rejected() {
        assert!(validate_title("   ").is_err());
        assert!(validate_username("").is_err());
        assert!(validate_status("\t").is_err());
        assert!(require_non_empty("content", " \n").is_err());
    }

    #[test]
    fn test_password_whitespace_is_allowed() {
        assert!(validate_password(" ").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_length_limits_count_characters() {
        assert!(validate_title(&"é".repeat(TITLE_MAX_LEN)).is_ok());
        assert!(validate_title(&"a".repeat(TITLE_MAX_LEN + 1)).is_err());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_LEN)).is_ok());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_LEN + 1)).is_err());
        assert!(validate_username(&"u".repeat(USERNAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_validation_error_names_the_field() {
        match validate_title("") {
            Err(InternalError::Validation { field, message }) => {
                assert_eq!(field, "title");
                assert_eq!(message, "title is required");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
