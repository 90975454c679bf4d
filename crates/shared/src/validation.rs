//! Common validation utilities.

use validator::ValidationError;

/// Minimum group name length after trimming.
const GROUP_NAME_MIN: usize = 2;

/// Maximum group name length after trimming.
const GROUP_NAME_MAX: usize = 50;

/// Validates that a group name is 2-50 characters after trimming.
pub fn validate_group_name(name: &str) -> Result<(), ValidationError> {
    let trimmed_len = name.trim().chars().count();
    if (GROUP_NAME_MIN..=GROUP_NAME_MAX).contains(&trimmed_len) {
        Ok(())
    } else {
        let mut err = ValidationError::new("group_name_length");
        err.message = Some("Group name must be between 2 and 50 characters".into());
        Err(err)
    }
}

/// Validates that a username is 3-30 characters of lowercase
/// alphanumerics and underscores.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let ok_len = (3..=30).contains(&username.chars().count());
    let ok_chars = username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if ok_len && ok_chars {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_format");
        err.message =
            Some("Username must be 3-30 lowercase letters, digits, or underscores".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_group_name_accepts_normal_names() {
        assert!(validate_group_name("Fight Club").is_ok());
        assert!(validate_group_name("AB").is_ok());
        assert!(validate_group_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_group_name_rejects_out_of_bounds() {
        assert!(validate_group_name("").is_err());
        assert!(validate_group_name("X").is_err());
        assert!(validate_group_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_group_name_measures_after_trim() {
        assert!(validate_group_name("  AB  ").is_ok());
        assert!(validate_group_name("  A  ").is_err());
        assert!(validate_group_name("     ").is_err());
    }

    #[test]
    fn test_validate_group_name_counts_chars_not_bytes() {
        // 50 multibyte characters is still within bounds
        assert!(validate_group_name(&"ü".repeat(50)).is_ok());
        assert!(validate_group_name(&"ü".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("cage_king").is_ok());
        assert!(validate_username("ko_queen_99").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("Capitalized").is_err());
        assert!(validate_username("with space").is_err());
    }
}
