//! Strength rules for new passwords.

/// Minimum number of characters in a new password.
pub const MIN_LENGTH: usize = 12;

/// Whether `password` satisfies the strength rules: at least
/// [`MIN_LENGTH`] characters with an uppercase letter, a lowercase letter,
/// a digit and a symbol.
pub fn meets_requirements(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}
