//! Validation of identifying fields entered by the operator.
//!
//! ## Summary
//! Identifying fields (names, email) are checked at the edge, before any state
//! mutation or network call. Each check yields a human-readable message meant
//! to be shown next to the offending field.

/// Characters never accepted in an identifying field.
pub const FORBIDDEN_CHARACTERS: &[char] = &['<', '>', '"', '\'', ';', '\\', '/', '{', '}', '|'];

/// Checks a required identifying field.
///
/// Returns the message to display, or `None` when the value is acceptable.
#[must_use]
pub fn check_identifying(value: &str, required: bool) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return required.then(|| "This field is required".to_string());
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| c.is_control() || FORBIDDEN_CHARACTERS.contains(c))
    {
        return Some(if bad.is_control() {
            "Control characters are not allowed".to_string()
        } else {
            format!("Character '{bad}' is not allowed")
        });
    }

    None
}

/// Checks an email address: identifying-field rules plus exactly one `@`
/// with text on both sides.
#[must_use]
pub fn check_email(value: &str) -> Option<String> {
    if let Some(message) = check_identifying(value, true) {
        return Some(message);
    }

    let trimmed = value.trim();
    let mut parts = trimmed.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => None,
        _ => Some("Enter a valid email address".to_string()),
    }
}
