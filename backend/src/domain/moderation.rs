//! Comment moderation: a fixed blocklist checked by plain substring search.

use super::form::FieldErrors;

/// Words that may not appear anywhere in a comment.
pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Message attached to the `text` field of a rejected comment.
pub const WARNING: &str = "Не ругайтесь!";

/// `true` when `text` contains a blocklisted word. Case-sensitive.
pub fn contains_bad_words(text: &str) -> bool {
    BAD_WORDS.iter().any(|word| text.contains(word))
}

/// Reject `text` with a field warning when it contains a blocklisted word.
///
/// # Examples
/// ```
/// use bulletin::domain::moderation::{WARNING, check_comment};
///
/// assert!(check_comment("Отличная новость").is_ok());
/// let errors = check_comment("Какой-то текст, редиска, еще текст").unwrap_err();
/// assert_eq!(errors.get("text"), [WARNING]);
/// ```
pub fn check_comment(text: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if contains_bad_words(text) {
        errors.add("text", WARNING);
    }
    errors.into_result()
}
