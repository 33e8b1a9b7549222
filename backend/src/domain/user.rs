//! Account identity.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 150;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Blank username.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username longer than [`USERNAME_MAX`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Username with characters sign-up does not accept.
    #[error("username may only contain letters, digits and @/./+/-/_")]
    UsernameInvalidCharacters,
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - Non-empty once trimmed, stored trimmed.
/// - At most [`USERNAME_MAX`] characters.
///
/// Names created by administrators or fixtures may contain spaces; the
/// stricter sign-up character set is checked by [`Username::for_signup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

fn signup_charset() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\w.@+-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

impl Username {
    /// Validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a username chosen at sign-up.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::Username;
    ///
    /// assert!(Username::for_signup("ada.lovelace").is_ok());
    /// assert!(Username::for_signup("Ада").is_ok());
    /// assert!(Username::for_signup("ada lovelace").is_err());
    /// ```
    pub fn for_signup(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let name = Self::new(raw)?;
        if !signup_charset().is_match(&name.0) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(name)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    #[schema(value_type = String, example = "Автор")]
    pub username: Username,
}
