//! Credentials and password digests.
//!
//! Inbound adapters hand raw strings to these constructors; services only see
//! validated values. Passwords are held in [`Zeroizing`] buffers and stored as
//! salted SHA-256 digests in the `sha256$<salt>$<hex>` format.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::form::FieldErrors;
use super::user::Username;

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN: usize = 8;

const DIGEST_SCHEME: &str = "sha256";
const SALT_BYTES: usize = 16;

/// Errors returned when a login payload is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts(" ada ", "s3cret!").unwrap();
    /// assert_eq!(creds.username(), "ada");
    /// ```
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Salted password digest as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` under a fresh random salt.
    pub fn create(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, &hex::encode(salt))
    }

    fn with_salt(password: &str, salt: &str) -> Self {
        let digest = digest_hex(salt, password);
        Self(format!("{DIGEST_SCHEME}${salt}${digest}"))
    }

    /// Rehydrate a stored digest.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Stored representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check `password` against this digest.
    ///
    /// Malformed digests never verify.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::PasswordDigest;
    ///
    /// let digest = PasswordDigest::create("correct horse");
    /// assert!(digest.verify("correct horse"));
    /// assert!(!digest.verify("battery staple"));
    /// ```
    pub fn verify(&self, password: &str) -> bool {
        let mut parts = self.0.splitn(3, '$');
        let (Some(scheme), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if scheme != DIGEST_SCHEME {
            return false;
        }
        constant_time_eq(digest_hex(salt, password).as_bytes(), expected.as_bytes())
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Sign-up submission after validation.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Requested login name.
    pub username: Username,
    /// Chosen password.
    pub password: Zeroizing<String>,
}

impl Registration {
    /// Validate a sign-up form: username, password and its confirmation.
    pub fn validate(username: &str, password1: &str, password2: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = match Username::for_signup(username) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.add("username", err.to_string());
                None
            }
        };

        if password1.is_empty() {
            errors.add("password1", "This field is required.");
        } else {
            if password1.chars().count() < PASSWORD_MIN {
                errors.add(
                    "password1",
                    format!("This password is too short. It must contain at least {PASSWORD_MIN} characters."),
                );
            }
            if password1.chars().all(|ch| ch.is_ascii_digit()) {
                errors.add("password1", "This password is entirely numeric.");
            }
        }
        if password1 != password2 {
            errors.add("password2", "The two password fields didn’t match.");
        }

        let (Some(username), true) = (username, errors.is_empty()) else {
            return Err(errors);
        };
        Ok(Self {
            username,
            password: Zeroizing::new(password1.to_owned()),
        })
    }
}
