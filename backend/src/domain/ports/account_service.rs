//! Driving port for sign-up and login.
//!
//! Inbound adapters call it to register accounts and check credentials
//! without importing the backing store, so handler tests can substitute a
//! double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. A taken username is reported as a field error on
    /// `username`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Validate credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `unauthorized`, indistinguishably.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Look up the account a session refers to. `None` once it is gone.
    async fn find(&self, id: UserId) -> Result<Option<User>, Error>;
}
