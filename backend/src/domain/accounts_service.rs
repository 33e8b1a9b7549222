//! Account use-cases over a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{AccountService, UserPersistenceError, UserRepository};
use crate::domain::{
    Error, FieldErrors, LoginCredentials, PasswordDigest, Registration, User, UserId,
};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            debug!(%username, "sign-up rejected: username taken");
            let mut fields = FieldErrors::default();
            fields.add("username", "A user with that username already exists.");
            Error::invalid_form(fields)
        }
    }
}

/// Account service implementing [`AccountService`].
#[derive(Clone)]
pub struct AccountsService<R> {
    users: Arc<R>,
}

impl<R> AccountsService<R> {
    /// Create a service over the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> AccountService for AccountsService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let taken = self
            .users
            .find_by_username(registration.username.as_ref())
            .await
            .map_err(map_repository_error)?
            .is_some();
        if taken {
            return Err(map_repository_error(UserPersistenceError::duplicate_username(
                registration.username.as_ref(),
            )));
        }
        let digest = PasswordDigest::create(&registration.password);
        self.users
            .create(&registration.username, &digest)
            .await
            .map_err(map_repository_error)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let record = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?;
        match record {
            Some(record) if record.password.verify(credentials.password()) => Ok(record.user),
            _ => Err(Error::unauthorized(
                "Please enter a correct username and password. Note that both fields may be case-sensitive.",
            )),
        }
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_repository_error)
    }
}
