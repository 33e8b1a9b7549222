//! Driving port for reading notes.

use async_trait::async_trait;

use crate::domain::{Error, Note, UserId};

/// Domain use-case port for note lookups scoped to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Every note the caller wrote.
    async fn list(&self, user: UserId) -> Result<Vec<Note>, Error>;

    /// One of the caller's notes; foreign and missing notes are `not_found`.
    async fn get(&self, user: UserId, slug: &str) -> Result<Note, Error>;
}
