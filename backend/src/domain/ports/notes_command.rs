//! Driving port for note mutations.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteInput, UserId};

/// Domain use-case port for creating, editing and deleting notes.
///
/// Validation failures come back as [`Error::invalid_form`]; notes owned by
/// someone else are reported as `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note owned by `author`.
    async fn create(&self, author: UserId, input: &NoteInput) -> Result<Note, Error>;

    /// Edit the caller's note identified by `slug`.
    async fn update(&self, user: UserId, slug: &str, input: &NoteInput) -> Result<Note, Error>;

    /// Delete the caller's note identified by `slug`.
    async fn delete(&self, user: UserId, slug: &str) -> Result<(), Error>;
}
