//! Port for note persistence.
//!
//! Adapters enforce slug uniqueness themselves as well: a racing insert that
//! slips past [`NoteRepository::slug_taken`] fails with
//! [`NoteRepositoryError::DuplicateSlug`].

use async_trait::async_trait;

use crate::domain::{Note, NoteDraft, NoteId, Slug, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// Slug already used by another note.
        DuplicateSlug { slug: String } => "slug already in use: {slug}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes written by `author`, oldest first.
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Fetch a note by slug regardless of author.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError>;

    /// `true` when a note other than `except` already uses `slug`.
    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError>;

    /// Store a new note.
    async fn insert(&self, draft: &NoteDraft, author: UserId) -> Result<Note, NoteRepositoryError>;

    /// Replace title, text and slug of an existing note.
    ///
    /// Returns `None` when the note no longer exists.
    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError>;

    /// Remove a note. Returns `false` when it did not exist.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError>;
}
