//! Note use-cases: the slug resolver and the ownership gate over a
//! [`NoteRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::access::ensure_owner;
use crate::domain::notes::duplicate_slug_warning;
use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{Error, FieldErrors, Note, NoteDraft, NoteId, NoteInput, Slug, UserId};

fn map_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            warn!(%message, "note repository unavailable");
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
        NoteRepositoryError::DuplicateSlug { slug } => slug_taken(&slug),
    }
}

fn slug_taken(slug: &str) -> Error {
    let mut fields = FieldErrors::default();
    fields.add("slug", duplicate_slug_warning(slug));
    reject(fields)
}

fn reject(fields: FieldErrors) -> Error {
    debug!(?fields, "note submission rejected");
    Error::invalid_form(fields)
}

/// Note service implementing [`NotesCommand`] and [`NotesQuery`].
#[derive(Clone)]
pub struct NotesService<R> {
    notes: Arc<R>,
}

impl<R> NotesService<R> {
    /// Create a service over the note repository.
    pub fn new(notes: Arc<R>) -> Self {
        Self { notes }
    }
}

impl<R> NotesService<R>
where
    R: NoteRepository,
{
    async fn owned(&self, user: UserId, slug: &str) -> Result<Note, Error> {
        let note = self
            .notes
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("note not found"))?;
        ensure_owner(user, note.author, "note")?;
        Ok(note)
    }

    async fn ensure_slug_free(&self, slug: &Slug, except: Option<NoteId>) -> Result<(), Error> {
        let taken = self
            .notes
            .slug_taken(slug, except)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(slug_taken(slug.as_ref()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository,
{
    async fn create(&self, author: UserId, input: &NoteInput) -> Result<Note, Error> {
        let draft = NoteDraft::validate(input).map_err(reject)?;
        self.ensure_slug_free(&draft.slug, None).await?;
        self.notes
            .insert(&draft, author)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, user: UserId, slug: &str, input: &NoteInput) -> Result<Note, Error> {
        let note = self.owned(user, slug).await?;
        let draft = NoteDraft::validate(input).map_err(reject)?;
        self.ensure_slug_free(&draft.slug, Some(note.id)).await?;
        self.notes
            .update(note.id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("note not found"))
    }

    async fn delete(&self, user: UserId, slug: &str) -> Result<(), Error> {
        let note = self.owned(user, slug).await?;
        let deleted = self
            .notes
            .delete(note.id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found("note not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository,
{
    async fn list(&self, user: UserId) -> Result<Vec<Note>, Error> {
        self.notes
            .list_by_author(user)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, user: UserId, slug: &str) -> Result<Note, Error> {
        self.owned(user, slug).await
    }
}

#[cfg(test)]
#[path = "notes_service_tests.rs"]
mod tests;
