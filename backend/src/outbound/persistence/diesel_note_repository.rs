//! PostgreSQL-backed `NoteRepository`.
//!
//! The unique index on `notes.slug` backs up the service-level check; a
//! violation is reported as `DuplicateSlug`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, Slug, UserId};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{NewNoteRow, NoteChanges, NoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Diesel-backed implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    NoteRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, slug: &str) -> NoteRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => NoteRepositoryError::connection(message),
        StoreFailure::UniqueViolation => NoteRepositoryError::duplicate_slug(slug),
        StoreFailure::ForeignKeyViolation => NoteRepositoryError::query("author does not exist"),
        StoreFailure::Query(message) => NoteRepositoryError::query(message),
    }
}

fn row_to_note(row: NoteRow) -> Result<Note, NoteRepositoryError> {
    let slug = Slug::parse(&row.slug)
        .map_err(|err| NoteRepositoryError::query(format!("stored slug invalid: {err}")))?;
    Ok(Note {
        id: NoteId::new(row.id),
        title: row.title,
        text: row.text,
        slug,
        author: UserId::new(row.author_id),
    })
}

fn changes(draft: &NoteDraft) -> NoteChanges<'_> {
    NoteChanges {
        title: &draft.title,
        text: &draft.text,
        slug: draft.slug.as_ref(),
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = notes::table
            .filter(notes::author_id.eq(author.get()))
            .order(notes::id.asc())
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ""))?;
        rows.into_iter().map(row_to_note).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = notes::table
            .filter(notes::slug.eq(slug))
            .select(NoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, slug))?;
        row.map(row_to_note).transpose()
    }

    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = notes::table
            .filter(notes::slug.eq(slug.as_ref()))
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(id) = except {
            query = query.filter(notes::id.ne(id.get()));
        }
        let clashes: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, slug.as_ref()))?;
        Ok(clashes > 0)
    }

    async fn insert(&self, draft: &NoteDraft, author: UserId) -> Result<Note, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            changes: changes(draft),
            author_id: author.get(),
        };
        let stored = diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, draft.slug.as_ref()))?;
        row_to_note(stored)
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = diesel::update(notes::table.find(id.get()))
            .set(&changes(draft))
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, draft.slug.as_ref()))?;
        stored.map(row_to_note).transpose()
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(notes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ""))?;
        Ok(removed > 0)
    }
}
