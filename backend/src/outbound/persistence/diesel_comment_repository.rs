//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewsId, UserId};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, news: NewsId) -> CommentRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => CommentRepositoryError::connection(message),
        StoreFailure::ForeignKeyViolation => CommentRepositoryError::news_not_found(news.get()),
        StoreFailure::UniqueViolation => CommentRepositoryError::query("constraint violation"),
        StoreFailure::Query(message) => CommentRepositoryError::query(message),
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            news: NewsId::new(row.news_id),
            author: UserId::new(row.author_id),
            text: row.text,
            created: row.created,
        }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = comments::table
            .filter(comments::news_id.eq(news.get()))
            .order((comments::created.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, news))?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, NewsId::new(0)))?;
        Ok(row.map(Comment::from))
    }

    async fn insert(
        &self,
        news: NewsId,
        author: UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            news_id: news.get(),
            author_id: author.get(),
            text,
            created,
        };
        let stored = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, news))?;
        Ok(stored.into())
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(comments::table.find(id.get()))
            .set(comments::text.eq(text))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, NewsId::new(0)))?;
        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, NewsId::new(0)))?;
        Ok(removed > 0)
    }
}
