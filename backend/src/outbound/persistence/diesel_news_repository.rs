//! PostgreSQL-backed `NewsRepository`.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewsRepository, NewsRepositoryError};
use crate::domain::{News, NewsId};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{NewNewsRow, NewsRow};
use super::pool::{DbPool, PoolError};
use super::schema::news;

/// Diesel-backed implementation of the `NewsRepository` port.
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NewsRepositoryError {
    NewsRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> NewsRepositoryError {
    match classify(error) {
        StoreFailure::Connection(message) => NewsRepositoryError::connection(message),
        StoreFailure::UniqueViolation | StoreFailure::ForeignKeyViolation => {
            NewsRepositoryError::query("constraint violation")
        }
        StoreFailure::Query(message) => NewsRepositoryError::query(message),
    }
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        Self {
            id: NewsId::new(row.id),
            title: row.title,
            text: row.text,
            date: row.date,
        }
    }
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = news::table
            .order((news::date.desc(), news::id.desc()))
            .limit(limit)
            .select(NewsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    async fn count(&self) -> Result<usize, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = news::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        usize::try_from(total).map_err(|_| NewsRepositoryError::query("negative row count"))
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = news::table
            .find(id.get())
            .select(NewsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(News::from))
    }

    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: NaiveDate,
    ) -> Result<News, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(news::table)
            .values(&NewNewsRow { title, text, date })
            .returning(NewsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}
