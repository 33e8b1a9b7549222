//! Port for reading and seeding the news feed.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{News, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by news repository adapters.
    pub enum NewsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "news repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "news repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Up to `limit` items, newest date first.
    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError>;

    /// Number of stored items.
    async fn count(&self) -> Result<usize, NewsRepositoryError>;

    /// Fetch one item.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError>;

    /// Store a new item.
    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: NaiveDate,
    ) -> Result<News, NewsRepositoryError>;
}
