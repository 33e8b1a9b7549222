//! Port for comment persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, CommentId, NewsId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The news item the comment belongs to does not exist.
        NewsNotFound { news_id: i64 } => "news item not found: {news_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Thread of `news`, ordered by creation time ascending.
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Fetch one comment.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Store a new comment.
    async fn insert(
        &self,
        news: NewsId,
        author: UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Replace a comment's text. Returns `None` when it no longer exists.
    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Remove a comment. Returns `false` when it did not exist.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;
}
