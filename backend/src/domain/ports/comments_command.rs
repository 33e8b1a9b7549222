//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentInput, Error, NewsId, UserId};

/// Domain use-case port for the comment section.
///
/// Text containing blocklisted words is rejected with
/// [`Error::invalid_form`] and nothing is stored. Comments owned by someone
/// else are reported as `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Comment on `news` as `author`.
    async fn add(&self, news: NewsId, author: UserId, input: &CommentInput) -> Result<Comment, Error>;

    /// One of the caller's comments, for the edit and delete pages.
    async fn get_owned(&self, user: UserId, id: CommentId) -> Result<Comment, Error>;

    /// Replace the text of the caller's comment.
    async fn edit(&self, user: UserId, id: CommentId, input: &CommentInput) -> Result<Comment, Error>;

    /// Delete the caller's comment and return the news item it belonged to.
    async fn delete(&self, user: UserId, id: CommentId) -> Result<NewsId, Error>;
}
