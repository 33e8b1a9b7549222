//! News feed and comment use-cases.
//!
//! Comment text passes the moderation filter before anything is stored.
//! Creation timestamps come from the injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::access::ensure_owner;
use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, NewsQuery, NewsRepository,
    NewsRepositoryError,
};
use crate::domain::{
    Comment, CommentDraft, CommentId, CommentInput, Error, News, NewsDetail, NewsId, NewsSeed,
    UserId,
};

fn map_news_error(error: NewsRepositoryError) -> Error {
    match error {
        NewsRepositoryError::Connection { message } => {
            warn!(%message, "news repository unavailable");
            Error::service_unavailable(format!("news repository unavailable: {message}"))
        }
        NewsRepositoryError::Query { message } => {
            Error::internal(format!("news repository error: {message}"))
        }
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            warn!(%message, "comment repository unavailable");
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::NewsNotFound { news_id } => {
            Error::not_found(format!("news {news_id} not found"))
        }
    }
}

/// News service implementing [`NewsQuery`] and [`CommentsCommand`].
#[derive(Clone)]
pub struct NewsService<N, C> {
    news: Arc<N>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
    page_size: usize,
}

impl<N, C> NewsService<N, C> {
    /// Create a service showing `page_size` items on the home page.
    pub fn new(news: Arc<N>, comments: Arc<C>, clock: Arc<dyn Clock>, page_size: usize) -> Self {
        Self {
            news,
            comments,
            clock,
            page_size,
        }
    }
}

impl<N, C> NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    /// Store fixture items, dating undated ones today.
    pub async fn seed(&self, seeds: &[NewsSeed]) -> Result<Vec<News>, Error> {
        let today = self.clock.utc().date_naive();
        let mut stored = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let news = self
                .news
                .insert(&seed.title, &seed.text, seed.date.unwrap_or(today))
                .await
                .map_err(map_news_error)?;
            stored.push(news);
        }
        Ok(stored)
    }

    /// Whether any news item is stored, however many a page shows.
    pub async fn has_news(&self) -> Result<bool, Error> {
        let total = self.news.count().await.map_err(map_news_error)?;
        Ok(total > 0)
    }

    async fn require_news(&self, id: NewsId) -> Result<News, Error> {
        self.news
            .find_by_id(id)
            .await
            .map_err(map_news_error)?
            .ok_or_else(|| Error::not_found(format!("news {id} not found")))
    }

    async fn owned(&self, user: UserId, id: CommentId) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("comment not found"))?;
        ensure_owner(user, comment.author, "comment")?;
        Ok(comment)
    }
}

fn moderate(input: &CommentInput) -> Result<CommentDraft, Error> {
    CommentDraft::validate(input).map_err(|fields| {
        debug!(?fields, "comment rejected");
        Error::invalid_form(fields)
    })
}

#[async_trait]
impl<N, C> NewsQuery for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn home(&self) -> Result<Vec<News>, Error> {
        self.news
            .latest(self.page_size)
            .await
            .map_err(map_news_error)
    }

    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error> {
        let news = self.require_news(id).await?;
        let comments = self
            .comments
            .list_for_news(id)
            .await
            .map_err(map_comment_error)?;
        Ok(NewsDetail { news, comments })
    }
}

#[async_trait]
impl<N, C> CommentsCommand for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn add(&self, news: NewsId, author: UserId, input: &CommentInput) -> Result<Comment, Error> {
        self.require_news(news).await?;
        let draft = moderate(input)?;
        self.comments
            .insert(news, author, &draft.text, self.clock.utc())
            .await
            .map_err(map_comment_error)
    }

    async fn get_owned(&self, user: UserId, id: CommentId) -> Result<Comment, Error> {
        self.owned(user, id).await
    }

    async fn edit(&self, user: UserId, id: CommentId, input: &CommentInput) -> Result<Comment, Error> {
        let comment = self.owned(user, id).await?;
        let draft = moderate(input)?;
        self.comments
            .update_text(comment.id, &draft.text)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("comment not found"))
    }

    async fn delete(&self, user: UserId, id: CommentId) -> Result<NewsId, Error> {
        let comment = self.owned(user, id).await?;
        let deleted = self
            .comments
            .delete(comment.id)
            .await
            .map_err(map_comment_error)?;
        if !deleted {
            return Err(Error::not_found("comment not found"));
        }
        Ok(comment.news)
    }
}

#[cfg(test)]
#[path = "news_service_tests.rs"]
mod tests;
