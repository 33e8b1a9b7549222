//! Driving port for the public news pages.

use async_trait::async_trait;

use crate::domain::{Error, News, NewsDetail, NewsId};

/// Domain use-case port for reading news.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// Home page items, newest first, truncated to the configured page size.
    async fn home(&self) -> Result<Vec<News>, Error>;

    /// One item with its comment thread.
    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error>;
}
