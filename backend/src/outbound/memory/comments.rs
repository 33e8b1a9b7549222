use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewsId, UserId};

use super::Table;

/// Comments held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    table: RwLock<Table<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let table = self.table.read().await;
        let mut thread: Vec<Comment> = table
            .rows
            .values()
            .filter(|comment| comment.news == news)
            .cloned()
            .collect();
        thread.sort_by_key(|comment| (comment.created, comment.id));
        Ok(thread)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.table.read().await.rows.get(&id.get()).cloned())
    }

    async fn insert(
        &self,
        news: NewsId,
        author: UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut table = self.table.write().await;
        let comment = table.insert_with(|id| Comment {
            id: CommentId::new(id),
            news,
            author,
            text: text.to_owned(),
            created,
        });
        Ok(comment.clone())
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id.get()).map(|comment| {
            text.clone_into(&mut comment.text);
            comment.clone()
        }))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(self.table.write().await.rows.remove(&id.get()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn threads_are_ordered_by_creation_time() {
        let repo = InMemoryCommentRepository::new();
        let news = NewsId::new(1);
        let author = UserId::new(1);
        let now = Utc::now();
        repo.insert(news, author, "второй", now + TimeDelta::seconds(1))
            .await
            .expect("insert");
        repo.insert(news, author, "первый", now).await.expect("insert");
        repo.insert(NewsId::new(2), author, "чужой", now)
            .await
            .expect("insert");

        let thread = repo.list_for_news(news).await.expect("thread");
        let texts: Vec<_> = thread.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["первый", "второй"]);
    }
}
