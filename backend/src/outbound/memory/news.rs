use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::ports::{NewsRepository, NewsRepositoryError};
use crate::domain::{News, NewsId};

use super::Table;

/// News items held in memory.
#[derive(Debug, Default)]
pub struct InMemoryNewsRepository {
    table: RwLock<Table<News>>,
}

impl InMemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError> {
        let table = self.table.read().await;
        let mut items: Vec<News> = table.rows.values().cloned().collect();
        // Newest date first; same-day items keep newest insertion first.
        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        items.truncate(limit);
        Ok(items)
    }

    async fn count(&self) -> Result<usize, NewsRepositoryError> {
        Ok(self.table.read().await.rows.len())
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        Ok(self.table.read().await.rows.get(&id.get()).cloned())
    }

    async fn insert(
        &self,
        title: &str,
        text: &str,
        date: NaiveDate,
    ) -> Result<News, NewsRepositoryError> {
        let mut table = self.table.write().await;
        let news = table.insert_with(|id| News {
            id: NewsId::new(id),
            title: title.to_owned(),
            text: text.to_owned(),
            date,
        });
        Ok(news.clone())
    }
}
