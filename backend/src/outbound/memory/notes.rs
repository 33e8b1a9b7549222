use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, Slug, UserId};

use super::Table;

/// Notes held in memory.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    table: RwLock<Table<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

fn slug_clash(table: &Table<Note>, slug: &Slug, except: Option<NoteId>) -> bool {
    table
        .rows
        .values()
        .any(|note| &note.slug == slug && Some(note.id) != except)
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|note| note.author == author)
            .cloned()
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|note| note.slug.as_ref() == slug)
            .cloned())
    }

    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        Ok(slug_clash(&*self.table.read().await, slug, except))
    }

    async fn insert(&self, draft: &NoteDraft, author: UserId) -> Result<Note, NoteRepositoryError> {
        let mut table = self.table.write().await;
        if slug_clash(&table, &draft.slug, None) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug.as_ref()));
        }
        let note = table.insert_with(|id| Note {
            id: NoteId::new(id),
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug: draft.slug.clone(),
            author,
        });
        Ok(note.clone())
    }

    async fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut table = self.table.write().await;
        if slug_clash(&table, &draft.slug, Some(id)) {
            return Err(NoteRepositoryError::duplicate_slug(draft.slug.as_ref()));
        }
        Ok(table.rows.get_mut(&id.get()).map(|note| {
            note.title.clone_from(&draft.title);
            note.text.clone_from(&draft.text);
            note.slug = draft.slug.clone();
            note.clone()
        }))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        Ok(self.table.write().await.rows.remove(&id.get()).is_some())
    }
}
