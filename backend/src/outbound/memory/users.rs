use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::Table;

/// Accounts held in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &PasswordDigest,
    ) -> Result<User, UserPersistenceError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|row| &row.user.username == username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let row = table.insert_with(|id| UserRecord {
            user: User {
                id: UserId::new(id),
                username: username.clone(),
            },
            password: password.clone(),
        });
        Ok(row.user.clone())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.user.username.as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.get()).map(|row| row.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn usernames_are_unique() {
        let repo = InMemoryUserRepository::new();
        let name = Username::new("ada").expect("valid");
        let digest = PasswordDigest::create("analytical-engine");

        let first = repo.create(&name, &digest).await.expect("created");
        let second = repo.create(&name, &digest).await;

        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second, Err(UserPersistenceError::duplicate_username("ada")));
        let found = repo.find_by_id(first.id).await.expect("lookup");
        assert_eq!(found, Some(first));
    }
}
