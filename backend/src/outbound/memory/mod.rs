//! In-process adapters for every repository port.
//!
//! Used when no database is configured and by the test suite. Each table is
//! a `BTreeMap` keyed by a monotonically assigned id behind a
//! `tokio::sync::RwLock`, so iteration order is insertion order.

use std::collections::BTreeMap;

mod comments;
mod news;
mod notes;
mod users;

pub use comments::InMemoryCommentRepository;
pub use news::InMemoryNewsRepository;
pub use notes::InMemoryNoteRepository;
pub use users::InMemoryUserRepository;

/// Rows of one table plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    /// Store the row built from a freshly assigned id.
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.entry(id).or_insert(build(id))
    }
}
