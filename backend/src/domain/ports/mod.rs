//! Domain ports for the hexagonal boundary.
//!
//! Repository ports are driven by the services in this crate; the command
//! and query ports are what inbound adapters drive.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod comment_repository;
mod comments_command;
mod news_query;
mod news_repository;
mod note_repository;
mod notes_command;
mod notes_query;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comments_command::CommentsCommand;
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
#[cfg(test)]
pub use news_query::MockNewsQuery;
pub use news_query::NewsQuery;
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::{NewsRepository, NewsRepositoryError};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notes_command::MockNotesCommand;
pub use notes_command::NotesCommand;
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRecord, UserRepository};
