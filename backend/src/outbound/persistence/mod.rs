//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Rows (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module. Connections come from a `bb8` pool of `diesel-async`
//! connections and every database failure is mapped onto the port's error
//! enum.
//!
//! # Example
//!
//! ```no_run
//! use bulletin::outbound::persistence::{DbPool, DieselNoteRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bulletin")).await?;
//! let notes = DieselNoteRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_news_repository;
mod diesel_note_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_news_repository::DieselNewsRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
