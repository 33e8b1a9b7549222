//! Domain primitives, services and ports.
//!
//! Purpose: Define the strongly typed entities shared by the notes and news
//! apps, the three behavioural components (authorization gate, slug
//! resolver, moderation filter) and the services composing them over
//! repository ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - FieldErrors (alias to `form::FieldErrors`): per-field form messages.
//! - Note, News, Comment, User: stored entities.
//! - NotesService, NewsService, AccountsService: driving port impls.

pub mod access;
pub mod accounts_service;
pub mod auth;
pub mod error;
pub mod form;
pub mod moderation;
pub mod news;
pub mod news_service;
pub mod notes;
pub mod notes_service;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::access::{Access, Actor, Requirement, authorize, ensure_owner};
pub use self::accounts_service::AccountsService;
pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest, Registration};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::form::FieldErrors;
pub use self::news::{
    Comment, CommentDraft, CommentId, CommentInput, NEWS_COUNT_ON_HOME_PAGE, News, NewsDetail,
    NewsId, NewsSeed,
};
pub use self::news_service::NewsService;
pub use self::notes::{Note, NoteDraft, NoteId, NoteInput};
pub use self::notes_service::NotesService;
pub use self::slug::{Slug, SlugValidationError, slugify};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};

