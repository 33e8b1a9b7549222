//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, CommentsCommand, NewsQuery, NotesCommand, NotesQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
}

impl HttpState {
    /// Construct state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            notes,
            notes_query,
            news,
            comments,
        } = ports;
        Self {
            accounts,
            notes,
            notes_query,
            news,
            comments,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
