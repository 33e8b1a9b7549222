//! Builders wiring repositories into services and HTTP state.
//!
//! With a database URL the Diesel adapters are used after pending migrations
//! run; without one every table lives in memory for the life of the process.

use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use tracing::info;

use bulletin::domain::ports::{
    CommentRepository, NewsRepository, NoteRepository, UserRepository,
};
use bulletin::domain::{AccountsService, NewsSeed, NewsService, NotesService};
use bulletin::inbound::http::state::{HttpState, HttpStatePorts};
use bulletin::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};
use bulletin::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselNewsRepository, DieselNoteRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};

use super::config::ServerSettings;

/// Repository set backing one running server.
struct Repositories<U, M, N, C> {
    users: Arc<U>,
    notes: Arc<M>,
    news: Arc<N>,
    comments: Arc<C>,
}

/// Build HTTP state from settings, choosing the storage backend.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState> {
    let seeds = settings
        .news_fixture
        .as_deref()
        .map(load_news_fixture)
        .transpose()?;

    match settings.database_url.as_deref() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .wrap_err("apply database migrations")?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("create database pool")?;
            let repositories = Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                notes: Arc::new(DieselNoteRepository::new(pool.clone())),
                news: Arc::new(DieselNewsRepository::new(pool.clone())),
                comments: Arc::new(DieselCommentRepository::new(pool)),
            };
            assemble(repositories, settings.news_count(), seeds.as_deref()).await
        }
        None => {
            info!("no database configured; using in-memory stores");
            let repositories = Repositories {
                users: Arc::new(InMemoryUserRepository::new()),
                notes: Arc::new(InMemoryNoteRepository::new()),
                news: Arc::new(InMemoryNewsRepository::new()),
                comments: Arc::new(InMemoryCommentRepository::new()),
            };
            assemble(repositories, settings.news_count(), seeds.as_deref()).await
        }
    }
}

async fn assemble<U, M, N, C>(
    repositories: Repositories<U, M, N, C>,
    news_count: usize,
    seeds: Option<&[NewsSeed]>,
) -> Result<HttpState>
where
    U: UserRepository + 'static,
    M: NoteRepository + 'static,
    N: NewsRepository + 'static,
    C: CommentRepository + 'static,
{
    let Repositories {
        users,
        notes,
        news,
        comments,
    } = repositories;
    let news_service = Arc::new(NewsService::new(
        news,
        comments,
        Arc::new(DefaultClock),
        news_count,
    ));
    if let Some(seeds) = seeds {
        seed_if_empty(&news_service, seeds).await?;
    }
    let notes_service = Arc::new(NotesService::new(notes));

    Ok(HttpState::new(HttpStatePorts {
        accounts: Arc::new(AccountsService::new(users)),
        notes: notes_service.clone(),
        notes_query: notes_service,
        news: news_service.clone(),
        comments: news_service,
    }))
}

async fn seed_if_empty<N, C>(service: &NewsService<N, C>, seeds: &[NewsSeed]) -> Result<()>
where
    N: NewsRepository,
    C: CommentRepository,
{
    if service.has_news().await? {
        info!("news store already populated; skipping fixture");
        return Ok(());
    }
    let stored = service.seed(seeds).await?;
    info!(count = stored.len(), "news fixture loaded");
    Ok(())
}

fn load_news_fixture(path: &Path) -> Result<Vec<NewsSeed>> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read news fixture {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("parse news fixture {}", path.display()))
}
