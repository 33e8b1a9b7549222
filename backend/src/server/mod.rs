//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppKind, ServerConfig, ServerSettings};
pub use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use bulletin::Trace;
#[cfg(debug_assertions)]
use bulletin::doc::{NewsApiDoc, NotesApiDoc};
use bulletin::inbound::http::routes::{configure_news, configure_notes};
use bulletin::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    app: AppKind,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        app: kind,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(move |cfg| match kind {
            AppKind::Notes => configure_notes(cfg),
            AppKind::News => configure_news(cfg),
        });

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url(
        "/api-docs/openapi.json",
        match kind {
            AppKind::Notes => NotesApiDoc::openapi(),
            AppKind::News => NewsApiDoc::openapi(),
        },
    ));

    app
}

/// Construct an Actix HTTP server for the configured app.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        app,
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            app,
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use bulletin::domain::{AccountsService, NewsService, NotesService};
    use bulletin::inbound::http::state::HttpStatePorts;
    use bulletin::outbound::memory::{
        InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
        InMemoryUserRepository,
    };
    use mockable::DefaultClock;
    use rstest::rstest;

    fn memory_state() -> HttpState {
        let notes = Arc::new(NotesService::new(Arc::new(InMemoryNoteRepository::new())));
        let news = Arc::new(NewsService::new(
            Arc::new(InMemoryNewsRepository::new()),
            Arc::new(InMemoryCommentRepository::new()),
            Arc::new(DefaultClock),
            10,
        ));
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(AccountsService::new(Arc::new(InMemoryUserRepository::new()))),
            notes: notes.clone(),
            notes_query: notes,
            news: news.clone(),
            comments: news,
        })
    }

    fn deps(app: AppKind) -> AppDependencies {
        AppDependencies {
            app,
            http_state: web::Data::new(memory_state()),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[case(AppKind::Notes, "/notes/", StatusCode::FOUND)]
    #[case(AppKind::Notes, "/news/1/", StatusCode::NOT_FOUND)]
    #[case(AppKind::News, "/news/1/", StatusCode::NOT_FOUND)]
    #[case(AppKind::News, "/notes/", StatusCode::NOT_FOUND)]
    #[case(AppKind::News, "/auth/login/", StatusCode::OK)]
    #[actix_web::test]
    async fn each_app_mounts_only_its_pages(
        #[case] app: AppKind,
        #[case] path: &str,
        #[case] expected: StatusCode,
    ) {
        let service = test::init_service(build_app(deps(app))).await;
        let res = test::call_service(&service, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), expected);
        assert!(res.headers().contains_key("trace-id"));
    }
}
