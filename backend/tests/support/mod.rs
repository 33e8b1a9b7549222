//! Shared helpers for the HTTP integration suites.
//!
//! Every test builds a fresh [`World`] of in-memory stores and drives the
//! real handlers through `actix_web::test`, so no state crosses tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::Value;

use bulletin::Trace;
use bulletin::domain::ports::{
    CommentRepository, NewsRepository, NoteRepository, UserRepository,
};
use bulletin::domain::{
    AccountsService, Comment, News, NewsId, NewsService, Note, NotesService, UserId,
};
use bulletin::inbound::http::routes::{configure_news, configure_notes};
use bulletin::inbound::http::state::{HttpState, HttpStatePorts};
use bulletin::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};
use bulletin::test_support::MutableClock;

/// Page size used by every test world.
pub const NEWS_COUNT: usize = 10;

/// Password shared by every test account.
pub const PASSWORD: &str = "correct-horse-battery";

/// Which route table to mount.
#[derive(Debug, Clone, Copy)]
pub enum Site {
    Notes,
    News,
}

/// Fresh in-memory stores plus the clock stamping comments.
pub struct World {
    pub users: Arc<InMemoryUserRepository>,
    pub notes: Arc<InMemoryNoteRepository>,
    pub news: Arc<InMemoryNewsRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
    pub clock: Arc<MutableClock>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            notes: Arc::new(InMemoryNoteRepository::new()),
            news: Arc::new(InMemoryNewsRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock: Arc::new(MutableClock::default()),
        }
    }
}

impl World {
    /// Services over this world's stores.
    pub fn state(&self) -> HttpState {
        let notes = Arc::new(NotesService::new(self.notes.clone()));
        let news = Arc::new(NewsService::new(
            self.news.clone(),
            self.comments.clone(),
            self.clock.clone(),
            NEWS_COUNT,
        ));
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(AccountsService::new(self.users.clone())),
            notes: notes.clone(),
            notes_query: notes,
            news: news.clone(),
            comments: news,
        })
    }

    /// Every note written by `author`.
    pub async fn notes_of(&self, author: UserId) -> Vec<Note> {
        self.notes.list_by_author(author).await.expect("list notes")
    }

    /// Look a note up by slug regardless of author.
    pub async fn note(&self, slug: &str) -> Option<Note> {
        self.notes.find_by_slug(slug).await.expect("find note")
    }

    /// Store a news item dated `date`.
    pub async fn add_news(&self, title: &str, date: NaiveDate) -> News {
        self.news
            .insert(title, "Просто текст.", date)
            .await
            .expect("insert news")
    }

    /// Store a comment on `news` directly.
    pub async fn add_comment(&self, news: NewsId, author: UserId, text: &str) -> Comment {
        self.comments
            .insert(news, author, text, self.clock.utc())
            .await
            .expect("insert comment")
    }

    /// Thread of `news` as stored.
    pub async fn comments_of(&self, news: NewsId) -> Vec<Comment> {
        self.comments
            .list_for_news(news)
            .await
            .expect("list comments")
    }
}

/// Start the chosen site over `world`.
pub async fn app(
    world: &World,
    site: Site,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(world.state()))
            .wrap(session)
            .wrap(Trace)
            .configure(move |cfg| match site {
                Site::Notes => configure_notes(cfg),
                Site::News => configure_news(cfg),
            }),
    )
    .await
}

/// Sign `username` up, log in and return the session cookie with the new id.
pub async fn sign_in(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    world: &World,
    username: &str,
) -> (UserId, Cookie<'static>) {
    let signup = test::TestRequest::post()
        .uri("/auth/signup/")
        .set_form([
            ("username", username),
            ("password1", PASSWORD),
            ("password2", PASSWORD),
        ])
        .to_request();
    let res = test::call_service(app, signup).await;
    assert_eq!(res.status(), StatusCode::FOUND, "sign-up of {username}");

    let login = test::TestRequest::post()
        .uri("/auth/login/")
        .set_form([("username", username), ("password", PASSWORD)])
        .to_request();
    let res = test::call_service(app, login).await;
    assert_eq!(res.status(), StatusCode::FOUND, "login of {username}");
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie");

    let record = world
        .users
        .find_by_username(username)
        .await
        .expect("lookup")
        .expect("user stored");
    (record.user.id, cookie)
}

/// GET `path`, optionally as a logged-in client.
pub async fn get(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    path: &str,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse {
    let mut req = test::TestRequest::get().uri(path);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// POST a form to `path`, optionally as a logged-in client.
pub async fn post(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    path: &str,
    form: &[(&str, &str)],
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse {
    let mut req = test::TestRequest::post().uri(path).set_form(form);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Location header of a redirect.
pub fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Decode a page body.
pub async fn page(res: ServiceResponse) -> Value {
    assert_eq!(res.status(), StatusCode::OK);
    test::read_body_json(res).await
}
