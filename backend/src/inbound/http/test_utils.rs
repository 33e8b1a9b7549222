//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use crate::domain::{User, UserId, Username};
use crate::domain::ports::{
    MockAccountService, MockCommentsCommand, MockNewsQuery, MockNotesCommand, MockNotesQuery,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Cookie name used by the session middleware in tests.
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Path of the login shortcut mounted by [`with_test_login`].
pub const TEST_LOGIN_PATH: &str = "/test-login/{id}";

async fn test_login(
    session: SessionContext,
    id: web::Path<i64>,
) -> Result<HttpResponse, crate::domain::Error> {
    session.persist_user(UserId::new(id.into_inner()))?;
    Ok(HttpResponse::Ok().finish())
}

/// Mount a route that logs the caller in as `{id}` without credentials.
pub fn with_test_login(cfg: &mut web::ServiceConfig) {
    cfg.route(TEST_LOGIN_PATH, web::get().to(test_login));
}

/// Log in as `id` through [`with_test_login`] and return the session cookie.
pub async fn login_cookie(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    id: i64,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test-login/{id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success());
    session_cookie(&res).expect("session cookie")
}

/// Mock for every port, turned into [`HttpState`] once expectations are set.
///
/// The account mock knows every id as `user{id}` so logged-in sessions
/// resolve; replace it to model deleted accounts.
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub notes: MockNotesCommand,
    pub notes_query: MockNotesQuery,
    pub news: MockNewsQuery,
    pub comments: MockCommentsCommand,
}

impl Default for MockPorts {
    fn default() -> Self {
        let mut accounts = MockAccountService::new();
        accounts.expect_find().returning(|id| Ok(Some(registered(id))));
        Self {
            accounts,
            notes: MockNotesCommand::new(),
            notes_query: MockNotesQuery::new(),
            news: MockNewsQuery::new(),
            comments: MockCommentsCommand::new(),
        }
    }
}

/// Account the default mock reports for `id`.
pub fn registered(id: UserId) -> User {
    User {
        id,
        username: Username::new(format!("user{}", id.get())).expect("valid username"),
    }
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            notes: Arc::new(self.notes),
            notes_query: Arc::new(self.notes_query),
            news: Arc::new(self.news),
            comments: Arc::new(self.comments),
        })
    }
}

/// Location header of a redirect response.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<&str> {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
