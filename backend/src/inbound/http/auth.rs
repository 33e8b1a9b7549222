//! Authentication helpers used by HTTP handlers.
//!
//! [`CurrentUser`] is the HTTP face of the authorization gate: handlers that
//! take it never run for anonymous callers, who are sent to the login page
//! with the path they asked for in `next`.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use url::Url;

use crate::domain::{Access, Actor, Error, Requirement, UserId, authorize};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login page path shared by both apps.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Origin redirect targets are resolved against.
const SITE_ORIGIN: &str = "http://localhost/";

/// Unreserved characters and `/` stay readable in `next`.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Build the login URL that returns the caller to `next` afterwards.
///
/// # Examples
/// ```
/// use bulletin::inbound::http::auth::login_url;
///
/// assert_eq!(login_url("/edit/my note/"), "/auth/login/?next=/edit/my%20note/");
/// ```
pub fn login_url(next: &str) -> String {
    format!("{LOGIN_PATH}?next={}", utf8_percent_encode(next, NEXT_ENCODE_SET))
}

/// Resolve a post-login `target` against this site.
///
/// Returns the normalised path, query and fragment, or `None` when the
/// target is not an absolute path or would leave the site once a browser
/// resolves it. Control characters are refused outright: browsers strip
/// tabs and newlines, turning `/\t/host` into `//host`.
///
/// # Examples
/// ```
/// use bulletin::inbound::http::auth::local_redirect;
///
/// assert_eq!(local_redirect("/notes/").as_deref(), Some("/notes/"));
/// assert_eq!(local_redirect("//evil.example/"), None);
/// ```
pub fn local_redirect(target: &str) -> Option<String> {
    if !target.starts_with('/') || target.chars().any(char::is_control) {
        return None;
    }
    let site = Url::parse(SITE_ORIGIN).ok()?;
    let resolved = site.join(target).ok()?;
    if resolved.origin() != site.origin() {
        return None;
    }
    let mut location = resolved.path().to_owned();
    if let Some(query) = resolved.query() {
        location.push('?');
        location.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        location.push('#');
        location.push_str(fragment);
    }
    Some(location)
}

/// Build a `302 Found` response pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Rejection raised when an anonymous caller reaches a protected route.
#[derive(Debug, thiserror::Error)]
#[error("login required to reach {next}")]
pub struct LoginRequired {
    next: String,
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        redirect(&login_url(&self.next))
    }
}

/// Match the session's user id against the account store.
///
/// A session naming an account that no longer exists is purged and the
/// caller treated as anonymous.
async fn resolve_actor(
    session: SessionContext,
    state: Option<web::Data<HttpState>>,
) -> Result<Actor, Error> {
    let Some(id) = session.user_id()? else {
        return Ok(Actor::Anonymous);
    };
    let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    match state.accounts.find(id).await? {
        Some(user) => Ok(Actor::User(user.id)),
        None => {
            debug!(user_id = %id, "session refers to a missing account");
            session.clear();
            Ok(Actor::Anonymous)
        }
    }
}

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(UserId);

impl CurrentUser {
    /// Identifier of the logged-in user.
    pub const fn id(self) -> UserId {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        Box::pin(async move {
            let actor = resolve_actor(session.await?, state).await?;
            match (authorize(actor, Requirement::Authenticated), actor.user_id()) {
                (Access::Granted, Some(id)) => Ok(Self(id)),
                _ => {
                    debug!(%next, "anonymous request redirected to login");
                    Err(LoginRequired { next }.into())
                }
            }
        })
    }
}

/// Caller of a public page, logged in or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visitor(Actor);

impl Visitor {
    /// Identifier of the logged-in user, if any.
    pub const fn user_id(self) -> Option<UserId> {
        self.0.user_id()
    }
}

impl FromRequest for Visitor {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move { Ok(Self(resolve_actor(session.await?, state).await?)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccountService;
    use crate::inbound::http::test_utils::{
        MockPorts, location, login_cookie, session_cookie, test_session_middleware,
        with_test_login,
    };
    use actix_web::{App, test as actix_test};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ports() -> MockPorts {
        MockPorts::default()
    }

    fn forgotten_accounts() -> MockPorts {
        let mut accounts = MockAccountService::new();
        accounts.expect_find().returning(|_| Ok(None));
        MockPorts {
            accounts,
            ..MockPorts::default()
        }
    }

    fn gated_app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .configure(with_test_login)
            .route(
                "/notes/",
                web::get().to(|user: CurrentUser| async move { user.id().to_string() }),
            )
            .route(
                "/",
                web::get().to(|visitor: Visitor| async move { format!("{:?}", visitor.user_id()) }),
            )
    }

    #[rstest]
    #[case("/notes/", "/auth/login/?next=/notes/")]
    #[case("/edit/a-b_c/", "/auth/login/?next=/edit/a-b_c/")]
    #[case("/add/?x=1&y=2", "/auth/login/?next=/add/%3Fx%3D1%26y%3D2")]
    #[case("/note/новый/", "/auth/login/?next=/note/%D0%BD%D0%BE%D0%B2%D1%8B%D0%B9/")]
    fn login_url_encodes_next(#[case] next: &str, #[case] expected: &str) {
        assert_eq!(login_url(next), expected);
    }

    #[rstest]
    #[case("/notes/", Some("/notes/"))]
    #[case("/", Some("/"))]
    #[case("/news/1/?page=2#comments", Some("/news/1/?page=2#comments"))]
    #[case("/note/a b/", Some("/note/a%20b/"))]
    #[case("//evil.example/", None)]
    #[case("/\\evil.example/", None)]
    #[case("/\t/evil.example/", None)]
    #[case("/\n/evil.example/", None)]
    #[case("/notes/\r\nSet-Cookie: x=1", None)]
    #[case("https://evil.example/", None)]
    #[case("notes/", None)]
    #[case("", None)]
    fn only_local_paths_are_followed(#[case] target: &str, #[case] expected: Option<&str>) {
        assert_eq!(local_redirect(target).as_deref(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_callers_are_sent_to_login(ports: MockPorts) {
        let app = actix_test::init_service(gated_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/notes/").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some("/auth/login/?next=/notes/"));
    }

    #[rstest]
    #[actix_web::test]
    async fn logged_in_callers_pass(ports: MockPorts) {
        let app = actix_test::init_service(gated_app(ports)).await;
        let cookie = login_cookie(&app, 7).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/notes/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "7");
    }

    #[actix_web::test]
    async fn sessions_of_missing_accounts_are_anonymous() {
        let app = actix_test::init_service(gated_app(forgotten_accounts())).await;
        let cookie = login_cookie(&app, 99).await;

        let gated = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/notes/")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(gated.status(), StatusCode::FOUND);
        assert_eq!(location(&gated), Some("/auth/login/?next=/notes/"));
        let cleared = session_cookie(&gated).expect("stale session is purged");
        assert_eq!(cleared.value(), "");

        let public = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(public).await, "None");
    }

    #[rstest]
    #[actix_web::test]
    async fn visitors_see_their_account(ports: MockPorts) {
        let app = actix_test::init_service(gated_app(ports)).await;
        let cookie = login_cookie(&app, 7).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(res).await, "Some(UserId(7))");
    }
}
