//! Account handlers shared by both apps.
//!
//! ```text
//! GET|POST  /auth/login/    log in, then follow `next`
//! GET|POST  /auth/logout/   log out
//! GET|POST  /auth/signup/   create an account
//! ```

use actix_web::{HttpResponse, get, post, route, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{ErrorCode, FieldErrors, LoginCredentials, LoginValidationError, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{LOGIN_PATH, local_redirect, redirect};
use crate::inbound::http::pages::{FormPage, FormState, NON_FIELD_ERRORS, render, rerender_or_fail};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const LOGIN_FORM: &str = "AuthenticationForm";
const SIGNUP_FORM: &str = "UserCreationForm";

/// Login form body. `next` may also arrive in the query string.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// Sign-up form body.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// `?next=` query parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Submitted form data echoed back to the page. Passwords never are.
#[derive(Debug, Default, Serialize)]
pub struct UsernameData {
    pub username: String,
}

/// Login page context.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub form: FormState<UsernameData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

fn login_page(username: String, next: Option<String>, errors: FieldErrors) -> HttpResponse {
    render(&LoginPage {
        form: FormState::new(LOGIN_FORM, UsernameData { username }).with_errors(errors),
        next,
    })
}

fn required(error: &LoginValidationError) -> FieldErrors {
    let field = match error {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    let mut errors = FieldErrors::default();
    errors.add(field, "This field is required.");
    errors
}

#[get("/login/")]
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    login_page(String::new(), query.into_inner().next, FieldErrors::default())
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/auth/login/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in; redirects to `next` or `/`",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 200, description = "Form re-rendered with errors")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();
    let next = next.or(query.into_inner().next);
    let credentials = match LoginCredentials::try_from_parts(&username, &password) {
        Ok(credentials) => credentials,
        Err(error) => return Ok(login_page(username, next, required(&error))),
    };

    match state.accounts.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id)?;
            info!(user_id = %user.id, "user logged in");
            let target = next
                .as_deref()
                .and_then(local_redirect)
                .unwrap_or_else(|| "/".to_owned());
            Ok(redirect(&target))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            let mut errors = FieldErrors::default();
            errors.add(NON_FIELD_ERRORS, error.message());
            Ok(login_page(username, next, errors))
        }
        Err(error) => Err(error),
    }
}

/// End the session. Both methods are accepted.
#[route("/logout/", method = "GET", method = "POST")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(%user_id, "user logged out");
    }
    session.clear();
    Ok(render(&serde_json::json!({})))
}

#[get("/signup/")]
pub async fn signup_form() -> HttpResponse {
    render(&FormPage::<_> {
        form: FormState::new(SIGNUP_FORM, UsernameData::default()),
        object: None,
    })
}

/// Create an account, then send the user to the login page.
#[utoipa::path(
    post,
    path = "/auth/signup/",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created; redirects to the login page"),
        (status = 200, description = "Form re-rendered with field errors")
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup/")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let SignupForm {
        username,
        password1,
        password2,
    } = form.into_inner();
    let data = UsernameData {
        username: username.clone(),
    };
    let registration = match Registration::validate(&username, &password1, &password2) {
        Ok(registration) => registration,
        Err(errors) => {
            return Ok(render(&FormPage::<_> {
                form: FormState::new(SIGNUP_FORM, data).with_errors(errors),
                object: None,
            }));
        }
    };

    match state.accounts.register(&registration).await {
        Ok(user) => {
            info!(user_id = %user.id, "account created");
            Ok(redirect(LOGIN_PATH))
        }
        Err(error) => rerender_or_fail(error, FormState::new(SIGNUP_FORM, data), None::<()>),
    }
}
