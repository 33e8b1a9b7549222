//! OpenAPI documentation for the two apps.
//!
//! Both apps serve `/`, so each gets its own document: [`NotesApiDoc`] and
//! [`NewsApiDoc`]. Account endpoints appear in both. Swagger UI serves the
//! relevant one in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Comment, CommentInput, Error, ErrorCode, News, NewsDetail, Note, NoteInput};
use crate::inbound::http::notes::HomePage;
use crate::inbound::http::users::{LoginForm, SignupForm};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the notes app.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bulletin notes",
        description = "Private notes addressed by slug, visible only to their author."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::notes::home,
        crate::inbound::http::notes::list,
        crate::inbound::http::notes::add,
        crate::inbound::http::notes::edit,
        crate::inbound::http::notes::delete,
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup,
    ),
    components(schemas(Note, NoteInput, HomePage, LoginForm, SignupForm, Error, ErrorCode)),
    tags(
        (name = "notes", description = "Note pages"),
        (name = "users", description = "Sign-up and login")
    )
)]
pub struct NotesApiDoc;

/// OpenAPI document for the news app.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bulletin news",
        description = "Public news feed with moderated comments."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::news::home,
        crate::inbound::http::news::detail,
        crate::inbound::http::news::add_comment,
        crate::inbound::http::news::edit,
        crate::inbound::http::news::delete,
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup,
    ),
    components(schemas(
        News,
        NewsDetail,
        Comment,
        CommentInput,
        LoginForm,
        SignupForm,
        Error,
        ErrorCode
    )),
    tags(
        (name = "news", description = "News and comment pages"),
        (name = "users", description = "Sign-up and login")
    )
)]
pub struct NewsApiDoc;
