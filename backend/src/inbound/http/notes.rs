//! Notes app handlers.
//!
//! ```text
//! GET       /                 home page, public
//! GET       /notes/           the caller's notes
//! GET|POST  /add/             create a note
//! GET       /done/            success page
//! GET       /note/{slug}/     note detail, owner only
//! GET|POST  /edit/{slug}/     edit a note, owner only
//! GET|POST  /delete/{slug}/   delete a note, owner only
//! ```
//!
//! Successful mutations redirect to `/done/`. Notes owned by someone else
//! answer `404` exactly like missing ones.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::domain::{Note, NoteInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{CurrentUser, Visitor, redirect};
use crate::inbound::http::pages::{FormPage, FormState, ObjectList, ObjectPage, render, rerender_or_fail};
use crate::inbound::http::state::HttpState;

/// Success page path.
pub const DONE_PATH: &str = "/done/";

const NOTE_FORM: &str = "NoteForm";

/// Landing page context.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub authenticated: bool,
}

/// Public landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = HomePage)),
    tags = ["notes"],
    operation_id = "notesHome",
    security([])
)]
#[get("/")]
pub async fn home(visitor: Visitor) -> ApiResult<HttpResponse> {
    Ok(render(&HomePage {
        authenticated: visitor.user_id().is_some(),
    }))
}

/// The caller's notes; other users' notes never appear.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Notes owned by the caller", body = [Note]),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes/")]
pub async fn list(state: web::Data<HttpState>, user: CurrentUser) -> ApiResult<HttpResponse> {
    let object_list = state.notes_query.list(user.id()).await?;
    Ok(render(&ObjectList { object_list }))
}

#[get("/add/")]
pub async fn add_form(_user: CurrentUser) -> HttpResponse {
    render(&FormPage::<_> {
        form: FormState::new(NOTE_FORM, NoteInput::default()),
        object: None,
    })
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/add/",
    request_body(content = NoteInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created, or login required"),
        (status = 200, description = "Form re-rendered with field errors")
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/add/")]
pub async fn add(
    state: web::Data<HttpState>,
    user: CurrentUser,
    form: web::Form<NoteInput>,
) -> ApiResult<HttpResponse> {
    let input = form.into_inner();
    match state.notes.create(user.id(), &input).await {
        Ok(_) => Ok(redirect(DONE_PATH)),
        Err(error) => rerender_or_fail(error, FormState::new(NOTE_FORM, input), None::<Note>),
    }
}

#[get("/done/")]
pub async fn done(_user: CurrentUser) -> HttpResponse {
    render(&serde_json::json!({}))
}

#[get("/note/{slug}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get(user.id(), &slug).await?;
    Ok(render(&ObjectPage { object: note }))
}

#[get("/edit/{slug}/")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get(user.id(), &slug).await?;
    Ok(render(&FormPage {
        form: FormState::new(NOTE_FORM, NoteInput::from(&note)),
        object: Some(note),
    }))
}

/// Replace a note's fields.
#[utoipa::path(
    post,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    request_body(content = NoteInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Updated, or login required"),
        (status = 200, description = "Form re-rendered with field errors"),
        (status = 404, description = "No such note for this user")
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[post("/edit/{slug}/")]
pub async fn edit(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
    form: web::Form<NoteInput>,
) -> ApiResult<HttpResponse> {
    let input = form.into_inner();
    match state.notes.update(user.id(), &slug, &input).await {
        Ok(_) => Ok(redirect(DONE_PATH)),
        Err(error) if error.field_errors().is_some() => {
            let note = state.notes_query.get(user.id(), &slug).await?;
            rerender_or_fail(error, FormState::new(NOTE_FORM, input), Some(note))
        }
        Err(error) => Err(error),
    }
}

#[get("/delete/{slug}/")]
pub async fn delete_form(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get(user.id(), &slug).await?;
    Ok(render(&ObjectPage { object: note }))
}

#[utoipa::path(
    post,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted, or login required"),
        (status = 404, description = "No such note for this user")
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[post("/delete/{slug}/")]
pub async fn delete(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.notes.delete(user.id(), &slug).await?;
    Ok(redirect(DONE_PATH))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
