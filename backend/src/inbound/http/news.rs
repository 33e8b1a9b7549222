//! News app handlers.
//!
//! ```text
//! GET       /                        latest news, public
//! GET       /news/{id}/              news item with comments, public
//! POST      /news/{id}/              add a comment
//! GET|POST  /edit_comment/{id}/      edit a comment, author only
//! GET|POST  /delete_comment/{id}/    delete a comment, author only
//! ```
//!
//! Successful comment mutations redirect back to the thread anchor.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::domain::{CommentId, CommentInput, NewsDetail, NewsId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{CurrentUser, Visitor, redirect};
use crate::inbound::http::pages::{FormPage, FormState, ObjectList, ObjectPage, render, rerender_or_fail};
use crate::inbound::http::state::HttpState;

const COMMENT_FORM: &str = "CommentForm";

/// Thread anchor on a news detail page.
///
/// # Examples
/// ```
/// use bulletin::domain::NewsId;
/// use bulletin::inbound::http::news::comments_url;
///
/// assert_eq!(comments_url(NewsId::new(4)), "/news/4/#comments");
/// ```
pub fn comments_url(news: NewsId) -> String {
    format!("/news/{news}/#comments")
}

/// News detail context. Only logged-in readers get a comment form.
#[derive(Debug, Serialize)]
pub struct NewsPage {
    pub news: NewsDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormState<CommentInput>>,
}

/// Latest news, newest first.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Latest news, newest first", body = [crate::domain::News])),
    tags = ["news"],
    operation_id = "newsHome",
    security([])
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let object_list = state.news.home().await?;
    Ok(render(&ObjectList { object_list }))
}

/// News item and its thread.
#[utoipa::path(
    get,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News identifier")),
    responses(
        (status = 200, description = "News item with comments, oldest first", body = NewsDetail),
        (status = 404, description = "No such news item")
    ),
    tags = ["news"],
    operation_id = "newsDetail",
    security([])
)]
#[get("/news/{id}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    visitor: Visitor,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let news = state.news.detail(NewsId::new(id.into_inner())).await?;
    let form = visitor
        .user_id()
        .map(|_| FormState::new(COMMENT_FORM, CommentInput::default()));
    Ok(render(&NewsPage { news, form }))
}

/// Comment on a news item as the caller.
#[utoipa::path(
    post,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News identifier")),
    request_body(content = CommentInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Comment stored, or login required"),
        (status = 200, description = "Detail page re-rendered with field errors"),
        (status = 404, description = "No such news item")
    ),
    tags = ["news"],
    operation_id = "addComment"
)]
#[post("/news/{id}/")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
    form: web::Form<CommentInput>,
) -> ApiResult<HttpResponse> {
    let news_id = NewsId::new(id.into_inner());
    let input = form.into_inner();
    let error = match state.comments.add(news_id, user.id(), &input).await {
        Ok(comment) => return Ok(redirect(&comments_url(comment.news))),
        Err(error) => error,
    };
    let Some(errors) = error.field_errors() else {
        return Err(error);
    };
    let news = state.news.detail(news_id).await?;
    Ok(render(&NewsPage {
        news,
        form: Some(FormState::new(COMMENT_FORM, input).with_errors(errors)),
    }))
}

#[get("/edit_comment/{id}/")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .comments
        .get_owned(user.id(), CommentId::new(id.into_inner()))
        .await?;
    Ok(render(&FormPage {
        form: FormState::new(COMMENT_FORM, CommentInput::from(&comment)),
        object: Some(comment),
    }))
}

/// Replace a comment's text.
#[utoipa::path(
    post,
    path = "/edit_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    request_body(content = CommentInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Comment updated, or login required"),
        (status = 200, description = "Form re-rendered with field errors"),
        (status = 404, description = "No such comment for this user")
    ),
    tags = ["news"],
    operation_id = "editComment"
)]
#[post("/edit_comment/{id}/")]
pub async fn edit(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
    form: web::Form<CommentInput>,
) -> ApiResult<HttpResponse> {
    let comment_id = CommentId::new(id.into_inner());
    let input = form.into_inner();
    match state.comments.edit(user.id(), comment_id, &input).await {
        Ok(comment) => Ok(redirect(&comments_url(comment.news))),
        Err(error) if error.field_errors().is_some() => {
            let comment = state.comments.get_owned(user.id(), comment_id).await?;
            rerender_or_fail(error, FormState::new(COMMENT_FORM, input), Some(comment))
        }
        Err(error) => Err(error),
    }
}

#[get("/delete_comment/{id}/")]
pub async fn delete_form(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .comments
        .get_owned(user.id(), CommentId::new(id.into_inner()))
        .await?;
    Ok(render(&ObjectPage { object: comment }))
}

#[utoipa::path(
    post,
    path = "/delete_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 302, description = "Comment deleted, or login required"),
        (status = 404, description = "No such comment for this user")
    ),
    tags = ["news"],
    operation_id = "deleteComment"
)]
#[post("/delete_comment/{id}/")]
pub async fn delete(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let news = state
        .comments
        .delete(user.id(), CommentId::new(id.into_inner()))
        .await?;
    Ok(redirect(&comments_url(news)))
}

#[cfg(test)]
#[path = "news_tests.rs"]
mod tests;
