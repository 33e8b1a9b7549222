//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{comments, news, notes, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
}

/// Insert and update share one shape; the author never changes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = notes)]
pub(crate) struct NoteChanges<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    #[diesel(embed)]
    pub changes: NoteChanges<'a>,
    pub author_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewsRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = news)]
pub(crate) struct NewNewsRow<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub news_id: i64,
    pub author_id: i64,
    pub text: &'a str,
    pub created: DateTime<Utc>,
}
