//! Public news feed and comment threads.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form::FieldErrors;
use super::moderation::check_comment;
use super::user::UserId;

/// Default number of news items on the home page.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

store_id!(
    /// Store-assigned news identifier.
    NewsId
);
store_id!(
    /// Store-assigned comment identifier.
    CommentId
);

/// Published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[schema(value_type = i64, example = 1)]
    pub id: NewsId,
    #[schema(example = "Заголовок")]
    pub title: String,
    #[schema(example = "Текст")]
    pub text: String,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
}

/// News item as loaded from a fixture; `date` defaults to today.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsSeed {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Comment on a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[schema(value_type = i64, example = 1)]
    pub id: CommentId,
    #[schema(value_type = i64, example = 1)]
    pub news: NewsId,
    #[schema(value_type = i64, example = 1)]
    pub author: UserId,
    #[schema(example = "Текст комментария")]
    pub text: String,
    #[schema(value_type = String, format = DateTime)]
    pub created: DateTime<Utc>,
}

/// News item with its thread, oldest comment first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    #[serde(flatten)]
    pub news: News,
    pub comments: Vec<Comment>,
}

/// Comment form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CommentInput {
    pub text: String,
}

impl From<&Comment> for CommentInput {
    fn from(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }
}

/// Comment text that passed validation and moderation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub text: String,
}

impl CommentDraft {
    /// Validate a submission: text is required and must pass moderation.
    pub fn validate(input: &CommentInput) -> Result<Self, FieldErrors> {
        let text = input.text.trim();
        if text.is_empty() {
            let mut errors = FieldErrors::default();
            errors.add("text", "This field is required.");
            return Err(errors);
        }
        check_comment(text)?;
        Ok(Self {
            text: text.to_owned(),
        })
    }
}
