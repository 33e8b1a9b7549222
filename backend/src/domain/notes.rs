//! Private notes.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form::FieldErrors;
use super::slug::Slug;
use super::user::UserId;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;

/// Store-assigned note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw store identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[schema(value_type = i64, example = 1)]
    pub id: NoteId,
    #[schema(example = "Заголовок")]
    pub title: String,
    #[schema(example = "Текст заметки")]
    pub text: String,
    #[schema(value_type = String, example = "note-slug")]
    pub slug: Slug,
    #[schema(value_type = i64, example = 1)]
    pub author: UserId,
}

/// Note form as submitted. Every field may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NoteInput {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl From<&Note> for NoteInput {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.to_string(),
        }
    }
}

/// Validated note content awaiting the uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: Slug,
}

impl NoteDraft {
    /// Validate a submission, deriving the slug from the title when the slug
    /// field is blank.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::{NoteDraft, NoteInput};
    ///
    /// let input = NoteInput {
    ///     title: "Новый заголовок".into(),
    ///     text: "Новый текст".into(),
    ///     slug: String::new(),
    /// };
    /// let draft = NoteDraft::validate(&input).unwrap();
    /// assert_eq!(draft.slug.as_ref(), "novyij-zagolovok");
    /// ```
    pub fn validate(input: &NoteInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = input.title.trim();
        let text = input.text.trim();
        let slug = input.slug.trim();

        if title.is_empty() {
            errors.add("title", "This field is required.");
        } else if title.chars().count() > TITLE_MAX {
            errors.add(
                "title",
                format!("Ensure this value has at most {TITLE_MAX} characters."),
            );
        }
        if text.is_empty() {
            errors.add("text", "This field is required.");
        }

        let slug = if slug.is_empty() {
            let derived = Slug::from_title(title);
            if derived.is_none() && !title.is_empty() {
                errors.add("slug", "Could not derive a slug from the title, enter one.");
            }
            derived
        } else {
            Slug::parse(slug)
                .map_err(|err| errors.add("slug", err.to_string()))
                .ok()
        };

        match (slug, errors.into_result()) {
            (Some(slug), Ok(())) => Ok(Self {
                title: title.to_owned(),
                text: text.to_owned(),
                slug,
            }),
            (_, Err(errors)) => Err(errors),
            (None, Ok(())) => {
                let mut errors = FieldErrors::default();
                errors.add("slug", "This field is required.");
                Err(errors)
            }
        }
    }
}

/// Field warning for a slug already in use.
pub fn duplicate_slug_warning(slug: &str) -> String {
    format!("{slug} - такой slug уже существует, придумайте уникальное значение!")
}
