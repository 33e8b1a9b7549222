//! Note slugs: validation of explicit slugs and derivation from titles.
//!
//! Derivation lowercases the title, turns `&` into ` and `, collapses runs of
//! whitespace and hyphens into one `-`, drops characters outside the
//! supported alphabet and transliterates Cyrillic to Latin using the `pytils`
//! table, so `"Новый заголовок"` becomes `"novyij-zagolovok"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum slug length in characters.
pub const SLUG_MAX: usize = 100;

/// Validation errors for [`Slug`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// Blank slug.
    #[error("slug must not be empty")]
    Empty,
    /// Slug longer than [`SLUG_MAX`].
    #[error("Ensure this value has at most {max} characters.")]
    TooLong { max: usize },
    /// Slug with characters outside `[-A-Za-z0-9_]`.
    #[error("Enter a valid “slug” consisting of letters, numbers, underscores or hyphens.")]
    InvalidCharacters,
}

/// URL-safe note identifier.
///
/// ## Invariants
/// - Between 1 and [`SLUG_MAX`] characters.
/// - Only ASCII letters, digits, hyphens and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate an explicit slug.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::Slug;
    ///
    /// assert!(Slug::parse("test-slug").is_ok());
    /// assert!(Slug::parse("with space").is_err());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, SlugValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if raw.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !raw.chars().all(is_slug_char) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Derive a slug from a note title, truncated to [`SLUG_MAX`].
    ///
    /// Returns `None` when no letter or digit of the title survives
    /// derivation; a title of blanks and dashes yields no slug.
    ///
    /// # Examples
    /// ```
    /// use bulletin::domain::Slug;
    ///
    /// let slug = Slug::from_title("Новый заголовок").unwrap();
    /// assert_eq!(slug.as_ref(), "novyij-zagolovok");
    /// ```
    pub fn from_title(title: &str) -> Option<Self> {
        let derived: String = slugify(title).chars().take(SLUG_MAX).collect();
        if !derived.chars().any(|ch| ch.is_ascii_alphanumeric()) {
            return None;
        }
        Self::parse(derived).ok()
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Transliterate and normalise free text into slug form.
///
/// The result may be empty and is not length-limited; see
/// [`Slug::from_title`].
pub fn slugify(text: &str) -> String {
    let lowered = text
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");

    let mut collapsed = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for ch in lowered.chars() {
        if ch == '-' || ch.is_whitespace() {
            if !in_separator {
                collapsed.push('-');
            }
            in_separator = true;
        } else {
            in_separator = false;
            collapsed.push(ch);
        }
    }

    let mut slug = String::with_capacity(collapsed.len());
    for ch in collapsed.chars() {
        if ch == '-' || ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if let Some(latin) = transliterate(ch) {
            slug.push_str(latin);
        }
    }
    slug
}

/// Latin spelling of a lowercase character from the supported alphabet.
///
/// Hard and soft signs, quotes and `№` belong to the alphabet but vanish
/// from slugs, hence the empty spellings.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "yi",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        '–' | '—' | '‒' | '−' => "-",
        'ъ' | 'ь' | '\'' | '"' | '`' | '‘' | '’' | '«' | '»' | '“' | '”' | '№' | '#' => "",
        _ => return None,
    };
    Some(latin)
}
