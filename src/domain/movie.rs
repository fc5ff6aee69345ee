use serde::Serialize;

use super::ValidationError;

pub const TITLE_MAX_CHARS: usize = 100;
pub const GENRE_MAX_CHARS: usize = 50;
pub const YEAR_MIN: i32 = 1888;
pub const YEAR_MAX: i32 = 2030;

/// A stored movie. The poster bytes are loaded separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub imdb_link: String,
    pub genre: String,
    pub year: i32,
    pub has_poster: bool,
}

/// Field values for creating or updating a movie.
///
/// On update, `poster == None` keeps the stored poster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieDraft {
    pub title: String,
    pub imdb_link: String,
    pub genre: String,
    pub year: i32,
    pub poster: Option<Vec<u8>>,
}

impl MovieDraft {
    /// Trims text fields in place and checks every field.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing each invalid field.
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        self.title = self.title.trim().to_string();
        self.imdb_link = self.imdb_link.trim().to_string();
        self.genre = self.genre.trim().to_string();
        self.poster = self.poster.filter(|bytes| !bytes.is_empty());

        let mut errors = ValidationError::new();
        errors.check_text("title", &self.title, TITLE_MAX_CHARS);
        errors.check_link("imdb_link", &self.imdb_link);
        errors.check_text("genre", &self.genre, GENRE_MAX_CHARS);
        errors.check_range("year", self.year, YEAR_MIN, YEAR_MAX);
        errors.into_result().map(|()| self)
    }
}
