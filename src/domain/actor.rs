use serde::Serialize;

use super::ValidationError;

pub const NAME_MAX_CHARS: usize = 100;
pub const GENDER_MAX_CHARS: usize = 20;
pub const AGE_MIN: i32 = 0;
pub const AGE_MAX: i32 = 120;

/// A stored actor. The photo bytes are loaded separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub imdb_link: String,
    pub has_photo: bool,
}

/// Field values for creating or updating an actor.
///
/// On update, `photo == None` keeps the stored photo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorDraft {
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub imdb_link: String,
    pub photo: Option<Vec<u8>>,
}

impl ActorDraft {
    /// # Errors
    /// Returns a [`ValidationError`] listing each invalid field.
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        self.name = self.name.trim().to_string();
        self.gender = self.gender.trim().to_string();
        self.imdb_link = self.imdb_link.trim().to_string();
        self.photo = self.photo.filter(|bytes| !bytes.is_empty());

        let mut errors = ValidationError::new();
        errors.check_text("name", &self.name, NAME_MAX_CHARS);
        errors.check_text("gender", &self.gender, GENDER_MAX_CHARS);
        errors.check_range("age", self.age, AGE_MIN, AGE_MAX);
        errors.check_link("imdb_link", &self.imdb_link);
        errors.into_result().map(|()| self)
    }
}
