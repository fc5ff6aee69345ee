use std::fmt;

use serde::{Deserialize, Serialize};

/// What the text generator is asked to write about a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// One-sentence critic reviews of a movie.
    Review,
    /// Short social-media posts about an actor.
    Tweet,
}

impl ContentKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Review => "review",
            ContentKind::Tweet => "tweet",
        }
    }

    /// Plural form, also the JSON key the generator answers under.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            ContentKind::Review => "reviews",
            ContentKind::Tweet => "tweets",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
