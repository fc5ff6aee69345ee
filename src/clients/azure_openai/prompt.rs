use std::num::NonZeroUsize;

use crate::domain::ContentKind;

/// System and user messages for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prompt {
    pub(crate) system: String,
    pub(crate) user: String,
}

pub(crate) fn build(subject: &str, kind: ContentKind, count: NonZeroUsize) -> Prompt {
    match kind {
        ContentKind::Review => Prompt {
            system: format!(
                "You are a movie critic. Generate a list of concise, one-sentence reviews for a movie. \
                 Your response must be a single JSON object with one key: 'reviews', which contains an array of {count} strings."
            ),
            user: format!(
                "Generate {count} unique, one-sentence movie reviews for the movie: {subject}."
            ),
        },
        ContentKind::Tweet => Prompt {
            system: format!(
                "You are a social media analyst. Generate a list of {count} realistic, short tweets (like from Twitter) about an actor. \
                 Your response must be a single JSON object with one key: 'tweets', which contains an array of {count} strings."
            ),
            user: format!(
                "Generate {count} unique, short tweets (140-280 characters) about the actor: {subject}."
            ),
        },
    }
}
