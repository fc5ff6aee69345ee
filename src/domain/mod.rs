mod actor;
mod actor_movie;
mod content_kind;
mod movie;
mod sentiment;
mod validation;

pub use actor::{Actor, ActorDraft};
pub use actor_movie::{ActorMovie, ActorMovieListing};
pub use content_kind::ContentKind;
pub use movie::{Movie, MovieDraft};
pub use sentiment::{AggregateResult, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, ScoredItem, Sentiment};
pub use validation::ValidationError;
