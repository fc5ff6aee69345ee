use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Actor, ActorMovie, ActorMovieListing, Movie};

/// Result of asking the store to link an actor to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created(ActorMovie),
    /// The pair is already linked.
    Duplicate,
    /// The actor or the movie no longer exists.
    MissingRecord,
}

#[async_trait]
pub trait ActorMovieDao: Send + Sync {
    async fn list_actor_movies(&self) -> Result<Vec<ActorMovieListing>>;

    /// Links an actor to a movie.
    ///
    /// Missing ends are reported as [`LinkOutcome::MissingRecord`], even when
    /// they disappear after the caller checked for them.
    async fn create_actor_movie(&self, actor_id: i64, movie_id: i64) -> Result<LinkOutcome>;

    async fn delete_actor_movie(&self, id: i64) -> Result<bool>;

    async fn actors_in_movie(&self, movie_id: i64) -> Result<Vec<Actor>>;

    async fn movies_with_actor(&self, actor_id: i64) -> Result<Vec<Movie>>;
}
