use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Movie, MovieDraft};

#[async_trait]
pub trait MovieDao: Send + Sync {
    /// All movies ordered by id.
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>>;

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie>;

    /// Replaces the scalar fields; the poster changes only when the draft carries one.
    async fn update_movie(&self, id: i64, draft: &MovieDraft) -> Result<Option<Movie>>;

    /// Removes the movie and its actor links. Returns whether the movie existed.
    async fn delete_movie(&self, id: i64) -> Result<bool>;

    async fn movie_poster(&self, id: i64) -> Result<Option<Vec<u8>>>;
}
