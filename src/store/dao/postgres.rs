use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::{ActorDao, ActorMovieDao, LinkOutcome, MovieDao};
use super::{CatalogDao, actor, actor_movie, movie};
use crate::domain::{Actor, ActorDraft, ActorMovieListing, Movie, MovieDraft};

/// Catalog DAO backed by a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgCatalogDao {
    pool: PgPool,
}

impl PgCatalogDao {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    /// Returns an error when a migration fails to apply.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run catalog migrations")
    }
}

#[async_trait]
impl CatalogDao for PgCatalogDao {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("postgres ping failed")?;
        Ok(())
    }
}

#[async_trait]
impl MovieDao for PgCatalogDao {
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        movie::list(&self.pool).await
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>> {
        movie::get(&self.pool, id).await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie> {
        movie::create(&self.pool, draft).await
    }

    async fn update_movie(&self, id: i64, draft: &MovieDraft) -> Result<Option<Movie>> {
        movie::update(&self.pool, id, draft).await
    }

    async fn delete_movie(&self, id: i64) -> Result<bool> {
        movie::delete(&self.pool, id).await
    }

    async fn movie_poster(&self, id: i64) -> Result<Option<Vec<u8>>> {
        movie::poster(&self.pool, id).await
    }
}

#[async_trait]
impl ActorDao for PgCatalogDao {
    async fn list_actors(&self) -> Result<Vec<Actor>> {
        actor::list(&self.pool).await
    }

    async fn get_actor(&self, id: i64) -> Result<Option<Actor>> {
        actor::get(&self.pool, id).await
    }

    async fn create_actor(&self, draft: &ActorDraft) -> Result<Actor> {
        actor::create(&self.pool, draft).await
    }

    async fn update_actor(&self, id: i64, draft: &ActorDraft) -> Result<Option<Actor>> {
        actor::update(&self.pool, id, draft).await
    }

    async fn delete_actor(&self, id: i64) -> Result<bool> {
        actor::delete(&self.pool, id).await
    }

    async fn actor_photo(&self, id: i64) -> Result<Option<Vec<u8>>> {
        actor::photo(&self.pool, id).await
    }
}

#[async_trait]
impl ActorMovieDao for PgCatalogDao {
    async fn list_actor_movies(&self) -> Result<Vec<ActorMovieListing>> {
        actor_movie::list(&self.pool).await
    }

    async fn create_actor_movie(
        &self,
        actor_id: i64,
        movie_id: i64,
    ) -> Result<LinkOutcome> {
        actor_movie::create(&self.pool, actor_id, movie_id).await
    }

    async fn delete_actor_movie(&self, id: i64) -> Result<bool> {
        actor_movie::delete(&self.pool, id).await
    }

    async fn actors_in_movie(&self, movie_id: i64) -> Result<Vec<Actor>> {
        actor_movie::actors_in_movie(&self.pool, movie_id).await
    }

    async fn movies_with_actor(&self, actor_id: i64) -> Result<Vec<Movie>> {
        actor_movie::movies_with_actor(&self.pool, actor_id).await
    }
}
