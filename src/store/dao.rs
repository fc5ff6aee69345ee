//! Catalog data access: focused traits plus a Postgres and an in-memory implementation.
mod actor;
mod actor_movie;
mod memory;
mod movie;
mod postgres;
mod traits;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryCatalogDao;
pub use postgres::PgCatalogDao;
pub use traits::{ActorDao, ActorMovieDao, LinkOutcome, MovieDao};

/// Everything the HTTP layer needs from storage.
#[async_trait]
pub trait CatalogDao: MovieDao + ActorDao + ActorMovieDao {
    /// Short name of the backing store, used in logs and readiness output.
    fn backend(&self) -> &'static str;

    /// Cheap round trip proving the store can serve queries.
    async fn ping(&self) -> Result<()>;
}
