pub mod dao;

pub use dao::{
    ActorDao, ActorMovieDao, CatalogDao, LinkOutcome, MemoryCatalogDao, MovieDao, PgCatalogDao,
};
