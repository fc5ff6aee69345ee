//! DAO trait definitions, one per catalog area.
mod actor;
mod actor_movie;
mod movie;

pub use actor::ActorDao;
pub use actor_movie::{ActorMovieDao, LinkOutcome};
pub use movie::MovieDao;
