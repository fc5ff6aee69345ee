use serde::Serialize;

/// Join row linking an actor to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActorMovie {
    pub id: i64,
    pub actor_id: i64,
    pub movie_id: i64,
}

/// Join row with the display names of both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorMovieListing {
    pub id: i64,
    pub actor_id: i64,
    pub actor_name: String,
    pub movie_id: i64,
    pub movie_title: String,
}
