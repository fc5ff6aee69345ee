pub(crate) mod actor_movies;
pub(crate) mod actors;
pub(crate) mod details;
pub(crate) mod extract;
pub(crate) mod health;
pub(crate) mod images;
pub(crate) mod metrics;
pub(crate) mod movies;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get},
};

use crate::app::AppState;

pub(crate) fn router(state: AppState) -> Router {
    // Movie and actor forms carry base64 images.
    let image_forms = Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::details).put(movies::update).delete(movies::remove),
        )
        .route("/actors", get(actors::list).post(actors::create))
        .route(
            "/actors/{id}",
            get(actors::details).put(actors::update).delete(actors::remove),
        )
        .layer(DefaultBodyLimit::max(images::body_limit(
            state.max_image_bytes(),
        )));

    Router::new()
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics::exporter))
        .merge(image_forms)
        .route("/movies/{id}/poster", get(movies::poster))
        .route("/actors/{id}/photo", get(actors::photo))
        .route(
            "/actor-movies",
            get(actor_movies::list).post(actor_movies::create),
        )
        .route("/actor-movies/options", get(actor_movies::options))
        .route("/actor-movies/{id}", delete(actor_movies::remove))
        .with_state(state)
}
