use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::{JsonBody, PathParam};
use crate::app::AppState;
use crate::domain::{ActorMovie, ActorMovieListing};
use crate::error::AppError;
use crate::store::LinkOutcome;

#[derive(Debug, Deserialize)]
pub(crate) struct LinkForm {
    actor_id: i64,
    movie_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ActorOption {
    id: i64,
    name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MovieOption {
    id: i64,
    title: String,
}

/// Everything a client needs to offer an actor/movie picker.
#[derive(Debug, Serialize)]
pub(crate) struct LinkOptions {
    actors: Vec<ActorOption>,
    movies: Vec<MovieOption>,
}

pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActorMovieListing>>, AppError> {
    Ok(Json(state.dao().list_actor_movies().await?))
}

pub(crate) async fn options(State(state): State<AppState>) -> Result<Json<LinkOptions>, AppError> {
    let dao = state.dao();
    let actors = dao
        .list_actors()
        .await?
        .into_iter()
        .map(|actor| ActorOption {
            id: actor.id,
            name: actor.name,
        })
        .collect();
    let movies = dao
        .list_movies()
        .await?
        .into_iter()
        .map(|movie| MovieOption {
            id: movie.id,
            title: movie.title,
        })
        .collect();
    Ok(Json(LinkOptions { actors, movies }))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<LinkForm>,
) -> Result<(StatusCode, Json<ActorMovie>), AppError> {
    let dao = state.dao();
    if dao.get_actor(form.actor_id).await?.is_none() {
        return Err(AppError::not_found(format!("actor {}", form.actor_id)));
    }
    if dao.get_movie(form.movie_id).await?.is_none() {
        return Err(AppError::not_found(format!("movie {}", form.movie_id)));
    }

    let outcome = dao.create_actor_movie(form.actor_id, form.movie_id).await?;
    let link = created_link(outcome, &form)?;
    info!(link_id = link.id, actor_id = link.actor_id, movie_id = link.movie_id, "actor linked to movie");
    Ok((StatusCode::CREATED, Json(link)))
}

pub(crate) async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if state.dao().delete_actor_movie(id).await? {
        info!(link_id = id, "actor unlinked from movie");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("actor-movie link {id}")))
    }
}

/// Either end can vanish between the lookups above and the insert.
fn created_link(outcome: LinkOutcome, form: &LinkForm) -> Result<ActorMovie, AppError> {
    match outcome {
        LinkOutcome::Created(link) => Ok(link),
        LinkOutcome::Duplicate => Err(AppError::Conflict(format!(
            "actor {} is already linked to movie {}",
            form.actor_id, form.movie_id
        ))),
        LinkOutcome::MissingRecord => Err(AppError::not_found(format!(
            "actor {} or movie {}",
            form.actor_id, form.movie_id
        ))),
    }
}
