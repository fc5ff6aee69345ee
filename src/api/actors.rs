use axum::{Json, extract::State, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::{JsonBody, PathParam};
use super::{details::scored_batch, images};
use crate::app::AppState;
use crate::domain::{Actor, ActorDraft, ContentKind, Movie, ScoredItem, Sentiment};
use crate::error::AppError;

/// Request body for create and update. `photo` is base64.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ActorForm {
    name: String,
    gender: String,
    age: i32,
    imdb_link: String,
    photo: Option<String>,
}

impl ActorForm {
    fn into_draft(self, max_image_bytes: usize) -> Result<ActorDraft, AppError> {
        let photo = images::decode("photo", self.photo.as_deref(), max_image_bytes)?;
        let draft = ActorDraft {
            name: self.name,
            gender: self.gender,
            age: self.age,
            imdb_link: self.imdb_link,
            photo,
        };
        Ok(draft.normalize()?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ActorDetails {
    actor: Actor,
    movies: Vec<Movie>,
    tweets: Vec<ScoredItem>,
    overall_score: f64,
    overall_label: Sentiment,
}

pub(crate) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Actor>>, AppError> {
    Ok(Json(state.dao().list_actors().await?))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ActorForm>,
) -> Result<(StatusCode, Json<Actor>), AppError> {
    let draft = form.into_draft(state.max_image_bytes())?;
    let actor = state.dao().create_actor(&draft).await?;
    info!(actor_id = actor.id, name = %actor.name, "actor created");
    Ok((StatusCode::CREATED, Json(actor)))
}

/// Actor with filmography and freshly generated, scored tweets.
pub(crate) async fn details(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<ActorDetails>, AppError> {
    let dao = state.dao();
    let actor = dao
        .get_actor(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("actor {id}")))?;
    let movies = dao.movies_with_actor(id).await?;

    let result = scored_batch(&state, &actor.name, ContentKind::Tweet).await;

    Ok(Json(ActorDetails {
        actor,
        movies,
        tweets: result.items,
        overall_score: result.overall_score,
        overall_label: result.overall_label,
    }))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(form): JsonBody<ActorForm>,
) -> Result<Json<Actor>, AppError> {
    let draft = form.into_draft(state.max_image_bytes())?;
    let actor = state
        .dao()
        .update_actor(id, &draft)
        .await?
        .ok_or_else(|| AppError::not_found(format!("actor {id}")))?;
    info!(actor_id = id, "actor updated");
    Ok(Json(actor))
}

pub(crate) async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if state.dao().delete_actor(id).await? {
        info!(actor_id = id, "actor deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("actor {id}")))
    }
}

pub(crate) async fn photo(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Response, AppError> {
    let bytes = state
        .dao()
        .actor_photo(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("photo for actor {id}")))?;
    Ok(images::respond(bytes))
}
