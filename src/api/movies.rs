use axum::{Json, extract::State, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extract::{JsonBody, PathParam};
use super::{details::scored_batch, images};
use crate::app::AppState;
use crate::domain::{Actor, ContentKind, Movie, MovieDraft, ScoredItem, Sentiment};
use crate::error::AppError;

/// Request body for create and update. `poster` is base64.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MovieForm {
    title: String,
    imdb_link: String,
    genre: String,
    year: i32,
    poster: Option<String>,
}

impl MovieForm {
    fn into_draft(self, max_image_bytes: usize) -> Result<MovieDraft, AppError> {
        let poster = images::decode("poster", self.poster.as_deref(), max_image_bytes)?;
        let draft = MovieDraft {
            title: self.title,
            imdb_link: self.imdb_link,
            genre: self.genre,
            year: self.year,
            poster,
        };
        Ok(draft.normalize()?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MovieDetails {
    movie: Movie,
    actors: Vec<Actor>,
    reviews: Vec<ScoredItem>,
    overall_score: f64,
    overall_label: Sentiment,
}

pub(crate) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, AppError> {
    Ok(Json(state.dao().list_movies().await?))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<MovieForm>,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    let draft = form.into_draft(state.max_image_bytes())?;
    let movie = state.dao().create_movie(&draft).await?;
    info!(movie_id = movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Movie with its cast and freshly generated, scored reviews.
pub(crate) async fn details(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<MovieDetails>, AppError> {
    let dao = state.dao();
    let movie = dao
        .get_movie(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;
    let actors = dao.actors_in_movie(id).await?;

    let result = scored_batch(&state, &movie.title, ContentKind::Review).await;

    Ok(Json(MovieDetails {
        movie,
        actors,
        reviews: result.items,
        overall_score: result.overall_score,
        overall_label: result.overall_label,
    }))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(form): JsonBody<MovieForm>,
) -> Result<Json<Movie>, AppError> {
    let draft = form.into_draft(state.max_image_bytes())?;
    let movie = state
        .dao()
        .update_movie(id, &draft)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id}")))?;
    info!(movie_id = id, "movie updated");
    Ok(Json(movie))
}

pub(crate) async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if state.dao().delete_movie(id).await? {
        info!(movie_id = id, "movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("movie {id}")))
    }
}

pub(crate) async fn poster(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Response, AppError> {
    let bytes = state
        .dao()
        .movie_poster(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("poster for movie {id}")))?;
    Ok(images::respond(bytes))
}
