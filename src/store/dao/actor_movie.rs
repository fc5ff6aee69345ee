//! Postgres queries for the `actor_movies` join table.
use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use super::actor::{ACTOR_COLUMNS, actor_from_row};
use super::movie::{MOVIE_COLUMNS, movie_from_row};
use super::traits::LinkOutcome;
use crate::domain::{Actor, ActorMovie, ActorMovieListing, Movie};

pub(super) async fn list(pool: &PgPool) -> Result<Vec<ActorMovieListing>> {
    let rows = sqlx::query(
        r"
        SELECT am.id, am.actor_id, a.name AS actor_name, am.movie_id, m.title AS movie_title
        FROM actor_movies am
        JOIN actors a ON a.id = am.actor_id
        JOIN movies m ON m.id = am.movie_id
        ORDER BY am.id
        ",
    )
    .fetch_all(pool)
    .await
    .context("failed to list actor-movie links")?;

    rows.iter()
        .map(|row| {
            Ok::<_, anyhow::Error>(ActorMovieListing {
                id: row.try_get("id")?,
                actor_id: row.try_get("actor_id")?,
                actor_name: row.try_get("actor_name")?,
                movie_id: row.try_get("movie_id")?,
                movie_title: row.try_get("movie_title")?,
            })
        })
        .collect()
}

pub(super) async fn create(pool: &PgPool, actor_id: i64, movie_id: i64) -> Result<LinkOutcome> {
    let inserted: Result<Option<i64>, sqlx::Error> = sqlx::query_scalar(
        r"
        INSERT INTO actor_movies (actor_id, movie_id)
        VALUES ($1, $2)
        ON CONFLICT (actor_id, movie_id) DO NOTHING
        RETURNING id
        ",
    )
    .bind(actor_id)
    .bind(movie_id)
    .fetch_optional(pool)
    .await;

    match inserted {
        Ok(Some(id)) => Ok(LinkOutcome::Created(ActorMovie {
            id,
            actor_id,
            movie_id,
        })),
        Ok(None) => Ok(LinkOutcome::Duplicate),
        // 23503: one end was deleted after the caller looked it up.
        Err(sqlx::Error::Database(error)) if error.is_foreign_key_violation() => {
            Ok(LinkOutcome::MissingRecord)
        }
        Err(error) => Err(error)
            .with_context(|| format!("failed to link actor {actor_id} to movie {movie_id}")),
    }
}

pub(super) async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
    let deleted = sqlx::query("DELETE FROM actor_movies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("failed to delete actor-movie link {id}"))?
        .rows_affected();

    Ok(deleted > 0)
}

pub(super) async fn actors_in_movie(pool: &PgPool, movie_id: i64) -> Result<Vec<Actor>> {
    let rows = sqlx::query(&format!(
        "SELECT {ACTOR_COLUMNS} FROM actors a \
         JOIN actor_movies am ON am.actor_id = a.id \
         WHERE am.movie_id = $1 ORDER BY a.id"
    ))
    .bind(movie_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to fetch actors of movie {movie_id}"))?;

    rows.iter().map(actor_from_row).collect()
}

pub(super) async fn movies_with_actor(pool: &PgPool, actor_id: i64) -> Result<Vec<Movie>> {
    let rows = sqlx::query(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies m \
         JOIN actor_movies am ON am.movie_id = m.id \
         WHERE am.actor_id = $1 ORDER BY m.id"
    ))
    .bind(actor_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to fetch movies of actor {actor_id}"))?;

    rows.iter().map(movie_from_row).collect()
}
