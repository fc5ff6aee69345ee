//! Postgres queries for `movies`.
use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{Movie, MovieDraft};

pub(super) const MOVIE_COLUMNS: &str =
    "m.id, m.title, m.imdb_link, m.genre, m.year, (m.poster IS NOT NULL) AS has_poster";

pub(super) fn movie_from_row(row: &PgRow) -> Result<Movie> {
    Ok(Movie {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        imdb_link: row.try_get("imdb_link")?,
        genre: row.try_get("genre")?,
        year: row.try_get("year")?,
        has_poster: row.try_get("has_poster")?,
    })
}

pub(super) async fn list(pool: &PgPool) -> Result<Vec<Movie>> {
    let rows = sqlx::query(&format!("SELECT {MOVIE_COLUMNS} FROM movies m ORDER BY m.id"))
        .fetch_all(pool)
        .await
        .context("failed to list movies")?;

    rows.iter().map(movie_from_row).collect()
}

pub(super) async fn get(pool: &PgPool, id: i64) -> Result<Option<Movie>> {
    let row = sqlx::query(&format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch movie {id}"))?;

    row.as_ref().map(movie_from_row).transpose()
}

pub(super) async fn create(pool: &PgPool, draft: &MovieDraft) -> Result<Movie> {
    let row = sqlx::query(
        r"
        INSERT INTO movies AS m (title, imdb_link, genre, year, poster)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING m.id, m.title, m.imdb_link, m.genre, m.year, (m.poster IS NOT NULL) AS has_poster
        ",
    )
    .bind(&draft.title)
    .bind(&draft.imdb_link)
    .bind(&draft.genre)
    .bind(draft.year)
    .bind(draft.poster.as_deref())
    .fetch_one(pool)
    .await
    .context("failed to insert movie")?;

    movie_from_row(&row)
}

pub(super) async fn update(pool: &PgPool, id: i64, draft: &MovieDraft) -> Result<Option<Movie>> {
    let row = sqlx::query(
        r"
        UPDATE movies AS m
        SET title = $2,
            imdb_link = $3,
            genre = $4,
            year = $5,
            poster = COALESCE($6, m.poster)
        WHERE m.id = $1
        RETURNING m.id, m.title, m.imdb_link, m.genre, m.year, (m.poster IS NOT NULL) AS has_poster
        ",
    )
    .bind(id)
    .bind(&draft.title)
    .bind(&draft.imdb_link)
    .bind(&draft.genre)
    .bind(draft.year)
    .bind(draft.poster.as_deref())
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to update movie {id}"))?;

    row.as_ref().map(movie_from_row).transpose()
}

pub(super) async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    sqlx::query("DELETE FROM actor_movies WHERE movie_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to unlink actors from movie {id}"))?;

    let deleted = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete movie {id}"))?
        .rows_affected();

    tx.commit().await.context("failed to commit movie deletion")?;
    Ok(deleted > 0)
}

pub(super) async fn poster(pool: &PgPool, id: i64) -> Result<Option<Vec<u8>>> {
    let poster: Option<Option<Vec<u8>>> = sqlx::query_scalar("SELECT poster FROM movies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch poster for movie {id}"))?;

    Ok(poster.flatten())
}
