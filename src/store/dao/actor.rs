//! Postgres queries for `actors`.
use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{Actor, ActorDraft};

pub(super) const ACTOR_COLUMNS: &str =
    "a.id, a.name, a.gender, a.age, a.imdb_link, (a.photo IS NOT NULL) AS has_photo";

pub(super) fn actor_from_row(row: &PgRow) -> Result<Actor> {
    Ok(Actor {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        gender: row.try_get("gender")?,
        age: row.try_get("age")?,
        imdb_link: row.try_get("imdb_link")?,
        has_photo: row.try_get("has_photo")?,
    })
}

pub(super) async fn list(pool: &PgPool) -> Result<Vec<Actor>> {
    let rows = sqlx::query(&format!("SELECT {ACTOR_COLUMNS} FROM actors a ORDER BY a.id"))
        .fetch_all(pool)
        .await
        .context("failed to list actors")?;

    rows.iter().map(actor_from_row).collect()
}

pub(super) async fn get(pool: &PgPool, id: i64) -> Result<Option<Actor>> {
    let row = sqlx::query(&format!("SELECT {ACTOR_COLUMNS} FROM actors a WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch actor {id}"))?;

    row.as_ref().map(actor_from_row).transpose()
}

pub(super) async fn create(pool: &PgPool, draft: &ActorDraft) -> Result<Actor> {
    let row = sqlx::query(
        r"
        INSERT INTO actors AS a (name, gender, age, imdb_link, photo)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING a.id, a.name, a.gender, a.age, a.imdb_link, (a.photo IS NOT NULL) AS has_photo
        ",
    )
    .bind(&draft.name)
    .bind(&draft.gender)
    .bind(draft.age)
    .bind(&draft.imdb_link)
    .bind(draft.photo.as_deref())
    .fetch_one(pool)
    .await
    .context("failed to insert actor")?;

    actor_from_row(&row)
}

pub(super) async fn update(pool: &PgPool, id: i64, draft: &ActorDraft) -> Result<Option<Actor>> {
    let row = sqlx::query(
        r"
        UPDATE actors AS a
        SET name = $2,
            gender = $3,
            age = $4,
            imdb_link = $5,
            photo = COALESCE($6, a.photo)
        WHERE a.id = $1
        RETURNING a.id, a.name, a.gender, a.age, a.imdb_link, (a.photo IS NOT NULL) AS has_photo
        ",
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.gender)
    .bind(draft.age)
    .bind(&draft.imdb_link)
    .bind(draft.photo.as_deref())
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to update actor {id}"))?;

    row.as_ref().map(actor_from_row).transpose()
}

pub(super) async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    sqlx::query("DELETE FROM actor_movies WHERE actor_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to unlink movies from actor {id}"))?;

    let deleted = sqlx::query("DELETE FROM actors WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete actor {id}"))?
        .rows_affected();

    tx.commit().await.context("failed to commit actor deletion")?;
    Ok(deleted > 0)
}

pub(super) async fn photo(pool: &PgPool, id: i64) -> Result<Option<Vec<u8>>> {
    let photo: Option<Option<Vec<u8>>> = sqlx::query_scalar("SELECT photo FROM actors WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch photo for actor {id}"))?;

    Ok(photo.flatten())
}
