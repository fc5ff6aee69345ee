//! Deterministic stand-ins for the scorer and the text generator.
//!
//! Used by unit tests and by the integration tests under `tests/`.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::analysis::SentimentScorer;
use crate::clients::{GenerationError, TextGenerator};
use crate::domain::{Actor, ActorDraft, ActorMovieListing, ContentKind, Movie, MovieDraft};
use crate::store::{ActorDao, ActorMovieDao, CatalogDao, LinkOutcome, MovieDao};

const POSITIVE_WORDS: &[&str] = &[
    "loved", "love", "great", "amazing", "good", "wonderful", "brilliant", "best",
];
const NEGATIVE_WORDS: &[&str] = &[
    "terrible", "waste", "awful", "bad", "boring", "horrible", "worst", "hated",
];

/// Counts positive and negative keywords. Anything without a keyword is `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl SentimentScorer for KeywordScorer {
    fn compound(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let (mut positive, mut negative) = (0_i32, 0_i32);
        for word in lowered.split(|c: char| !c.is_alphabetic()) {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }
        let net = f64::from(positive - negative);
        net / (net.abs() + 1.0)
    }
}

#[derive(Debug)]
enum Behaviour {
    Echo,
    Fixed(Vec<String>),
    Fail(GenerationError),
}

/// Scripted [`TextGenerator`] that records every call.
#[derive(Debug)]
pub struct StubGenerator {
    behaviour: Behaviour,
    calls: Mutex<Vec<(String, ContentKind, usize)>>,
}

impl StubGenerator {
    /// Returns `count` lines of the form `"<kind> <n> about <subject>"`.
    #[must_use]
    pub fn echo() -> Self {
        Self::with(Behaviour::Echo)
    }

    /// Returns `texts` regardless of the requested count.
    #[must_use]
    pub fn fixed<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with(Behaviour::Fixed(texts.into_iter().map(Into::into).collect()))
    }

    #[must_use]
    pub fn failing(error: GenerationError) -> Self {
        Self::with(Behaviour::Fail(error))
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(subject, kind, count)` seen so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, ContentKind, usize)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_batch(
        &self,
        subject: &str,
        kind: ContentKind,
        count: NonZeroUsize,
    ) -> Result<Vec<String>, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((subject.to_string(), kind, count.get()));
        }

        match &self.behaviour {
            Behaviour::Echo => Ok((1..=count.get())
                .map(|n| format!("{kind} {n} about {subject}"))
                .collect()),
            Behaviour::Fixed(texts) => Ok(texts.clone()),
            Behaviour::Fail(error) => Err(error.clone()),
        }
    }
}

/// Catalog store whose every call fails, as if the database were down.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCatalogDao;

const UNAVAILABLE: &str = "catalog store unavailable";

#[async_trait]
impl CatalogDao for UnavailableCatalogDao {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn ping(&self) -> Result<()> {
        bail!(UNAVAILABLE)
    }
}

#[async_trait]
impl MovieDao for UnavailableCatalogDao {
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        bail!(UNAVAILABLE)
    }

    async fn get_movie(&self, _id: i64) -> Result<Option<Movie>> {
        bail!(UNAVAILABLE)
    }

    async fn create_movie(&self, _draft: &MovieDraft) -> Result<Movie> {
        bail!(UNAVAILABLE)
    }

    async fn update_movie(&self, _id: i64, _draft: &MovieDraft) -> Result<Option<Movie>> {
        bail!(UNAVAILABLE)
    }

    async fn delete_movie(&self, _id: i64) -> Result<bool> {
        bail!(UNAVAILABLE)
    }

    async fn movie_poster(&self, _id: i64) -> Result<Option<Vec<u8>>> {
        bail!(UNAVAILABLE)
    }
}

#[async_trait]
impl ActorDao for UnavailableCatalogDao {
    async fn list_actors(&self) -> Result<Vec<Actor>> {
        bail!(UNAVAILABLE)
    }

    async fn get_actor(&self, _id: i64) -> Result<Option<Actor>> {
        bail!(UNAVAILABLE)
    }

    async fn create_actor(&self, _draft: &ActorDraft) -> Result<Actor> {
        bail!(UNAVAILABLE)
    }

    async fn update_actor(&self, _id: i64, _draft: &ActorDraft) -> Result<Option<Actor>> {
        bail!(UNAVAILABLE)
    }

    async fn delete_actor(&self, _id: i64) -> Result<bool> {
        bail!(UNAVAILABLE)
    }

    async fn actor_photo(&self, _id: i64) -> Result<Option<Vec<u8>>> {
        bail!(UNAVAILABLE)
    }
}

#[async_trait]
impl ActorMovieDao for UnavailableCatalogDao {
    async fn list_actor_movies(&self) -> Result<Vec<ActorMovieListing>> {
        bail!(UNAVAILABLE)
    }

    async fn create_actor_movie(
        &self,
        _actor_id: i64,
        _movie_id: i64,
    ) -> Result<LinkOutcome> {
        bail!(UNAVAILABLE)
    }

    async fn delete_actor_movie(&self, _id: i64) -> Result<bool> {
        bail!(UNAVAILABLE)
    }

    async fn actors_in_movie(&self, _movie_id: i64) -> Result<Vec<Actor>> {
        bail!(UNAVAILABLE)
    }

    async fn movies_with_actor(&self, _actor_id: i64) -> Result<Vec<Movie>> {
        bail!(UNAVAILABLE)
    }
}
