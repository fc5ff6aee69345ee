use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CatalogDao;
use super::traits::{ActorDao, ActorMovieDao, LinkOutcome, MovieDao};
use crate::domain::{Actor, ActorDraft, ActorMovie, ActorMovieListing, Movie, MovieDraft};

#[derive(Debug, Clone)]
struct StoredMovie {
    movie: Movie,
    poster: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
struct StoredActor {
    actor: Actor,
    photo: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct CatalogState {
    movies: BTreeMap<i64, StoredMovie>,
    actors: BTreeMap<i64, StoredActor>,
    links: BTreeMap<i64, ActorMovie>,
    last_movie_id: i64,
    last_actor_id: i64,
    last_link_id: i64,
}

/// Process-local catalog. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryCatalogDao {
    state: RwLock<CatalogState>,
}

impl MemoryCatalogDao {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn stored_movie(id: i64, draft: &MovieDraft, poster: Option<Vec<u8>>) -> StoredMovie {
    StoredMovie {
        movie: Movie {
            id,
            title: draft.title.clone(),
            imdb_link: draft.imdb_link.clone(),
            genre: draft.genre.clone(),
            year: draft.year,
            has_poster: poster.is_some(),
        },
        poster,
    }
}

fn stored_actor(id: i64, draft: &ActorDraft, photo: Option<Vec<u8>>) -> StoredActor {
    StoredActor {
        actor: Actor {
            id,
            name: draft.name.clone(),
            gender: draft.gender.clone(),
            age: draft.age,
            imdb_link: draft.imdb_link.clone(),
            has_photo: photo.is_some(),
        },
        photo,
    }
}

#[async_trait]
impl CatalogDao for MemoryCatalogDao {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl MovieDao for MemoryCatalogDao {
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        let state = self.state.read().await;
        Ok(state.movies.values().map(|m| m.movie.clone()).collect())
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>> {
        let state = self.state.read().await;
        Ok(state.movies.get(&id).map(|m| m.movie.clone()))
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie> {
        let mut state = self.state.write().await;
        state.last_movie_id += 1;
        let id = state.last_movie_id;
        let stored = stored_movie(id, draft, draft.poster.clone());
        let movie = stored.movie.clone();
        state.movies.insert(id, stored);
        Ok(movie)
    }

    async fn update_movie(&self, id: i64, draft: &MovieDraft) -> Result<Option<Movie>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.movies.get_mut(&id) else {
            return Ok(None);
        };
        let poster = draft.poster.clone().or_else(|| existing.poster.take());
        *existing = stored_movie(id, draft, poster);
        Ok(Some(existing.movie.clone()))
    }

    async fn delete_movie(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        state.links.retain(|_, link| link.movie_id != id);
        Ok(state.movies.remove(&id).is_some())
    }

    async fn movie_poster(&self, id: i64) -> Result<Option<Vec<u8>>> {
        let state = self.state.read().await;
        Ok(state.movies.get(&id).and_then(|m| m.poster.clone()))
    }
}

#[async_trait]
impl ActorDao for MemoryCatalogDao {
    async fn list_actors(&self) -> Result<Vec<Actor>> {
        let state = self.state.read().await;
        Ok(state.actors.values().map(|a| a.actor.clone()).collect())
    }

    async fn get_actor(&self, id: i64) -> Result<Option<Actor>> {
        let state = self.state.read().await;
        Ok(state.actors.get(&id).map(|a| a.actor.clone()))
    }

    async fn create_actor(&self, draft: &ActorDraft) -> Result<Actor> {
        let mut state = self.state.write().await;
        state.last_actor_id += 1;
        let id = state.last_actor_id;
        let stored = stored_actor(id, draft, draft.photo.clone());
        let actor = stored.actor.clone();
        state.actors.insert(id, stored);
        Ok(actor)
    }

    async fn update_actor(&self, id: i64, draft: &ActorDraft) -> Result<Option<Actor>> {
        let mut state = self.state.write().await;
        let Some(existing) = state.actors.get_mut(&id) else {
            return Ok(None);
        };
        let photo = draft.photo.clone().or_else(|| existing.photo.take());
        *existing = stored_actor(id, draft, photo);
        Ok(Some(existing.actor.clone()))
    }

    async fn delete_actor(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        state.links.retain(|_, link| link.actor_id != id);
        Ok(state.actors.remove(&id).is_some())
    }

    async fn actor_photo(&self, id: i64) -> Result<Option<Vec<u8>>> {
        let state = self.state.read().await;
        Ok(state.actors.get(&id).and_then(|a| a.photo.clone()))
    }
}

#[async_trait]
impl ActorMovieDao for MemoryCatalogDao {
    async fn list_actor_movies(&self) -> Result<Vec<ActorMovieListing>> {
        let state = self.state.read().await;
        let listings = state
            .links
            .values()
            .filter_map(|link| {
                let actor = state.actors.get(&link.actor_id)?;
                let movie = state.movies.get(&link.movie_id)?;
                Some(ActorMovieListing {
                    id: link.id,
                    actor_id: link.actor_id,
                    actor_name: actor.actor.name.clone(),
                    movie_id: link.movie_id,
                    movie_title: movie.movie.title.clone(),
                })
            })
            .collect();
        Ok(listings)
    }

    async fn create_actor_movie(
        &self,
        actor_id: i64,
        movie_id: i64,
    ) -> Result<LinkOutcome> {
        let mut state = self.state.write().await;
        if !state.actors.contains_key(&actor_id) || !state.movies.contains_key(&movie_id) {
            return Ok(LinkOutcome::MissingRecord);
        }
        if state
            .links
            .values()
            .any(|link| link.actor_id == actor_id && link.movie_id == movie_id)
        {
            return Ok(LinkOutcome::Duplicate);
        }

        state.last_link_id += 1;
        let link = ActorMovie {
            id: state.last_link_id,
            actor_id,
            movie_id,
        };
        state.links.insert(link.id, link);
        Ok(LinkOutcome::Created(link))
    }

    async fn delete_actor_movie(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.links.remove(&id).is_some())
    }

    async fn actors_in_movie(&self, movie_id: i64) -> Result<Vec<Actor>> {
        let state = self.state.read().await;
        let mut actors: Vec<Actor> = state
            .links
            .values()
            .filter(|link| link.movie_id == movie_id)
            .filter_map(|link| state.actors.get(&link.actor_id))
            .map(|a| a.actor.clone())
            .collect();
        actors.sort_by_key(|actor| actor.id);
        Ok(actors)
    }

    async fn movies_with_actor(&self, actor_id: i64) -> Result<Vec<Movie>> {
        let state = self.state.read().await;
        let mut movies: Vec<Movie> = state
            .links
            .values()
            .filter(|link| link.actor_id == actor_id)
            .filter_map(|link| state.movies.get(&link.movie_id))
            .map(|m| m.movie.clone())
            .collect();
        movies.sort_by_key(|movie| movie.id);
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            imdb_link: String::new(),
            genre: "Drama".to_string(),
            year: 2001,
            poster: None,
        }
    }

    fn actor_draft(name: &str) -> ActorDraft {
        ActorDraft {
            name: name.to_string(),
            gender: "Female".to_string(),
            age: 40,
            imdb_link: String::new(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn update_keeps_poster_when_none_supplied() {
        let dao = MemoryCatalogDao::new();
        let mut draft = movie_draft("Amélie");
        draft.poster = Some(vec![1, 2, 3]);
        let created = dao.create_movie(&draft).await.unwrap();
        assert!(created.has_poster);

        let updated = dao
            .update_movie(created.id, &movie_draft("Amelie"))
            .await
            .unwrap()
            .expect("movie exists");

        assert_eq!(updated.title, "Amelie");
        assert!(updated.has_poster);
        assert_eq!(dao.movie_poster(created.id).await.unwrap(), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn update_replaces_poster_when_supplied() {
        let dao = MemoryCatalogDao::new();
        let mut draft = movie_draft("Heat");
        draft.poster = Some(vec![1]);
        let created = dao.create_movie(&draft).await.unwrap();

        draft.poster = Some(vec![9, 9]);
        dao.update_movie(created.id, &draft).await.unwrap();

        assert_eq!(dao.movie_poster(created.id).await.unwrap(), Some(vec![9, 9]));
    }

    #[tokio::test]
    async fn duplicate_link_is_rejected() {
        let dao = MemoryCatalogDao::new();
        let movie = dao.create_movie(&movie_draft("Heat")).await.unwrap();
        let actor = dao.create_actor(&actor_draft("Ashley Judd")).await.unwrap();

        let first = dao.create_actor_movie(actor.id, movie.id).await.unwrap();
        let second = dao.create_actor_movie(actor.id, movie.id).await.unwrap();

        assert!(matches!(first, LinkOutcome::Created(_)));
        assert_eq!(second, LinkOutcome::Duplicate);
        assert_eq!(dao.list_actor_movies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn link_to_deleted_record_reports_missing_end() {
        let dao = MemoryCatalogDao::new();
        let movie = dao.create_movie(&movie_draft("Heat")).await.unwrap();
        let actor = dao.create_actor(&actor_draft("Val Kilmer")).await.unwrap();
        assert!(dao.delete_actor(actor.id).await.unwrap());

        let outcome = dao.create_actor_movie(actor.id, movie.id).await.unwrap();

        assert_eq!(outcome, LinkOutcome::MissingRecord);
        assert!(dao.list_actor_movies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_movie_removes_its_links() {
        let dao = MemoryCatalogDao::new();
        let heat = dao.create_movie(&movie_draft("Heat")).await.unwrap();
        let ronin = dao.create_movie(&movie_draft("Ronin")).await.unwrap();
        let actor = dao.create_actor(&actor_draft("Natascha McElhone")).await.unwrap();
        dao.create_actor_movie(actor.id, heat.id).await.unwrap();
        dao.create_actor_movie(actor.id, ronin.id).await.unwrap();

        assert!(dao.delete_movie(heat.id).await.unwrap());
        assert!(!dao.delete_movie(heat.id).await.unwrap());

        let remaining = dao.movies_with_actor(actor.id).await.unwrap();
        assert_eq!(remaining, vec![ronin]);
    }

    #[tokio::test]
    async fn actors_in_movie_are_sorted_by_id() {
        let dao = MemoryCatalogDao::new();
        let movie = dao.create_movie(&movie_draft("Heat")).await.unwrap();
        let first = dao.create_actor(&actor_draft("A")).await.unwrap();
        let second = dao.create_actor(&actor_draft("B")).await.unwrap();
        dao.create_actor_movie(second.id, movie.id).await.unwrap();
        dao.create_actor_movie(first.id, movie.id).await.unwrap();

        let actors = dao.actors_in_movie(movie.id).await.unwrap();
        let ids: Vec<i64> = actors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
