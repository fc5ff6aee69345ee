use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Actor, ActorDraft};

#[async_trait]
pub trait ActorDao: Send + Sync {
    async fn list_actors(&self) -> Result<Vec<Actor>>;

    async fn get_actor(&self, id: i64) -> Result<Option<Actor>>;

    async fn create_actor(&self, draft: &ActorDraft) -> Result<Actor>;

    /// Replaces the scalar fields; the photo changes only when the draft carries one.
    async fn update_actor(&self, id: i64, draft: &ActorDraft) -> Result<Option<Actor>>;

    /// Removes the actor and its movie links. Returns whether the actor existed.
    async fn delete_actor(&self, id: i64) -> Result<bool>;

    async fn actor_photo(&self, id: i64) -> Result<Option<Vec<u8>>>;
}
