use super::model::Actor;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn create_actor(&self, first_name: &str, last_name: &str) -> Result<Actor>;

    /// All actors ordered by first name, then last name.
    async fn list_actors(&self) -> Result<Vec<Actor>>;

    async fn find_actor(&self, id: Uuid) -> Result<Option<Actor>>;

    async fn find_actors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Actor>>;

    async fn update_actor(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<Actor>>;

    async fn delete_actor(&self, id: Uuid) -> Result<bool>;
}
