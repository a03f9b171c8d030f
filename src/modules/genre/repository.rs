use super::model::Genre;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn create_genre(&self, name: &str) -> Result<Genre>;

    /// All genres ordered by name.
    async fn list_genres(&self) -> Result<Vec<Genre>>;

    async fn find_genre(&self, id: Uuid) -> Result<Option<Genre>>;

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>>;

    /// Genres among `ids` that exist. Unknown ids are silently absent.
    async fn find_genres_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Genre>>;

    async fn update_genre(&self, id: Uuid, name: Option<String>) -> Result<Option<Genre>>;

    /// Deletes the genre and its movie links. Returns false if it did not exist.
    async fn delete_genre(&self, id: Uuid) -> Result<bool>;
}
