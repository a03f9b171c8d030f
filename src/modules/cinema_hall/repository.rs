use super::model::CinemaHall;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub struct NewCinemaHall {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

#[derive(Default)]
pub struct CinemaHallChanges {
    pub name: Option<String>,
    pub rows: Option<i32>,
    pub seats_in_row: Option<i32>,
}

#[async_trait]
pub trait CinemaHallRepository: Send + Sync {
    async fn create_cinema_hall(&self, hall: NewCinemaHall) -> Result<CinemaHall>;

    async fn list_cinema_halls(&self) -> Result<Vec<CinemaHall>>;

    async fn find_cinema_hall(&self, id: Uuid) -> Result<Option<CinemaHall>>;

    async fn update_cinema_hall(
        &self,
        id: Uuid,
        changes: CinemaHallChanges,
    ) -> Result<Option<CinemaHall>>;

    async fn delete_cinema_hall(&self, id: Uuid) -> Result<bool>;
}
