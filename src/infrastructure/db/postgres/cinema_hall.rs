use super::{PgStore, restricted_delete};
use crate::modules::cinema_hall::model::CinemaHall;
use crate::modules::cinema_hall::repository::{
    CinemaHallChanges, CinemaHallRepository, NewCinemaHall,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl CinemaHallRepository for PgStore {
    async fn create_cinema_hall(&self, hall: NewCinemaHall) -> Result<CinemaHall> {
        let hall = sqlx::query_as::<_, CinemaHall>(
            r#"
            INSERT INTO cinema_halls (id, name, rows, seats_in_row)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, rows, seats_in_row
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(hall.name)
        .bind(hall.rows)
        .bind(hall.seats_in_row)
        .fetch_one(&self.pool)
        .await?;

        Ok(hall)
    }

    async fn list_cinema_halls(&self) -> Result<Vec<CinemaHall>> {
        let halls = sqlx::query_as::<_, CinemaHall>(
            "SELECT id, name, rows, seats_in_row FROM cinema_halls ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(halls)
    }

    async fn find_cinema_hall(&self, id: Uuid) -> Result<Option<CinemaHall>> {
        let hall = sqlx::query_as::<_, CinemaHall>(
            "SELECT id, name, rows, seats_in_row FROM cinema_halls WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hall)
    }

    async fn update_cinema_hall(
        &self,
        id: Uuid,
        changes: CinemaHallChanges,
    ) -> Result<Option<CinemaHall>> {
        let hall = sqlx::query_as::<_, CinemaHall>(
            r#"
            UPDATE cinema_halls
            SET name = COALESCE($2, name),
                rows = COALESCE($3, rows),
                seats_in_row = COALESCE($4, seats_in_row)
            WHERE id = $1
            RETURNING id, name, rows, seats_in_row
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.rows)
        .bind(changes.seats_in_row)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hall)
    }

    async fn delete_cinema_hall(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cinema_halls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restricted_delete("Cinema hall"))?;

        Ok(result.rows_affected() > 0)
    }
}
