use super::PgStore;
use crate::modules::actor::model::Actor;
use crate::modules::actor::repository::ActorRepository;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl ActorRepository for PgStore {
    async fn create_actor(&self, first_name: &str, last_name: &str) -> Result<Actor> {
        let actor = sqlx::query_as::<_, Actor>(
            r#"
            INSERT INTO actors (id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(actor)
    }

    async fn list_actors(&self) -> Result<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>(
            "SELECT id, first_name, last_name FROM actors ORDER BY first_name, last_name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(actors)
    }

    async fn find_actor(&self, id: Uuid) -> Result<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(
            "SELECT id, first_name, last_name FROM actors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(actor)
    }

    async fn find_actors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Actor>> {
        let actors = sqlx::query_as::<_, Actor>(
            r#"
            SELECT id, first_name, last_name FROM actors
            WHERE id = ANY($1)
            ORDER BY first_name, last_name, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(actors)
    }

    async fn update_actor(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(
            r#"
            UPDATE actors
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name)
            WHERE id = $1
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(actor)
    }

    async fn delete_actor(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
