use super::{PgStore, to_count};
use crate::common::pagination::PageRequest;
use crate::modules::cinema_hall::model::CinemaHall;
use crate::modules::movie_session::model::{MovieSession, MovieSessionWithRelations};
use crate::modules::movie_session::repository::{
    MovieSessionChanges, MovieSessionRepository, NewMovieSession, SessionFilter,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

fn push_session_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &SessionFilter) {
    builder.push(" WHERE TRUE");

    if let Some((start, end)) = filter.day_bounds() {
        builder.push(" AND s.show_time >= ");
        builder.push_bind(start);
        builder.push(" AND s.show_time < ");
        builder.push_bind(end);
    }

    if let Some(movie_id) = filter.movie {
        builder.push(" AND s.movie_id = ");
        builder.push_bind(movie_id);
    }
}

impl PgStore {
    async fn resolve_sessions(
        &self,
        sessions: Vec<MovieSession>,
    ) -> Result<Vec<MovieSessionWithRelations>> {
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let movie_ids: Vec<Uuid> = sessions.iter().map(|s| s.movie_id).collect();
        let hall_ids: Vec<Uuid> = sessions.iter().map(|s| s.cinema_hall_id).collect();

        let movies: HashMap<_, _> = self
            .fetch_movies_by_ids(&movie_ids)
            .await?
            .into_iter()
            .map(|record| (record.movie.id, record))
            .collect();

        let halls: HashMap<_, _> = sqlx::query_as::<_, CinemaHall>(
            "SELECT id, name, rows, seats_in_row FROM cinema_halls WHERE id = ANY($1)",
        )
        .bind(&hall_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|hall| (hall.id, hall))
        .collect();

        sessions
            .into_iter()
            .map(|session| {
                let movie = movies.get(&session.movie_id).cloned().ok_or_else(|| {
                    anyhow!("session {} references missing movie {}", session.id, session.movie_id)
                })?;
                let cinema_hall = halls.get(&session.cinema_hall_id).cloned().ok_or_else(|| {
                    anyhow!(
                        "session {} references missing cinema hall {}",
                        session.id,
                        session.cinema_hall_id
                    )
                })?;

                Ok(MovieSessionWithRelations {
                    session,
                    movie,
                    cinema_hall,
                })
            })
            .collect()
    }
}

#[async_trait]
impl MovieSessionRepository for PgStore {
    async fn create_movie_session(&self, session: NewMovieSession) -> Result<MovieSession> {
        let created = sqlx::query_as::<_, MovieSession>(
            r#"
            INSERT INTO movie_sessions (id, show_time, movie_id, cinema_hall_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, show_time, movie_id, cinema_hall_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.show_time)
        .bind(session.movie_id)
        .bind(session.cinema_hall_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_movie_sessions(
        &self,
        filter: &SessionFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieSessionWithRelations>, u64)> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movie_sessions s");
        push_session_filter(&mut count_query, filter);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new(
            "SELECT s.id, s.show_time, s.movie_id, s.cinema_hall_id, s.created_at FROM movie_sessions s",
        );
        push_session_filter(&mut page_query, filter);
        page_query.push(" ORDER BY s.show_time, s.created_at, s.id LIMIT ");
        page_query.push_bind(page.limit() as i64);
        page_query.push(" OFFSET ");
        page_query.push_bind(page.offset() as i64);

        let sessions = page_query
            .build_query_as::<MovieSession>()
            .fetch_all(&self.pool)
            .await?;

        Ok((self.resolve_sessions(sessions).await?, to_count(count)))
    }

    async fn find_movie_session(&self, id: Uuid) -> Result<Option<MovieSessionWithRelations>> {
        let session = sqlx::query_as::<_, MovieSession>(
            r#"
            SELECT id, show_time, movie_id, cinema_hall_id, created_at
            FROM movie_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match session {
            Some(session) => Ok(self.resolve_sessions(vec![session]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_movie_session(
        &self,
        id: Uuid,
        changes: MovieSessionChanges,
    ) -> Result<Option<MovieSession>> {
        let session = sqlx::query_as::<_, MovieSession>(
            r#"
            UPDATE movie_sessions
            SET show_time = COALESCE($2, show_time),
                movie_id = COALESCE($3, movie_id),
                cinema_hall_id = COALESCE($4, cinema_hall_id)
            WHERE id = $1
            RETURNING id, show_time, movie_id, cinema_hall_id, created_at
            "#,
        )
        .bind(id)
        .bind(changes.show_time)
        .bind(changes.movie_id)
        .bind(changes.cinema_hall_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn delete_movie_session(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movie_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_sessions_for_movie(&self, movie_id: Uuid) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM movie_sessions WHERE movie_id = $1")
                .bind(movie_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(to_count(count))
    }

    async fn count_sessions_for_cinema_hall(&self, cinema_hall_id: Uuid) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM movie_sessions WHERE cinema_hall_id = $1")
                .bind(cinema_hall_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(to_count(count))
    }
}
