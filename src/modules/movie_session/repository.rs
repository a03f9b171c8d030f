use super::model::{MovieSession, MovieSessionWithRelations};
use crate::common::pagination::PageRequest;
use anyhow::Result;
use async_trait::async_trait;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionFilter {
    /// UTC calendar day of `show_time`
    pub date: Option<Date>,
    pub movie: Option<Uuid>,
}

impl SessionFilter {
    /// Half-open UTC range `[start, end)` covering `date`.
    pub fn day_bounds(&self) -> Option<(OffsetDateTime, OffsetDateTime)> {
        let date = self.date?;
        let start = date.with_time(Time::MIDNIGHT).assume_utc();
        Some((start, start + time::Duration::DAY))
    }

    pub fn matches(&self, session: &MovieSession) -> bool {
        let day = self
            .day_bounds()
            .is_none_or(|(start, end)| session.show_time >= start && session.show_time < end);
        let movie = self.movie.is_none_or(|id| session.movie_id == id);

        day && movie
    }
}

pub struct NewMovieSession {
    pub show_time: OffsetDateTime,
    pub movie_id: Uuid,
    pub cinema_hall_id: Uuid,
}

#[derive(Default)]
pub struct MovieSessionChanges {
    pub show_time: Option<OffsetDateTime>,
    pub movie_id: Option<Uuid>,
    pub cinema_hall_id: Option<Uuid>,
}

#[async_trait]
pub trait MovieSessionRepository: Send + Sync {
    async fn create_movie_session(&self, session: NewMovieSession) -> Result<MovieSession>;

    /// One page of matching sessions ordered by show time, plus the total match count.
    async fn list_movie_sessions(
        &self,
        filter: &SessionFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieSessionWithRelations>, u64)>;

    async fn find_movie_session(&self, id: Uuid) -> Result<Option<MovieSessionWithRelations>>;

    async fn update_movie_session(
        &self,
        id: Uuid,
        changes: MovieSessionChanges,
    ) -> Result<Option<MovieSession>>;

    async fn delete_movie_session(&self, id: Uuid) -> Result<bool>;

    async fn count_sessions_for_movie(&self, movie_id: Uuid) -> Result<u64>;

    async fn count_sessions_for_cinema_hall(&self, cinema_hall_id: Uuid) -> Result<u64>;
}
