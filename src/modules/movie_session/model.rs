use crate::modules::cinema_hall::model::CinemaHall;
use crate::modules::movie::model::MovieWithRelations;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct MovieSession {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub show_time: OffsetDateTime,
    pub movie_id: Uuid,
    pub cinema_hall_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A session resolved to its movie and hall.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSessionWithRelations {
    pub session: MovieSession,
    pub movie: MovieWithRelations,
    pub cinema_hall: CinemaHall,
}
