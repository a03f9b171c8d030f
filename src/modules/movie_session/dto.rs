use super::model::MovieSessionWithRelations;
use super::repository::SessionFilter;
use crate::common::error::{AppError, AppResult};
use crate::modules::cinema_hall::dto::CinemaHallResponse;
use crate::modules::movie::dto::MovieListResponse;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMovieSessionRequest {
    /// RFC 3339 timestamp
    #[serde(with = "time::serde::rfc3339")]
    pub show_time: OffsetDateTime,
    pub movie: Uuid,
    pub cinema_hall: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMovieSessionRequest {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub show_time: Option<OffsetDateTime>,
    pub movie: Option<Uuid>,
    pub cinema_hall: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// `YYYY-MM-DD`, matched against the UTC day of `show_time`
    pub date: Option<String>,
    /// Movie id
    pub movie: Option<String>,
}

impl SessionQuery {
    pub fn into_filter(self) -> AppResult<SessionFilter> {
        let date = self
            .date
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
                    AppError::validation(format!("date: {:?} is not a YYYY-MM-DD date", raw))
                })
            })
            .transpose()?;

        let movie = self
            .movie
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::validation(format!("movie: {:?} is not a valid id", raw)))
            })
            .transpose()?;

        Ok(SessionFilter { date, movie })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MovieSessionListResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub show_time: OffsetDateTime,
    pub movie_title: String,
    pub movie_image: Option<String>,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i64,
}

impl MovieSessionListResponse {
    pub fn new(record: MovieSessionWithRelations, movie_image: Option<String>) -> Self {
        Self {
            id: record.session.id,
            show_time: record.session.show_time,
            movie_title: record.movie.movie.title,
            movie_image,
            cinema_hall_capacity: record.cinema_hall.capacity(),
            cinema_hall_name: record.cinema_hall.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MovieSessionDetailResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub show_time: OffsetDateTime,
    pub movie: MovieListResponse,
    pub cinema_hall: CinemaHallResponse,
}

impl MovieSessionDetailResponse {
    pub fn new(record: MovieSessionWithRelations, movie_image: Option<String>) -> Self {
        Self {
            id: record.session.id,
            show_time: record.session.show_time,
            movie: MovieListResponse::new(record.movie, movie_image),
            cinema_hall: record.cinema_hall.into(),
        }
    }
}
