use crate::modules::actor::model::Actor;
use crate::modules::genre::model::Genre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Minutes
    pub duration: i32,
    /// Storage key of the poster image
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A movie with its genres and actors, each sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieWithRelations {
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub actors: Vec<Actor>,
}
