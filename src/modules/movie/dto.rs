use super::model::MovieWithRelations;
use super::repository::MovieFilter;
use crate::common::error::{AppError, AppResult};
use crate::common::form::{FormFields, FromFormFields};
use crate::modules::actor::dto::ActorResponse;
use crate::modules::genre::dto::GenreResponse;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description may not be blank"))]
    pub description: String,
    /// Minutes
    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    pub duration: i32,
    #[serde(default)]
    pub genres: Vec<Uuid>,
    #[serde(default)]
    pub actors: Vec<Uuid>,
}

impl FromFormFields for CreateMovieRequest {
    fn from_form_fields(fields: FormFields) -> Result<Self, AppError> {
        Ok(Self {
            title: fields.required_text("title")?,
            description: fields.required_text("description")?,
            duration: fields
                .parsed("duration")?
                .ok_or_else(|| AppError::validation("duration: This field is required."))?,
            genres: fields.list("genres")?.unwrap_or_default(),
            actors: fields.list("actors")?.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description may not be blank"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    pub duration: Option<i32>,
    /// Replaces the genre set when present
    pub genres: Option<Vec<Uuid>>,
    /// Replaces the actor set when present
    pub actors: Option<Vec<Uuid>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Comma-separated genre ids
    pub genres: Option<String>,
    /// Comma-separated actor ids
    pub actors: Option<String>,
}

impl MovieQuery {
    pub fn into_filter(self) -> AppResult<MovieFilter> {
        Ok(MovieFilter {
            title: self.title.filter(|t| !t.is_empty()),
            genres: parse_id_list("genres", self.genres.as_deref())?,
            actors: parse_id_list("actors", self.actors.as_deref())?,
        })
    }
}

/// Parses `"id1,id2"`. Blank items are skipped.
pub fn parse_id_list(field: &str, raw: Option<&str>) -> AppResult<Vec<Uuid>> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            Uuid::parse_str(item)
                .map_err(|_| AppError::validation(format!("{}: {:?} is not a valid id", field, item)))
        })
        .collect()
}

/// Lightweight movie representation used in listings.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MovieListResponse {
    pub id: Uuid,
    pub title: String,
    pub duration: i32,
    /// Genre names
    pub genres: Vec<String>,
    /// Actor full names
    pub actors: Vec<String>,
    pub image: Option<String>,
}

impl MovieListResponse {
    pub fn new(record: MovieWithRelations, image: Option<String>) -> Self {
        Self {
            id: record.movie.id,
            title: record.movie.title,
            duration: record.movie.duration,
            genres: record.genres.into_iter().map(|g| g.name).collect(),
            actors: record.actors.iter().map(|a| a.full_name()).collect(),
            image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MovieDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<GenreResponse>,
    pub actors: Vec<ActorResponse>,
    pub image: Option<String>,
}

impl MovieDetailResponse {
    pub fn new(record: MovieWithRelations, image: Option<String>) -> Self {
        Self {
            id: record.movie.id,
            title: record.movie.title,
            description: record.movie.description,
            duration: record.movie.duration,
            genres: record.genres.into_iter().map(GenreResponse::from).collect(),
            actors: record.actors.into_iter().map(ActorResponse::from).collect(),
            image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MovieImageResponse {
    pub id: Uuid,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_list_skips_blanks() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let raw = format!("{}, ,{}", a, b);

        assert_eq!(parse_id_list("genres", Some(&raw)).unwrap(), vec![a, b]);
        assert!(parse_id_list("genres", None).unwrap().is_empty());
        assert!(parse_id_list("genres", Some("")).unwrap().is_empty());
    }

    #[test]
    fn parse_id_list_rejects_garbage() {
        let err = parse_id_list("actors", Some("1,abc")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("actors:")));
    }

    #[test]
    fn empty_title_imposes_no_constraint() {
        let filter = MovieQuery {
            title: Some(String::new()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert!(filter.title.is_none());
    }

    #[test]
    fn multipart_fields_build_create_request() {
        let genre = Uuid::new_v4();
        let mut fields = FormFields::default();
        fields.insert("title", "Title");
        fields.insert("description", "Description");
        fields.insert("duration", "90");
        fields.insert("genres", genre.to_string());

        let req = CreateMovieRequest::from_form_fields(fields).unwrap();
        assert_eq!(req.title, "Title");
        assert_eq!(req.duration, 90);
        assert_eq!(req.genres, vec![genre]);
        assert!(req.actors.is_empty());
    }
}
