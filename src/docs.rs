use utoipa::OpenApi;
use crate::common::pagination::Paginated;
use crate::common::response::ErrorResponse;
use crate::modules::movie::dto::MovieListResponse;
use crate::modules::movie_session::dto::MovieSessionListResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::handler::get_me,
        crate::modules::genre::handler::list_genres,
        crate::modules::genre::handler::create_genre,
        crate::modules::genre::handler::get_genre,
        crate::modules::genre::handler::update_genre,
        crate::modules::genre::handler::delete_genre,
        crate::modules::actor::handler::list_actors,
        crate::modules::actor::handler::create_actor,
        crate::modules::actor::handler::get_actor,
        crate::modules::actor::handler::update_actor,
        crate::modules::actor::handler::delete_actor,
        crate::modules::cinema_hall::handler::list_cinema_halls,
        crate::modules::cinema_hall::handler::create_cinema_hall,
        crate::modules::cinema_hall::handler::get_cinema_hall,
        crate::modules::cinema_hall::handler::update_cinema_hall,
        crate::modules::cinema_hall::handler::delete_cinema_hall,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
        crate::modules::movie::handler::upload_movie_image,
        crate::modules::movie::handler::delete_movie_image,
        crate::modules::movie_session::handler::list_movie_sessions,
        crate::modules::movie_session::handler::create_movie_session,
        crate::modules::movie_session::handler::get_movie_session,
        crate::modules::movie_session::handler::update_movie_session,
        crate::modules::movie_session::handler::delete_movie_session,
    ),
    components(
        schemas(
            ErrorResponse,
            Paginated<MovieListResponse>,
            Paginated<MovieSessionListResponse>,
            crate::modules::auth::dto::CurrentUserResponse,
            crate::modules::auth::model::UserRole,
            crate::modules::genre::dto::CreateGenreRequest,
            crate::modules::genre::dto::UpdateGenreRequest,
            crate::modules::genre::dto::GenreResponse,
            crate::modules::actor::dto::CreateActorRequest,
            crate::modules::actor::dto::UpdateActorRequest,
            crate::modules::actor::dto::ActorResponse,
            crate::modules::cinema_hall::dto::CreateCinemaHallRequest,
            crate::modules::cinema_hall::dto::UpdateCinemaHallRequest,
            crate::modules::cinema_hall::dto::CinemaHallResponse,
            crate::modules::movie::dto::CreateMovieRequest,
            crate::modules::movie::dto::UpdateMovieRequest,
            crate::modules::movie::dto::MovieDetailResponse,
            crate::modules::movie::dto::MovieImageResponse,
            crate::modules::movie::handler::ImageUploadForm,
            MovieListResponse,
            crate::modules::movie_session::dto::CreateMovieSessionRequest,
            crate::modules::movie_session::dto::UpdateMovieSessionRequest,
            crate::modules::movie_session::dto::MovieSessionDetailResponse,
            MovieSessionListResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Caller identity"),
        (name = "Catalog", description = "Genres, actors and cinema halls"),
        (name = "Movies", description = "Movies and their poster images"),
        (name = "Sessions", description = "Scheduled movie sessions")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_image_upload_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/movies/{id}/upload-image"));
        assert!(doc.paths.paths.contains_key("/api/v1/movie-sessions"));
    }
}
