use super::dto::{
    CreateMovieRequest, MovieDetailResponse, MovieImageResponse, MovieListResponse, MovieQuery,
    UpdateMovieRequest,
};
use super::service::MovieService;
use crate::common::error::AppError;
use crate::common::extract::{JsonBody, QueryParams};
use crate::common::form::JsonOrMultipart;
use crate::common::pagination::{PageParams, Paginated};
use crate::common::response::{ApiSuccess, ErrorResponse};
use crate::common::upload::{decode_image, read_field};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;
use uuid::Uuid;

/// Multipart body of `POST /movies/{id}/upload-image`.
#[derive(utoipa::ToSchema)]
pub struct ImageUploadForm {
    #[schema(format = Binary)]
    pub image: String,
}

/// List movies
#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(MovieQuery, PageParams),
    responses(
        (status = 200, description = "Page of movies", body = Paginated<MovieListResponse>),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn list_movies(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MovieQuery>,
    QueryParams(page): QueryParams<PageParams>,
) -> impl IntoResponse {
    match MovieService::list_movies(state, query, page).await {
        Ok(movies) => ApiSuccess(movies, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new movie
///
/// Accepts JSON or `multipart/form-data`. File parts are ignored; use the
/// upload endpoint to attach an image.
#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieDetailResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn create_movie(
    State(state): State<AppState>,
    JsonOrMultipart(payload): JsonOrMultipart<CreateMovieRequest>,
) -> impl IntoResponse {
    match MovieService::create_movie(state, payload).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get movie by ID
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie details", body = MovieDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieService::get_movie(state, id).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update movie
#[utoipa::path(
    put,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieDetailResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateMovieRequest>,
) -> impl IntoResponse {
    match MovieService::update_movie(state, id, payload).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete movie
#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 400, description = "Movie still has sessions", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieService::delete_movie(state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Upload movie image
#[utoipa::path(
    post,
    path = "/api/v1/movies/{id}/upload-image",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = MovieImageResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn upload_movie_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let record = match MovieService::find_record(&state, id).await {
        Ok(record) => record,
        Err(e) => return e.into_response(),
    };

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return AppError::validation(rejection.body_text()).into_response(),
    };

    let max_bytes = state.config.max_upload_bytes;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return AppError::validation(e.body_text()).into_response(),
        };

        if field.name() != Some("image") {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let image = match read_field(field, max_bytes).await {
            Ok(bytes) => decode_image(bytes).await,
            Err(e) => Err(e),
        };

        return match image {
            Ok(image) => match MovieService::upload_image(state, record, image).await {
                Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
                Err(e) => e.into_response(),
            },
            Err(e) => e.into_response(),
        };
    }

    AppError::validation("No image field found in multipart request").into_response()
}

/// Remove movie image
#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}/image",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Image removed", body = MovieImageResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Movie not found", body = ErrorResponse)
    ),
    tag = "Movies",
    security(("bearer_auth" = []))
)]
pub async fn delete_movie_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieService::remove_image(state, id).await {
        Ok(movie) => ApiSuccess(movie, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
