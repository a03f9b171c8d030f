use super::dto::{
    CreateMovieRequest, MovieDetailResponse, MovieImageResponse, MovieListResponse, MovieQuery,
    UpdateMovieRequest,
};
use super::model::{Movie, MovieWithRelations};
use super::repository::{MovieChanges, NewMovie};
use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{PageParams, Paginated};
use crate::common::slugify;
use crate::common::upload::UploadedImage;
use crate::state::AppState;
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

pub struct MovieService;

impl MovieService {
    pub async fn list_movies(
        state: AppState,
        query: MovieQuery,
        page: PageParams,
    ) -> AppResult<Paginated<MovieListResponse>> {
        let filter = query.into_filter()?;
        let request = page.resolve(state.config.page_size, state.config.max_page_size)?;

        let (movies, count) = state.store.list_movies(&filter, request).await?;
        let page = Paginated::new(movies, count, request)?;

        Ok(page.map(|record| {
            let image = Self::image_url(&state, &record.movie);
            MovieListResponse::new(record, image)
        }))
    }

    pub async fn get_movie(state: AppState, id: Uuid) -> AppResult<MovieDetailResponse> {
        let record = Self::find_record(&state, id).await?;
        let image = Self::image_url(&state, &record.movie);

        Ok(MovieDetailResponse::new(record, image))
    }

    pub async fn find_record(state: &AppState, id: Uuid) -> AppResult<MovieWithRelations> {
        state
            .store
            .find_movie(id)
            .await?
            .ok_or(AppError::NotFound("Movie"))
    }

    pub async fn create_movie(
        state: AppState,
        req: CreateMovieRequest,
    ) -> AppResult<MovieDetailResponse> {
        req.validate()?;

        let genres = dedup(req.genres);
        let actors = dedup(req.actors);
        Self::validate_relations(&state, &genres, &actors).await?;

        let movie = state
            .store
            .create_movie(NewMovie {
                title: req.title,
                description: req.description,
                duration: req.duration,
                genres,
                actors,
            })
            .await?;
        info!("Created movie {} ({})", movie.id, movie.title);

        Self::get_movie(state, movie.id).await
    }

    pub async fn update_movie(
        state: AppState,
        id: Uuid,
        req: UpdateMovieRequest,
    ) -> AppResult<MovieDetailResponse> {
        req.validate()?;

        let genres = req.genres.map(dedup);
        let actors = req.actors.map(dedup);
        Self::validate_relations(
            &state,
            genres.as_deref().unwrap_or_default(),
            actors.as_deref().unwrap_or_default(),
        )
        .await?;

        let changes = MovieChanges {
            title: req.title,
            description: req.description,
            duration: req.duration,
            genres,
            actors,
        };

        let movie = state
            .store
            .update_movie(id, changes)
            .await?
            .ok_or(AppError::NotFound("Movie"))?;
        info!("Updated movie {}", movie.id);

        Self::get_movie(state, movie.id).await
    }

    pub async fn delete_movie(state: AppState, id: Uuid) -> AppResult<()> {
        let record = Self::find_record(&state, id).await?;

        let scheduled = state.store.count_sessions_for_movie(id).await?;
        if scheduled > 0 {
            return Err(AppError::validation(format!(
                "Movie still has {} scheduled session(s)",
                scheduled
            )));
        }

        state.store.delete_movie(id).await?;
        info!("Deleted movie {}", id);

        if let Some(key) = record.movie.image {
            Self::discard_object(&state, &key).await;
        }

        Ok(())
    }

    /// Stores `image` and makes it the movie's poster, replacing any previous one.
    pub async fn upload_image(
        state: AppState,
        record: MovieWithRelations,
        image: UploadedImage,
    ) -> AppResult<MovieImageResponse> {
        let movie = record.movie;
        let key = image_key(&movie, &image);

        state
            .storage
            .put_object(&key, image.bytes.clone(), image.content_type())
            .await?;

        let updated = match state.store.set_movie_image(movie.id, Some(key.clone())).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                Self::discard_object(&state, &key).await;
                return Err(AppError::NotFound("Movie"));
            }
            Err(e) => {
                Self::discard_object(&state, &key).await;
                return Err(e.into());
            }
        };

        if let Some(previous) = movie.image.filter(|previous| *previous != key) {
            Self::discard_object(&state, &previous).await;
        }

        info!(
            "Stored {}x{} {:?} image for movie {} at {}",
            image.width, image.height, image.format, movie.id, key
        );

        Ok(MovieImageResponse {
            id: updated.id,
            image: Self::image_url(&state, &updated),
        })
    }

    pub async fn remove_image(state: AppState, id: Uuid) -> AppResult<MovieImageResponse> {
        let record = Self::find_record(&state, id).await?;

        let updated = state
            .store
            .set_movie_image(id, None)
            .await?
            .ok_or(AppError::NotFound("Movie"))?;

        if let Some(key) = record.movie.image {
            Self::discard_object(&state, &key).await;
            info!("Removed image of movie {}", id);
        }

        Ok(MovieImageResponse {
            id: updated.id,
            image: None,
        })
    }

    pub fn image_url(state: &AppState, movie: &Movie) -> Option<String> {
        movie
            .image
            .as_deref()
            .map(|key| state.storage.public_url(key))
    }

    async fn validate_relations(state: &AppState, genres: &[Uuid], actors: &[Uuid]) -> AppResult<()> {
        if !genres.is_empty() {
            let found: HashSet<Uuid> = state
                .store
                .find_genres_by_ids(genres)
                .await?
                .into_iter()
                .map(|g| g.id)
                .collect();
            if let Some(missing) = genres.iter().find(|id| !found.contains(id)) {
                return Err(invalid_pk("genres", missing));
            }
        }

        if !actors.is_empty() {
            let found: HashSet<Uuid> = state
                .store
                .find_actors_by_ids(actors)
                .await?
                .into_iter()
                .map(|a| a.id)
                .collect();
            if let Some(missing) = actors.iter().find(|id| !found.contains(id)) {
                return Err(invalid_pk("actors", missing));
            }
        }

        Ok(())
    }

    async fn discard_object(state: &AppState, key: &str) {
        if let Err(e) = state.storage.delete_object(key).await {
            warn!("Failed to delete stored object {}: {:#}", key, e);
        }
    }
}

fn invalid_pk(field: &str, id: &Uuid) -> AppError {
    AppError::validation(format!(
        "{}: Invalid pk \"{}\" - object does not exist.",
        field, id
    ))
}

/// Keeps the first occurrence of each id.
fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// `movies/{id}/{title-slug}-{random}.{ext}`
fn image_key(movie: &Movie, image: &UploadedImage) -> String {
    let slug = match slugify(&movie.title) {
        s if s.is_empty() => "image".to_string(),
        s => s,
    };
    let suffix = Uuid::new_v4().simple().to_string();

    format!(
        "movies/{}/{}-{}.{}",
        movie.id,
        slug,
        &suffix[..8],
        image.extension()
    )
}
