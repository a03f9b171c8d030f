use super::dto::{
    CreateMovieSessionRequest, MovieSessionDetailResponse, MovieSessionListResponse, SessionQuery,
    UpdateMovieSessionRequest,
};
use super::repository::{MovieSessionChanges, NewMovieSession};
use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{PageParams, Paginated};
use crate::modules::movie::service::MovieService;
use crate::state::AppState;
use tracing::info;
use uuid::Uuid;

pub struct MovieSessionService;

impl MovieSessionService {
    pub async fn create(
        state: AppState,
        req: CreateMovieSessionRequest,
    ) -> AppResult<MovieSessionDetailResponse> {
        Self::ensure_references(&state, Some(req.movie), Some(req.cinema_hall)).await?;

        let session = state
            .store
            .create_movie_session(NewMovieSession {
                show_time: req.show_time,
                movie_id: req.movie,
                cinema_hall_id: req.cinema_hall,
            })
            .await?;
        info!(
            "Scheduled session {} of movie {} at {}",
            session.id, session.movie_id, session.show_time
        );

        Self::find_by_id(state, session.id).await
    }

    pub async fn find_all(
        state: AppState,
        query: SessionQuery,
        page: PageParams,
    ) -> AppResult<Paginated<MovieSessionListResponse>> {
        let filter = query.into_filter()?;
        let request = page.resolve(state.config.page_size, state.config.max_page_size)?;

        let (sessions, count) = state.store.list_movie_sessions(&filter, request).await?;
        let page = Paginated::new(sessions, count, request)?;

        Ok(page.map(|record| {
            let image = MovieService::image_url(&state, &record.movie.movie);
            MovieSessionListResponse::new(record, image)
        }))
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> AppResult<MovieSessionDetailResponse> {
        let record = state
            .store
            .find_movie_session(id)
            .await?
            .ok_or(AppError::NotFound("Movie session"))?;
        let image = MovieService::image_url(&state, &record.movie.movie);

        Ok(MovieSessionDetailResponse::new(record, image))
    }

    pub async fn update(
        state: AppState,
        id: Uuid,
        req: UpdateMovieSessionRequest,
    ) -> AppResult<MovieSessionDetailResponse> {
        Self::ensure_references(&state, req.movie, req.cinema_hall).await?;

        let changes = MovieSessionChanges {
            show_time: req.show_time,
            movie_id: req.movie,
            cinema_hall_id: req.cinema_hall,
        };

        let session = state
            .store
            .update_movie_session(id, changes)
            .await?
            .ok_or(AppError::NotFound("Movie session"))?;
        info!("Updated movie session {}", session.id);

        Self::find_by_id(state, session.id).await
    }

    pub async fn delete(state: AppState, id: Uuid) -> AppResult<()> {
        if !state.store.delete_movie_session(id).await? {
            return Err(AppError::NotFound("Movie session"));
        }
        info!("Deleted movie session {}", id);

        Ok(())
    }

    async fn ensure_references(
        state: &AppState,
        movie: Option<Uuid>,
        cinema_hall: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(id) = movie {
            if state.store.find_movie(id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "movie: Invalid pk \"{}\" - object does not exist.",
                    id
                )));
            }
        }

        if let Some(id) = cinema_hall {
            if state.store.find_cinema_hall(id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "cinema_hall: Invalid pk \"{}\" - object does not exist.",
                    id
                )));
            }
        }

        Ok(())
    }
}
