use super::dto::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct GenreService;

impl GenreService {
    pub async fn create(state: AppState, req: CreateGenreRequest) -> AppResult<GenreResponse> {
        req.validate()?;
        let name = req.name.trim();

        Self::ensure_name_free(&state, name, None).await?;

        let genre = state.store.create_genre(name).await?;
        info!("Created genre {} ({})", genre.id, genre.name);

        Ok(genre.into())
    }

    pub async fn find_all(state: AppState) -> AppResult<Vec<GenreResponse>> {
        let genres = state.store.list_genres().await?;

        Ok(genres.into_iter().map(GenreResponse::from).collect())
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> AppResult<GenreResponse> {
        let genre = state
            .store
            .find_genre(id)
            .await?
            .ok_or(AppError::NotFound("Genre"))?;

        Ok(genre.into())
    }

    pub async fn update(
        state: AppState,
        id: Uuid,
        req: UpdateGenreRequest,
    ) -> AppResult<GenreResponse> {
        req.validate()?;
        let name = req.name.map(|n| n.trim().to_string());

        if let Some(name) = &name {
            Self::ensure_name_free(&state, name, Some(id)).await?;
        }

        let genre = state
            .store
            .update_genre(id, name)
            .await?
            .ok_or(AppError::NotFound("Genre"))?;
        info!("Updated genre {}", genre.id);

        Ok(genre.into())
    }

    pub async fn delete(state: AppState, id: Uuid) -> AppResult<()> {
        if !state.store.delete_genre(id).await? {
            return Err(AppError::NotFound("Genre"));
        }
        info!("Deleted genre {}", id);

        Ok(())
    }

    async fn ensure_name_free(state: &AppState, name: &str, current: Option<Uuid>) -> AppResult<()> {
        if name.is_empty() {
            return Err(AppError::validation("name: This field may not be blank."));
        }

        match state.store.find_genre_by_name(name).await? {
            Some(existing) if Some(existing.id) != current => Err(AppError::validation(
                "name: genre with this name already exists.",
            )),
            _ => Ok(()),
        }
    }
}
