use super::dto::{CinemaHallResponse, CreateCinemaHallRequest, UpdateCinemaHallRequest};
use super::repository::{CinemaHallChanges, NewCinemaHall};
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct CinemaHallService;

impl CinemaHallService {
    pub async fn create(
        state: AppState,
        req: CreateCinemaHallRequest,
    ) -> AppResult<CinemaHallResponse> {
        req.validate()?;

        let hall = state
            .store
            .create_cinema_hall(NewCinemaHall {
                name: req.name.trim().to_string(),
                rows: req.rows,
                seats_in_row: req.seats_in_row,
            })
            .await?;
        info!("Created cinema hall {} ({} seats)", hall.id, hall.capacity());

        Ok(hall.into())
    }

    pub async fn find_all(state: AppState) -> AppResult<Vec<CinemaHallResponse>> {
        let halls = state.store.list_cinema_halls().await?;

        Ok(halls.into_iter().map(CinemaHallResponse::from).collect())
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> AppResult<CinemaHallResponse> {
        let hall = state
            .store
            .find_cinema_hall(id)
            .await?
            .ok_or(AppError::NotFound("Cinema hall"))?;

        Ok(hall.into())
    }

    pub async fn update(
        state: AppState,
        id: Uuid,
        req: UpdateCinemaHallRequest,
    ) -> AppResult<CinemaHallResponse> {
        req.validate()?;

        let changes = CinemaHallChanges {
            name: req.name.map(|n| n.trim().to_string()),
            rows: req.rows,
            seats_in_row: req.seats_in_row,
        };

        let hall = state
            .store
            .update_cinema_hall(id, changes)
            .await?
            .ok_or(AppError::NotFound("Cinema hall"))?;
        info!("Updated cinema hall {}", hall.id);

        Ok(hall.into())
    }

    pub async fn delete(state: AppState, id: Uuid) -> AppResult<()> {
        if state.store.find_cinema_hall(id).await?.is_none() {
            return Err(AppError::NotFound("Cinema hall"));
        }

        let scheduled = state.store.count_sessions_for_cinema_hall(id).await?;
        if scheduled > 0 {
            return Err(AppError::validation(format!(
                "Cinema hall still hosts {} movie session(s)",
                scheduled
            )));
        }

        state.store.delete_cinema_hall(id).await?;
        info!("Deleted cinema hall {}", id);

        Ok(())
    }
}
