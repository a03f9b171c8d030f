use super::dto::{ActorResponse, CreateActorRequest, UpdateActorRequest};
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct ActorService;

impl ActorService {
    pub async fn create(state: AppState, req: CreateActorRequest) -> AppResult<ActorResponse> {
        req.validate()?;

        let actor = state
            .store
            .create_actor(req.first_name.trim(), req.last_name.trim())
            .await?;
        info!("Created actor {} ({})", actor.id, actor.full_name());

        Ok(actor.into())
    }

    pub async fn find_all(state: AppState) -> AppResult<Vec<ActorResponse>> {
        let actors = state.store.list_actors().await?;

        Ok(actors.into_iter().map(ActorResponse::from).collect())
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> AppResult<ActorResponse> {
        let actor = state
            .store
            .find_actor(id)
            .await?
            .ok_or(AppError::NotFound("Actor"))?;

        Ok(actor.into())
    }

    pub async fn update(
        state: AppState,
        id: Uuid,
        req: UpdateActorRequest,
    ) -> AppResult<ActorResponse> {
        req.validate()?;

        let actor = state
            .store
            .update_actor(
                id,
                req.first_name.map(|n| n.trim().to_string()),
                req.last_name.map(|n| n.trim().to_string()),
            )
            .await?
            .ok_or(AppError::NotFound("Actor"))?;
        info!("Updated actor {}", actor.id);

        Ok(actor.into())
    }

    pub async fn delete(state: AppState, id: Uuid) -> AppResult<()> {
        if !state.store.delete_actor(id).await? {
            return Err(AppError::NotFound("Actor"));
        }
        info!("Deleted actor {}", id);

        Ok(())
    }
}
