use super::memory::MemoryStore;
use super::pool::open_pool;
use super::postgres::PgStore;
use crate::config::settings::AppConfig;
use crate::modules::actor::repository::ActorRepository;
use crate::modules::cinema_hall::repository::CinemaHallRepository;
use crate::modules::genre::repository::GenreRepository;
use crate::modules::movie::repository::MovieRepository;
use crate::modules::movie_session::repository::MovieSessionRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Every repository the API needs, behind one object.
pub trait Store:
    GenreRepository + ActorRepository + CinemaHallRepository + MovieRepository + MovieSessionRepository
{
}

impl<T> Store for T where
    T: GenreRepository
        + ActorRepository
        + CinemaHallRepository
        + MovieRepository
        + MovieSessionRepository
{
}

pub type DynStore = Arc<dyn Store>;

/// A delete refused because movie sessions still reference the record.
#[derive(Debug, Error)]
#[error("{0} still has scheduled movie sessions")]
pub struct StillScheduled(pub &'static str);

/// PostgreSQL when `DATABASE_URL` is set, otherwise a process-local store.
pub async fn connect_store(config: &AppConfig) -> anyhow::Result<DynStore> {
    match &config.database_url {
        Some(url) => {
            let pool = open_pool(url).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL is not set; records are kept in memory and lost on restart");
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}
