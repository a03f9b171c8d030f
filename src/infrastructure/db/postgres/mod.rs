use super::pool::DbPool;
use super::store::StillScheduled;

mod actor;
mod cinema_hall;
mod genre;
mod movie;
mod movie_session;

/// Repository implementations backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` metacharacters so `raw` matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Turns a foreign-key violation from `ON DELETE RESTRICT` into [`StillScheduled`].
fn restricted_delete(entity: &'static str) -> impl FnOnce(sqlx::Error) -> anyhow::Error {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StillScheduled(entity).into(),
        _ => e.into(),
    }
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}
