use super::{PgStore, escape_like, restricted_delete, to_count};
use crate::common::pagination::PageRequest;
use crate::modules::actor::model::Actor;
use crate::modules::genre::model::Genre;
use crate::modules::movie::model::{Movie, MovieWithRelations};
use crate::modules::movie::repository::{MovieChanges, MovieFilter, MovieRepository, NewMovie};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

fn push_movie_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &MovieFilter) {
    builder.push(" WHERE TRUE");

    if let Some(title) = &filter.title {
        builder.push(" AND m.title ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(title)));
    }

    if !filter.genres.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM movie_genres mg WHERE mg.movie_id = m.id AND mg.genre_id = ANY(",
        );
        builder.push_bind(filter.genres.clone());
        builder.push("))");
    }

    if !filter.actors.is_empty() {
        builder.push(
            " AND EXISTS (SELECT 1 FROM movie_actors ma WHERE ma.movie_id = m.id AND ma.actor_id = ANY(",
        );
        builder.push_bind(filter.actors.clone());
        builder.push("))");
    }
}

async fn link_genres(conn: &mut PgConnection, movie_id: Uuid, genres: &[Uuid]) -> Result<()> {
    if genres.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO movie_genres (movie_id, genre_id) SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(genres)
    .execute(conn)
    .await?;

    Ok(())
}

async fn link_actors(conn: &mut PgConnection, movie_id: Uuid, actors: &[Uuid]) -> Result<()> {
    if actors.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO movie_actors (movie_id, actor_id) SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
    )
    .bind(movie_id)
    .bind(actors)
    .execute(conn)
    .await?;

    Ok(())
}

impl PgStore {
    pub(super) async fn fetch_movies_by_ids(&self, ids: &[Uuid]) -> Result<Vec<MovieWithRelations>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, description, duration, image, created_at
            FROM movies
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        self.attach_relations(movies).await
    }

    /// Loads genres and actors for all `movies` in two queries.
    pub(super) async fn attach_relations(&self, movies: Vec<Movie>) -> Result<Vec<MovieWithRelations>> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = movies.iter().map(|m| m.id).collect();

        let genre_rows = sqlx::query_as::<_, (Uuid, Uuid, String)>(
            r#"
            SELECT mg.movie_id, g.id, g.name
            FROM movie_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.movie_id = ANY($1)
            ORDER BY g.name, g.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let actor_rows = sqlx::query_as::<_, (Uuid, Uuid, String, String)>(
            r#"
            SELECT ma.movie_id, a.id, a.first_name, a.last_name
            FROM movie_actors ma
            JOIN actors a ON a.id = ma.actor_id
            WHERE ma.movie_id = ANY($1)
            ORDER BY a.first_name, a.last_name, a.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut genres: HashMap<Uuid, Vec<Genre>> = HashMap::new();
        for (movie_id, id, name) in genre_rows {
            genres.entry(movie_id).or_default().push(Genre { id, name });
        }

        let mut actors: HashMap<Uuid, Vec<Actor>> = HashMap::new();
        for (movie_id, id, first_name, last_name) in actor_rows {
            actors.entry(movie_id).or_default().push(Actor {
                id,
                first_name,
                last_name,
            });
        }

        Ok(movies
            .into_iter()
            .map(|movie| MovieWithRelations {
                genres: genres.remove(&movie.id).unwrap_or_default(),
                actors: actors.remove(&movie.id).unwrap_or_default(),
                movie,
            })
            .collect())
    }
}

#[async_trait]
impl MovieRepository for PgStore {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (id, title, description, duration)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, duration, image, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.duration)
        .fetch_one(&mut *tx)
        .await?;

        link_genres(&mut tx, created.id, &movie.genres).await?;
        link_actors(&mut tx, created.id, &movie.actors).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list_movies(
        &self,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieWithRelations>, u64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movies m");
        push_movie_filter(&mut count_query, filter);
        let count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new(
            "SELECT m.id, m.title, m.description, m.duration, m.image, m.created_at FROM movies m",
        );
        push_movie_filter(&mut page_query, filter);
        page_query.push(" ORDER BY m.created_at, m.id LIMIT ");
        page_query.push_bind(page.limit() as i64);
        page_query.push(" OFFSET ");
        page_query.push_bind(page.offset() as i64);

        let movies = page_query
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await?;

        Ok((self.attach_relations(movies).await?, to_count(count)))
    }

    async fn find_movie(&self, id: Uuid) -> Result<Option<MovieWithRelations>> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, title, description, duration, image, created_at FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match movie {
            Some(movie) => Ok(self.attach_relations(vec![movie]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_movie(&self, id: Uuid, changes: MovieChanges) -> Result<Option<Movie>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration)
            WHERE id = $1
            RETURNING id, title, description, duration, image, created_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.duration)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(updated) = updated else {
            return Ok(None);
        };

        if let Some(genres) = changes.genres {
            sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_genres(&mut tx, id, &genres).await?;
        }

        if let Some(actors) = changes.actors {
            sqlx::query("DELETE FROM movie_actors WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_actors(&mut tx, id, &actors).await?;
        }

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn set_movie_image(&self, id: Uuid, image: Option<String>) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies SET image = $2
            WHERE id = $1
            RETURNING id, title, description, duration, image, created_at
            "#,
        )
        .bind(id)
        .bind(image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restricted_delete("Movie"))?;

        Ok(result.rows_affected() > 0)
    }
}
