use crate::common::pagination::PageRequest;
use crate::modules::actor::model::Actor;
use crate::modules::actor::repository::ActorRepository;
use crate::modules::cinema_hall::model::CinemaHall;
use crate::modules::cinema_hall::repository::{
    CinemaHallChanges, CinemaHallRepository, NewCinemaHall,
};
use crate::modules::genre::model::Genre;
use crate::modules::genre::repository::GenreRepository;
use crate::modules::movie::model::{Movie, MovieWithRelations};
use crate::modules::movie::repository::{MovieChanges, MovieFilter, MovieRepository, NewMovie};
use crate::modules::movie_session::model::{MovieSession, MovieSessionWithRelations};
use crate::modules::movie_session::repository::{
    MovieSessionChanges, MovieSessionRepository, NewMovieSession, SessionFilter,
};
use super::store::StillScheduled;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    actors: Vec<Actor>,
    cinema_halls: Vec<CinemaHall>,
    movies: Vec<Movie>,
    /// (movie_id, genre_id)
    movie_genres: Vec<(Uuid, Uuid)>,
    /// (movie_id, actor_id)
    movie_actors: Vec<(Uuid, Uuid)>,
    sessions: Vec<MovieSession>,
}

impl Tables {
    fn genre_ids(&self, movie_id: Uuid) -> Vec<Uuid> {
        self.movie_genres
            .iter()
            .filter(|(m, _)| *m == movie_id)
            .map(|(_, g)| *g)
            .collect()
    }

    fn actor_ids(&self, movie_id: Uuid) -> Vec<Uuid> {
        self.movie_actors
            .iter()
            .filter(|(m, _)| *m == movie_id)
            .map(|(_, a)| *a)
            .collect()
    }

    fn with_relations(&self, movie: &Movie) -> MovieWithRelations {
        let genre_ids = self.genre_ids(movie.id);
        let actor_ids = self.actor_ids(movie.id);

        let mut genres: Vec<Genre> = self
            .genres
            .iter()
            .filter(|g| genre_ids.contains(&g.id))
            .cloned()
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut actors: Vec<Actor> = self
            .actors
            .iter()
            .filter(|a| actor_ids.contains(&a.id))
            .cloned()
            .collect();
        actors.sort_by(|a, b| {
            (&a.first_name, &a.last_name, a.id).cmp(&(&b.first_name, &b.last_name, b.id))
        });

        MovieWithRelations {
            movie: movie.clone(),
            genres,
            actors,
        }
    }

    fn resolve_session(&self, session: &MovieSession) -> Result<MovieSessionWithRelations> {
        let movie = self
            .movies
            .iter()
            .find(|m| m.id == session.movie_id)
            .ok_or_else(|| anyhow!("session {} references missing movie", session.id))?;
        let cinema_hall = self
            .cinema_halls
            .iter()
            .find(|h| h.id == session.cinema_hall_id)
            .cloned()
            .ok_or_else(|| anyhow!("session {} references missing cinema hall", session.id))?;

        Ok(MovieSessionWithRelations {
            session: session.clone(),
            movie: self.with_relations(movie),
            cinema_hall,
        })
    }

    fn link(&mut self, movie_id: Uuid, genres: Option<&[Uuid]>, actors: Option<&[Uuid]>) {
        if let Some(genres) = genres {
            self.movie_genres.retain(|(m, _)| *m != movie_id);
            for genre_id in genres {
                if !self.movie_genres.contains(&(movie_id, *genre_id)) {
                    self.movie_genres.push((movie_id, *genre_id));
                }
            }
        }

        if let Some(actors) = actors {
            self.movie_actors.retain(|(m, _)| *m != movie_id);
            for actor_id in actors {
                if !self.movie_actors.contains(&(movie_id, *actor_id)) {
                    self.movie_actors.push((movie_id, *actor_id));
                }
            }
        }
    }
}

/// Insertion-ordered tables held in process memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn create_genre(&self, name: &str) -> Result<Genre> {
        let mut tables = self.tables.write().await;
        if tables.genres.iter().any(|g| g.name == name) {
            return Err(anyhow!("duplicate genre name {:?}", name));
        }

        let genre = Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        tables.genres.push(genre.clone());

        Ok(genre)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        let mut genres = self.tables.read().await.genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(genres)
    }

    async fn find_genre(&self, id: Uuid) -> Result<Option<Genre>> {
        let tables = self.tables.read().await;

        Ok(tables.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        let tables = self.tables.read().await;

        Ok(tables.genres.iter().find(|g| g.name == name).cloned())
    }

    async fn find_genres_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Genre>> {
        let tables = self.tables.read().await;

        Ok(tables
            .genres
            .iter()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect())
    }

    async fn update_genre(&self, id: Uuid, name: Option<String>) -> Result<Option<Genre>> {
        let mut tables = self.tables.write().await;
        let Some(genre) = tables.genres.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };

        if let Some(name) = name {
            genre.name = name;
        }

        Ok(Some(genre.clone()))
    }

    async fn delete_genre(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.genres.len();
        tables.genres.retain(|g| g.id != id);
        tables.movie_genres.retain(|(_, g)| *g != id);

        Ok(tables.genres.len() != before)
    }
}

#[async_trait]
impl ActorRepository for MemoryStore {
    async fn create_actor(&self, first_name: &str, last_name: &str) -> Result<Actor> {
        let actor = Actor {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.tables.write().await.actors.push(actor.clone());

        Ok(actor)
    }

    async fn list_actors(&self) -> Result<Vec<Actor>> {
        let mut actors = self.tables.read().await.actors.clone();
        actors.sort_by(|a, b| {
            (&a.first_name, &a.last_name, a.id).cmp(&(&b.first_name, &b.last_name, b.id))
        });

        Ok(actors)
    }

    async fn find_actor(&self, id: Uuid) -> Result<Option<Actor>> {
        let tables = self.tables.read().await;

        Ok(tables.actors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_actors_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Actor>> {
        let tables = self.tables.read().await;

        Ok(tables
            .actors
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn update_actor(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<Actor>> {
        let mut tables = self.tables.write().await;
        let Some(actor) = tables.actors.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(first_name) = first_name {
            actor.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            actor.last_name = last_name;
        }

        Ok(Some(actor.clone()))
    }

    async fn delete_actor(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.actors.len();
        tables.actors.retain(|a| a.id != id);
        tables.movie_actors.retain(|(_, a)| *a != id);

        Ok(tables.actors.len() != before)
    }
}

#[async_trait]
impl CinemaHallRepository for MemoryStore {
    async fn create_cinema_hall(&self, hall: NewCinemaHall) -> Result<CinemaHall> {
        let hall = CinemaHall {
            id: Uuid::new_v4(),
            name: hall.name,
            rows: hall.rows,
            seats_in_row: hall.seats_in_row,
        };
        self.tables.write().await.cinema_halls.push(hall.clone());

        Ok(hall)
    }

    async fn list_cinema_halls(&self) -> Result<Vec<CinemaHall>> {
        let mut halls = self.tables.read().await.cinema_halls.clone();
        halls.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(halls)
    }

    async fn find_cinema_hall(&self, id: Uuid) -> Result<Option<CinemaHall>> {
        let tables = self.tables.read().await;

        Ok(tables.cinema_halls.iter().find(|h| h.id == id).cloned())
    }

    async fn update_cinema_hall(
        &self,
        id: Uuid,
        changes: CinemaHallChanges,
    ) -> Result<Option<CinemaHall>> {
        let mut tables = self.tables.write().await;
        let Some(hall) = tables.cinema_halls.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            hall.name = name;
        }
        if let Some(rows) = changes.rows {
            hall.rows = rows;
        }
        if let Some(seats_in_row) = changes.seats_in_row {
            hall.seats_in_row = seats_in_row;
        }

        Ok(Some(hall.clone()))
    }

    async fn delete_cinema_hall(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.sessions.iter().any(|s| s.cinema_hall_id == id) {
            return Err(StillScheduled("Cinema hall").into());
        }

        let before = tables.cinema_halls.len();
        tables.cinema_halls.retain(|h| h.id != id);

        Ok(tables.cinema_halls.len() != before)
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie> {
        let mut tables = self.tables.write().await;

        let created = Movie {
            id: Uuid::new_v4(),
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            image: None,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.movies.push(created.clone());
        tables.link(created.id, Some(movie.genres.as_slice()), Some(movie.actors.as_slice()));

        Ok(created)
    }

    async fn list_movies(
        &self,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieWithRelations>, u64)> {
        let tables = self.tables.read().await;

        let matching: Vec<&Movie> = tables
            .movies
            .iter()
            .filter(|m| filter.matches(m, &tables.genre_ids(m.id), &tables.actor_ids(m.id)))
            .collect();
        let count = matching.len() as u64;

        let results = page_of(&matching, page)
            .into_iter()
            .map(|m| tables.with_relations(m))
            .collect();

        Ok((results, count))
    }

    async fn find_movie(&self, id: Uuid) -> Result<Option<MovieWithRelations>> {
        let tables = self.tables.read().await;

        Ok(tables
            .movies
            .iter()
            .find(|m| m.id == id)
            .map(|m| tables.with_relations(m)))
    }

    async fn update_movie(&self, id: Uuid, changes: MovieChanges) -> Result<Option<Movie>> {
        let mut tables = self.tables.write().await;
        let Some(movie) = tables.movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            movie.title = title;
        }
        if let Some(description) = changes.description {
            movie.description = description;
        }
        if let Some(duration) = changes.duration {
            movie.duration = duration;
        }
        let updated = movie.clone();

        tables.link(id, changes.genres.as_deref(), changes.actors.as_deref());

        Ok(Some(updated))
    }

    async fn set_movie_image(&self, id: Uuid, image: Option<String>) -> Result<Option<Movie>> {
        let mut tables = self.tables.write().await;
        let Some(movie) = tables.movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        movie.image = image;

        Ok(Some(movie.clone()))
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.sessions.iter().any(|s| s.movie_id == id) {
            return Err(StillScheduled("Movie").into());
        }

        let before = tables.movies.len();
        tables.movies.retain(|m| m.id != id);
        tables.movie_genres.retain(|(m, _)| *m != id);
        tables.movie_actors.retain(|(m, _)| *m != id);

        Ok(tables.movies.len() != before)
    }
}

#[async_trait]
impl MovieSessionRepository for MemoryStore {
    async fn create_movie_session(&self, session: NewMovieSession) -> Result<MovieSession> {
        let mut tables = self.tables.write().await;
        if !tables.movies.iter().any(|m| m.id == session.movie_id) {
            return Err(anyhow!("movie {} does not exist", session.movie_id));
        }
        if !tables.cinema_halls.iter().any(|h| h.id == session.cinema_hall_id) {
            return Err(anyhow!("cinema hall {} does not exist", session.cinema_hall_id));
        }

        let created = MovieSession {
            id: Uuid::new_v4(),
            show_time: session.show_time,
            movie_id: session.movie_id,
            cinema_hall_id: session.cinema_hall_id,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.sessions.push(created.clone());

        Ok(created)
    }

    async fn list_movie_sessions(
        &self,
        filter: &SessionFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieSessionWithRelations>, u64)> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&MovieSession> =
            tables.sessions.iter().filter(|s| filter.matches(s)).collect();
        matching.sort_by_key(|s| s.show_time);
        let count = matching.len() as u64;

        let results = page_of(&matching, page)
            .into_iter()
            .map(|s| tables.resolve_session(s))
            .collect::<Result<Vec<_>>>()?;

        Ok((results, count))
    }

    async fn find_movie_session(&self, id: Uuid) -> Result<Option<MovieSessionWithRelations>> {
        let tables = self.tables.read().await;

        tables
            .sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| tables.resolve_session(s))
            .transpose()
    }

    async fn update_movie_session(
        &self,
        id: Uuid,
        changes: MovieSessionChanges,
    ) -> Result<Option<MovieSession>> {
        let mut tables = self.tables.write().await;
        if let Some(movie_id) = changes.movie_id {
            if !tables.movies.iter().any(|m| m.id == movie_id) {
                return Err(anyhow!("movie {} does not exist", movie_id));
            }
        }
        if let Some(hall_id) = changes.cinema_hall_id {
            if !tables.cinema_halls.iter().any(|h| h.id == hall_id) {
                return Err(anyhow!("cinema hall {} does not exist", hall_id));
            }
        }

        let Some(session) = tables.sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if let Some(show_time) = changes.show_time {
            session.show_time = show_time;
        }
        if let Some(movie_id) = changes.movie_id {
            session.movie_id = movie_id;
        }
        if let Some(hall_id) = changes.cinema_hall_id {
            session.cinema_hall_id = hall_id;
        }

        Ok(Some(session.clone()))
    }

    async fn delete_movie_session(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);

        Ok(tables.sessions.len() != before)
    }

    async fn count_sessions_for_movie(&self, movie_id: Uuid) -> Result<u64> {
        let tables = self.tables.read().await;

        Ok(tables.sessions.iter().filter(|s| s.movie_id == movie_id).count() as u64)
    }

    async fn count_sessions_for_cinema_hall(&self, cinema_hall_id: Uuid) -> Result<u64> {
        let tables = self.tables.read().await;

        Ok(tables
            .sessions
            .iter()
            .filter(|s| s.cinema_hall_id == cinema_hall_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn first_page() -> PageRequest {
        PageRequest {
            page: 1,
            page_size: 10,
        }
    }

    async fn movie(store: &MemoryStore, title: &str, genres: Vec<Uuid>) -> Movie {
        store
            .create_movie(NewMovie {
                title: title.to_string(),
                description: "About".to_string(),
                duration: 100,
                genres,
                actors: vec![],
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_movies_keeps_insertion_order_and_filters_by_genre() {
        let store = MemoryStore::default();
        let drama = store.create_genre("Drama").await.unwrap();
        let first = movie(&store, "First", vec![drama.id]).await;
        movie(&store, "Second", vec![]).await;
        let third = movie(&store, "Third", vec![drama.id]).await;

        let (all, count) = store
            .list_movies(&MovieFilter::default(), first_page())
            .await
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(all[0].movie.title, "First");

        let filter = MovieFilter {
            genres: vec![drama.id],
            ..Default::default()
        };
        let (dramas, count) = store.list_movies(&filter, first_page()).await.unwrap();
        let ids: Vec<_> = dramas.iter().map(|m| m.movie.id).collect();
        assert_eq!(count, 2);
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[tokio::test]
    async fn deleting_genre_unlinks_it_from_movies() {
        let store = MemoryStore::default();
        let genre = store.create_genre("Comedy").await.unwrap();
        let created = movie(&store, "Film", vec![genre.id]).await;

        assert!(store.delete_genre(genre.id).await.unwrap());

        let found = store.find_movie(created.id).await.unwrap().unwrap();
        assert!(found.genres.is_empty());
    }

    #[tokio::test]
    async fn relations_are_sorted_by_name() {
        let store = MemoryStore::default();
        let western = store.create_genre("Western").await.unwrap();
        let action = store.create_genre("Action").await.unwrap();
        let created = movie(&store, "Film", vec![western.id, action.id]).await;

        let found = store.find_movie(created.id).await.unwrap().unwrap();
        let names: Vec<_> = found.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "Western"]);
    }

    #[tokio::test]
    async fn sessions_are_ordered_by_show_time() {
        let store = MemoryStore::default();
        let film = movie(&store, "Film", vec![]).await;
        let hall = store
            .create_cinema_hall(NewCinemaHall {
                name: "Red".to_string(),
                rows: 10,
                seats_in_row: 10,
            })
            .await
            .unwrap();

        for show_time in [
            datetime!(2024-10-16 20:00 UTC),
            datetime!(2024-10-15 18:00 UTC),
        ] {
            store
                .create_movie_session(NewMovieSession {
                    show_time,
                    movie_id: film.id,
                    cinema_hall_id: hall.id,
                })
                .await
                .unwrap();
        }

        let (sessions, count) = store
            .list_movie_sessions(&SessionFilter::default(), first_page())
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(sessions[0].session.show_time, datetime!(2024-10-15 18:00 UTC));
        assert_eq!(store.count_sessions_for_movie(film.id).await.unwrap(), 2);
        let err = store.delete_movie(film.id).await.unwrap_err();
        assert!(err.is::<StillScheduled>());
    }
}
