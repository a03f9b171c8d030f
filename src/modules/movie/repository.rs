use super::model::{Movie, MovieWithRelations};
use crate::common::pagination::PageRequest;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Conjunction of optional constraints. Empty id lists impose nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub genres: Vec<Uuid>,
    pub actors: Vec<Uuid>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie, genre_ids: &[Uuid], actor_ids: &[Uuid]) -> bool {
        let title = self
            .title
            .as_ref()
            .is_none_or(|t| movie.title.to_lowercase().contains(&t.to_lowercase()));
        let genres = self.genres.is_empty() || genre_ids.iter().any(|id| self.genres.contains(id));
        let actors = self.actors.is_empty() || actor_ids.iter().any(|id| self.actors.contains(id));

        title && genres && actors
    }
}

pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<Uuid>,
    pub actors: Vec<Uuid>,
}

#[derive(Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub genres: Option<Vec<Uuid>>,
    pub actors: Option<Vec<Uuid>>,
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Inserts the movie and its relation links atomically.
    async fn create_movie(&self, movie: NewMovie) -> Result<Movie>;

    /// One page of matching movies in insertion order, plus the total match count.
    async fn list_movies(
        &self,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<(Vec<MovieWithRelations>, u64)>;

    async fn find_movie(&self, id: Uuid) -> Result<Option<MovieWithRelations>>;

    async fn update_movie(&self, id: Uuid, changes: MovieChanges) -> Result<Option<Movie>>;

    async fn set_movie_image(&self, id: Uuid, image: Option<String>) -> Result<Option<Movie>>;

    async fn delete_movie(&self, id: Uuid) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn movie(title: &str) -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            duration: 90,
            image: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn title_match_ignores_case() {
        let filter = MovieFilter {
            title: Some("matrix".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&movie("The Matrix"), &[], &[]));
        assert!(!filter.matches(&movie("Inception"), &[], &[]));
    }

    #[test]
    fn relation_filters_need_an_intersection() {
        let action = Uuid::new_v4();
        let drama = Uuid::new_v4();
        let filter = MovieFilter {
            genres: vec![action, drama],
            ..Default::default()
        };

        assert!(filter.matches(&movie("A"), &[drama], &[]));
        assert!(!filter.matches(&movie("B"), &[Uuid::new_v4()], &[]));
        assert!(!filter.matches(&movie("C"), &[], &[]));
    }

    #[test]
    fn constraints_are_combined() {
        let actor = Uuid::new_v4();
        let filter = MovieFilter {
            title: Some("mission".to_string()),
            actors: vec![actor],
            ..Default::default()
        };

        assert!(filter.matches(&movie("Mission Impossible"), &[], &[actor]));
        assert!(!filter.matches(&movie("Mission Impossible"), &[], &[]));
        assert!(!filter.matches(&movie("Top Gun"), &[], &[actor]));
    }
}
