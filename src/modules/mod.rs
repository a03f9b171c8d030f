pub mod actor;
pub mod auth;
pub mod cinema_hall;
pub mod genre;
pub mod movie;
pub mod movie_session;
