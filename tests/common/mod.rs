#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use cinema::app::create_app;
use cinema::config::settings::AppConfig;
use cinema::infrastructure::db::memory::MemoryStore;
use cinema::infrastructure::storage::MemoryStorage;
use cinema::modules::auth::model::UserRole;
use cinema::modules::auth::service::{ACCESS_TOKEN_TTL_SECS, AuthService};
use cinema::state::AppState;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret";
const BOUNDARY: &str = "cinema-test-boundary";

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub struct TestApp {
    pub router: Router,
    pub storage: MemoryStorage,
    pub admin: String,
    pub user: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_upload_limit(max_upload_bytes: usize) -> Self {
        Self::with_config(AppConfig {
            max_upload_bytes,
            ..AppConfig::default()
        })
    }

    fn with_config(config: AppConfig) -> Self {
        let config = AppConfig {
            jwt_secret: JWT_SECRET.to_string(),
            ..config
        };
        let storage = MemoryStorage::default();
        let state = AppState::new(
            config,
            Arc::new(MemoryStore::default()),
            Arc::new(storage.clone()),
        );

        Self {
            router: create_app(state),
            storage,
            admin: token(UserRole::Admin),
            user: token(UserRole::User),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(&self.user), None).await
    }

    pub async fn admin_post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(&self.admin), Some(body))
            .await
    }

    pub async fn multipart(&self, uri: &str, token: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        self.send(request).await
    }

    pub async fn upload_image(&self, movie_id: &str, bytes: &[u8]) -> (StatusCode, Value) {
        self.multipart(
            &format!("/api/v1/movies/{}/upload-image", movie_id),
            &self.admin,
            &[Part::File {
                name: "image",
                filename: "poster.jpg",
                content_type: "image/jpeg",
                bytes,
            }],
        )
        .await
    }

    pub async fn create_genre(&self, name: &str) -> String {
        let (status, body) = self
            .admin_post("/api/v1/genres", json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }

    pub async fn create_actor(&self, first_name: &str, last_name: &str) -> String {
        let (status, body) = self
            .admin_post(
                "/api/v1/actors",
                json!({ "first_name": first_name, "last_name": last_name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }

    pub async fn create_cinema_hall(&self, name: &str, rows: i32, seats_in_row: i32) -> String {
        let (status, body) = self
            .admin_post(
                "/api/v1/cinema-halls",
                json!({ "name": name, "rows": rows, "seats_in_row": seats_in_row }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }

    pub async fn create_movie(&self, title: &str, genres: &[&str], actors: &[&str]) -> String {
        let (status, body) = self
            .admin_post(
                "/api/v1/movies",
                json!({
                    "title": title,
                    "description": format!("About {}", title),
                    "duration": 120,
                    "genres": genres,
                    "actors": actors,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }

    pub async fn create_session(&self, movie: &str, hall: &str, show_time: &str) -> String {
        let (status, body) = self
            .admin_post(
                "/api/v1/movie-sessions",
                json!({ "movie": movie, "cinema_hall": hall, "show_time": show_time }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }
}

pub fn token(role: UserRole) -> String {
    AuthService::create_access_token(Uuid::new_v4(), role, JWT_SECRET, ACCESS_TOKEN_TTL_SECS)
        .unwrap()
}

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_string()
}

pub fn titles(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect()
}

pub fn sample_jpeg() -> Vec<u8> {
    encode_image(ImageFormat::Jpeg)
}

pub fn encode_image(format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 9, Rgb([200, 30, 30])))
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
