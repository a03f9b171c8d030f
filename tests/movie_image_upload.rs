mod common;

use axum::http::{Method, StatusCode};
use common::{Part, TestApp, encode_image, sample_jpeg};
use image::ImageFormat;

#[tokio::test]
async fn uploaded_image_is_visible_in_detail_list_and_sessions() {
    let app = TestApp::new();
    let movie = app.create_movie("Blade Runner", &[], &[]).await;
    let hall = app.create_cinema_hall("Main", 10, 12).await;
    app.create_session(&movie, &hall, "2024-10-15T20:00:00Z").await;

    let (status, body) = app.upload_image(&movie, &sample_jpeg()).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["id"], movie);

    let image = body["image"].as_str().unwrap().to_string();
    assert!(image.starts_with(&format!("/media/movies/{}/blade-runner-", movie)));
    assert!(image.ends_with(".jpg"));
    assert_eq!(app.storage.len(), 1);

    let (_, detail) = app.get(&format!("/api/v1/movies/{}", movie)).await;
    assert_eq!(detail["image"], image);

    let (_, list) = app.get("/api/v1/movies").await;
    assert_eq!(list["results"][0]["image"], image);

    let (_, sessions) = app.get("/api/v1/movie-sessions").await;
    assert_eq!(sessions["results"][0]["movie_image"], image);

    let session = sessions["results"][0]["id"].as_str().unwrap();
    let (_, session) = app.get(&format!("/api/v1/movie-sessions/{}", session)).await;
    assert_eq!(session["movie"]["image"], image);
}

#[tokio::test]
async fn png_keeps_its_own_extension_and_content_type() {
    let app = TestApp::new();
    let movie = app.create_movie("Up", &[], &[]).await;

    let (status, body) = app
        .upload_image(&movie, &encode_image(ImageFormat::Png))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let url = body["image"].as_str().unwrap();
    assert!(url.ends_with(".png"));
    let key = url.trim_start_matches("/media/");
    assert_eq!(app.storage.content_type(key).as_deref(), Some("image/png"));
}

#[tokio::test]
async fn undecodable_payload_is_rejected_without_side_effects() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;

    let (status, body) = app.upload_image(&movie, b"not image").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(app.storage.is_empty());

    let (_, detail) = app.get(&format!("/api/v1/movies/{}", movie)).await;
    assert!(detail["image"].is_null());
}

#[tokio::test]
async fn regular_user_cannot_upload() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;
    let jpeg = sample_jpeg();

    let (status, _) = app
        .multipart(
            &format!("/api/v1/movies/{}/upload-image", movie),
            &app.user,
            &[Part::File {
                name: "image",
                filename: "poster.jpg",
                content_type: "image/jpeg",
                bytes: &jpeg,
            }],
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn upload_to_unknown_movie_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .upload_image("5b8f1e0c-3c52-4f55-9b57-8d8d3c0e7a21", &sample_jpeg())
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;
    let jpeg = sample_jpeg();

    let (status, body) = app
        .multipart(
            &format!("/api/v1/movies/{}/upload-image", movie),
            &app.admin,
            &[
                Part::Text("caption", "poster"),
                Part::File {
                    name: "poster",
                    filename: "poster.jpg",
                    content_type: "image/jpeg",
                    bytes: &jpeg,
                },
            ],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No image field found in multipart request");
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let app = TestApp::with_upload_limit(64);
    let movie = app.create_movie("Alien", &[], &[]).await;

    let (status, _) = app.upload_image(&movie, &sample_jpeg()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn replacing_image_removes_previous_object() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;

    let (_, first) = app.upload_image(&movie, &sample_jpeg()).await;
    let (status, second) = app
        .upload_image(&movie, &encode_image(ImageFormat::Png))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(first["image"], second["image"]);
    assert_eq!(app.storage.len(), 1);

    let key = second["image"].as_str().unwrap().trim_start_matches("/media/");
    assert!(app.storage.contains(key));
}

#[tokio::test]
async fn deleting_image_clears_it_everywhere() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;
    app.upload_image(&movie, &sample_jpeg()).await;

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/movies/{}/image", movie),
            Some(&app.admin),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["image"].is_null());
    assert!(app.storage.is_empty());

    let (_, list) = app.get("/api/v1/movies").await;
    assert!(list["results"][0]["image"].is_null());
}

#[tokio::test]
async fn deleting_movie_removes_its_image() {
    let app = TestApp::new();
    let movie = app.create_movie("Alien", &[], &[]).await;
    app.upload_image(&movie, &sample_jpeg()).await;
    assert_eq!(app.storage.len(), 1);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/movies/{}", movie),
            Some(&app.admin),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.storage.is_empty());
}
