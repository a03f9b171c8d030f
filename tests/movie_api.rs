mod common;

use axum::http::{Method, StatusCode};
use common::{Part, TestApp, id_of, titles};
use serde_json::json;

#[tokio::test]
async fn movie_list_requires_authentication() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/v1/movies", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .request(Method::GET, "/api/v1/movies", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_creates_movie_and_gets_detail_view() {
    let app = TestApp::new();
    let drama = app.create_genre("Drama").await;
    let actor = app.create_actor("Keanu", "Reeves").await;

    let (status, body) = app
        .admin_post(
            "/api/v1/movies",
            json!({
                "title": "The Matrix",
                "description": "A hacker learns the truth",
                "duration": 136,
                "genres": [drama],
                "actors": [actor],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["title"], "The Matrix");
    assert_eq!(body["description"], "A hacker learns the truth");
    assert_eq!(body["duration"], 136);
    assert_eq!(body["genres"], json!([{ "id": drama, "name": "Drama" }]));
    assert_eq!(body["actors"][0]["full_name"], "Keanu Reeves");
    assert!(body["image"].is_null());

    let (status, detail) = app.get(&format!("/api/v1/movies/{}", id_of(&body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail, body);
}

#[tokio::test]
async fn regular_user_cannot_write_movies() {
    let app = TestApp::new();
    let movie = app.create_movie("Heat", &[], &[]).await;

    let payload = json!({ "title": "Forbidden movie", "description": "Crime", "duration": 170 });
    let (status, body) = app
        .request(Method::POST, "/api/v1/movies", Some(&app.user), Some(payload))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "error");

    let (status, list) = app.get("/api/v1/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);
    assert_eq!(titles(&list), vec!["Heat"]);

    let uri = format!("/api/v1/movies/{}", movie);
    let (status, _) = app
        .request(Method::PUT, &uri, Some(&app.user), Some(json!({ "title": "Cold" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&app.user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Heat");
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = TestApp::new();

    let (status, _) = app
        .admin_post(
            "/api/v1/movies",
            json!({ "title": "", "description": "x", "duration": 90 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .admin_post(
            "/api/v1/movies",
            json!({ "title": "Short", "description": "x", "duration": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .admin_post("/api/v1/movies", json!({ "title": "Missing fields" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .admin_post(
            "/api/v1/movies",
            json!({
                "title": "Ghost",
                "description": "x",
                "duration": 90,
                "genres": ["6f1c0a52-7c1e-4d6e-9d55-1b0f2f1c7e11"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("genres:"));

    let (_, page) = app.get("/api/v1/movies").await;
    assert_eq!(page["count"], 0);
}

#[tokio::test]
async fn multipart_create_ignores_file_parts() {
    let app = TestApp::new();
    let genre = app.create_genre("Sci-Fi").await;
    let jpeg = common::sample_jpeg();

    let (status, body) = app
        .multipart(
            "/api/v1/movies",
            &app.admin,
            &[
                Part::Text("title", "Arrival"),
                Part::Text("description", "Linguist meets aliens"),
                Part::Text("duration", "116"),
                Part::Text("genres", &genre),
                Part::File {
                    name: "image",
                    filename: "poster.jpg",
                    content_type: "image/jpeg",
                    bytes: &jpeg,
                },
            ],
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["title"], "Arrival");
    assert_eq!(body["genres"][0]["id"], genre);
    assert!(body["image"].is_null());
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn list_view_uses_names_and_omits_description() {
    let app = TestApp::new();
    let western = app.create_genre("Western").await;
    let action = app.create_genre("Action").await;
    let actor = app.create_actor("Clint", "Eastwood").await;
    app.create_movie("Unforgiven", &[&western, &action], &[&actor])
        .await;

    let (status, body) = app.get("/api/v1/movies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert!(body["next"].is_null());
    assert!(body["previous"].is_null());

    let item = &body["results"][0];
    assert_eq!(item["genres"], json!(["Action", "Western"]));
    assert_eq!(item["actors"], json!(["Clint Eastwood"]));
    assert!(item.get("description").is_none());
    assert!(item["image"].is_null());
}

#[tokio::test]
async fn filter_by_title_is_case_insensitive_substring() {
    let app = TestApp::new();
    app.create_movie("The Matrix", &[], &[]).await;
    app.create_movie("Matrix Reloaded", &[], &[]).await;
    app.create_movie("Inception", &[], &[]).await;

    let (status, body) = app.get("/api/v1/movies?title=maTRix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["The Matrix", "Matrix Reloaded"]);

    let (_, body) = app.get("/api/v1/movies?title=").await;
    assert_eq!(body["count"], 3);

    let (_, body) = app.get("/api/v1/movies?title=nothing").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn filter_by_genres_and_actors_intersects_dimensions() {
    let app = TestApp::new();
    let drama = app.create_genre("Drama").await;
    let comedy = app.create_genre("Comedy").await;
    let horror = app.create_genre("Horror").await;
    let murray = app.create_actor("Bill", "Murray").await;
    let adams = app.create_actor("Amy", "Adams").await;

    app.create_movie("Lost in Translation", &[&drama, &comedy], &[&murray])
        .await;
    app.create_movie("Groundhog Day", &[&comedy], &[&murray]).await;
    app.create_movie("Arrival", &[&drama], &[&adams]).await;
    app.create_movie("It", &[&horror], &[]).await;

    let (_, body) = app.get(&format!("/api/v1/movies?genres={}", drama)).await;
    assert_eq!(titles(&body), vec!["Lost in Translation", "Arrival"]);

    let (_, body) = app
        .get(&format!("/api/v1/movies?genres={},{}", drama, horror))
        .await;
    assert_eq!(titles(&body), vec!["Lost in Translation", "Arrival", "It"]);

    let (_, body) = app.get(&format!("/api/v1/movies?actors={}", murray)).await;
    assert_eq!(titles(&body), vec!["Lost in Translation", "Groundhog Day"]);

    let (_, body) = app
        .get(&format!(
            "/api/v1/movies?genres={}&actors={}&title=lost",
            drama, murray
        ))
        .await;
    assert_eq!(titles(&body), vec!["Lost in Translation"]);

    let (_, body) = app
        .get(&format!("/api/v1/movies?genres={}&actors={}", horror, adams))
        .await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn malformed_filter_ids_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/movies?genres=1,abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn pagination_links_and_out_of_range_pages() {
    let app = TestApp::new();
    for title in ["One", "Two", "Three"] {
        app.create_movie(title, &[], &[]).await;
    }

    let (status, body) = app.get("/api/v1/movies?page_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["next"], 2);
    assert!(body["previous"].is_null());
    assert_eq!(titles(&body), vec!["One", "Two"]);

    let (_, body) = app.get("/api/v1/movies?page=2&page_size=2").await;
    assert_eq!(titles(&body), vec!["Three"]);
    assert!(body["next"].is_null());
    assert_eq!(body["previous"], 1);

    let (status, _) = app.get("/api/v1/movies?page=3&page_size=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/movies?page=0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn huge_page_numbers_are_not_found() {
    let app = TestApp::new();
    app.create_movie("Solo", &[], &[]).await;

    let (status, body) = app
        .get("/api/v1/movies?page=18446744073709551615&page_size=2")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .get("/api/v1/movie-sessions?page=18446744073709551615")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_movie_is_not_found() {
    let app = TestApp::new();
    let missing = "0b7d4c9e-2f7a-4d8e-8a57-3f1e6c2d9a10";

    let (status, body) = app.get(&format!("/api/v1/movies/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Movie not found");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/movies/{}", missing),
            Some(&app.admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_is_partial_and_replaces_relations() {
    let app = TestApp::new();
    let drama = app.create_genre("Drama").await;
    let thriller = app.create_genre("Thriller").await;
    let movie = app.create_movie("Heat", &[&drama], &[]).await;
    let uri = format!("/api/v1/movies/{}", movie);

    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(&app.admin),
            Some(json!({ "duration": 170, "genres": [thriller] })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["title"], "Heat");
    assert_eq!(body["duration"], 170);
    assert_eq!(body["genres"], json!([{ "id": thriller, "name": "Thriller" }]));
}

#[tokio::test]
async fn delete_movie_then_it_is_gone() {
    let app = TestApp::new();
    let movie = app.create_movie("Heat", &[], &[]).await;
    let uri = format!("/api/v1/movies/{}", movie);

    let (status, body) = app.request(Method::DELETE, &uri, Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
