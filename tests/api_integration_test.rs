use std::io::Cursor;
use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bookswap::db;
use bookswap::infrastructure::{AppState, MediaStore};
use bookswap::server::build_router;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "bookswap-test-boundary";

// Each test gets its own database and media directory
async fn setup_test_app() -> (Router, PathBuf) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let media_root = std::env::temp_dir().join(format!("bookswap-test-{}", uuid::Uuid::new_v4()));
    let app = build_router(AppState::new(db, MediaStore::new(&media_root)), &[]);
    (app, media_root)
}

async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, body.to_vec())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn request(method: &str, uri: &str, token: Option<&str>, payload: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match payload {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Registers and logs in a user, returning (user id, token).
async fn sign_up(app: &Router, username: &str) -> (i64, String) {
    let email = format!("{}@example.com", username);
    let (status, user) = send(
        app,
        request(
            "POST",
            "/register/",
            None,
            Some(json!({ "username": username, "email": email, "password": "password123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = send(
        app,
        request(
            "POST",
            "/log_in/",
            None,
            Some(json!({ "email": email, "password": "password123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        user["id"].as_i64().unwrap(),
        login["token"].as_str().unwrap().to_string(),
    )
}

async fn list_book(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/books/",
            Some(token),
            Some(json!({
                "title": title,
                "author": "Someone",
                "price": 4.5,
                "description": "A book",
                "category": "Fiction",
                "condition": "NW"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["id"].as_i64().unwrap()
}

fn png_bytes() -> Vec<u8> {
    let picture = image::RgbImage::from_pixel(2, 2, image::Rgb([200, 30, 30]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(picture)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn upload(uri: &str, token: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n",
            BOUNDARY
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_docs() {
    let (app, _) = setup_test_app().await;

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bookswap");

    let (status, doc) = send(&app, request("GET", "/api-docs/openapi.json", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/log_in/"].is_object());
    assert!(doc["paths"]["/catalog/{search}"].is_object());
}

#[tokio::test]
async fn test_image_upload_and_retrieval() {
    let (app, media_root) = setup_test_app().await;
    let (_, owner) = sign_up(&app, "owner").await;
    let (_, stranger) = sign_up(&app, "stranger").await;
    let book_id = list_book(&app, &owner, "Illustrated").await;
    let uri = format!("/book/{}/images", book_id);
    let png = png_bytes();

    // Only the owner may add pictures
    let (status, _, _) = send_raw(&app, upload(&uri, &stranger, &png)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Text is not an image
    let (status, _, _) = send_raw(&app, upload(&uri, &owner, b"definitely not a picture")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send_raw(&app, upload(&uri, &owner, &png)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();
    let image_id = created["id"].as_i64().unwrap();
    assert_eq!(created["book"].as_i64().unwrap(), book_id);
    assert_eq!(created["url"], format!("/image/{}", image_id));

    let (status, listed) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, content_type, bytes) = send_raw(
        &app,
        request("GET", &format!("/image/{}", image_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(bytes, png);

    let (status, body) = send(&app, request("GET", "/image/9999", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Image not found");

    // Deleting the book removes its files
    let (status, _) = send(
        &app,
        request("DELETE", &format!("/book/{}", book_id), Some(&owner), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        request("GET", &format!("/image/{}", image_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let leftover = std::fs::read_dir(&media_root)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);

    let _ = std::fs::remove_dir_all(&media_root);
}

#[tokio::test]
async fn test_image_missing_on_disk() {
    let (app, media_root) = setup_test_app().await;
    let (_, owner) = sign_up(&app, "owner").await;
    let book_id = list_book(&app, &owner, "Vanishing").await;

    let (status, _, body) = send_raw(
        &app,
        upload(&format!("/book/{}/images", book_id), &owner, &png_bytes()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();

    std::fs::remove_dir_all(&media_root).unwrap();

    let (status, body) = send(
        &app,
        request("GET", created["url"].as_str().unwrap(), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Image not found");
}

#[tokio::test]
async fn test_book_ownership() {
    let (app, _) = setup_test_app().await;
    let (_, owner) = sign_up(&app, "owner").await;
    let (_, stranger) = sign_up(&app, "stranger").await;
    let book_id = list_book(&app, &owner, "Mine").await;
    let uri = format!("/book/{}", book_id);
    let edit = json!({
        "title": "Renamed",
        "author": "Someone",
        "price": 3.333,
        "category": "Fiction",
        "condition": "OD"
    });

    let (status, body) = send(&app, request("PUT", &uri, Some(&stranger), Some(edit.clone()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only modify your own books");

    let (status, _) = send(&app, request("DELETE", &uri, Some(&stranger), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, book) = send(&app, request("PUT", &uri, Some(&owner), Some(edit))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Renamed");
    assert_eq!(book["price"], 3.33);
    assert_eq!(book["condition"], "OD");
    assert!(book["description"].is_null());

    let (status, body) = send(&app, request("DELETE", &uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, _) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reviews() {
    let (app, _) = setup_test_app().await;
    let (_, owner) = sign_up(&app, "owner").await;
    let (reader_id, reader) = sign_up(&app, "reader").await;
    let book_id = list_book(&app, &owner, "Reviewed").await;
    let uri = format!("/book/{}/reviews", book_id);

    let (status, body) = send(&app, request("POST", &uri, Some(&reader), Some(json!({ "comment": " " })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Comment is required");

    let (status, review) = send(
        &app,
        request("POST", &uri, Some(&reader), Some(json!({ "comment": "Loved it" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["rating"], "NR");
    assert_eq!(review["reviewer"].as_i64().unwrap(), reader_id);
    assert_eq!(review["reviewer_username"], "reader");
    assert!(!review["timestamp"].as_str().unwrap().is_empty());

    send(
        &app,
        request(
            "POST",
            &uri,
            Some(&owner),
            Some(json!({ "rating": "VG", "comment": "My own copy" })),
        ),
    )
    .await;

    let (status, reviews) = send(&app, request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["comment"], "Loved it");
    assert_eq!(reviews[1]["rating"], "VG");

    let (status, _) = send(&app, request("GET", "/book/9999/reviews", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exchange_flow() {
    let (app, _) = setup_test_app().await;
    let (alice_id, alice) = sign_up(&app, "alice").await;
    let (bob_id, bob) = sign_up(&app, "bob").await;
    let (_, carol) = sign_up(&app, "carol").await;
    let alice_book = list_book(&app, &alice, "Alice's book").await;
    let bob_book = list_book(&app, &bob, "Bob's book").await;

    // Own book and somebody else's offer are rejected
    let (status, _) = send(
        &app,
        request("POST", "/exchanges/", Some(&alice), Some(json!({ "requested_book": alice_book }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/exchanges/",
            Some(&alice),
            Some(json!({ "requested_book": bob_book, "proposed_book": bob_book })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(
        &app,
        request("POST", "/exchanges/", Some(&alice), Some(json!({ "requested_book": 9999 }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, exchange) = send(
        &app,
        request(
            "POST",
            "/exchanges/",
            Some(&alice),
            Some(json!({ "requested_book": bob_book, "proposed_book": alice_book })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(exchange["status"], "PG");
    assert_eq!(exchange["sender"].as_i64().unwrap(), alice_id);
    assert_eq!(exchange["receiver"].as_i64().unwrap(), bob_id);
    assert_eq!(exchange["proposed_book"].as_i64().unwrap(), alice_book);
    let exchange_uri = format!("/exchanges/{}", exchange["id"]);

    let (status, _) = send(
        &app,
        request("POST", "/exchanges/", Some(&alice), Some(json!({ "requested_book": bob_book }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Both sides see it, outsiders do not
    let (_, listed) = send(&app, request("GET", "/exchanges/", Some(&bob), None)).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (_, listed) = send(&app, request("GET", "/exchanges/", Some(&carol), None)).await;
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, request("DELETE", &exchange_uri, Some(&carol), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let complete_uri = format!("{}/complete", exchange_uri);
    let (status, _) = send(&app, request("POST", &complete_uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, completed) = send(&app, request("POST", &complete_uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "CD");

    let (status, _) = send(&app, request("POST", &complete_uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, request("DELETE", &exchange_uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Exchange removed");
}

#[tokio::test]
async fn test_account_deletion_blocked_by_pending_exchange() {
    let (app, _) = setup_test_app().await;
    let (_, alice) = sign_up(&app, "alice").await;
    let (_, bob) = sign_up(&app, "bob").await;
    let bob_book = list_book(&app, &bob, "Bob's book").await;

    let (_, exchange) = send(
        &app,
        request("POST", "/exchanges/", Some(&alice), Some(json!({ "requested_book": bob_book }))),
    )
    .await;
    let exchange_uri = format!("/exchanges/{}", exchange["id"]);

    // Neither the sender nor the receiver can leave
    for token in [&alice, &bob] {
        let (status, _) = send(&app, request("DELETE", "/me/", Some(token), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    let (status, _) = send(&app, request("DELETE", &exchange_uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("DELETE", "/me/", Some(&bob), None)).await;
    assert_eq!(status, StatusCode::OK);

    // The account and its listings are gone
    let (status, _) = send(&app, request("GET", "/me/", Some(&bob), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, request("GET", &format!("/book/{}", bob_book), None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_survives_book_deletion() {
    let (app, _) = setup_test_app().await;
    let (_, owner) = sign_up(&app, "owner").await;
    let (_, reader) = sign_up(&app, "reader").await;
    let book_id = list_book(&app, &owner, "Wanted").await;

    let (status, entry) = send(
        &app,
        request("POST", "/wishlist/", Some(&reader), Some(json!({ "book": book_id }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["title"], "Wanted");

    let (status, _) = send(
        &app,
        request("POST", "/wishlist/", Some(&reader), Some(json!({ "book": book_id }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, request("DELETE", &format!("/book/{}", book_id), Some(&owner), None)).await;

    let (status, entries) = send(&app, request("GET", "/wishlist/", Some(&reader), None)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["book"].is_null());
    assert!(entries[0]["title"].is_null());

    let entry_uri = format!("/wishlist/{}", entry["id"]);
    let (status, _) = send(&app, request("DELETE", &entry_uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, request("DELETE", &entry_uri, Some(&reader), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_messages_conversation() {
    let (app, _) = setup_test_app().await;
    let (alice_id, alice) = sign_up(&app, "alice").await;
    let (bob_id, bob) = sign_up(&app, "bob").await;
    let (_, carol) = sign_up(&app, "carol").await;

    let message = |token: &str, receiver: i64, content: &str| {
        request(
            "POST",
            "/messages/",
            Some(token),
            Some(json!({ "receiver": receiver, "content": content })),
        )
    };

    let (status, _) = send(&app, message(&alice, alice_id, "Hi me")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, message(&alice, 9999, "Anyone?")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, sent) = send(&app, message(&alice, bob_id, "Still have Dune?")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sent["sender"].as_i64().unwrap(), alice_id);
    send(&app, message(&bob, alice_id, "Yes!")).await;
    send(&app, message(&carol, bob_id, "Unrelated")).await;

    let (status, thread) = send(
        &app,
        request("GET", &format!("/messages/{}", bob_id), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let thread = thread.as_array().unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["content"], "Still have Dune?");
    assert_eq!(thread[1]["content"], "Yes!");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (app, _) = setup_test_app().await;
    let (_, token) = sign_up(&app, "owner").await;
    let book_id = list_book(&app, &token, "Target").await;

    let cases = [
        request(
            "POST",
            "/books/",
            Some(&token),
            Some(json!({ "title": "X", "author": "A", "price": "cheap", "category": "C" })),
        ),
        request("POST", "/exchanges/", Some(&token), Some(json!({}))),
        request("POST", "/wishlist/", Some(&token), Some(json!({ "book": "one" }))),
        request(
            "POST",
            &format!("/book/{}/reviews", book_id),
            Some(&token),
            Some(json!({ "rating": "excellent", "comment": "ok" })),
        ),
        request("POST", "/messages/", Some(&token), Some(json!({ "content": "hi" }))),
        request("PUT", "/book/abc", Some(&token), Some(json!({}))),
        request("DELETE", "/exchanges/abc", Some(&token), None),
        request("GET", "/messages/abc", Some(&token), None),
        request("GET", "/image/abc", None, None),
        request("GET", "/book/abc/images", None, None),
        // Upload without a multipart content type
        request("POST", &format!("/book/{}/images", book_id), Some(&token), Some(json!({}))),
    ];

    for req in cases {
        let uri = req.uri().to_string();
        let (status, content_type, body) = send_raw(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("application/json"), "{}", uri);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string(), "{}", uri);
    }

    // Without a content type the body is still rejected as JSON
    let req = Request::builder()
        .uri("/books/")
        .method("POST")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_account_deletion_removes_conversations() {
    let (app, _) = setup_test_app().await;
    let (_, alice) = sign_up(&app, "alice").await;
    let (bob_id, bob) = sign_up(&app, "bob").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/messages/",
            Some(&alice),
            Some(json!({ "receiver": bob_id, "content": "Still have Dune?" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, request("DELETE", "/me/", Some(&bob), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, thread) = send(
        &app,
        request("GET", &format!("/messages/{}", bob_id), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread, json!([]));
}
