/// Integration tests for the Postboard API
///
/// Exercise the full router (guard, handlers, repositories) against the
/// in-memory store.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_bytes, body_json, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_register_then_login_returns_verifiable_token() {
    let ctx = TestContext::new();

    let token = ctx.register_and_login("a@example.com", "hunter2").await;

    let claims = ctx.tokens.verify(&token).unwrap();
    assert_eq!(claims.email, "a@example.com");
}

#[tokio::test]
async fn test_register_response_is_empty() {
    let ctx = TestContext::new();

    let response = ctx
        .send(
            "POST",
            "/api/register",
            None,
            Some(json!({ "email": "a@example.com", "password": "pw" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_missing_fields() {
    let ctx = TestContext::new();
    ctx.register_and_login("a@example.com", "pw").await;

    let response = ctx
        .send(
            "POST",
            "/api/register",
            None,
            Some(json!({ "email": "a@example.com", "password": "other" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = ctx
        .send("POST", "/api/register", None, Some(json!({ "email": "b@example.com" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "password is required");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    ctx.register_and_login("a@example.com", "hunter2").await;

    let wrong_password = ctx
        .send(
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": "a@example.com", "password": "nope" })),
        )
        .await;
    let unknown_email = ctx
        .send(
            "POST",
            "/api/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "hunter2" })),
        )
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = body_bytes(wrong_password).await;
    let b = body_bytes(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(&a[..], b"Invalid credentials");
}

#[tokio::test]
async fn test_missing_token_is_bare_401() {
    let ctx = TestContext::new();

    let response = ctx
        .send("POST", "/api/posts", None, Some(json!({ "title": "t", "content": "c" })))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_are_bare_403() {
    let ctx = TestContext::new();
    let expired = ctx
        .tokens
        .issue_at("a@example.com", Utc::now() - Duration::minutes(61))
        .unwrap();
    let foreign = postboard_shared::auth::jwt::TokenService::new("some-other-secret")
        .issue("a@example.com")
        .unwrap();

    for token in ["garbage", expired.as_str(), foreign.as_str()] {
        let response = ctx
            .send(
                "POST",
                "/api/questions",
                Some(token),
                Some(json!({ "question": "q?" })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_token_from_59_minutes_ago_is_still_accepted() {
    let ctx = TestContext::new();
    let token = ctx
        .tokens
        .issue_at("a@example.com", Utc::now() - Duration::minutes(59))
        .unwrap();

    let response = ctx
        .send("POST", "/api/questions", Some(token.as_str()), Some(json!({ "question": "q?" })))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_post_ignores_client_author() {
    let ctx = TestContext::new();
    let token = ctx.register_and_login("a@example.com", "pw").await;

    let response = ctx
        .send(
            "POST",
            "/api/posts",
            Some(token.as_str()),
            Some(json!({ "title": "Hello", "content": "World", "author": "mallory@example.com" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let post = body_json(response).await;
    assert_eq!(post["author"], "a@example.com");
    assert_eq!(post["title"], "Hello");
    assert!(post["_id"].is_string());
    assert_eq!(post["comments"], json!([]));
}

#[tokio::test]
async fn test_create_post_requires_title_and_content() {
    let ctx = TestContext::new();
    let token = ctx.register_and_login("a@example.com", "pw").await;

    let response = ctx
        .send("POST", "/api/posts", Some(token.as_str()), Some(json!({ "title": "only" })))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_listing_is_public_and_complete() {
    let ctx = TestContext::new();
    let token = ctx.register_and_login("a@example.com", "pw").await;

    for title in ["one", "two"] {
        let response = ctx
            .send(
                "POST",
                "/api/posts",
                Some(token.as_str()),
                Some(json!({ "title": title, "content": "c" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = ctx.send("GET", "/api/posts", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let posts = body_json(response).await;
    let titles: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "two"]);

    let response = ctx.send("GET", "/api/questions", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_post_delete_ownership_and_idempotence() {
    let ctx = TestContext::new();
    let alice = ctx.register_and_login("alice@example.com", "pw").await;
    let bob = ctx.register_and_login("bob@example.com", "pw").await;

    let response = ctx
        .send(
            "POST",
            "/api/posts",
            Some(alice.as_str()),
            Some(json!({ "title": "mine", "content": "c" })),
        )
        .await;
    let id = body_json(response).await["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/posts/{}", id);

    // Someone else cannot delete it, and it stays listed.
    let response = ctx.send("DELETE", &uri, Some(bob.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "You are not authorized to delete this post"
    );
    let listed = body_json(ctx.send("GET", "/api/posts", None, None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // The author can.
    let response = ctx.send("DELETE", &uri, Some(alice.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    let listed = body_json(ctx.send("GET", "/api/posts", None, None).await).await;
    assert!(listed.as_array().unwrap().is_empty());

    // Deleting again is NotFound for everyone.
    for token in [&alice, &bob] {
        let response = ctx.send("DELETE", &uri, Some(token.as_str()), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Post not found");
    }
}

#[tokio::test]
async fn test_question_delete_follows_the_same_rules() {
    let ctx = TestContext::new();
    let alice = ctx.register_and_login("alice@example.com", "pw").await;
    let bob = ctx.register_and_login("bob@example.com", "pw").await;

    let response = ctx
        .send(
            "POST",
            "/api/questions",
            Some(alice.as_str()),
            Some(json!({ "question": "Why?" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let question = body_json(response).await;
    assert_eq!(question["author"], "alice@example.com");
    let uri = format!("/api/questions/{}", question["_id"].as_str().unwrap());

    let response = ctx.send("DELETE", &uri, Some(bob.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx.send("DELETE", &uri, Some(alice.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx.send("DELETE", &uri, Some(alice.as_str()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Question not found");
}

#[tokio::test]
async fn test_delete_with_malformed_id_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.register_and_login("a@example.com", "pw").await;

    let response = ctx
        .send("DELETE", "/api/posts/not-a-uuid", Some(token.as_str()), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_delete_requires_token() {
    let ctx = TestContext::new();

    let response = ctx
        .send("DELETE", &format!("/api/posts/{}", uuid::Uuid::new_v4()), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let ctx = TestContext::new();

    let response = ctx.send("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["store"], "memory");
}

#[tokio::test]
async fn test_blank_post_and_question_fields_are_rejected() {
    let ctx = TestContext::new();
    let token = ctx.register_and_login("a@example.com", "pw").await;

    let response = ctx
        .send(
            "POST",
            "/api/posts",
            Some(token.as_str()),
            Some(json!({ "title": "   ", "content": " " })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .send(
            "POST",
            "/api/questions",
            Some(token.as_str()),
            Some(json!({ "question": "\t\n" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .send("POST", "/api/register", None, Some(json!({ "email": "   ", "password": "pw" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.send("GET", "/api/posts", None, None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_store_failures_return_generic_400() {
    let ctx = TestContext::failing();
    let token = ctx.tokens.issue("a@example.com").unwrap();
    let credentials = json!({ "email": "a@example.com", "password": "pw" });
    let missing = format!("/api/posts/{}", uuid::Uuid::new_v4());

    let requests = [
        ("POST", "/api/register", None, Some(credentials.clone())),
        ("POST", "/api/login", None, Some(credentials)),
        ("GET", "/api/posts", None, None),
        (
            "POST",
            "/api/posts",
            Some(token.as_str()),
            Some(json!({ "title": "t", "content": "c" })),
        ),
        ("DELETE", missing.as_str(), Some(token.as_str()), None),
        ("GET", "/api/questions", None, None),
    ];

    for (method, uri, token, body) in requests {
        let response = ctx.send(method, uri, token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Storage operation failed" }),
            "{} {}",
            method,
            uri
        );
    }
}
