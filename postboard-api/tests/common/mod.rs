//! Common test utilities for integration tests
//!
//! Builds the full router over the in-memory store and drives it in-process.
//! [`FailingStore`] stands in for an unreachable database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use postboard_api::app::{build_router, AppState};
use postboard_api::config::Config;
use postboard_shared::auth::jwt::TokenService;
use postboard_shared::models::{Resource, User};
use postboard_shared::store::{Backend, ResourceStore, StoreError, Stores, UserStore};
use std::sync::Arc;
use uuid::Uuid;
use serde_json::Value;
use tower::Service as _;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing the router and a token service sharing its secret
pub struct TestContext {
    pub app: axum::Router,
    pub tokens: TokenService,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_stores(Stores::in_memory())
    }

    /// Builds the router over every store failing
    pub fn failing() -> Self {
        let store = Arc::new(FailingStore);
        Self::with_stores(Stores {
            users: store.clone(),
            posts: store.clone(),
            questions: store,
            backend: Backend::Memory,
        })
    }

    pub fn with_stores(stores: Stores) -> Self {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        })
        .expect("test config should load");

        let state = AppState::new(stores, config);

        Self {
            app: build_router(state),
            tokens: TokenService::new(TEST_SECRET),
        }
    }

    /// Sends a request with an optional bearer token and JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().call(request).await.unwrap()
    }

    /// Registers `email` and returns a token obtained through the login endpoint
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        let credentials = serde_json::json!({ "email": email, "password": password });

        let response = self
            .send("POST", "/api/register", None, Some(credentials.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self.send("POST", "/api/login", None, Some(credentials)).await;
        assert_eq!(response.status(), StatusCode::OK);

        body_json(response).await["token"]
            .as_str()
            .expect("login should return a token")
            .to_string()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Store whose every call fails as if the pool could not hand out a connection
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait::async_trait]
impl UserStore for FailingStore {
    async fn insert(&self, _user: &User) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(unavailable())
    }
}

#[async_trait::async_trait]
impl<R: Resource> ResourceStore<R> for FailingStore {
    async fn insert(&self, _resource: &R) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<R>, StoreError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(unavailable())
    }
}
