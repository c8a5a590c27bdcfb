/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use postboard_api::{app::{build_router, AppState}, config::Config};
/// use postboard_shared::store::Stores;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Stores::in_memory(), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use postboard_shared::{
    auth::{
        jwt::TokenService,
        middleware::{jwt_auth_middleware, AuthError},
    },
    models::{Post, Question},
    repository::Repository,
    store::Stores,
};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Built once at startup and cloned into each handler; every field is an
/// `Arc` or wraps one.
#[derive(Clone)]
pub struct AppState {
    /// Store handles (users, posts, questions)
    pub stores: Stores,

    /// Owner-scoped post repository
    pub posts: Repository<Post>,

    /// Owner-scoped question repository
    pub questions: Repository<Question>,

    /// Token issuer/verifier holding the signing secret
    pub tokens: Arc<TokenService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(stores: Stores, config: Config) -> Self {
        Self {
            posts: Repository::new(stores.posts.clone()),
            questions: Repository::new(stores.questions.clone()),
            tokens: Arc::new(TokenService::new(&config.jwt.secret)),
            stores,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// └── /api/
///     ├── POST   /register
///     ├── POST   /login
///     ├── GET    /posts
///     ├── POST   /posts             (bearer)
///     ├── DELETE /posts/:id         (bearer)
///     ├── GET    /questions
///     ├── POST   /questions         (bearer)
///     └── DELETE /questions/:id     (bearer)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let guard = || middleware::from_fn_with_state(state.clone(), jwt_auth_layer);

    let api_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/posts",
            get(routes::posts::list_posts)
                .merge(post(routes::posts::create_post).route_layer(guard())),
        )
        .route(
            "/posts/:id",
            delete(routes::posts::delete_post).route_layer(guard()),
        )
        .route(
            "/questions",
            get(routes::questions::list_questions)
                .merge(post(routes::questions::create_question).route_layer(guard())),
        )
        .route(
            "/questions/:id",
            delete(routes::questions::delete_question).route_layer(guard()),
        );

    let cors = if state.config.cors_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(Duration::from_secs(3600))
    };

    let request_timeout = Duration::from_secs(state.config.api.request_timeout_secs);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token guard for protected routes
async fn jwt_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.tokens.clone(), req, next).await
}
