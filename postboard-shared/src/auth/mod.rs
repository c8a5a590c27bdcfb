/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: bearer token issuance and verification
/// - [`middleware`]: Axum guard that turns a bearer token into an [`middleware::AuthContext`]
/// - [`credentials`]: registration and login flows
///
/// # Example
///
/// ```no_run
/// use postboard_shared::auth::{credentials, jwt::TokenService};
/// use postboard_shared::store::Stores;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stores = Stores::in_memory();
/// let tokens = TokenService::new("your-secret-key-at-least-32-bytes");
///
/// credentials::register(stores.users.as_ref(), "user@example.com", "pw").await?;
/// let token = credentials::login(stores.users.as_ref(), &tokens, "user@example.com", "pw").await?;
/// assert_eq!(tokens.verify(&token)?.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;
