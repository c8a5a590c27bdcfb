/// Registration and login flows
///
/// Ties the [`UserStore`] to the password hasher and the token service.
/// Hashing and verification run on tokio's blocking pool so they never stall
/// the request executor.

use crate::models::User;
use crate::store::{StoreError, UserStore};

use super::jwt::{JwtError, TokenService};
use super::password::{self, PasswordError};

/// Error type for credential flows
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Email or password missing
    #[error("{0} is required")]
    Invalid(&'static str),

    /// Email already registered
    #[error("Email already registered")]
    Conflict,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Store(StoreError),

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => CredentialError::Conflict,
            other => CredentialError::Store(other),
        }
    }
}

impl From<tokio::task::JoinError> for CredentialError {
    fn from(err: tokio::task::JoinError) -> Self {
        CredentialError::Task(err.to_string())
    }
}

/// Registers a new user
///
/// # Errors
///
/// - `Invalid` if the email or password is empty
/// - `Conflict` if the email is already registered
/// - `Store` on persistence failure
pub async fn register(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, CredentialError> {
    if email.trim().is_empty() {
        return Err(CredentialError::Invalid("email"));
    }
    if password.is_empty() {
        return Err(CredentialError::Invalid("password"));
    }

    let plaintext = password.to_string();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;

    let user = User::new(email, hash);
    users.insert(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// Checks credentials and issues a bearer token
///
/// An unknown email and a wrong password both return `InvalidCredentials`.
/// For an unknown email the password is still checked against a dummy hash so
/// the two cases take comparable time.
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, CredentialError> {
    let user = users.find_by_email(email).await?;

    let stored_hash = user
        .as_ref()
        .map(|u| u.password_hash.clone())
        .unwrap_or_else(|| password::dummy_hash().to_string());
    let plaintext = password.to_string();
    let matches =
        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
            .await?;

    match user {
        Some(user) if matches => {
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(tokens.issue(&user.email)?)
        }
        _ => {
            tracing::debug!("Login rejected");
            Err(CredentialError::InvalidCredentials)
        }
    }
}
