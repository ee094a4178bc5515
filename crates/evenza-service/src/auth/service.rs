//! Authentication service.

use std::sync::Arc;

use evenza_auth::jwt::decoder::JwtDecoder;
use evenza_auth::jwt::encoder::{JwtEncoder, TokenPair};
use evenza_auth::password::hasher::PasswordHasher;
use evenza_core::error::AppError;
use evenza_core::result::AppResult;
use evenza_database::repositories::user::UserRepository;
use evenza_entity::user::model::CreateUser;
use evenza_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct SignupInput {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Requested role label; absent means attendee.
    pub role: Option<String>,
}

/// Handles account creation and credential verification.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: PasswordHasher,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Creates an account and returns the user with a fresh token pair.
    pub async fn signup(&self, input: SignupInput) -> AppResult<(User, TokenPair)> {
        if input.username.trim().is_empty() {
            return Err(AppError::validation("username is required"));
        }
        if input.password.is_empty() {
            return Err(AppError::validation("password is required"));
        }

        let role = match input.role.as_deref() {
            Some(label) => label.parse::<UserRole>()?,
            None => UserRole::Attendee,
        };

        let password_hash = self.hasher.hash_password(&input.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: input.username.trim().to_string(),
                email: input.email,
                password_hash,
                display_name: input.display_name,
                role,
            })
            .await?
            .ok_or_else(|| AppError::conflict("Username is already taken"))?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        Ok((user, tokens))
    }

    /// Verifies credentials and returns the user with a fresh token pair.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        let matches = self.hasher.verify_password(password, &user.password_hash)?;
        if !matches {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        Ok((user, tokens))
    }

    /// Exchanges a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;

        Ok((user, tokens))
    }

    /// Returns the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
