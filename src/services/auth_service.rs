use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    models::AdminUser,
    response::{ApiResponse, Meta},
};

pub const ADMIN_ROLE: &str = "admin";

const TOKEN_TTL_HOURS: i64 = 24;

pub async fn login_admin(
    pool: &DbPool,
    jwt_secret: &str,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user: Option<AdminUser> =
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
            .bind(email.trim().to_lowercase())
            .fetch_optional(pool)
            .await?;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::info!(email = %email, "admin login rejected");
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::info!(email = %email, "admin login rejected");
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let token = issue_token(jwt_secret, user.id, ADMIN_ROLE)?;
    tracing::info!(user_id = %user.id, "admin logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(secret: &str, user_id: Uuid, role: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_token(secret: &str, token: &str) -> AppResult<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;
    Ok(decoded.claims)
}
