//! Credential store: registration, login, account deletion.

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::AppError;
use crate::validation::validate_registration;

/// Translate a unique-constraint violation into the matching duplicate
/// error; everything else stays a database error.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_username_key") => return AppError::DuplicateUsername,
            Some("users_email_key") => return AppError::DuplicateEmail,
            _ => {}
        }
    }
    AppError::Database(e)
}

/// Register a new account and return the created user.
#[instrument(skip(db, password))]
pub async fn register(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    validate_registration(username, &email, password)?;

    let hash = hash_password(password)?;
    let user = User::create(db, username, &email, &hash)
        .await
        .map_err(map_unique_violation)?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Verify credentials and stamp `last_login`. An unknown username and a
/// wrong password both return `AppError::Auth`.
#[instrument(skip(db, password))]
pub async fn login(db: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
    let username = username.trim();

    let Some(user) = User::find_by_username(db, username).await? else {
        warn!("login with unknown username");
        return Err(AppError::Auth);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(AppError::Auth);
    }

    User::touch_last_login(db, user.id).await?;
    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(user)
}

/// Remove the account; owned shoes go with it via the cascade rule.
#[instrument(skip(db))]
pub async fn delete_account(db: &PgPool, user_id: i32) -> Result<(), AppError> {
    User::delete(db, user_id).await?;
    info!(user_id, "account deleted");
    Ok(())
}
