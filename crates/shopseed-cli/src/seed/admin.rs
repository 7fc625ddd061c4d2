//! Singleton admin account bootstrap.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use shopseed_core::{image_url, AdminSettings, NewUser, ADMIN_ROLE};
use shopseed_db::{DbError, UserStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AdminError {
    #[error("failed to hash admin password: {0}")]
    Hash(String),
    #[error("admin avatar asset '{0}' is not of the form <directory>/<file>")]
    AvatarAsset(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdminOutcome {
    Created { id: i64 },
    AvatarBackfilled,
    AlreadyPresent,
}

/// Public URL of the configured default avatar.
pub(crate) fn default_avatar_url(base_url: &str, avatar_asset: &str) -> Result<String, AdminError> {
    match avatar_asset.split_once('/') {
        Some((dir, file)) if !dir.is_empty() && !file.is_empty() => {
            Ok(image_url(base_url, dir, file))
        }
        _ => Err(AdminError::AvatarAsset(avatar_asset.to_string())),
    }
}

/// Argon2id PHC string with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AdminError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AdminError::Hash(e.to_string()))
}

/// Ensure exactly one admin account exists for `settings.email`.
///
/// An existing account is only touched when it has no avatar, in which case
/// `profile_pic` alone is set.
///
/// # Errors
///
/// Returns [`AdminError`] if the avatar setting is malformed, hashing fails,
/// or the store rejects a read or write.
pub(crate) async fn bootstrap_admin<S: UserStore>(
    store: &S,
    settings: &AdminSettings,
    base_url: &str,
) -> Result<AdminOutcome, AdminError> {
    let avatar = default_avatar_url(base_url, &settings.avatar_asset)?;

    match store.find_user_by_email(&settings.email).await? {
        Some(user) if user.has_profile_pic() => {
            tracing::info!(email = %settings.email, "admin account already present");
            Ok(AdminOutcome::AlreadyPresent)
        }
        Some(_) => {
            store
                .set_user_profile_pic(&settings.email, &avatar)
                .await?;
            tracing::info!(email = %settings.email, avatar = %avatar, "backfilled admin avatar");
            Ok(AdminOutcome::AvatarBackfilled)
        }
        None => {
            let user = NewUser {
                name: settings.name.clone(),
                email: settings.email.clone(),
                password: hash_password(&settings.password)?,
                role: ADMIN_ROLE.to_string(),
                profile_pic: Some(avatar),
            };
            let id = store.insert_user(&user).await?;
            tracing::info!(email = %settings.email, id, "created admin account");
            Ok(AdminOutcome::Created { id })
        }
    }
}
