//! Users and bearer sessions.
//!
//! Registration creates a user and hands back an opaque bearer token. Only
//! the SHA-256 digest of the token is stored, so a leaked database does not
//! yield usable credentials.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::models::{from_millis, now_millis, User};
use crate::storage::{Storage, StorageError, UserRow};
use crate::validation::{validate_register, RegisterInput};

pub const TOKEN_BYTES: usize = 32;

/// Avatar URL for an email address, served by Gravatar.
pub fn gravatar_url(email: &str) -> String {
    let digest = md5::compute(email.trim().to_lowercase().as_bytes());
    format!("//www.gravatar.com/avatar/{digest:x}?s=200&r=pg&d=mm")
}

pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        avatar: row.avatar,
        date: from_millis(row.created_at),
    }
}

/// Create a user and a session for it. Returns the user and its token.
pub fn register(storage: &Storage, input: &RegisterInput) -> Result<(User, String), CoreError> {
    let valid = validate_register(input)?;

    let row = UserRow {
        id: uuid::Uuid::new_v4().to_string(),
        avatar: gravatar_url(&valid.email),
        name: valid.name,
        email: valid.email,
        created_at: now_millis(),
    };
    match storage.insert_user(&row) {
        Ok(()) => {}
        Err(StorageError::AlreadyExists(_)) => {
            return Err(CoreError::conflict("email", "Email already exists"));
        }
        Err(e) => return Err(e.into()),
    }

    let token = generate_token();
    storage.insert_session(&token_digest(&token), &row.id, row.created_at)?;

    Ok((user_from_row(row), token))
}

/// Resolve a bearer token to a user ID.
pub fn resolve_token(storage: &Storage, token: &str) -> Result<Option<String>, CoreError> {
    Ok(storage.get_session_user(&token_digest(token))?)
}

pub fn get_user(storage: &Storage, user_id: &str) -> Result<User, CoreError> {
    storage
        .get_user(user_id)?
        .map(user_from_row)
        .ok_or_else(|| CoreError::not_found("nouser", "User not found"))
}

/// Delete the caller's account: user, sessions and profile. Posts remain.
pub fn delete_account(storage: &Storage, user_id: &str) -> Result<(), CoreError> {
    if storage.delete_user(user_id)? {
        Ok(())
    } else {
        Err(CoreError::not_found("nouser", "User not found"))
    }
}
