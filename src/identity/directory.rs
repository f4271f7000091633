use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::credentials;
use crate::error::{AppError, AppResult};
use crate::records::{gen_id, now_ms, AuthInput, RegisterInput, User};
use crate::storage::SharedStore;
use crate::tprintln;

use super::Principal;

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

fn find_by_email(store: &SharedStore, email: &str) -> Option<User> {
    store
        .users
        .find_where(|u| u.email.eq_ignore_ascii_case(email))
        .into_iter()
        .next()
}

/// Register a new user. The email must not already be taken. Returns a
/// confirmation message, not the record; the caller authenticates separately.
/// Hashing and persistence failures propagate to the caller instead of being
/// logged and dropped.
pub fn register(store: &SharedStore, input: &RegisterInput) -> AppResult<String> {
    input.validate()?;

    if find_by_email(store, &input.email).is_some() {
        return Err(AppError::duplicate("duplicate_email", "El usuario ya está registrado"));
    }

    let password_hash = credentials::hash_password(&input.password)?;
    let user = User {
        id: gen_id(),
        name: input.name.clone(),
        email: input.email.clone(),
        password_hash,
        created_at: now_ms(),
    };
    store.users.insert(&user.id.clone(), user)?;
    info!(target: "tasklane::identity", "user registered email={}", input.email);
    Ok("Usuario creado correctamente".to_string())
}

/// Verify credentials and issue a signed token binding the user's id and
/// email. Unknown email and bad password are distinct failures.
pub fn authenticate(store: &SharedStore, config: &Config, input: &AuthInput) -> AppResult<TokenResponse> {
    input.validate()?;

    let Some(user) = find_by_email(store, &input.email) else {
        return Err(AppError::not_found("unknown_user", "El usuario no existe"));
    };
    if !credentials::verify_password(&user.password_hash, &input.password) {
        return Err(AppError::auth("bad_password", "Password Incorrecto"));
    }

    let token = credentials::issue_token(&user.id, &user.email, &config.token_secret, config.token_ttl_secs)?;
    tprintln!("auth.login user={} email={}", user.id, user.email);
    Ok(TokenResponse { token })
}

/// Resolve a bearer token to a principal. None means the token is absent in
/// the directory sense: malformed, badly signed or expired.
pub fn principal_for_token(config: &Config, token: &str) -> Option<Principal> {
    let claims = credentials::verify_token(token, &config.token_secret)?;
    Some(Principal { user_id: claims.sub, email: claims.email })
}
