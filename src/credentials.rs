//! Password hashing and bearer-token primitives.
//!
//! Passwords are stored as Argon2 PHC strings and only ever checked through
//! the verifier, never by re-deriving and comparing hash text. Tokens are
//! signed JWTs binding `{sub: user id, email}` with a fixed expiry.

use anyhow::{anyhow, Result};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use password_hash::{PasswordHash, SaltString};
use serde::{Deserialize, Serialize};

/// Claims carried by an issued token. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: u64,
}

pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!(e.to_string()))?;
    let argon2 = Argon2::default();
    let phc = argon2.hash_password(password.as_bytes(), &salt).map_err(|e| anyhow!(e.to_string()))?.to_string();
    Ok(phc)
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else { false }
}

/// Sign a token for the given user. Expiry is `now + ttl_secs`, fixed at
/// issuance; there is no refresh path.
pub fn issue_token(user_id: &str, email: &str, secret: &str, ttl_secs: u64) -> Result<String> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: now + ttl_secs,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| anyhow!("token signing failed: {}", e))?;
    Ok(token)
}

/// Decode and validate a token. Returns None for malformed, badly signed or
/// expired tokens; the caller decides how to reject.
pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();
    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Some(data.claims),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let phc = hash_password("hunter2").expect("hash");
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password(&phc, "hunter2"));
        assert!(!verify_password(&phc, "hunter3"));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("not-a-phc-string", "whatever"));
    }

    #[test]
    fn token_round_trip_carries_identity() {
        let tok = issue_token("u-1", "ana@x.com", "s3cret", 7200).expect("token");
        let claims = verify_token(&tok, "s3cret").expect("claims");
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "ana@x.com");
    }

    #[test]
    fn token_rejects_wrong_secret_and_garbage() {
        let tok = issue_token("u-1", "ana@x.com", "s3cret", 7200).expect("token");
        assert!(verify_token(&tok, "other-secret").is_none());
        assert!(verify_token("definitely.not.a.jwt", "s3cret").is_none());
    }
}
