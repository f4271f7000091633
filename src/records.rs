//! Record types persisted by the store, plus the request payloads and their
//! validation.
//!
//! Every record has a fixed shape; input payloads are validated against the
//! required fields before anything is written.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Epoch milliseconds for record timestamps.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn gen_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A registered user. Immutable after registration; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique across users, matched case-insensitively.
    pub email: String,
    /// Argon2 PHC string; never returned to callers.
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// User id of the creator, stamped at creation, never reassigned.
    pub creator: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Project id this task belongs to. A reference, not ownership: the
    /// project's existence is not verified at creation.
    pub project: String,
    /// Completion flag. Done / not done, nothing in between.
    pub state: bool,
    pub creator: String,
    pub created_at: i64,
}

// --- Request payloads ---

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub name: String,
    pub project: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskUpdateInput {
    pub name: String,
    pub project: String,
    pub state: bool,
}

fn looks_like_email(s: &str) -> bool {
    let Some(at) = s.find('@') else { return false; };
    let (local, domain) = s.split_at(at);
    !local.is_empty() && domain.len() > 1 && domain[1..].contains('.')
}

fn require_nonempty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation("missing_field".into(), format!("El campo {} es obligatorio", field)));
    }
    Ok(())
}

impl RegisterInput {
    pub fn validate(&self) -> AppResult<()> {
        require_nonempty("nombre", &self.name)?;
        require_nonempty("email", &self.email)?;
        require_nonempty("password", &self.password)?;
        if !looks_like_email(&self.email) {
            return Err(AppError::validation("invalid_email", "El email no es válido"));
        }
        Ok(())
    }
}

impl AuthInput {
    pub fn validate(&self) -> AppResult<()> {
        require_nonempty("email", &self.email)?;
        require_nonempty("password", &self.password)
    }
}

impl ProjectInput {
    pub fn validate(&self) -> AppResult<()> {
        require_nonempty("nombre", &self.name)
    }
}

impl TaskInput {
    pub fn validate(&self) -> AppResult<()> {
        require_nonempty("nombre", &self.name)?;
        require_nonempty("proyecto", &self.project)
    }
}

impl TaskUpdateInput {
    pub fn validate(&self) -> AppResult<()> {
        require_nonempty("nombre", &self.name)?;
        require_nonempty("proyecto", &self.project)
    }
}
