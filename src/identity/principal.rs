use serde::{Deserialize, Serialize};

/// The resolved identity of the current caller, as decoded from a verified
/// bearer token. Ownership checks compare against `user_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
}
