use crate::error::{AppError, AppResult};

use super::Principal;

/// Per-request execution context. The principal is resolved once at the
/// transport boundary, before any operation runs.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub principal: Option<Principal>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn for_principal(principal: Principal) -> Self {
        Self { principal: Some(principal) }
    }

    /// Identity-requiring operations call this first; a missing principal is
    /// an authentication failure, never an ownership one.
    pub fn require_principal(&self) -> AppResult<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| AppError::auth("no_identity", "No autenticado"))
    }
}
