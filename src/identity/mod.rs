//! Identity management: principals, the per-request context, and the
//! directory of registered users.
//! Keep the public surface thin and split implementation across sub-modules.

mod directory;
mod principal;
mod request_context;

pub use directory::{authenticate, principal_for_token, register, TokenResponse};
pub use principal::Principal;
pub use request_context::RequestContext;
