//! Identity/session context.
//!
//! Identity is supplied by an external provider; this crate only carries
//! who the current user is and the token material the HTTP client attaches.
//! The context is constructor-injected into whatever needs it — there is no
//! ambient singleton to reach for.

pub mod context;
pub mod token;

pub use context::{CurrentUser, Role, SessionContext};
pub use token::{AnonymousTokenSource, AuthHeader, StaticTokenSource, TokenSource};
