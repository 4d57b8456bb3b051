//! Session lifetime management
//!
//! A stored bearer token is trusted only while its `exp` claim is strictly
//! in the future. The guard validates the token whenever an authenticated
//! command starts, evicts a dead credential, and schedules auto-logout for
//! a live one.

pub mod claims;
pub mod guard;
pub mod store;

pub use claims::{Claims, DecodeError};
pub use guard::{GuardState, Navigator, SIGN_IN_ROUTE, SessionGuard, is_expired, logout};
pub use store::{FileTokenStore, TOKEN_KEY, TokenStore};
