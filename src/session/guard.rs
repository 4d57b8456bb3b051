//! Session guard
//!
//! Gates authenticated commands on a live token. Mounting the guard
//! ([`SessionGuard::check_and_enforce`]) validates the stored token: an
//! absent, malformed, or expired token is evicted from storage and the
//! navigator is pointed at the sign-in route. A live token arms a one-shot
//! timer that performs the same eviction the moment the token's `exp`
//! arrives, so a long-lived session logs itself out.
//!
//! Per mounted guard the states are
//! `Unchecked -> ValidArmed -> ExpiredRedirected`, with a re-check from
//! `ValidArmed` cancelling the pending timer and re-arming. Dropping the
//! guard aborts any pending timer, so an eviction never fires for a command
//! that has already finished.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use super::claims;
use super::store::TokenStore;
use crate::error::Result;

/// Route presented to the navigator when a session ends
pub const SIGN_IN_ROUTE: &str = "/signin";

/// Navigation boundary invoked on eviction
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Guard lifecycle state for one mounted check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No check performed yet
    Unchecked,
    /// Token was live at the last check; an expiry timer is armed
    ValidArmed,
    /// Token was rejected; the credential is evicted and navigation issued
    ExpiredRedirected,
}

/// One-shot expiry timer. Aborting on drop is the cancellation contract:
/// the timer cannot outlive the guard that armed it.
struct ExpiryTimer {
    handle: JoinHandle<()>,
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Gate for authenticated commands
pub struct SessionGuard {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: GuardState,
    timer: Option<ExpiryTimer>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            state: GuardState::Unchecked,
            timer: None,
        }
    }

    /// State after the most recent check
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Validate the stored token and enforce the outcome.
    ///
    /// An absent token, a token that fails to decode, and a token whose
    /// `exp` is at or before the current time are treated identically:
    /// the slot is cleared and the navigator is sent to the sign-in route.
    /// A live token arms the auto-logout timer instead. Calling this again
    /// cancels any previously armed timer before re-checking.
    pub fn check_and_enforce(&mut self) -> Result<()> {
        // A re-check is a remount; a stale timer must not outlive it.
        self.timer = None;

        let token = self.store.get()?;
        let expires_at = token
            .as_deref()
            .filter(|t| !t.is_empty())
            .and_then(|t| claims::decode(t).ok())
            .and_then(|c| c.expires_at().ok());

        let now = Utc::now();
        match expires_at {
            // Validity requires exp strictly greater than now; equality is expired.
            Some(exp) if exp.timestamp() > now.timestamp() => {
                let timeout_ms = (exp.timestamp_millis() - now.timestamp_millis()).max(0) as u64;
                log::debug!("session live, auto-logout in {}ms", timeout_ms);
                self.arm(timeout_ms);
                self.state = GuardState::ValidArmed;
            }
            _ => {
                log::debug!("session token absent, malformed, or expired; evicting");
                self.evict()?;
                self.state = GuardState::ExpiredRedirected;
            }
        }

        Ok(())
    }

    fn arm(&mut self, timeout_ms: u64) {
        let store = Arc::clone(&self.store);
        let navigator = Arc::clone(&self.navigator);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
            if let Err(err) = store.remove() {
                log::warn!("failed to evict token at expiry: {err}");
            }
            navigator.navigate(SIGN_IN_ROUTE);
        });

        self.timer = Some(ExpiryTimer { handle });
    }

    fn evict(&self) -> Result<()> {
        self.store.remove()?;
        self.navigator.navigate(SIGN_IN_ROUTE);
        Ok(())
    }

    #[cfg(test)]
    fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }
}

/// End the session unconditionally: evict the token, then navigate to the
/// sign-in route. Idempotent; removing an absent token is a no-op.
pub fn logout(store: &dyn TokenStore, navigator: &dyn Navigator) -> Result<()> {
    store.remove()?;
    navigator.navigate(SIGN_IN_ROUTE);
    Ok(())
}

/// Whether a token fails the liveness check.
///
/// True for an absent or empty token, a token that does not decode, and a
/// decoded `exp` at or before the current time.
pub fn is_expired(token: Option<&str>) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

fn is_expired_at(token: Option<&str>, now_secs: i64) -> bool {
    let Some(token) = token else {
        return true;
    };
    if token.is_empty() {
        return true;
    }

    match claims::decode(token) {
        Ok(claims) => claims.exp <= now_secs,
        Err(_) => true,
    }
}
