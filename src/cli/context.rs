//! Command execution context
//!
//! Provides a unified context for authenticated command execution: config
//! loading, session-guard mounting, and client initialization. The context
//! owns the mounted guard, so the auto-logout timer armed for a live token
//! stays alive exactly as long as the command runs and is cancelled when
//! the context drops.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::FinanceClient;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::{
    FileTokenStore, GuardState, Navigator, SIGN_IN_ROUTE, SessionGuard, TOKEN_KEY, TokenStore,
};

/// CLI navigation boundary. A redirect to the sign-in route becomes a hint
/// pointing at the `signin` command.
pub struct SignInHint;

impl Navigator for SignInHint {
    fn navigate(&self, path: &str) {
        log::debug!("navigate: {}", path);
        if path == SIGN_IN_ROUTE {
            eprintln!("{}", "Run `finop signin` to start a new session.".yellow());
        }
    }
}

/// Token slot location. The slot lives next to the config file, so a
/// `--config` override also isolates the session (used by tests).
pub fn token_store(opts: &GlobalOptions) -> Result<FileTokenStore> {
    match opts.config_ref() {
        Some(path) => {
            let config_path = Config::resolve_path(Some(path))?;
            let dir = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok(FileTokenStore::at(dir.join(TOKEN_KEY)))
        }
        None => FileTokenStore::new(),
    }
}

/// Context for authenticated command execution
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// API client carrying the session token
    pub client: Arc<FinanceClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Mounted session guard; holds the armed auto-logout timer
    _guard: SessionGuard,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Mounts the session guard before anything touches the network: an
    /// absent, malformed, or expired token is evicted here and the command
    /// aborts with the sign-in error.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;

        let store: Arc<dyn TokenStore> = Arc::new(token_store(opts)?);
        let mut guard = SessionGuard::new(Arc::clone(&store), Arc::new(SignInHint));
        guard.check_and_enforce()?;

        if guard.state() == GuardState::ExpiredRedirected {
            return Err(ApiError::Unauthorized.into());
        }

        let token = store.get()?.ok_or(ApiError::Unauthorized)?;

        let mut client = FinanceClient::new(config.resolve_api_host(opts.api_host_ref()))?;
        client.set_token(token);

        Ok(Self {
            format: opts.resolve_format(&config),
            config,
            client: Arc::new(client),
            _guard: guard,
        })
    }
}
