//! Startup configuration: listen address, shared secret, engine binding.
//!
//! Everything here is read once in `main` and immutable afterwards; any
//! [`ConfigError`] is fatal before the gateway begins serving.

use std::fmt;
use std::net::SocketAddr;

use sqlgate_engine::{EngineConfig, EngineError};

/// Minimum length of the shared bearer secret, in characters.
///
/// 16 rejects trivially guessable tokens; deployments are expected to use
/// 32+ random bytes.
pub const MIN_SECRET_CHARS: usize = 16;

/// Default listen address when `SQLGATE_LISTEN_ADDR` is not set.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

/// Errors that make the gateway refuse to start.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `SQLGATE_SECRET` is not set.
    #[error("SQLGATE_SECRET is required")]
    MissingSecret,

    /// The shared secret is shorter than [`MIN_SECRET_CHARS`].
    #[error("shared secret is {len} characters, minimum is {min}")]
    SecretTooShort { len: usize, min: usize },

    /// `SQLGATE_ENGINE_URL` is not set.
    #[error("SQLGATE_ENGINE_URL is required")]
    MissingEngineUrl,

    /// The engine URL did not parse.
    #[error(transparent)]
    EngineUrl(#[from] EngineError),

    /// The listen address did not parse.
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidListenAddr { addr: String, reason: String },
}

/// The shared bearer secret query clients must present.
///
/// Construction enforces the minimum length; `Debug` never reveals the
/// value.
#[derive(Clone)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Validate and wrap a secret.
    ///
    /// # Errors
    /// Returns [`ConfigError::SecretTooShort`] below [`MIN_SECRET_CHARS`]
    /// characters.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        let len = secret.chars().count();
        if len < MIN_SECRET_CHARS {
            return Err(ConfigError::SecretTooShort {
                len,
                min: MIN_SECRET_CHARS,
            });
        }
        Ok(Self(secret))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Everything the gateway needs before it can serve.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,

    /// Shared bearer secret for the `/query/*` routes.
    pub secret: SharedSecret,

    /// Where to reach the query engine.
    pub engine: EngineConfig,
}

impl GatewayConfig {
    /// Read configuration from the environment.
    ///
    /// Variables: `SQLGATE_LISTEN_ADDR` (default [`DEFAULT_LISTEN_ADDR`]),
    /// `SQLGATE_SECRET` (required, at least [`MIN_SECRET_CHARS`] chars),
    /// `SQLGATE_ENGINE_URL` (required), `SQLGATE_ENGINE_TOKEN` (optional
    /// credential forwarded to the engine).
    ///
    /// # Errors
    /// Returns a [`ConfigError`] describing the first missing or invalid
    /// variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr_raw = std::env::var("SQLGATE_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = addr_raw
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidListenAddr {
                addr: addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let secret =
            SharedSecret::new(std::env::var("SQLGATE_SECRET").map_err(|_| ConfigError::MissingSecret)?)?;

        let engine_url =
            std::env::var("SQLGATE_ENGINE_URL").map_err(|_| ConfigError::MissingEngineUrl)?;
        let mut engine = EngineConfig::from_url(&engine_url)?;
        if let Ok(token) = std::env::var("SQLGATE_ENGINE_TOKEN") {
            engine = engine.with_token(token);
        }

        Ok(Self {
            listen_addr,
            secret,
            engine,
        })
    }
}
