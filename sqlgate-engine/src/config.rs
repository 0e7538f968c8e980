//! Engine endpoint configuration.

use hyper::Uri;

use crate::EngineError;

/// Where and how to reach the query engine.
///
/// The gateway speaks plain HTTP to the engine; TLS termination between
/// the two is the hosting platform's concern.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Host the engine listens on.
    pub host: String,

    /// TCP port, defaulting to 80 when the URL names none.
    pub port: u16,

    /// Path prefix prepended to every API route, without a trailing slash.
    pub base_path: String,

    /// Bearer token presented to the engine, when it requires one.
    pub token: Option<String>,
}

impl EngineConfig {
    /// Parse an engine base URL such as `http://db.internal:8093/d1`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidUrl`] if the URL does not parse, has
    /// no host, or uses a scheme other than `http`.
    pub fn from_url(url: &str) -> Result<Self, EngineError> {
        let uri: Uri = url
            .parse()
            .map_err(|e| EngineError::InvalidUrl(format!("{url}: {e}")))?;

        match uri.scheme_str() {
            None | Some("http") => {}
            Some(other) => {
                return Err(EngineError::InvalidUrl(format!(
                    "{url}: unsupported scheme '{other}'"
                )));
            }
        }

        let host = uri
            .host()
            .ok_or_else(|| EngineError::InvalidUrl(format!("{url}: missing host")))?
            .to_owned();
        let port = uri.port_u16().unwrap_or(80);
        let base_path = uri.path().trim_end_matches('/').to_owned();

        Ok(Self {
            host,
            port,
            base_path,
            token: None,
        })
    }

    /// Attach a bearer token for the engine.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// `host:port` authority string used for connecting and the Host header.
    #[must_use]
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
