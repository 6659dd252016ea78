//! Connection configuration.
//!
//! The client itself only accepts resolved parameters; reading the
//! environment happens here, at the boundary.

use std::env;

use url::Url;

use crate::error::{Result, TeamCityError};

/// Environment variable holding the default server address.
pub const ADDRESS_ENV_VAR: &str = "TEAMCITY_ADDR";

/// Credentials and server address for a TeamCity connection.
///
/// Immutable once built. The address is checked for emptiness and parsed as
/// an absolute `http`/`https` URL; nothing is contacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    username: String,
    password: String,
    address: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("username", &self.username)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl ConnectionConfig {
    /// Create a configuration with an explicit server address.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Configuration`] if `address` is empty, is not an
    /// absolute `http`/`https` URL, or carries a query or fragment.
    pub fn new(username: &str, password: &str, address: &str) -> Result<Self> {
        let address = address.trim().trim_end_matches('/');
        if address.is_empty() {
            return Err(TeamCityError::Configuration(
                "address is required".to_string(),
            ));
        }

        let url = Url::parse(address).map_err(|e| {
            TeamCityError::Configuration(format!("invalid server address '{address}': {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(TeamCityError::Configuration(format!(
                "invalid server address '{address}': expected an http:// or https:// URL"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(TeamCityError::Configuration(format!(
                "invalid server address '{address}': query and fragment are not allowed"
            )));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            address: address.to_string(),
        })
    }

    /// Create a configuration whose address comes from `TEAMCITY_ADDR`.
    ///
    /// # Errors
    ///
    /// Returns [`TeamCityError::Configuration`] if the variable is unset or empty.
    pub fn from_env(username: &str, password: &str) -> Result<Self> {
        Self::from_lookup(username, password, |key| env::var(key).ok())
    }

    /// Like [`ConnectionConfig::from_env`], with a caller-supplied variable lookup.
    pub fn from_lookup<F>(username: &str, password: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ADDRESS_ENV_VAR).filter(|a| !a.trim().is_empty()) {
            Some(address) => Self::new(username, password, &address),
            None => Err(TeamCityError::Configuration(format!(
                "{ADDRESS_ENV_VAR} environment variable not set, set the variable or pass the address explicitly"
            ))),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Server address without a trailing slash.
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_rejected() {
        let err = ConnectionConfig::new("admin", "secret", "").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));

        let err = ConnectionConfig::new("admin", "secret", "   ").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));
    }

    #[test]
    fn test_relative_address_rejected() {
        let err = ConnectionConfig::new("admin", "secret", "teamcity.local").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));
    }

    #[test]
    fn test_scheme_less_host_port_rejected() {
        // Parses as scheme "localhost", which cannot carry the REST path.
        let err = ConnectionConfig::new("admin", "secret", "localhost:8111").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));

        let err = ConnectionConfig::new("admin", "secret", "ftp://tc.local").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));
    }

    #[test]
    fn test_query_and_fragment_rejected() {
        let err = ConnectionConfig::new("admin", "secret", "http://tc.local?x=1").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));

        let err = ConnectionConfig::new("admin", "secret", "http://tc.local#top").unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));
    }

    #[test]
    fn test_https_with_context_path_accepted() {
        let config =
            ConnectionConfig::new("admin", "secret", "https://ci.example.com/teamcity/").unwrap();
        assert_eq!(config.address(), "https://ci.example.com/teamcity");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ConnectionConfig::new("admin", "secret", "http://tc.local:8111/").unwrap();
        assert_eq!(config.address(), "http://tc.local:8111");
    }

    #[test]
    fn test_lookup_missing_variable() {
        let err = ConnectionConfig::from_lookup("admin", "secret", |_| None).unwrap_err();
        match err {
            TeamCityError::Configuration(msg) => assert!(msg.contains(ADDRESS_ENV_VAR)),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_empty_variable() {
        let err =
            ConnectionConfig::from_lookup("admin", "secret", |_| Some(String::new())).unwrap_err();
        assert!(matches!(err, TeamCityError::Configuration(_)));
    }

    #[test]
    fn test_lookup_reads_address_variable() {
        let config = ConnectionConfig::from_lookup("admin", "secret", |key| {
            (key == ADDRESS_ENV_VAR).then(|| "http://tc.local:8111".to_string())
        })
        .unwrap();
        assert_eq!(config.address(), "http://tc.local:8111");
        assert_eq!(config.username(), "admin");
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ConnectionConfig::new("admin", "hunter2", "http://tc.local").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
