//! Server information service.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::Service;

/// Timestamp format used by TeamCity, e.g. `20261018T120000+0000`.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%z";

/// Path of the server resource, relative to the REST root.
pub(crate) const SERVER_PATH: &str = "server";

scoped_service! {
    /// The `server` resource: version and runtime details.
    ServerService
}

impl ServerService {
    /// Fetch the server description.
    #[tracing::instrument(skip(self))]
    pub async fn info(&self) -> Result<ServerInfo> {
        self.get_json(SERVER_PATH).await
    }
}

/// Server version and runtime details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Full version string, e.g. `2024.12 (build 174331)`.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub version_major: Option<u32>,

    #[serde(default)]
    pub version_minor: Option<u32>,

    #[serde(default)]
    pub build_number: Option<String>,

    /// Raw server clock, in TeamCity's timestamp format.
    #[serde(default)]
    pub current_time: Option<String>,

    /// Raw start time, in TeamCity's timestamp format.
    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub web_url: Option<String>,
}

impl ServerInfo {
    /// Server clock as a timestamp, if present and well formed.
    pub fn current_time_parsed(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.current_time.as_deref()?)
    }

    /// Start time as a timestamp, if present and well formed.
    pub fn start_time_parsed(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.start_time.as_deref()?)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_server_info_deserializes() {
        let info: ServerInfo = serde_json::from_value(serde_json::json!({
            "version": "2024.12 (build 174331)",
            "versionMajor": 2024,
            "versionMinor": 12,
            "buildNumber": "174331",
            "currentTime": "20261018T120512+0200",
            "startTime": "20261001T080000+0200",
            "webUrl": "http://tc.local:8111"
        }))
        .unwrap();

        assert_eq!(info.version_major, Some(2024));
        assert_eq!(info.build_number.as_deref(), Some("174331"));

        let now = info.current_time_parsed().unwrap();
        assert_eq!(now.year(), 2026);
        assert_eq!(now.hour(), 12);
        assert_eq!(now.offset().local_minus_utc(), 2 * 3600);
        assert!(info.start_time_parsed().unwrap() < now);
    }

    #[test]
    fn test_malformed_timestamp_is_none() {
        let info = ServerInfo {
            current_time: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(info.current_time_parsed().is_none());
        assert!(info.start_time_parsed().is_none());
    }
}
