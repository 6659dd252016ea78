//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Property, ServerInfo};

/// Trait for human-readable key-value output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for ServerInfo {
    fn pretty_print(&self) -> String {
        let header = format!(
            "TeamCity {}",
            self.version.as_deref().unwrap_or("(unknown version)")
        );
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref build) = self.build_number {
            lines.push(format!("Build:          {}", build));
        }

        if let Some(ref url) = self.web_url {
            lines.push(format!("Web URL:        {}", url));
        }

        if let Some(started) = self.start_time_parsed() {
            lines.push(format!("Started:        {}", started.format("%Y-%m-%d %H:%M:%S %z")));
        }

        if let Some(now) = self.current_time_parsed() {
            lines.push(format!("Server time:    {}", now.format("%Y-%m-%d %H:%M:%S %z")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Property {
    fn pretty_print(&self) -> String {
        let mut line = format!("{} = {}", self.name, self.value);
        if self.inherited {
            line.push_str("  (inherited)");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_pretty_print_format() {
        let info: ServerInfo = serde_json::from_value(serde_json::json!({
            "version": "2024.12 (build 174331)",
            "buildNumber": "174331",
            "currentTime": "20261018T120000+0000"
        }))
        .unwrap();

        let output = info.pretty_print();
        assert!(output.starts_with("TeamCity 2024.12"));
        assert!(output.contains("Build:          174331"));
        assert!(output.contains("Server time:    2026-10-18 12:00:00 +0000"));
        assert!(!output.contains("Started:"));
    }

    #[test]
    fn test_property_pretty_print_marks_inherited() {
        let prop = Property {
            name: "env.JAVA_HOME".to_string(),
            value: "/opt/jdk".to_string(),
            inherited: true,
        };
        assert_eq!(prop.pretty_print(), "env.JAVA_HOME = /opt/jdk  (inherited)");
    }
}
