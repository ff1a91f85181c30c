//! Configuration schema definitions.
//!
//! This module provides type-safe configuration structures with defaults for
//! every field, validation, and environment overrides.

use serde::{Deserialize, Serialize};

use crate::gateway::{DEFAULT_TARGET_AGENT, DEFAULT_TASK_SOURCE};
use crate::payload::DEFAULT_INDENT;
use crate::sink::ConsoleStream;
use crate::truncate::{FIELD_LIMIT, OBJECT_LIMIT};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshlogConfig {
    /// Payload formatting and truncation.
    #[serde(default)]
    pub format: FormatConfig,

    /// Output sinks.
    #[serde(default)]
    pub sinks: SinkConfig,

    /// Task preparation defaults.
    #[serde(default)]
    pub task: TaskConfig,
}

/// Payload formatting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Spaces per nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Threshold for one entry of a payload breakdown.
    #[serde(default = "default_field_limit")]
    pub field_limit: usize,
    /// Threshold for a full-object dump.
    #[serde(default = "default_object_limit")]
    pub object_limit: usize,
}

const fn default_indent() -> usize {
    DEFAULT_INDENT
}

const fn default_field_limit() -> usize {
    FIELD_LIMIT
}

const fn default_object_limit() -> usize {
    OBJECT_LIMIT
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            field_limit: default_field_limit(),
            object_limit: default_object_limit(),
        }
    }
}

/// Output sink configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Emit lines as `tracing` events.
    #[serde(default = "default_true")]
    pub tracing: bool,
    /// Write lines directly to the console.
    #[serde(default = "default_true")]
    pub console: bool,
    /// Console stream used when `console` is enabled.
    #[serde(default)]
    pub console_stream: ConsoleStream,
}

const fn default_true() -> bool {
    true
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            tracing: true,
            console: true,
            console_stream: ConsoleStream::default(),
        }
    }
}

/// Task preparation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Agent that receives prepared tasks.
    #[serde(default = "default_target_agent")]
    pub target_agent: String,
    /// Value recorded as the `source` metadata of prepared tasks.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_target_agent() -> String {
    DEFAULT_TARGET_AGENT.to_owned()
}

fn default_source() -> String {
    DEFAULT_TASK_SOURCE.to_owned()
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            target_agent: default_target_agent(),
            source: default_source(),
        }
    }
}

impl MeshlogConfig {
    /// Validate the configuration and return any issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.format.field_limit == 0 {
            issues.push(ConfigIssue::error(
                "format.field_limit",
                "Field limit must be at least 1",
            ));
        }

        if self.format.object_limit == 0 {
            issues.push(ConfigIssue::error(
                "format.object_limit",
                "Object limit must be at least 1",
            ));
        }

        if self.format.indent > 16 {
            issues.push(ConfigIssue::warning(
                "format.indent",
                "Indent above 16 spaces makes nested payloads hard to read",
            ));
        }

        if !self.sinks.tracing && !self.sinks.console {
            issues.push(ConfigIssue::warning(
                "sinks",
                "Both sinks are disabled, nothing will be logged",
            ));
        }

        if self.task.target_agent.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "task.target_agent",
                "Target agent must not be empty",
            ));
        }

        issues
    }

    /// Check if the configuration is valid (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|issue| issue.level != IssueLevel::Error)
    }

    /// Merge environment variables into the configuration.
    ///
    /// - `MESHLOG_TARGET_AGENT` replaces the target agent
    /// - `MESHLOG_CONSOLE` (`0`/`false`/`off` or `1`/`true`/`on`) toggles console output
    /// - `MESHLOG_INDENT` sets the indent when it parses as a number
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(agent) = var("MESHLOG_TARGET_AGENT").filter(|a| !a.trim().is_empty()) {
            self.task.target_agent = agent;
        }

        if let Some(console) = var("MESHLOG_CONSOLE").as_deref().and_then(parse_flag) {
            self.sinks.console = console;
        }

        if let Some(indent) = var("MESHLOG_INDENT").and_then(|v| v.trim().parse().ok()) {
            self.format.indent = indent;
        }

        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Issue severity level.
    pub level: IssueLevel,
    /// Configuration path (e.g., "format.field_limit").
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            IssueLevel::Error => "ERROR",
            IssueLevel::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", prefix, self.path, self.message)
    }
}

/// Severity level for configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// Error that prevents the adapter from running correctly.
    Error,
    /// Warning about potential issues.
    Warning,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = MeshlogConfig::default();
        assert_eq!(config.format.indent, 2);
        assert_eq!(config.format.field_limit, 500);
        assert_eq!(config.format.object_limit, 2000);
        assert!(config.sinks.tracing);
        assert!(config.sinks.console);
        assert_eq!(config.task.target_agent, "OrchestratorAgent");
        assert_eq!(config.task.source, "logging_webhook_adapter");
    }

    #[test]
    fn test_config_serialization() {
        let config = MeshlogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MeshlogConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_sample_config() {
        let toml_str = r#"
[format]
indent = 4
object_limit = 4000

[sinks]
console_stream = "stderr"

[task]
target_agent = "TriageAgent"
"#;

        let config: MeshlogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.format.indent, 4);
        assert_eq!(config.format.field_limit, 500);
        assert_eq!(config.format.object_limit, 4000);
        assert_eq!(config.sinks.console_stream, ConsoleStream::Stderr);
        assert!(config.sinks.console);
        assert_eq!(config.task.target_agent, "TriageAgent");
        assert_eq!(config.task.source, "logging_webhook_adapter");
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let result = toml::from_str::<MeshlogConfig>("[metrics]\nenabled = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let config = MeshlogConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "Default config should have no issues");
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_zero_limits() {
        let mut config = MeshlogConfig::default();
        config.format.field_limit = 0;
        config.format.object_limit = 0;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_validation_all_sinks_disabled() {
        let mut config = MeshlogConfig::default();
        config.sinks.tracing = false;
        config.sinks.console = false;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_empty_target_agent() {
        let mut config = MeshlogConfig::default();
        config.task.target_agent = "  ".into();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_issue_display() {
        let issue = ConfigIssue::warning("format.indent", "too wide");
        assert_eq!(issue.to_string(), "[WARN] format.indent: too wide");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MESHLOG_TARGET_AGENT", "EnvAgent"),
            ("MESHLOG_CONSOLE", "off"),
            ("MESHLOG_INDENT", "3"),
        ]
        .into_iter()
        .collect();

        let config = MeshlogConfig::default().with_vars(|k| vars.get(k).map(|v| (*v).to_owned()));

        assert_eq!(config.task.target_agent, "EnvAgent");
        assert!(!config.sinks.console);
        assert_eq!(config.format.indent, 3);
    }

    #[test]
    fn test_env_ignores_garbage() {
        let config = MeshlogConfig::default().with_vars(|k| match k {
            "MESHLOG_CONSOLE" => Some("maybe".to_owned()),
            "MESHLOG_INDENT" => Some("wide".to_owned()),
            "MESHLOG_TARGET_AGENT" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config, MeshlogConfig::default());
    }
}
