//! Template context management
//!
//! The context provides data that is available to templates during rendering.

use crate::functions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;

/// Context data available to templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    /// System information
    pub system: SystemInfo,

    /// Environment variables
    pub env: IndexMap<String, String>,

    /// Custom user-defined variables
    /// These are flattened so they can be accessed directly in templates
    /// e.g., {{ `my_var` }} instead of {{ `variables.my_var` }}
    #[serde(flatten)]
    pub variables: IndexMap<String, serde_json::Value>,
}

/// System information available to templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system (e.g., "linux", "darwin", "windows")
    pub os: String,

    /// Architecture (e.g., "`x86_64`", "aarch64")
    pub arch: String,

    /// Hostname
    pub hostname: String,

    /// Username
    pub username: String,

    /// Home directory path
    #[serde(rename = "homeDir")]
    pub home_dir: String,
}

impl SystemInfo {
    /// Detect system information
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: functions::os().to_string(),
            arch: functions::arch().to_string(),
            hostname: functions::hostname().to_string(),
            username: functions::username().to_string(),
            home_dir: functions::home_dir().to_string(),
        }
    }
}

impl TemplateContext {
    /// Create a new template context with system information
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: SystemInfo::detect(),
            env: env::vars().collect(),
            variables: IndexMap::new(),
        }
    }

    /// Create a context with custom variables (takes ownership)
    #[must_use]
    pub fn with_variables(mut self, variables: IndexMap<String, serde_json::Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Add a custom variable
    pub fn add_variable(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.variables.insert(key.into(), value);
    }

    /// Get an environment variable
    #[must_use]
    pub fn get_env(&self, key: &str) -> Option<&String> {
        self.env.get(key)
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_variables_are_flattened() {
        let mut ctx = TemplateContext::new();
        ctx.add_variable("editor", serde_json::json!("vim"));

        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["editor"], "vim");
        assert!(value.get("variables").is_none());
        assert!(value["system"]["os"].is_string());
    }

    #[test]
    fn test_with_variables_replaces() {
        let mut vars = IndexMap::new();
        vars.insert("a".to_string(), serde_json::json!(1));

        let ctx = TemplateContext::new().with_variables(vars);
        assert_eq!(ctx.variables.len(), 1);
        assert_eq!(ctx.variables["a"], 1);
    }

    #[test]
    fn test_env_collected() {
        let ctx = TemplateContext::new();
        if let Ok(path) = env::var("PATH") {
            assert_eq!(ctx.get_env("PATH"), Some(&path));
        }
    }
}
