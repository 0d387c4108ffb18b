//! Configuration loading from pulse.toml
//!
//! Benchmark binaries can keep run defaults in a `pulse.toml` at the
//! project root; the file is discovered by walking up from the current
//! directory. Command-line flags always override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pulsebench configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PulseConfig {
    /// Run defaults.
    #[serde(default)]
    pub run: RunConfig,
    /// Output defaults.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Run defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Randomize benchmark execution order.
    #[serde(default)]
    pub shuffle: bool,
    /// Pin the process to this CPU core before running.
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

/// Output defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default stdout sink format: "console", "json" or "junit".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "console".to_string()
}

impl PulseConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("pulse.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PulseConfig::default();
        assert!(!config.run.shuffle);
        assert_eq!(config.run.pin_cpu, None);
        assert_eq!(config.output.format, "console");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [run]
            shuffle = true
            pin_cpu = 2

            [output]
            format = "json"
        "#;

        let config: PulseConfig = toml::from_str(toml_str).unwrap();
        assert!(config.run.shuffle);
        assert_eq!(config.run.pin_cpu, Some(2));
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PulseConfig = toml::from_str("[run]\nshuffle = true\n").unwrap();
        assert!(config.run.shuffle);
        assert_eq!(config.output.format, "console");
    }
}
