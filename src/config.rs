use crate::dockerfile::{GeneratorOptions, DEFAULT_FALLBACK_PORT, DEFAULT_WORKDIR};
use crate::source::DEFAULT_BRANCH;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Process-level settings, read from `NOKUBE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NokubeConfig {
    pub log_level: String,
    pub default_workdir: String,
    pub fallback_port: u16,
    pub default_branch: String,
}

impl Default for NokubeConfig {
    fn default() -> Self {
        let log_level = env::var("NOKUBE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let default_workdir =
            env::var("NOKUBE_DEFAULT_WORKDIR").unwrap_or_else(|_| DEFAULT_WORKDIR.to_string());

        let fallback_port = env::var("NOKUBE_FALLBACK_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_FALLBACK_PORT);

        let default_branch =
            env::var("NOKUBE_DEFAULT_BRANCH").unwrap_or_else(|_| DEFAULT_BRANCH.to_string());

        Self {
            log_level,
            default_workdir,
            fallback_port,
            default_branch,
        }
    }
}

impl NokubeConfig {
    /// Strict variant of [`Default`]: unparseable values are errors instead of defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default();
        if let Ok(raw) = env::var("NOKUBE_FALLBACK_PORT") {
            raw.parse::<u16>().map_err(|e| ConfigError::ParseError {
                field: "NOKUBE_FALLBACK_PORT".to_string(),
                error: e.to_string(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if !self.default_workdir.starts_with('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "Default working directory must be absolute: {}",
                self.default_workdir
            )));
        }

        if self.fallback_port == 0 {
            return Err(ConfigError::ValidationFailed(
                "Fallback port must be between 1 and 65535".to_string(),
            ));
        }

        if self.default_branch.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Default branch cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            default_workdir: self.default_workdir.clone(),
            fallback_port: self.fallback_port,
        }
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("default_workdir".to_string(), self.default_workdir.clone());
        map.insert("fallback_port".to_string(), self.fallback_port.to_string());
        map.insert("default_branch".to_string(), self.default_branch.clone());
        map
    }
}

impl fmt::Display for NokubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nokube Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Default Working Directory: {}", self.default_workdir)?;
        writeln!(f, "  Fallback Port: {}", self.fallback_port)?;
        writeln!(f, "  Default Branch: {}", self.default_branch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid() -> NokubeConfig {
        NokubeConfig {
            log_level: "info".to_string(),
            default_workdir: "/app".to_string(),
            fallback_port: 3000,
            default_branch: "main".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("NOKUBE_LOG_LEVEL"),
            EnvGuard::unset("NOKUBE_DEFAULT_WORKDIR"),
            EnvGuard::unset("NOKUBE_FALLBACK_PORT"),
            EnvGuard::unset("NOKUBE_DEFAULT_BRANCH"),
        ];

        let config = NokubeConfig::default();
        assert_eq!(config, valid());
        assert!(config.validate().is_ok());
        assert_eq!(config.generator_options(), GeneratorOptions::default());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("NOKUBE_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("NOKUBE_DEFAULT_WORKDIR", "/srv"),
            EnvGuard::set("NOKUBE_FALLBACK_PORT", "8080"),
            EnvGuard::set("NOKUBE_DEFAULT_BRANCH", "trunk"),
        ];

        let config = NokubeConfig::default();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_workdir, "/srv");
        assert_eq!(config.fallback_port, 8080);
        assert_eq!(config.default_branch, "trunk");
        assert_eq!(config.generator_options().fallback_port, 8080);
    }

    #[test]
    #[serial]
    fn test_unparseable_port() {
        let _guard = EnvGuard::set("NOKUBE_FALLBACK_PORT", "seventy");

        assert_eq!(NokubeConfig::default().fallback_port, DEFAULT_FALLBACK_PORT);
        assert!(matches!(
            NokubeConfig::from_env(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_validation_rules() {
        assert!(valid().validate().is_ok());

        let config = NokubeConfig {
            log_level: "loud".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = NokubeConfig {
            default_workdir: "app".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = NokubeConfig {
            fallback_port: 0,
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = NokubeConfig {
            default_branch: " ".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display() {
        let text = valid().to_string();
        assert!(text.contains("Fallback Port: 3000"));
        assert!(text.contains("Default Branch: main"));
        assert_eq!(valid().to_display_map().len(), 4);
    }
}
