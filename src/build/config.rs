use crate::catalog::{LanguageId, TemplateCatalog};
use crate::dockerfile::{BuildFileGenerator, GeneratorOptions};
use crate::source::SourceConfig;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVar {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub secret: bool,
}

impl EnvironmentVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            secret: false,
        }
    }

    pub fn secret(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            secret: true,
            ..Self::new(key, value)
        }
    }
}

/// Per-service build settings: catalog defaults with user edits layered on top.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub language: LanguageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default)]
    pub build_commands: Vec<String>,
    #[serde(default)]
    pub run_command: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_port: Option<u16>,
    #[serde(default)]
    pub environment_vars: Vec<EnvironmentVar>,
}

impl BuildConfig {
    /// Blank, fully user-driven template for a language.
    pub fn empty(language: LanguageId) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Framework name, treating blank input as no framework.
    pub fn framework_name(&self) -> Option<&str> {
        self.framework
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn status(&self) -> ConfigStatus {
        if !self.language.is_empty()
            && !self.run_command.trim().is_empty()
            && !self.build_commands.is_empty()
        {
            ConfigStatus::Configured
        } else {
            ConfigStatus::Partial
        }
    }

    /// Shallow merge: every field present in the patch replaces the current value.
    pub fn apply(&mut self, patch: BuildConfigPatch) {
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(framework) = patch.framework {
            self.framework = framework.filter(|f| !f.trim().is_empty());
        }
        if let Some(build_commands) = patch.build_commands {
            self.build_commands = build_commands;
        }
        if let Some(run_command) = patch.run_command {
            self.run_command = run_command;
        }
        if let Some(dependencies) = patch.dependencies {
            self.dependencies = dependencies;
        }
        if let Some(working_directory) = patch.working_directory {
            self.working_directory = working_directory.filter(|w| !w.trim().is_empty());
        }
        if let Some(container_port) = patch.container_port {
            self.container_port = container_port;
        }
        if let Some(environment_vars) = patch.environment_vars {
            self.environment_vars = environment_vars;
        }
    }
}

/// Partial update for [`BuildConfig`].
///
/// Optional fields take `Some(None)` (or an explicit `null` on the wire) to clear
/// the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageId>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub framework: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_directory: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_port: Option<Option<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_vars: Option<Vec<EnvironmentVar>>,
}

impl BuildConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Distinguishes a missing key (`None`) from an explicit `null` (`Some(None)`).
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArg {
    pub key: String,
    pub value: String,
}

/// Derived container build settings. Never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    pub base_image: String,
    pub dockerfile: String,
    #[serde(default)]
    pub build_args: Vec<BuildArg>,
}

impl DockerConfig {
    pub fn derive(build_config: &BuildConfig, options: &GeneratorOptions) -> Self {
        let catalog = TemplateCatalog::global();
        Self {
            base_image: catalog.base_image_for(&build_config.language).to_string(),
            dockerfile: BuildFileGenerator::with_catalog(catalog, options.clone())
                .generate(build_config),
            build_args: Vec::new(),
        }
    }
}

/// Binds a service (by name) to its build settings and source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBuildConfig {
    pub service_name: String,
    pub build_config: BuildConfig,
    pub docker_config: DockerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_config: Option<SourceConfig>,
}

impl ServiceBuildConfig {
    pub fn new(
        service_name: impl Into<String>,
        build_config: BuildConfig,
        options: &GeneratorOptions,
    ) -> Self {
        let docker_config = DockerConfig::derive(&build_config, options);
        Self {
            service_name: service_name.into(),
            build_config,
            docker_config,
            source_config: None,
        }
    }

    /// Replaces the build settings and regenerates the derived docker config.
    pub fn set_build_config(&mut self, build_config: BuildConfig, options: &GeneratorOptions) {
        self.docker_config = DockerConfig::derive(&build_config, options);
        self.build_config = build_config;
    }

    pub fn status(&self) -> ConfigStatus {
        self.build_config.status()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    Pending,
    Partial,
    Configured,
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigStatus::Pending => "pending",
            ConfigStatus::Partial => "partial",
            ConfigStatus::Configured => "configured",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_requires_language_run_and_build() {
        let mut config = BuildConfig::empty(LanguageId::Python);
        assert_eq!(config.status(), ConfigStatus::Partial);

        config.run_command = "python app.py".to_string();
        assert_eq!(config.status(), ConfigStatus::Partial);

        config.build_commands = vec!["pip install -r requirements.txt".to_string()];
        assert_eq!(config.status(), ConfigStatus::Configured);

        config.language = LanguageId::Custom(String::new());
        assert_eq!(config.status(), ConfigStatus::Partial);
    }

    #[test]
    fn test_blank_framework_is_none() {
        let mut config = BuildConfig::default();
        config.framework = Some("  ".to_string());
        assert_eq!(config.framework_name(), None);
        config.framework = Some("react".to_string());
        assert_eq!(config.framework_name(), Some("react"));
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut config = BuildConfig {
            language: LanguageId::Go,
            build_commands: vec!["go build -o app .".to_string()],
            run_command: "./app".to_string(),
            container_port: Some(9000),
            ..Default::default()
        };

        config.apply(BuildConfigPatch {
            run_command: Some("./server".to_string()),
            ..Default::default()
        });
        assert_eq!(config.run_command, "./server");
        assert_eq!(config.build_commands, vec!["go build -o app ."]);
        assert_eq!(config.container_port, Some(9000));

        config.apply(BuildConfigPatch {
            container_port: Some(None),
            ..Default::default()
        });
        assert_eq!(config.container_port, None);
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing() {
        let patch: BuildConfigPatch =
            serde_yaml::from_str("runCommand: node index.js\ncontainerPort: null\n").unwrap();
        assert_eq!(patch.run_command.as_deref(), Some("node index.js"));
        assert_eq!(patch.container_port, Some(None));
        assert_eq!(patch.working_directory, None);
        assert!(!patch.is_empty());
        assert!(BuildConfigPatch::default().is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let config = BuildConfig {
            language: LanguageId::JavaScript,
            framework: Some("express".to_string()),
            build_commands: vec!["npm install".to_string()],
            run_command: "node server.js".to_string(),
            container_port: Some(8080),
            environment_vars: vec![EnvironmentVar::secret("TOKEN", "x")],
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["language"], "javascript");
        assert_eq!(json["buildCommands"][0], "npm install");
        assert_eq!(json["runCommand"], "node server.js");
        assert_eq!(json["containerPort"], 8080);
        assert_eq!(json["environmentVars"][0]["secret"], true);
        assert!(json.get("workingDirectory").is_none());
    }

    #[test]
    fn test_docker_config_tracks_language() {
        let options = GeneratorOptions::default();
        let mut service = ServiceBuildConfig::new(
            "api",
            BuildConfig::empty(LanguageId::Python),
            &options,
        );
        assert_eq!(service.docker_config.base_image, "python:3.11-slim");
        assert!(service.docker_config.build_args.is_empty());

        service.set_build_config(BuildConfig::empty(LanguageId::Ruby), &options);
        assert_eq!(service.docker_config.base_image, "ruby:3.2-slim");
        assert!(service.docker_config.dockerfile.starts_with("FROM ruby:3.2-slim"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_node() {
        let config = BuildConfig::empty(LanguageId::from_key("cobol"));
        let docker = DockerConfig::derive(&config, &GeneratorOptions::default());
        assert_eq!(docker.base_image, "node:18-alpine");
    }
}
