//! Per-service build configuration: catalog defaults layered under user edits.

pub mod config;
pub mod resolver;

pub use config::{
    BuildArg, BuildConfig, BuildConfigPatch, ConfigStatus, DockerConfig, EnvironmentVar,
    ServiceBuildConfig,
};
pub use resolver::BuildConfigResolver;
