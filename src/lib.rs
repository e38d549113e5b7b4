//! nokube - deployment configuration resolver
//!
//! Turns a high-level project description into per-service build configurations
//! that are ready to deploy. The pieces, in the order a deployment flows through
//! them:
//!
//! - [`architecture`]: services, derived networking and resource totals
//! - [`catalog`]: static languages, framework presets and domains
//! - [`build`]: per-service build configuration layered over catalog defaults
//! - [`dockerfile`]: container build file generation, one strategy per flavor
//! - [`source`]: git or upload source per service
//! - [`wizard`]: the gated four-step flow tying it all together
//!
//! # Example
//!
//! ```
//! use nokube::architecture::{ProjectArchitecture, ServiceConfig, ServiceType};
//! use nokube::config::NokubeConfig;
//! use nokube::wizard::{WizardSession, WizardStep};
//!
//! let mut session = WizardSession::from_config(&NokubeConfig::default());
//! session.set_architecture(ProjectArchitecture::new(
//!     "shop",
//!     "",
//!     vec![ServiceConfig::named("web", ServiceType::Web)],
//! ));
//!
//! assert_eq!(session.advance(), Ok(WizardStep::Build));
//! session.apply_domain(0, "web-frontend").unwrap();
//! assert!(session.service_build_configs()[0]
//!     .docker_config
//!     .dockerfile
//!     .contains("nginx"));
//! ```

pub mod architecture;
pub mod build;
pub mod catalog;
pub mod cli;
pub mod collaborators;
pub mod config;
pub mod dockerfile;
pub mod error;
pub mod manifest;
pub mod output;
pub mod source;
pub mod util;
pub mod wizard;

pub use architecture::{ProjectArchitecture, ServiceConfig, ServiceType};
pub use build::{BuildConfig, BuildConfigResolver, ServiceBuildConfig};
pub use catalog::{DockerfileFlavor, LanguageId, TemplateCatalog};
pub use config::{ConfigError, NokubeConfig};
pub use dockerfile::{BuildFileGenerator, GeneratorOptions};
pub use error::{ApiResult, Failure, ResolverError};
pub use manifest::DeploymentManifest;
pub use source::{SourceConfig, SourceConfigResolver, SourceStatus};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use wizard::{GateFailure, WizardSession, WizardStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "nokube");
    }

    #[test]
    fn test_reexports_resolve() {
        let catalog = TemplateCatalog::global();
        assert!(catalog.framework("django").is_some());
        assert_eq!(WizardStep::default(), WizardStep::Architecture);
    }
}
