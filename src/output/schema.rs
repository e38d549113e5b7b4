//! Serializable reports produced by the command-line surface.

use crate::architecture::ArchitectureMetrics;
use crate::build::{ConfigStatus, ServiceBuildConfig};
use crate::catalog::{DockerfileFlavor, DomainOption, TemplateCatalog};
use crate::dockerfile::BuildFileGenerator;
use crate::source::SourceStatus;
use crate::wizard::{GateFailure, WizardSession, WizardStep};
use anyhow::{bail, Context, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedService {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub flavor: DockerfileFlavor,
    pub base_image: String,
    pub port: u16,
    pub status: ConfigStatus,
    pub source_status: SourceStatus,
    pub dockerfile: String,
}

/// Everything `render` prints: the project, where the wizard stopped, and one
/// entry per buildable service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub project: String,
    pub step: WizardStep,
    pub metrics: ArchitectureMetrics,
    pub services: Vec<RenderedService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<GateFailure>,
}

impl RenderReport {
    /// Fails when the session never got past the architecture step, since there is
    /// nothing to render yet. `only` narrows the report to one service.
    pub fn from_session(session: &WizardSession, only: Option<&str>) -> Result<Self> {
        let architecture = session
            .architecture()
            .context("Manifest has no architecture")?;

        if session.step() == WizardStep::Architecture {
            let reason = session
                .blocking_reason()
                .map_or_else(|| "unknown reason".to_string(), |r| r.to_string());
            bail!("Cannot render build files: {}", reason);
        }

        let builds = session.builds();
        let generator = BuildFileGenerator::new(builds.options().clone());
        let mut services = Vec::new();
        for (index, entry) in builds.configs().iter().enumerate() {
            if only.is_some_and(|name| name != entry.service_name) {
                continue;
            }
            services.push(RenderedService::new(
                entry,
                builds.selected_domain(index).map(str::to_string),
                &generator,
                session.source_status(index),
            ));
        }

        if let Some(name) = only {
            if services.is_empty() {
                bail!("No buildable service named '{}'", name);
            }
        }

        Ok(Self {
            project: architecture.name.clone(),
            step: session.step(),
            metrics: architecture.metrics(),
            services,
            blocked: session.blocking_reason(),
        })
    }

    /// Concatenated build files, each preceded by a comment naming its service.
    pub fn dockerfiles(&self) -> String {
        if self.services.len() == 1 {
            return self.services[0].dockerfile.clone();
        }
        self.services
            .iter()
            .map(|s| format!("# service: {}\n{}", s.service_name, s.dockerfile))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RenderedService {
    fn new(
        entry: &ServiceBuildConfig,
        domain: Option<String>,
        generator: &BuildFileGenerator<'_>,
        source_status: SourceStatus,
    ) -> Self {
        let config = &entry.build_config;
        Self {
            service_name: entry.service_name.clone(),
            domain,
            language: config.language.key().to_string(),
            framework: config.framework_name().map(str::to_string),
            flavor: generator.profile(config).flavor,
            base_image: entry.docker_config.base_image.clone(),
            port: generator.resolved_port(config),
            status: entry.status(),
            source_status,
            dockerfile: entry.docker_config.dockerfile.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSourceReport {
    pub service_name: String,
    pub status: SourceStatus,
}

/// Outcome of `check`: the furthest step the gates allowed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub project: String,
    pub step: WizardStep,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<GateFailure>,
    pub sources: Vec<ServiceSourceReport>,
}

impl CheckReport {
    pub fn from_session(session: &WizardSession) -> Self {
        let sources = session
            .service_build_configs()
            .iter()
            .enumerate()
            .map(|(index, entry)| ServiceSourceReport {
                service_name: entry.service_name.clone(),
                status: session.source_status(index),
            })
            .collect();

        let ready = session.step() == WizardStep::Review;
        Self {
            project: session
                .architecture()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            step: session.step(),
            ready,
            blocked: if ready { None } else { session.blocking_reason() },
            sources,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkListing {
    pub name: String,
    pub language: String,
    pub port: u16,
    pub flavor: DockerfileFlavor,
}

/// Either the domain list or one domain's frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum CatalogListing {
    Domains { domains: Vec<DomainOption> },
    Frameworks {
        domain: String,
        frameworks: Vec<FrameworkListing>,
    },
}

impl CatalogListing {
    pub fn build(catalog: &TemplateCatalog, domain: Option<&str>) -> Result<Self> {
        let Some(domain) = domain else {
            return Ok(Self::Domains {
                domains: catalog.domain_options(),
            });
        };

        if catalog.domain(domain).is_none() {
            bail!("Unknown domain '{}'", domain);
        }

        let frameworks = catalog
            .frameworks_in_domain(domain)
            .iter()
            .filter_map(|name| catalog.framework(name))
            .map(|preset| FrameworkListing {
                name: preset.name.to_string(),
                language: preset.language.to_string(),
                port: preset.port,
                flavor: preset.flavor,
            })
            .collect();

        Ok(Self::Frameworks {
            domain: domain.to_string(),
            frameworks,
        })
    }
}
