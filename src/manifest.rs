//! Deployment manifests: a file-based stand-in for the interactive wizard.
//!
//! A manifest carries the architecture plus, per buildable service, the domain and
//! framework picks, field overrides and source. Loading it replays those choices
//! through a [`WizardSession`] in the same order a user would make them.
//!
//! ```yaml
//! architecture:
//!   name: shop
//!   services:
//!     - name: web
//!       type: web
//!       replicas: 2
//!       resources: { cpu: 250m, memory: 256Mi }
//! services:
//!   - name: web
//!     domain: web-frontend
//!     framework: react
//!     overrides:
//!       containerPort: 8080
//!     source:
//!       type: upload
//! ```

use crate::architecture::ProjectArchitecture;
use crate::build::BuildConfigPatch;
use crate::config::NokubeConfig;
use crate::source::SourceConfig;
use crate::wizard::{WizardSession, WizardStep};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    pub architecture: ProjectArchitecture,
    #[serde(default)]
    pub services: Vec<ServiceSelection>,
}

/// The choices made for one service on the build and source steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default)]
    pub overrides: BuildConfigPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceConfig>,
}

impl DeploymentManifest {
    /// Reads a manifest; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let manifest = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
        .with_context(|| format!("Invalid manifest {}", path.display()))?;

        debug!(
            path = %path.display(),
            services = manifest.services.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse manifest YAML")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse manifest JSON")
    }

    /// Replays the manifest and walks forward as far as the gates allow.
    ///
    /// A blocked gate is not an error: the returned session simply stops short of
    /// review and reports why through [`WizardSession::blocking_reason`]. Errors are
    /// reserved for manifests that cannot be applied at all.
    pub fn into_session(self, config: &NokubeConfig) -> Result<WizardSession> {
        let mut session = WizardSession::from_config(config);
        session.set_architecture(self.architecture);

        if session.advance().is_err() {
            return Ok(session);
        }

        for selection in self.services {
            apply_selection(&mut session, selection)?;
        }

        while session.step() != WizardStep::Review {
            if session.advance().is_err() {
                break;
            }
        }

        info!(step = %session.step(), "Manifest replayed");
        Ok(session)
    }
}

fn apply_selection(session: &mut WizardSession, selection: ServiceSelection) -> Result<()> {
    let index = session
        .service_build_configs()
        .iter()
        .position(|c| c.service_name == selection.name)
        .with_context(|| {
            format!(
                "Service '{}' is not a buildable service of the architecture",
                selection.name
            )
        })?;

    if let Some(domain) = &selection.domain {
        session.apply_domain(index, domain)?;
    }
    if let Some(framework) = &selection.framework {
        session.apply_framework(index, framework)?;
    }
    if !selection.overrides.is_empty() {
        session.update_build_field(index, selection.overrides)?;
    }
    if let Some(source) = selection.source {
        if source.git_repository.is_some() && source.uploaded_files.is_some() {
            bail!(
                "Service '{}' declares both a git repository and an upload",
                selection.name
            );
        }
        if let Some(entry) = session.builds_mut().configs_mut().get_mut(index) {
            entry.source_config = Some(source);
        }
    }
    Ok(())
}
