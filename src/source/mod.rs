//! Source acquisition per service: a git repository with an acknowledged deploy
//! key, or an uploaded archive.
//!
//! Git completeness is human-asserted. Nothing here checks that the deploy key
//! was actually installed on the remote; [`SourceConfigResolver::acknowledge_deploy_key`]
//! is the only way a git source becomes complete.

use crate::build::ServiceBuildConfig;
use crate::error::ResolverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Git,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployKey {
    pub public_key: String,
    pub private_key_id: String,
    #[serde(default)]
    pub is_configured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositoryConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_key: Option<DeployKey>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl GitRepositoryConfig {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            branch: branch.into(),
            root_directory: None,
            deploy_key: None,
        }
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositoryPatch {
    pub url: Option<String>,
    pub branch: Option<String>,
    pub root_directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    pub file_id: String,
    pub file_name: String,
    pub size: u64,
}

/// Key pair reference handed back by the key-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployKeyMaterial {
    pub public_key: String,
    pub private_key_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositoryConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_files: Option<UploadConfig>,
}

impl SourceConfig {
    pub fn git(branch: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Git,
            git_repository: Some(GitRepositoryConfig::new(branch)),
            uploaded_files: None,
        }
    }

    pub fn upload() -> Self {
        Self {
            source_type: SourceType::Upload,
            git_repository: None,
            uploaded_files: None,
        }
    }

    pub fn status(&self) -> SourceStatus {
        match self.source_type {
            SourceType::Upload => SourceStatus::Complete,
            SourceType::Git => match &self.git_repository {
                Some(repo) if repo.has_url() => match &repo.deploy_key {
                    None => SourceStatus::AwaitingDeployKey,
                    Some(key) if !key.is_configured => SourceStatus::AwaitingAcknowledgement,
                    Some(_) => SourceStatus::Complete,
                },
                _ => SourceStatus::MissingUrl,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SourceStatus::Complete
    }
}

/// Where a service stands on the way to a complete source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Missing,
    MissingUrl,
    AwaitingDeployKey,
    AwaitingAcknowledgement,
    Complete,
}

impl SourceStatus {
    pub fn of(source: Option<&SourceConfig>) -> Self {
        source.map_or(SourceStatus::Missing, SourceConfig::status)
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceStatus::Missing => "no source selected",
            SourceStatus::MissingUrl => "repository URL missing",
            SourceStatus::AwaitingDeployKey => "deploy key not generated",
            SourceStatus::AwaitingAcknowledgement => "deploy key not confirmed as installed",
            SourceStatus::Complete => "complete",
        };
        write!(f, "{}", s)
    }
}

/// Edits the `sourceConfig` of services addressed by build-config index.
#[derive(Debug, Clone)]
pub struct SourceConfigResolver {
    default_branch: String,
}

impl Default for SourceConfigResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BRANCH)
    }
}

impl SourceConfigResolver {
    pub fn new(default_branch: impl Into<String>) -> Self {
        Self {
            default_branch: default_branch.into(),
        }
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Replaces the service's source with a fresh one of the given type.
    pub fn set_type(
        &self,
        configs: &mut [ServiceBuildConfig],
        index: usize,
        source_type: SourceType,
    ) -> Result<(), ResolverError> {
        let entry = entry_mut(configs, index)?;
        debug!(service = %entry.service_name, ?source_type, "Setting source type");
        entry.source_config = Some(match source_type {
            SourceType::Git => SourceConfig::git(self.default_branch.clone()),
            SourceType::Upload => SourceConfig::upload(),
        });
        Ok(())
    }

    pub fn update_git_fields(
        &self,
        configs: &mut [ServiceBuildConfig],
        index: usize,
        patch: GitRepositoryPatch,
    ) -> Result<(), ResolverError> {
        let repo = git_repository_mut(configs, index)?;
        if let Some(url) = patch.url {
            repo.url = url;
        }
        if let Some(branch) = patch.branch {
            repo.branch = branch;
        }
        if let Some(root_directory) = patch.root_directory {
            repo.root_directory = Some(root_directory).filter(|r| !r.trim().is_empty());
        }
        Ok(())
    }

    /// Stores a freshly generated key, not yet acknowledged.
    pub fn record_deploy_key(
        &self,
        configs: &mut [ServiceBuildConfig],
        index: usize,
        material: DeployKeyMaterial,
    ) -> Result<(), ResolverError> {
        let repo = git_repository_mut(configs, index)?;
        repo.deploy_key = Some(DeployKey {
            public_key: material.public_key,
            private_key_id: material.private_key_id,
            is_configured: false,
        });
        Ok(())
    }

    /// User confirmation that the public key is installed on the repository host.
    pub fn acknowledge_deploy_key(
        &self,
        configs: &mut [ServiceBuildConfig],
        index: usize,
    ) -> Result<(), ResolverError> {
        let service = entry(configs, index)?.service_name.clone();
        let key = git_repository_mut(configs, index)?
            .deploy_key
            .as_mut()
            .ok_or(ResolverError::MissingDeployKey { service })?;
        key.is_configured = true;
        Ok(())
    }

    pub fn record_upload(
        &self,
        configs: &mut [ServiceBuildConfig],
        index: usize,
        upload: UploadConfig,
    ) -> Result<(), ResolverError> {
        let entry = entry_mut(configs, index)?;
        entry.source_config = Some(SourceConfig {
            source_type: SourceType::Upload,
            git_repository: None,
            uploaded_files: Some(upload),
        });
        Ok(())
    }

    pub fn status_of(&self, configs: &[ServiceBuildConfig], index: usize) -> SourceStatus {
        configs
            .get(index)
            .map_or(SourceStatus::Missing, |c| SourceStatus::of(c.source_config.as_ref()))
    }

    pub fn is_complete(&self, configs: &[ServiceBuildConfig], index: usize) -> bool {
        self.status_of(configs, index) == SourceStatus::Complete
    }
}

fn entry(configs: &[ServiceBuildConfig], index: usize) -> Result<&ServiceBuildConfig, ResolverError> {
    configs
        .get(index)
        .ok_or(ResolverError::ServiceIndexOutOfRange {
            index,
            len: configs.len(),
        })
}

fn entry_mut(
    configs: &mut [ServiceBuildConfig],
    index: usize,
) -> Result<&mut ServiceBuildConfig, ResolverError> {
    let len = configs.len();
    configs
        .get_mut(index)
        .ok_or(ResolverError::ServiceIndexOutOfRange { index, len })
}

/// The service's git repository; errors when the source is absent or an upload.
pub(crate) fn git_repository_mut(
    configs: &mut [ServiceBuildConfig],
    index: usize,
) -> Result<&mut GitRepositoryConfig, ResolverError> {
    let entry = entry_mut(configs, index)?;
    let service = entry.service_name.clone();
    match entry.source_config.as_mut() {
        None => Err(ResolverError::MissingSource { service }),
        Some(source) if source.source_type != SourceType::Git => {
            Err(ResolverError::NotGitSource { service })
        }
        Some(source) => Ok(source
            .git_repository
            .get_or_insert_with(|| GitRepositoryConfig::new(DEFAULT_BRANCH))),
    }
}
