use super::gate::{can_proceed, evaluate_gate, GateFailure, WizardDraft};
use super::step::WizardStep;
use crate::architecture::ProjectArchitecture;
use crate::build::{BuildConfigPatch, BuildConfigResolver, ServiceBuildConfig};
use crate::collaborators::{Deployment, DeploymentRequest, DeployKeyGenerator, ProjectApi};
use crate::config::NokubeConfig;
use crate::error::{ApiResult, Failure, ResolverError};
use crate::source::{GitRepositoryPatch, SourceConfigResolver, SourceStatus, SourceType, UploadConfig};
use tracing::{info, warn};

/// One user's walk through the deployment wizard.
///
/// The session owns its draft outright; nothing is shared between sessions.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    step: WizardStep,
    draft: WizardDraft,
}

impl WizardSession {
    pub fn new(builds: BuildConfigResolver, sources: SourceConfigResolver) -> Self {
        Self {
            step: WizardStep::Architecture,
            draft: WizardDraft::new(builds, sources),
        }
    }

    pub fn from_config(config: &NokubeConfig) -> Self {
        Self::new(
            BuildConfigResolver::new(config.generator_options()),
            SourceConfigResolver::new(config.default_branch.clone()),
        )
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn architecture(&self) -> Option<&ProjectArchitecture> {
        self.draft.architecture.as_ref()
    }

    pub fn architecture_mut(&mut self) -> Option<&mut ProjectArchitecture> {
        self.draft.architecture.as_mut()
    }

    pub fn set_architecture(&mut self, architecture: ProjectArchitecture) {
        self.draft.architecture = Some(architecture);
    }

    pub fn builds(&self) -> &BuildConfigResolver {
        &self.draft.builds
    }

    pub fn builds_mut(&mut self) -> &mut BuildConfigResolver {
        &mut self.draft.builds
    }

    pub fn service_build_configs(&self) -> &[ServiceBuildConfig] {
        self.draft.builds.configs()
    }

    /// Recomputed on every call.
    pub fn can_proceed(&self) -> bool {
        can_proceed(self.step, &self.draft)
    }

    pub fn blocking_reason(&self) -> Option<GateFailure> {
        evaluate_gate(self.step, &self.draft).err()
    }

    /// Moves forward if the current step's gate passes. Entering the build step
    /// seeds build configs the first time and re-aligns them afterwards.
    pub fn advance(&mut self) -> Result<WizardStep, GateFailure> {
        let next = match self.step.proceed(&self.draft) {
            Ok(next) => next,
            Err(failure) => {
                warn!(step = %self.step, "Cannot proceed: {}", failure);
                return Err(failure);
            }
        };

        if self.step == WizardStep::Architecture && next == WizardStep::Build {
            if let Some(architecture) = self.draft.architecture.as_ref() {
                if self.draft.builds.is_empty() {
                    self.draft
                        .builds
                        .initialize_for_services(architecture.services());
                } else {
                    self.draft.builds.sync_with_services(architecture.services());
                }
            }
        }

        info!(from = %self.step, to = %next, "Wizard step changed");
        self.step = next;
        Ok(next)
    }

    /// Steps back; later steps keep their data.
    pub fn go_back(&mut self) -> WizardStep {
        self.step = self.step.back();
        self.step
    }

    pub fn apply_domain(&mut self, index: usize, domain: &str) -> Result<(), ResolverError> {
        self.draft.builds.apply_domain(index, domain)
    }

    pub fn apply_framework(&mut self, index: usize, framework: &str) -> Result<(), ResolverError> {
        self.draft.builds.apply_framework(index, framework)
    }

    pub fn update_build_field(
        &mut self,
        index: usize,
        patch: BuildConfigPatch,
    ) -> Result<(), ResolverError> {
        self.draft.builds.update_field(index, patch)
    }

    pub fn set_source_type(&mut self, index: usize, source_type: SourceType) -> Result<(), ResolverError> {
        let sources = &self.draft.sources;
        sources.set_type(self.draft.builds.configs_mut(), index, source_type)
    }

    pub fn update_git_fields(
        &mut self,
        index: usize,
        patch: GitRepositoryPatch,
    ) -> Result<(), ResolverError> {
        let sources = &self.draft.sources;
        sources.update_git_fields(self.draft.builds.configs_mut(), index, patch)
    }

    pub fn acknowledge_deploy_key(&mut self, index: usize) -> Result<(), ResolverError> {
        let sources = &self.draft.sources;
        sources.acknowledge_deploy_key(self.draft.builds.configs_mut(), index)
    }

    pub fn record_upload(&mut self, index: usize, upload: UploadConfig) -> Result<(), ResolverError> {
        let sources = &self.draft.sources;
        sources.record_upload(self.draft.builds.configs_mut(), index, upload)
    }

    pub fn source_status(&self, index: usize) -> SourceStatus {
        self.draft
            .sources
            .status_of(self.draft.builds.configs(), index)
    }

    /// Asks the collaborator for a deploy key and stores it, unacknowledged.
    ///
    /// The session is untouched unless the collaborator succeeds.
    pub async fn request_deploy_key(
        &mut self,
        index: usize,
        generator: &dyn DeployKeyGenerator,
    ) -> ApiResult<()> {
        let url = self.repository_url(index)?;
        let material = generator.generate(&url).await.map_err(|failure| {
            warn!(url = %url, "Deploy key generation failed: {}", failure);
            failure
        })?;

        let sources = &self.draft.sources;
        sources
            .record_deploy_key(self.draft.builds.configs_mut(), index, material)
            .map_err(Failure::from)
    }

    /// Payload for the deployment backend; only available once review is reached.
    pub fn deployment_request(&self, project_id: u64) -> Option<DeploymentRequest> {
        if self.step != WizardStep::Review {
            return None;
        }
        self.draft
            .architecture
            .as_ref()
            .map(|architecture| DeploymentRequest {
                project_id,
                architecture: architecture.clone(),
                service_build_configs: self.draft.builds.configs().to_vec(),
            })
    }

    pub async fn submit(&self, project_id: u64, api: &dyn ProjectApi) -> ApiResult<Deployment> {
        let request = self.deployment_request(project_id).ok_or_else(|| {
            Failure::new(format!(
                "Deployment can only be submitted from the review step (current: {})",
                self.step
            ))
        })?;

        let deployment = api.submit_deployment(request).await?;
        info!(deployment = deployment.id, project = project_id, "Deployment submitted");
        Ok(deployment)
    }

    fn repository_url(&self, index: usize) -> ApiResult<String> {
        let configs = self.draft.builds.configs();
        let entry = configs
            .get(index)
            .ok_or(ResolverError::ServiceIndexOutOfRange {
                index,
                len: configs.len(),
            })?;
        let service = entry.service_name.clone();
        let source = entry
            .source_config
            .as_ref()
            .ok_or_else(|| ResolverError::MissingSource {
                service: service.clone(),
            })?;
        if source.source_type != SourceType::Git {
            return Err(ResolverError::NotGitSource { service }.into());
        }
        source
            .git_repository
            .as_ref()
            .filter(|repo| repo.has_url())
            .map(|repo| repo.url.trim().to_string())
            .ok_or_else(|| ResolverError::MissingRepositoryUrl { service }.into())
    }
}
