use super::types::{
    CreateProjectRequest, Deployment, DeploymentRequest, DeploymentStatus, Project, ProjectStatus,
};
use super::{DeployKeyGenerator, ProjectApi};
use crate::error::{ApiResult, Failure};
use crate::source::DeployKeyMaterial;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Key generator answering from a queue; falls back to a deterministic key.
#[derive(Default)]
pub struct MockDeployKeyGenerator {
    responses: Mutex<VecDeque<ApiResult<DeployKeyMaterial>>>,
    requests: Mutex<Vec<String>>,
}

impl MockDeployKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.add_response(Err(Failure::new(error)));
        mock
    }

    pub fn add_response(&self, response: ApiResult<DeployKeyMaterial>) {
        lock(&self.responses).push_back(response);
    }

    /// Repository URLs seen so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl DeployKeyGenerator for MockDeployKeyGenerator {
    async fn generate(&self, repository_url: &str) -> ApiResult<DeployKeyMaterial> {
        let count = {
            let mut requests = lock(&self.requests);
            requests.push(repository_url.to_string());
            requests.len()
        };

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Ok(DeployKeyMaterial {
                public_key: format!("ssh-ed25519 MOCKKEY{} nokube@{}", count, repository_url),
                private_key_id: format!("mock-key-{}", count),
            })
        })
    }
}

/// In-memory project backend.
#[derive(Default)]
pub struct MockProjectApi {
    projects: Mutex<Vec<Project>>,
    deployments: Mutex<Vec<Deployment>>,
    failure: Mutex<Option<Failure>>,
}

impl MockProjectApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: impl Into<String>) {
        *lock(&self.failure) = Some(Failure::new(error));
    }

    pub fn deployments(&self) -> Vec<Deployment> {
        lock(&self.deployments).clone()
    }

    fn check(&self) -> ApiResult<()> {
        match lock(&self.failure).as_ref() {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectApi for MockProjectApi {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.check()?;
        Ok(lock(&self.projects).clone())
    }

    async fn create_project(&self, request: CreateProjectRequest) -> ApiResult<Project> {
        self.check()?;
        if request.name.trim().is_empty() {
            return Err(Failure::new("Project name is required"));
        }

        let mut projects = lock(&self.projects);
        let now = Utc::now();
        let project = Project {
            id: projects.len() as u64 + 1,
            name: request.name,
            description: request.description,
            owner: "mock".to_string(),
            status: ProjectStatus::Created,
            created_at: now,
            updated_at: now,
        };
        projects.push(project.clone());
        Ok(project)
    }

    async fn submit_deployment(&self, request: DeploymentRequest) -> ApiResult<Deployment> {
        self.check()?;
        let mut deployments = lock(&self.deployments);
        let now = Utc::now();
        let deployment = Deployment {
            id: deployments.len() as u64 + 1,
            project_id: request.project_id,
            name: request.architecture.name.clone(),
            status: DeploymentStatus::Configuring,
            architecture: request.architecture,
            service_build_configs: request.service_build_configs,
            created_at: now,
            updated_at: now,
            logs: Vec::new(),
        };
        deployments.push(deployment.clone());
        Ok(deployment)
    }
}
