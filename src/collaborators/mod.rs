//! Boundary to the systems this crate delegates to: the project API and the
//! deploy-key generator. Both are asynchronous and report failures as
//! [`Failure`](crate::error::Failure) values, never panics.

pub mod mock;
pub mod types;

pub use types::{
    CreateProjectRequest, Deployment, DeploymentRequest, DeploymentStatus, Project, ProjectStatus,
};

use crate::error::ApiResult;
use crate::source::DeployKeyMaterial;
use async_trait::async_trait;

/// Provisions a deploy key pair for a repository. The private half stays with
/// the collaborator; only its reference comes back.
#[async_trait]
pub trait DeployKeyGenerator: Send + Sync {
    async fn generate(&self, repository_url: &str) -> ApiResult<DeployKeyMaterial>;
}

#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;

    async fn create_project(&self, request: CreateProjectRequest) -> ApiResult<Project>;

    async fn submit_deployment(&self, request: DeploymentRequest) -> ApiResult<Deployment>;
}
