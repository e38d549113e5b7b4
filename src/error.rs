use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Misuse of a resolver operation. Validation outcomes are predicates, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("Service index {index} is out of range ({len} configured services)")]
    ServiceIndexOutOfRange { index: usize, len: usize },

    #[error("Service '{service}' has no source configuration")]
    MissingSource { service: String },

    #[error("Service '{service}' uses an upload source; this operation requires a git source")]
    NotGitSource { service: String },

    #[error("Service '{service}' has no deploy key to acknowledge")]
    MissingDeployKey { service: String },

    #[error("Service '{service}' has no repository URL")]
    MissingRepositoryUrl { service: String },

    #[error("An architecture must keep at least one service")]
    LastService,
}

/// Failure reported by an external collaborator, in the `{success: false, error}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Failure {}

impl From<ResolverError> for Failure {
    fn from(err: ResolverError) -> Self {
        Failure::new(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, Failure>;
