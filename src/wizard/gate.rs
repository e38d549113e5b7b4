//! Step gates. Every check reads the current draft; no outcome is cached.

use super::step::WizardStep;
use crate::architecture::{ArchitectureIssue, ProjectArchitecture};
use crate::build::BuildConfigResolver;
use crate::source::{SourceConfigResolver, SourceStatus};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// In-progress configuration the gates evaluate.
#[derive(Debug, Clone, Default)]
pub struct WizardDraft {
    pub architecture: Option<ProjectArchitecture>,
    pub builds: BuildConfigResolver,
    pub sources: SourceConfigResolver,
}

impl WizardDraft {
    pub fn new(builds: BuildConfigResolver, sources: SourceConfigResolver) -> Self {
        Self {
            architecture: None,
            builds,
            sources,
        }
    }

    pub fn buildable_count(&self) -> usize {
        self.architecture
            .as_ref()
            .map_or(0, |a| a.buildable_services().len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSource {
    pub service: String,
    pub status: SourceStatus,
}

impl fmt::Display for PendingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.service, self.status)
    }
}

/// Why a forward transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GateFailure {
    #[error("No architecture has been described yet")]
    NoArchitecture,

    #[error("Architecture is invalid: {}", join(.issues))]
    ArchitectureInvalid { issues: Vec<ArchitectureIssue> },

    #[error("{present} of {expected} buildable services have a build configuration")]
    BuildConfigsMissing { expected: usize, present: usize },

    #[error("Source configuration incomplete: {}", join(.pending))]
    SourcesIncomplete { pending: Vec<PendingSource> },
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn evaluate_gate(step: WizardStep, draft: &WizardDraft) -> Result<(), GateFailure> {
    match step {
        WizardStep::Architecture => {
            let architecture = draft
                .architecture
                .as_ref()
                .ok_or(GateFailure::NoArchitecture)?;
            let issues = architecture.validation_issues();
            if issues.is_empty() {
                Ok(())
            } else {
                Err(GateFailure::ArchitectureInvalid { issues })
            }
        }
        WizardStep::Build => {
            let expected = draft.buildable_count();
            let present = draft.builds.len();
            if expected == present {
                Ok(())
            } else {
                Err(GateFailure::BuildConfigsMissing { expected, present })
            }
        }
        WizardStep::Source => {
            let configs = draft.builds.configs();
            let pending: Vec<PendingSource> = (0..configs.len())
                .map(|i| PendingSource {
                    service: configs[i].service_name.clone(),
                    status: draft.sources.status_of(configs, i),
                })
                .filter(|p| p.status != SourceStatus::Complete)
                .collect();
            if pending.is_empty() {
                Ok(())
            } else {
                Err(GateFailure::SourcesIncomplete { pending })
            }
        }
        WizardStep::Review => Ok(()),
    }
}

pub fn can_proceed(step: WizardStep, draft: &WizardDraft) -> bool {
    evaluate_gate(step, draft).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::{ServiceConfig, ServiceType};
    use crate::source::SourceType;

    fn draft() -> WizardDraft {
        WizardDraft {
            architecture: Some(ProjectArchitecture::new(
                "shop",
                "",
                vec![
                    ServiceConfig::named("web", ServiceType::Web),
                    ServiceConfig::named("db", ServiceType::Database),
                ],
            )),
            ..Default::default()
        }
    }

    #[test]
    fn test_architecture_gate() {
        assert_eq!(
            evaluate_gate(WizardStep::Architecture, &WizardDraft::default()),
            Err(GateFailure::NoArchitecture)
        );

        let mut draft = draft();
        assert!(can_proceed(WizardStep::Architecture, &draft));
        assert!(can_proceed(WizardStep::Architecture, &draft));

        if let Some(architecture) = draft.architecture.as_mut() {
            architecture.name.clear();
        }
        assert_eq!(
            evaluate_gate(WizardStep::Architecture, &draft),
            Err(GateFailure::ArchitectureInvalid {
                issues: vec![ArchitectureIssue::EmptyName]
            })
        );
    }

    #[test]
    fn test_build_gate_counts_presence_only() {
        let mut draft = draft();
        assert_eq!(
            evaluate_gate(WizardStep::Build, &draft),
            Err(GateFailure::BuildConfigsMissing {
                expected: 1,
                present: 0
            })
        );

        let services = draft.architecture.as_ref().unwrap().services().to_vec();
        draft.builds.initialize_for_services(&services);
        assert!(can_proceed(WizardStep::Build, &draft));
    }

    #[test]
    fn test_source_gate_reports_substate() {
        let mut draft = draft();
        let services = draft.architecture.as_ref().unwrap().services().to_vec();
        draft.builds.initialize_for_services(&services);

        assert_eq!(
            evaluate_gate(WizardStep::Source, &draft),
            Err(GateFailure::SourcesIncomplete {
                pending: vec![PendingSource {
                    service: "web".to_string(),
                    status: SourceStatus::Missing
                }]
            })
        );

        let sources = draft.sources.clone();
        sources
            .set_type(draft.builds.configs_mut(), 0, SourceType::Upload)
            .unwrap();
        assert!(can_proceed(WizardStep::Source, &draft));
    }

    #[test]
    fn test_gate_failure_messages() {
        let failure = GateFailure::SourcesIncomplete {
            pending: vec![PendingSource {
                service: "api".to_string(),
                status: SourceStatus::AwaitingAcknowledgement,
            }],
        };
        assert_eq!(
            failure.to_string(),
            "Source configuration incomplete: api: deploy key not confirmed as installed"
        );
    }
}
