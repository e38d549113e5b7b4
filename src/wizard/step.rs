use super::gate::{evaluate_gate, GateFailure, WizardDraft};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Architecture,
    Build,
    Source,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub id: WizardStep,
    pub label: &'static str,
    pub description: &'static str,
    pub index: usize,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Architecture,
        WizardStep::Build,
        WizardStep::Source,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Architecture => 0,
            WizardStep::Build => 1,
            WizardStep::Source => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Architecture => "architecture",
            WizardStep::Build => "build",
            WizardStep::Source => "source",
            WizardStep::Review => "review",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_first(&self) -> bool {
        *self == WizardStep::Architecture
    }

    pub fn is_last(&self) -> bool {
        *self == WizardStep::Review
    }

    pub fn descriptor(&self) -> StepDescriptor {
        let (label, description) = match self {
            WizardStep::Architecture => ("Architecture", "Services and infrastructure"),
            WizardStep::Build => ("Build", "Languages and frameworks"),
            WizardStep::Source => ("Source Code", "Git repository and keys"),
            WizardStep::Review => ("Review", "Final validation"),
        };
        StepDescriptor {
            id: *self,
            label,
            description,
            index: self.index(),
        }
    }

    pub fn descriptors() -> Vec<StepDescriptor> {
        Self::ALL.iter().map(|s| s.descriptor()).collect()
    }

    /// Forward transition, guarded by this step's gate.
    ///
    /// Review has nowhere further to go and stays put.
    pub fn proceed(self, draft: &WizardDraft) -> Result<WizardStep, GateFailure> {
        evaluate_gate(self, draft)?;
        Ok(self.next().unwrap_or(self))
    }

    /// Backward transition; never guarded.
    pub fn back(self) -> WizardStep {
        self.previous().unwrap_or(self)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(WizardStep::Architecture.next(), Some(WizardStep::Build));
        assert_eq!(WizardStep::Source.next(), Some(WizardStep::Review));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Architecture.previous(), None);
        assert_eq!(WizardStep::Review.previous(), Some(WizardStep::Source));
    }

    #[test]
    fn test_back_is_unconditional() {
        assert_eq!(WizardStep::Review.back(), WizardStep::Source);
        assert_eq!(WizardStep::Source.back(), WizardStep::Build);
        assert_eq!(WizardStep::Build.back(), WizardStep::Architecture);
        assert_eq!(WizardStep::Architecture.back(), WizardStep::Architecture);
    }

    #[test]
    fn test_descriptors() {
        let descriptors = WizardStep::descriptors();
        assert_eq!(descriptors.len(), 4);
        assert_eq!(descriptors[2].id, WizardStep::Source);
        assert_eq!(descriptors[2].index, 2);
        assert!(WizardStep::default().is_first());
        assert!(WizardStep::Review.is_last());
    }

    #[test]
    fn test_review_is_terminal() {
        let draft = WizardDraft::default();
        assert_eq!(WizardStep::Review.proceed(&draft), Ok(WizardStep::Review));
    }
}
