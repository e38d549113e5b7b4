//! Four-step deployment wizard: architecture, build, source, review.
//!
//! Steps are plain values; [`WizardStep::proceed`] is a pure transition over a
//! [`WizardDraft`]. [`WizardSession`] bundles a step with the draft it owns.

pub mod gate;
pub mod session;
pub mod step;

pub use gate::{can_proceed, evaluate_gate, GateFailure, PendingSource, WizardDraft};
pub use session::WizardSession;
pub use step::{StepDescriptor, WizardStep};
