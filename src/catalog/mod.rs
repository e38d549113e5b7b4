//! Template catalog: languages, framework presets and domains.
//!
//! Static, immutable lookup tables keyed by string identifiers. Loaded once per
//! process through [`TemplateCatalog::global`].

#[macro_use]
pub mod id_enum_macro;

pub mod flavor;
pub mod language_id;
pub mod presets;
pub mod registry;

pub use flavor::DockerfileFlavor;
pub use language_id::LanguageId;
pub use presets::{DomainTemplate, FrameworkPreset, CUSTOM_DOMAIN, FALLBACK_BASE_IMAGE};
pub use registry::{DockerfileProfile, DomainOption, FrameworkDefaults, TemplateCatalog};
