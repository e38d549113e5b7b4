use super::flavor::DockerfileFlavor;
use super::language_id::LanguageId;
use super::presets::{
    DomainTemplate, FrameworkPreset, BASE_IMAGES, CUSTOM_DOMAIN, DOMAIN_TEMPLATES,
    FALLBACK_BASE_IMAGE, FRAMEWORK_PRESETS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Catalog defaults a framework contributes to a service's build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkDefaults {
    pub framework: String,
    pub language: LanguageId,
    pub build_commands: Vec<String>,
    pub run_command: String,
    pub port: u16,
    pub flavor: DockerfileFlavor,
}

/// Generation strategy plus the catalog-declared port, if the framework is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DockerfileProfile {
    pub flavor: DockerfileFlavor,
    pub port: Option<u16>,
}

impl DockerfileProfile {
    pub fn generic() -> Self {
        Self {
            flavor: DockerfileFlavor::Generic,
            port: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainOption {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// Read-only registry over the static catalog tables.
///
/// Lookups never fail: unknown languages resolve to a node base image, unknown
/// frameworks to the generic profile. The catalog advises, user values win.
pub struct TemplateCatalog {
    base_images: HashMap<LanguageId, &'static str>,
    languages: Vec<LanguageId>,
    frameworks: HashMap<String, &'static FrameworkPreset>,
    domains: Vec<&'static DomainTemplate>,
}

impl TemplateCatalog {
    pub fn with_defaults() -> Self {
        let mut base_images = HashMap::new();
        let mut languages = Vec::with_capacity(BASE_IMAGES.len());
        for (key, image) in BASE_IMAGES {
            let id = LanguageId::from_key(key);
            languages.push(id.clone());
            base_images.insert(id, *image);
        }

        let frameworks = FRAMEWORK_PRESETS
            .iter()
            .map(|preset| (preset.name.to_ascii_lowercase(), preset))
            .collect();

        Self {
            base_images,
            languages,
            frameworks,
            domains: DOMAIN_TEMPLATES.iter().collect(),
        }
    }

    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static TemplateCatalog {
        static CATALOG: OnceLock<TemplateCatalog> = OnceLock::new();
        CATALOG.get_or_init(TemplateCatalog::with_defaults)
    }

    pub fn base_image_for(&self, language: &LanguageId) -> &'static str {
        self.base_images
            .get(language)
            .copied()
            .unwrap_or(FALLBACK_BASE_IMAGE)
    }

    pub fn has_language(&self, language: &LanguageId) -> bool {
        self.base_images.contains_key(language)
    }

    pub fn available_languages(&self) -> &[LanguageId] {
        &self.languages
    }

    pub fn framework(&self, name: &str) -> Option<&'static FrameworkPreset> {
        self.frameworks
            .get(&name.trim().to_ascii_lowercase())
            .copied()
    }

    pub fn framework_defaults(&self, name: &str) -> Option<FrameworkDefaults> {
        self.framework(name).map(|preset| FrameworkDefaults {
            framework: preset.name.to_string(),
            language: LanguageId::from_key(preset.language),
            build_commands: preset
                .build_commands
                .iter()
                .map(|c| c.to_string())
                .collect(),
            run_command: preset.run_command.to_string(),
            port: preset.port,
            flavor: preset.flavor,
        })
    }

    /// Profile for an optional framework name, falling back to the generic strategy.
    pub fn dockerfile_profile(&self, framework: Option<&str>) -> DockerfileProfile {
        framework
            .and_then(|name| self.framework(name))
            .map(|preset| DockerfileProfile {
                flavor: preset.flavor,
                port: Some(preset.port),
            })
            .unwrap_or_else(DockerfileProfile::generic)
    }

    pub fn domain(&self, id: &str) -> Option<&'static DomainTemplate> {
        self.domains.iter().find(|d| d.id == id).copied()
    }

    pub fn is_custom_domain(id: &str) -> bool {
        id == CUSTOM_DOMAIN
    }

    pub fn domain_options(&self) -> Vec<DomainOption> {
        self.domains
            .iter()
            .map(|d| DomainOption {
                id: d.id.to_string(),
                label: d.label.to_string(),
                description: d.description.to_string(),
            })
            .collect()
    }

    /// Frameworks of a domain in catalog order; empty for unknown domains.
    pub fn frameworks_in_domain(&self, id: &str) -> &'static [&'static str] {
        self.domain(id).map(|d| d.frameworks).unwrap_or(&[])
    }

    /// Distinct languages referenced by a domain's frameworks, first-seen order.
    ///
    /// The custom domain offers every catalog language.
    pub fn languages_in_domain(&self, id: &str) -> Vec<LanguageId> {
        if Self::is_custom_domain(id) {
            return self.languages.clone();
        }

        let mut languages: Vec<LanguageId> = Vec::new();
        for name in self.frameworks_in_domain(id) {
            if let Some(preset) = self.framework(name) {
                let language = LanguageId::from_key(preset.language);
                if !languages.contains(&language) {
                    languages.push(language);
                }
            }
        }
        languages
    }

    pub fn framework_suggestions(&self, domain: &str, language: &LanguageId) -> Vec<&'static str> {
        if Self::is_custom_domain(domain) {
            return Vec::new();
        }

        self.frameworks_in_domain(domain)
            .iter()
            .filter(|name| {
                self.framework(name)
                    .is_some_and(|preset| LanguageId::from_key(preset.language) == *language)
            })
            .copied()
            .collect()
    }

    pub fn frameworks(&self) -> impl Iterator<Item = &'static FrameworkPreset> {
        FRAMEWORK_PRESETS.iter()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
