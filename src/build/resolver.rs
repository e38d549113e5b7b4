use super::config::{BuildConfig, BuildConfigPatch, ConfigStatus, ServiceBuildConfig};
use crate::architecture::{ServiceConfig, ServiceType};
use crate::catalog::{LanguageId, TemplateCatalog};
use crate::dockerfile::GeneratorOptions;
use crate::error::ResolverError;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info};

/// Owns the build configuration of every buildable service.
///
/// Configs follow the order of the architecture's buildable services and are
/// addressed by that index. Domain selections are kept alongside, index for index.
#[derive(Debug, Clone)]
pub struct BuildConfigResolver {
    configs: Vec<ServiceBuildConfig>,
    domains: Vec<Option<String>>,
    options: GeneratorOptions,
}

impl Default for BuildConfigResolver {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl BuildConfigResolver {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            configs: Vec::new(),
            domains: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn configs(&self) -> &[ServiceBuildConfig] {
        &self.configs
    }

    /// Mutable view for per-service edits that cannot add or remove entries.
    pub fn configs_mut(&mut self) -> &mut [ServiceBuildConfig] {
        &mut self.configs
    }

    pub fn into_configs(self) -> Vec<ServiceBuildConfig> {
        self.configs
    }

    pub fn config(&self, index: usize) -> Option<&ServiceBuildConfig> {
        self.configs.get(index)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn default_language_for(service_type: ServiceType) -> LanguageId {
        match service_type {
            ServiceType::Web => LanguageId::JavaScript,
            ServiceType::Api | ServiceType::Worker => LanguageId::Python,
            _ => LanguageId::JavaScript,
        }
    }

    /// Seeds one blank config per buildable service.
    ///
    /// Only acts on the first call: when configs already exist, or no service is
    /// buildable, nothing changes.
    pub fn initialize_for_services(&mut self, services: &[ServiceConfig]) -> &[ServiceBuildConfig] {
        if !self.configs.is_empty() {
            return &self.configs;
        }

        self.configs = services
            .iter()
            .filter(|s| s.is_buildable())
            .map(|s| self.seed(s))
            .collect();
        self.domains = vec![None; self.configs.len()];

        if !self.configs.is_empty() {
            info!(services = self.configs.len(), "Seeded build configurations");
        }
        &self.configs
    }

    /// Re-aligns configs with a changed service list, keeping existing ones by name.
    ///
    /// Repeated names are matched by occurrence: the n-th service called `svc`
    /// keeps the config of the n-th previous `svc`.
    pub fn sync_with_services(&mut self, services: &[ServiceConfig]) {
        let mut existing: HashMap<String, VecDeque<(ServiceBuildConfig, Option<String>)>> =
            HashMap::new();
        for (config, domain) in self.configs.drain(..).zip(self.domains.drain(..)) {
            existing
                .entry(config.service_name.clone())
                .or_default()
                .push_back((config, domain));
        }

        for service in services.iter().filter(|s| s.is_buildable()) {
            let (config, domain) = existing
                .get_mut(&service.name)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| (self.seed(service), None));
            self.configs.push(config);
            self.domains.push(domain);
        }

        for (name, dropped) in &existing {
            if !dropped.is_empty() {
                debug!(
                    service = %name,
                    count = dropped.len(),
                    "Dropping build configuration of removed service"
                );
            }
        }
    }

    /// Records the domain and applies its first framework; `custom` resets to a blank template.
    pub fn apply_domain(&mut self, index: usize, domain: &str) -> Result<(), ResolverError> {
        let service_name = self.entry(index)?.service_name.clone();
        if let Some(slot) = self.domains.get_mut(index) {
            *slot = Some(domain.to_string());
        }

        let catalog = TemplateCatalog::global();
        if TemplateCatalog::is_custom_domain(domain) {
            debug!(service = %service_name, "Custom domain, clearing build template");
            let options = self.options.clone();
            self.entry_mut(index)?
                .set_build_config(BuildConfig::empty(LanguageId::JavaScript), &options);
            return Ok(());
        }

        match catalog.frameworks_in_domain(domain).first() {
            Some(framework) => {
                debug!(service = %service_name, domain, framework, "Applying domain default framework");
                self.apply_framework(index, framework)
            }
            None => {
                debug!(service = %service_name, domain, "Domain has no catalog frameworks");
                Ok(())
            }
        }
    }

    /// Overwrites language and commands with catalog defaults; dependencies and
    /// environment variables are cleared. Working directory and port overrides stay.
    pub fn apply_framework(&mut self, index: usize, framework: &str) -> Result<(), ResolverError> {
        let options = self.options.clone();
        let entry = self.entry_mut(index)?;
        let mut config = entry.build_config.clone();

        match TemplateCatalog::global().framework_defaults(framework) {
            Some(defaults) => {
                config.language = defaults.language;
                config.framework = Some(defaults.framework);
                config.build_commands = defaults.build_commands;
                config.run_command = defaults.run_command;
            }
            None => {
                info!(
                    service = %entry.service_name,
                    framework,
                    "Framework not in catalog, keeping it as user-entered"
                );
                config.framework = Some(framework.to_string()).filter(|f| !f.trim().is_empty());
            }
        }
        config.dependencies.clear();
        config.environment_vars.clear();

        entry.set_build_config(config, &options);
        Ok(())
    }

    pub fn update_field(&mut self, index: usize, patch: BuildConfigPatch) -> Result<(), ResolverError> {
        let options = self.options.clone();
        let entry = self.entry_mut(index)?;
        let mut config = entry.build_config.clone();
        config.apply(patch);
        entry.set_build_config(config, &options);
        Ok(())
    }

    /// `Pending` for indices without a config.
    pub fn status_of(&self, index: usize) -> ConfigStatus {
        self.configs
            .get(index)
            .map(ServiceBuildConfig::status)
            .unwrap_or(ConfigStatus::Pending)
    }

    pub fn selected_domain(&self, index: usize) -> Option<&str> {
        self.domains.get(index).and_then(Option::as_deref)
    }

    fn seed(&self, service: &ServiceConfig) -> ServiceBuildConfig {
        let language = Self::default_language_for(service.service_type);
        ServiceBuildConfig::new(service.name.clone(), BuildConfig::empty(language), &self.options)
    }

    fn entry(&self, index: usize) -> Result<&ServiceBuildConfig, ResolverError> {
        let len = self.configs.len();
        self.configs
            .get(index)
            .ok_or(ResolverError::ServiceIndexOutOfRange { index, len })
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ServiceBuildConfig, ResolverError> {
        let len = self.configs.len();
        self.configs
            .get_mut(index)
            .ok_or(ResolverError::ServiceIndexOutOfRange { index, len })
    }
}
