//! Build-file generation.
//!
//! A resolved [`BuildConfig`] plus its flavor maps to exactly one
//! [`BuildFileStrategy`]; the strategy writes a deterministic multi-stage
//! descriptor through a [`DockerfileWriter`]. Generation is pure: identical
//! input always yields byte-identical text.
//!
//! Port precedence: explicit `containerPort`, then the framework's catalog
//! port, then [`GeneratorOptions::fallback_port`].

pub mod command;
pub mod flavors;
pub mod strategy;
pub mod writer;

pub use command::{format_cmd, UNCONFIGURED_CMD};
pub use strategy::{strategy_for, BuildFileStrategy};
pub use writer::DockerfileWriter;

use crate::build::{BuildConfig, EnvironmentVar};
use crate::catalog::{DockerfileFlavor, DockerfileProfile, TemplateCatalog};
use tracing::debug;

pub const DEFAULT_WORKDIR: &str = "/app";
pub const DEFAULT_FALLBACK_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub default_workdir: String,
    pub fallback_port: u16,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            default_workdir: DEFAULT_WORKDIR.to_string(),
            fallback_port: DEFAULT_FALLBACK_PORT,
        }
    }
}

/// Everything a strategy needs, resolved once per generation.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a BuildConfig,
    pub base_image: &'a str,
    pub workdir: &'a str,
    pub port: u16,
    /// True when the port came from an explicit `containerPort`
    pub port_overridden: bool,
}

impl<'a> RenderContext<'a> {
    /// Build commands in order, blank entries skipped.
    /// Non-blank build commands; a multi-line entry yields one command per line.
    pub fn build_commands(&self) -> impl Iterator<Item = &'a str> {
        self.config
            .build_commands
            .iter()
            .flat_map(|c| c.lines())
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    pub fn has_build_step(&self, needle: &str) -> bool {
        self.build_commands().any(|c| c.contains(needle))
    }

    /// Variables safe to bake into the image. Secrets are injected at deploy time.
    pub fn image_env(&self) -> impl Iterator<Item = &'a EnvironmentVar> {
        self.config
            .environment_vars
            .iter()
            .filter(|v| !v.secret && !v.key.trim().is_empty())
    }

    pub fn run_command(&self) -> &'a str {
        self.config.run_command.trim()
    }

    /// Absolute path of `relative` inside the working directory.
    pub fn in_workdir(&self, relative: &str) -> String {
        let relative = relative.trim_start_matches("./");
        format!("{}/{}", self.workdir.trim_end_matches('/'), relative)
    }
}

pub struct BuildFileGenerator<'c> {
    catalog: &'c TemplateCatalog,
    options: GeneratorOptions,
}

impl BuildFileGenerator<'static> {
    pub fn new(options: GeneratorOptions) -> Self {
        Self::with_catalog(TemplateCatalog::global(), options)
    }
}

impl<'c> BuildFileGenerator<'c> {
    pub fn with_catalog(catalog: &'c TemplateCatalog, options: GeneratorOptions) -> Self {
        Self { catalog, options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Flavor and catalog port for the config's framework; generic when unknown.
    pub fn profile(&self, config: &BuildConfig) -> DockerfileProfile {
        let profile = self.catalog.dockerfile_profile(config.framework_name());
        if profile.flavor == DockerfileFlavor::Generic {
            debug!(
                framework = config.framework_name().unwrap_or(""),
                "No catalog profile, using generic build file"
            );
        }
        profile
    }

    /// Port the generated file exposes for the config's own flavor.
    pub fn resolved_port(&self, config: &BuildConfig) -> u16 {
        let profile = self.profile(config);
        let ctx = self.context(config, profile.port);
        strategy_for(profile.flavor).exposed_port(&ctx)
    }

    /// Generates with the flavor declared by the config's framework.
    pub fn generate(&self, config: &BuildConfig) -> String {
        let profile = self.profile(config);
        self.render(config, profile.flavor, profile.port)
    }

    /// Generates with an explicit flavor.
    pub fn generate_for(&self, config: &BuildConfig, flavor: DockerfileFlavor) -> String {
        let catalog_port = self.profile(config).port;
        self.render(config, flavor, catalog_port)
    }

    fn context<'a>(&'a self, config: &'a BuildConfig, catalog_port: Option<u16>) -> RenderContext<'a> {
        let workdir = config
            .working_directory
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .unwrap_or(self.options.default_workdir.as_str());

        RenderContext {
            config,
            base_image: self.catalog.base_image_for(&config.language),
            workdir,
            port: config
                .container_port
                .or(catalog_port)
                .unwrap_or(self.options.fallback_port),
            port_overridden: config.container_port.is_some(),
        }
    }

    fn render(
        &self,
        config: &BuildConfig,
        flavor: DockerfileFlavor,
        catalog_port: Option<u16>,
    ) -> String {
        let ctx = self.context(config, catalog_port);
        let mut out = DockerfileWriter::new();
        strategy_for(flavor).render(&mut out, &ctx);
        out.finish()
    }
}

/// Generates a build file for `config` using `flavor`'s strategy.
pub fn generate(config: &BuildConfig, flavor: DockerfileFlavor, options: &GeneratorOptions) -> String {
    BuildFileGenerator::new(options.clone()).generate_for(config, flavor)
}
