//! Output formatting for command reports
//!
//! JSON and YAML are straight serializations of the report types in
//! [`crate::output::schema`]. The human format is a boxed summary for terminals, and
//! the dockerfile format prints only the generated build files.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::output::schema::{CatalogListing, CheckReport, RenderReport};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
    /// Raw build files only (render)
    Dockerfile,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_render(&self, report: &RenderReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "render report"),
            OutputFormat::Yaml => to_yaml(report, "render report"),
            OutputFormat::Human => Ok(self.format_render_human(report)),
            OutputFormat::Dockerfile => Ok(report.dockerfiles()),
        }
    }

    pub fn format_check(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "check report"),
            OutputFormat::Yaml => to_yaml(report, "check report"),
            OutputFormat::Human => Ok(self.format_check_human(report)),
            OutputFormat::Dockerfile => bail!("The dockerfile format is only available for render"),
        }
    }

    pub fn format_catalog(&self, listing: &CatalogListing) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(listing, "catalog"),
            OutputFormat::Yaml => to_yaml(listing, "catalog"),
            OutputFormat::Human => Ok(self.format_catalog_human(listing)),
            OutputFormat::Dockerfile => bail!("The dockerfile format is only available for render"),
        }
    }

    fn format_render_human(&self, report: &RenderReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Build Configuration: {}\n", report.project));
        output.push_str(RULE);
        output.push_str("\n\n");
        output.push_str(&format!(
            "Services: {}   Replicas: {}   CPU: {}m   Memory: {}Mi\n",
            report.metrics.total_services,
            report.metrics.total_replicas,
            report.metrics.total_cpu,
            report.metrics.total_memory
        ));
        output.push_str(&format!("Wizard step: {}\n\n", report.step));

        for service in &report.services {
            let marker = if service.status == crate::build::ConfigStatus::Configured {
                "\u{2713}"
            } else {
                "\u{26A0}"
            };
            output.push_str(&format!("{} {}\n", marker, service.service_name));
            if let Some(domain) = &service.domain {
                output.push_str(&format!("\u{251C}\u{2500} Domain:     {}\n", domain));
            }
            output.push_str(&format!(
                "\u{251C}\u{2500} Framework:  {}\n",
                service.framework.as_deref().unwrap_or("(none)")
            ));
            output.push_str(&format!("\u{251C}\u{2500} Language:   {}\n", service.language));
            output.push_str(&format!(
                "\u{251C}\u{2500} Image:      {} ({})\n",
                service.base_image, service.flavor
            ));
            output.push_str(&format!("\u{251C}\u{2500} Port:       {}\n", service.port));
            output.push_str(&format!("\u{251C}\u{2500} Build:      {}\n", service.status));
            output.push_str(&format!(
                "\u{2514}\u{2500} Source:     {}\n\n",
                service.source_status
            ));
            for line in service.dockerfile.lines() {
                output.push_str("    ");
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        if let Some(blocked) = &report.blocked {
            output.push_str(&format!("\u{26A0} Blocked: {}\n", blocked));
        }

        output
    }

    fn format_check_human(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        if report.ready {
            output.push_str(&format!("\u{2713} {} is ready for review\n", report.project));
        } else {
            output.push_str(&format!(
                "\u{26A0} {} stopped at the {} step\n",
                report.project, report.step
            ));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        if !report.sources.is_empty() {
            output.push_str("Sources:\n");
            for (i, source) in report.sources.iter().enumerate() {
                let connector = if i + 1 == report.sources.len() {
                    "\u{2514}"
                } else {
                    "\u{251C}"
                };
                output.push_str(&format!(
                    "{}\u{2500} {}: {}\n",
                    connector, source.service_name, source.status
                ));
            }
            output.push('\n');
        }

        if let Some(blocked) = &report.blocked {
            output.push_str(&format!("Blocked: {}\n", blocked));
        }

        output
    }

    fn format_catalog_human(&self, listing: &CatalogListing) -> String {
        let mut output = String::new();

        match listing {
            CatalogListing::Domains { domains } => {
                output.push_str("Domains\n");
                output.push_str(RULE);
                output.push_str("\n\n");
                for domain in domains {
                    output.push_str(&format!(
                        "{:<18} {}\n{:<18} {}\n",
                        domain.id, domain.label, "", domain.description
                    ));
                }
            }
            CatalogListing::Frameworks { domain, frameworks } => {
                output.push_str(&format!("Frameworks in {}\n", domain));
                output.push_str(RULE);
                output.push_str("\n\n");
                if frameworks.is_empty() {
                    output.push_str("(no catalog frameworks, configure builds by hand)\n");
                }
                for framework in frameworks {
                    output.push_str(&format!(
                        "{:<18} {:<12} port {:<6} {}\n",
                        framework.name, framework.language, framework.port, framework.flavor
                    ));
                }
            }
        }

        output
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
