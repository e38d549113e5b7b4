//! Subcommand handlers. Each returns the process exit code.

use super::commands::{CatalogArgs, CheckArgs, RenderArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::catalog::TemplateCatalog;
use crate::config::NokubeConfig;
use crate::manifest::DeploymentManifest;
use crate::output::schema::{CatalogListing, CheckReport, RenderReport};
use crate::wizard::WizardSession;
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// Manifest could not be read, parsed or applied.
pub const EXIT_ERROR: i32 = 1;
/// The manifest loads but a wizard gate refuses to advance.
pub const EXIT_BLOCKED: i32 = 2;

pub fn handle_render(args: &RenderArgs, quiet: bool) -> i32 {
    let Some(session) = load_session(&args.manifest) else {
        return EXIT_ERROR;
    };

    let report = match RenderReport::from_session(&session, args.service.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_ERROR;
        }
    };
    info!(services = report.services.len(), "Build files generated");

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format_render(&report) {
        Ok(output) => emit(&output, args.output.as_deref(), quiet),
        Err(e) => {
            error!("{:#}", e);
            EXIT_ERROR
        }
    }
}

pub fn handle_check(args: &CheckArgs) -> i32 {
    let Some(session) = load_session(&args.manifest) else {
        return EXIT_ERROR;
    };

    let report = CheckReport::from_session(&session);
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let code = match formatter.format_check(&report) {
        Ok(output) => emit(&output, None, false),
        Err(e) => {
            error!("{:#}", e);
            return EXIT_ERROR;
        }
    };

    if code != 0 {
        code
    } else if report.ready {
        0
    } else {
        EXIT_BLOCKED
    }
}

pub fn handle_catalog(args: &CatalogArgs) -> i32 {
    let listing = match CatalogListing::build(TemplateCatalog::global(), args.domain.as_deref()) {
        Ok(listing) => listing,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_ERROR;
        }
    };

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format_catalog(&listing) {
        Ok(output) => emit(&output, None, false),
        Err(e) => {
            error!("{:#}", e);
            EXIT_ERROR
        }
    }
}

fn load_session(path: &Path) -> Option<WizardSession> {
    match replay(path) {
        Ok(session) => Some(session),
        Err(e) => {
            error!("{:#}", e);
            None
        }
    }
}

fn replay(path: &Path) -> Result<WizardSession> {
    let config = NokubeConfig::from_env()?;
    debug!("{}", config);
    DeploymentManifest::load(path)?.into_session(&config)
}

fn emit(output: &str, destination: Option<&Path>, quiet: bool) -> i32 {
    match destination {
        Some(path) => match fs::write(path, output) {
            Ok(()) => {
                if !quiet {
                    println!("Output written to: {}", path.display());
                }
                0
            }
            Err(e) => {
                error!("Failed to write output to {}: {}", path.display(), e);
                EXIT_ERROR
            }
        },
        None => {
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
            0
        }
    }
}
