use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deployment configuration resolver
#[derive(Parser, Debug)]
#[command(
    name = "nokube",
    about = "Resolve deployment manifests into validated build configurations",
    version,
    long_about = "nokube takes a project architecture plus per-service choices, fills in \
                  framework defaults from its template catalog, generates a container build \
                  file for every buildable service and checks that each wizard stage is \
                  complete."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate build files for a deployment manifest",
        long_about = "Loads a YAML or JSON deployment manifest, applies catalog defaults and \
                      overrides, and prints the generated build file of every buildable \
                      service together with its configuration and source status.\n\n\
                      Examples:\n  \
                      nokube render deploy.yaml\n  \
                      nokube render deploy.yaml --service web --format dockerfile\n  \
                      nokube render deploy.json --format json -o report.json"
    )]
    Render(RenderArgs),

    #[command(
        about = "Check how far a manifest gets through the wizard",
        long_about = "Replays a deployment manifest through the wizard gates and reports the \
                      furthest step reached and what blocks the next one.\n\n\
                      Exit codes: 0 ready for review, 2 blocked, 1 manifest error.\n\n\
                      Examples:\n  \
                      nokube check deploy.yaml\n  \
                      nokube check deploy.yaml --format json"
    )]
    Check(CheckArgs),

    #[command(
        about = "Browse the template catalog",
        long_about = "Lists the catalog domains, or the frameworks of one domain with their \
                      language, default port and build file flavor.\n\n\
                      Examples:\n  \
                      nokube catalog\n  \
                      nokube catalog --domain web-backend --format yaml"
    )]
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "MANIFEST", help = "Path to the deployment manifest")]
    pub manifest: PathBuf,

    #[arg(
        short = 's',
        long,
        value_name = "NAME",
        help = "Only render this service"
    )]
    pub service: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "MANIFEST", help = "Path to the deployment manifest")]
    pub manifest: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CatalogArgs {
    #[arg(
        short = 'd',
        long,
        value_name = "ID",
        help = "List the frameworks of this domain"
    )]
    pub domain: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
    Dockerfile,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Dockerfile => super::output::OutputFormat::Dockerfile,
        }
    }
}
