pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CatalogArgs, CheckArgs, CliArgs, Commands, RenderArgs};
pub use output::{OutputFormat, OutputFormatter};
