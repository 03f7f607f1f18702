use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "analytics-snippet")]
#[command(about = "Render the Google Analytics tracking snippet for a page")]
pub struct CliArgs {
    /// Path to TOML settings file
    #[arg(short, long, default_value = "analytics.toml")]
    pub config: String,

    /// Path to JSON render context (custom variables, transaction, items, ...)
    #[arg(long)]
    pub context: Option<String>,

    /// Remote address of the request, overrides the context value
    #[arg(long)]
    pub remote_addr: Option<String>,

    /// Only validate the settings file, do not render
    #[arg(long)]
    pub check: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
