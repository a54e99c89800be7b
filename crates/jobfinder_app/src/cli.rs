use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

/// Match a résumé against open job postings and draft a cover letter.
#[derive(Debug, Parser)]
#[command(name = "jobfinder", version)]
pub struct Cli {
    /// Résumé to analyze. Without it an interactive session starts.
    pub file: Option<PathBuf>,

    /// Config file (RON). Defaults to ./jobfinder.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Analysis Service endpoint, e.g. http://localhost:8000/analyze.
    #[arg(long)]
    pub service_url: Option<String>,

    /// Give up on the service after this many seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Copy the cover letter to the clipboard after a successful analysis.
    #[arg(long, requires = "file")]
    pub copy: bool,
}
