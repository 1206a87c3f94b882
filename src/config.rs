use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Student-record assistant sidecar. Reads one JSON request per line on
/// stdin and writes one JSON response per line on stdout.
#[derive(Parser, Debug)]
#[command(name = "erpd", version)]
pub struct Args {
    /// Workspace directory to open at startup (holds erp.sqlite3)
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log filter directives, e.g. "erpd=debug"; overrides --verbose
    #[arg(long, env = "ERPD_LOG")]
    pub log_filter: Option<String>,
}

impl Args {
    fn filter(&self) -> EnvFilter {
        if let Some(directives) = &self.log_filter {
            if let Ok(f) = EnvFilter::try_new(directives) {
                return f;
            }
        }
        EnvFilter::new(if self.verbose { "debug" } else { "info" })
    }
}

/// Logs go to stderr; stdout belongs to the protocol.
pub fn init_logging(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(args.filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
