use std::io::{self, Write};

use tracing::debug;
use tracing_subscriber::EnvFilter;
use userstore::{perform, Arguments};

fn main() -> anyhow::Result<()> {
    // stdout carries operation output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .init();

    let arguments = Arguments::parse_args();
    debug!(?arguments, "parsed arguments");

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    perform(&arguments, &mut handle)?;
    handle.flush()?;
    Ok(())
}
