//! `promptver-compare` -- print the line diff between two prompt versions.
//!
//! Either diffs two text files directly, or loads a JSON snapshot of a
//! prompt's versions and compares the selected version against the baseline
//! the selection workspace picks for it.
//!
//! # Environment variables
//!
//! | Variable          | Required | Default   | Description                              |
//! |-------------------|----------|-----------|------------------------------------------|
//! | `MAX_INPUT_BYTES` | no       | `1048576` | Largest input file accepted              |
//! | `SHOW_CONTEXT`    | no       | `true`    | Print unchanged lines alongside changes  |
//! | `RUST_LOG`        | no       | `promptver_compare=info,promptver_core=info` | Log filter |

use clap::Parser;
use promptver_compare::config::CompareConfig;
use promptver_compare::{run, Cli};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptver_compare=info,promptver_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CompareConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::debug!(
        max_input_bytes = config.max_input_bytes,
        show_context = config.show_context,
        "Loaded compare configuration"
    );

    match run(&cli.command, &config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "Comparison failed");
            std::process::exit(1);
        }
    }
}
