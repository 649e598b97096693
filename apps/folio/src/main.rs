//! # Folio
//!
//! Entry point of the `folio` binary.

use clap::Parser;
use folio::cli::{cmd_image, cmd_init, cmd_language, cmd_serve, cmd_status};
use folio::config::{Cli, Command};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = cli.database.as_path();

    let result = match cli.command {
        Command::Init { force } => cmd_init(db, force),
        Command::Status { json } => cmd_status(db, json),
        Command::Language { code, name } => cmd_language(db, &code, name.as_deref()),
        Command::Image { filename, filepath } => cmd_image(db, &filename, &filepath),
        Command::Serve(config) => cmd_serve(db, config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
