//! # Configuration
//!
//! Command line and environment configuration.
//!
//! Every server setting can be given as a flag or through its `FOLIO_*`
//! environment variable; flags win.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default number of contact form submissions accepted per minute.
pub const DEFAULT_CONTACT_PER_MINUTE: u32 = 5;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Backend for a multilingual portfolio website")]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, short = 'D', env = "FOLIO_DATABASE", default_value = "folio.db", global = true)]
    pub database: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty database with the current schema.
    Init {
        /// Replace an existing database file.
        #[arg(long)]
        force: bool,
    },
    /// Show schema version and row counts.
    Status {
        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
    /// Register a content language.
    Language {
        /// ISO 639-1 code, e.g. `de`.
        code: String,
        /// Display name; defaults to the code.
        #[arg(long)]
        name: Option<String>,
    },
    /// Register an image file so it can be served under `/image/{id}`.
    Image {
        /// Unique name of the image.
        filename: String,
        /// Path of the file on disk.
        filepath: PathBuf,
    },
    /// Run the HTTP server.
    Serve(ServerConfig),
}

/// Settings of the HTTP server.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "FOLIO_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Bearer key for admin routes. Admin routes are disabled without it.
    #[arg(long, env = "FOLIO_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    /// Allowed CORS origins, comma separated. Empty allows any origin for
    /// reads only.
    #[arg(long, env = "FOLIO_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Contact form submissions accepted per minute.
    #[arg(long, env = "FOLIO_CONTACT_PER_MINUTE", default_value = "5")]
    pub contact_per_minute: NonZeroU32,
}

impl ServerConfig {
    /// The admin key, treating an empty value as unset.
    pub fn admin_key(&self) -> Option<&str> {
        self.admin_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Configured origins without blanks.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.cors_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            admin_key: None,
            cors_origins: Vec::new(),
            contact_per_minute: NonZeroU32::new(DEFAULT_CONTACT_PER_MINUTE).unwrap_or(NonZeroU32::MIN),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
