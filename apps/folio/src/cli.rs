//! # CLI Commands
//!
//! Database maintenance commands and the `serve` entry point.
//!
//! Every command returns `Result<(), String>`; `main` prints the error and
//! exits non-zero.

use crate::api;
use crate::config::ServerConfig;
use folio_core::{LanguageCode, Store, TableCounts};
use serde::Serialize;
use std::path::Path;
use tracing::info;

fn open_store(db_path: &Path) -> Result<Store, String> {
    Store::open(db_path).map_err(|e| format!("Failed to open database {}: {e}", db_path.display()))
}

/// Create a fresh database. Refuses to touch an existing file unless `force`.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), String> {
    if db_path.exists() {
        if !force {
            return Err(format!(
                "Database already exists: {} (use --force to replace it)",
                db_path.display()
            ));
        }
        std::fs::remove_file(db_path).map_err(|e| format!("Failed to remove old database: {e}"))?;
    }

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    let store = open_store(db_path)?;
    let version = store.schema_version().map_err(|e| e.to_string())?;
    println!(
        "Initialized database at {} (schema version {version})",
        db_path.display()
    );
    Ok(())
}

/// Summary printed by `folio status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub database: String,
    pub schema_version: i64,
    pub languages: Vec<String>,
    pub tables: TableCounts,
}

/// Collect the status of an existing database.
pub fn status_report(db_path: &Path) -> Result<StatusReport, String> {
    if !db_path.exists() {
        return Err(format!(
            "Database not found: {} (run `folio init` first)",
            db_path.display()
        ));
    }
    let store = open_store(db_path)?;
    let languages = store
        .list_languages()
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|l| l.iso639_1)
        .collect();
    Ok(StatusReport {
        database: db_path.display().to_string(),
        schema_version: store.schema_version().map_err(|e| e.to_string())?,
        languages,
        tables: store.counts().map_err(|e| e.to_string())?,
    })
}

pub fn cmd_status(db_path: &Path, json: bool) -> Result<(), String> {
    let report = status_report(db_path)?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("Database:       {}", report.database);
    println!("Schema version: {}", report.schema_version);
    if report.languages.is_empty() {
        println!("Languages:      (none)");
    } else {
        println!("Languages:      {}", report.languages.join(", "));
    }
    println!();
    for (table, count) in &report.tables.0 {
        println!("  {table:<22} {count:>6}");
    }
    println!("  {:<22} {:>6}", "total", report.tables.total());
    Ok(())
}

/// Register a language, e.g. before the contact form can accept it.
pub fn cmd_language(db_path: &Path, code: &str, name: Option<&str>) -> Result<(), String> {
    let code =
        LanguageCode::parse(code).ok_or_else(|| format!("Invalid language code: '{code}'"))?;
    let mut store = open_store(db_path)?;
    let language = store
        .add_language(&code, name)
        .map_err(|e| format!("Failed to add language {code}: {e}"))?;
    println!(
        "Added language {} ({}) with id {}",
        language.iso639_1,
        language.name.as_deref().unwrap_or_default(),
        language.id
    );
    Ok(())
}

/// Register an existing file as an image. The stored path is absolute.
pub fn cmd_image(db_path: &Path, filename: &str, filepath: &Path) -> Result<(), String> {
    let absolute = std::fs::canonicalize(filepath)
        .map_err(|e| format!("Cannot read image {}: {e}", filepath.display()))?;
    if !absolute.is_file() {
        return Err(format!("Not a file: {}", absolute.display()));
    }
    let absolute = absolute
        .to_str()
        .ok_or_else(|| format!("Path is not valid UTF-8: {}", absolute.display()))?
        .to_string();

    let mut store = open_store(db_path)?;
    let image = store
        .register_image(filename, &absolute)
        .map_err(|e| format!("Failed to register image: {e}"))?;
    println!("Registered image {} as /image/{}", image.filename, image.id);
    Ok(())
}

/// Run the HTTP server until shutdown.
pub async fn cmd_serve(db_path: &Path, config: ServerConfig) -> Result<(), String> {
    let store = open_store(db_path)?;
    info!(database = %db_path.display(), "Opened content database");
    api::run_server(store, config)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
