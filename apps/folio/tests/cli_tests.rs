//! Integration tests for Folio CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use folio::cli::{cmd_image, cmd_init, cmd_language, cmd_status, status_report};
use folio_core::{LanguageCode, Store};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create a small image file.
fn create_image(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("avatar.jpg");
    std::fs::write(&path, b"\xff\xd8\xff\xe0fake-jpeg").unwrap();
    path
}

// =============================================================================
// INIT COMMAND TESTS
// =============================================================================

#[test]
fn test_init_creates_database() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");

    let result = cmd_init(&db_path, false);
    assert!(result.is_ok());
    assert!(db_path.exists());
}

#[test]
fn test_init_creates_parent_directories() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("data").join("nested").join("folio.db");

    cmd_init(&db_path, false).unwrap();
    assert!(db_path.exists());
}

#[test]
fn test_init_fails_if_exists_without_force() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");

    // First init
    cmd_init(&db_path, false).unwrap();

    // Second init should fail
    let result = cmd_init(&db_path, false);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("--force"));
}

#[test]
fn test_init_with_force_starts_empty() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");

    cmd_init(&db_path, false).unwrap();
    cmd_language(&db_path, "de", Some("Deutsch")).unwrap();

    // Second init with force replaces the content
    cmd_init(&db_path, true).unwrap();
    let report = status_report(&db_path).unwrap();
    assert!(report.languages.is_empty());
}

// =============================================================================
// STATUS COMMAND TESTS
// =============================================================================

#[test]
fn test_status_on_missing_database_fails() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("nonexistent.db");

    let result = cmd_status(&db_path, false);
    assert!(result.is_err());
    assert!(!db_path.exists());
}

#[test]
fn test_status_reports_counts() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    cmd_init(&db_path, false).unwrap();
    cmd_language(&db_path, "en", Some("English")).unwrap();
    cmd_language(&db_path, "de", None).unwrap();

    let report = status_report(&db_path).unwrap();
    assert_eq!(report.schema_version, folio_core::schema::SCHEMA_VERSION);
    assert_eq!(report.languages, ["de", "en"]);
    assert_eq!(report.tables.get("language"), 2);
    assert_eq!(report.tables.total(), 2);

    assert!(cmd_status(&db_path, false).is_ok());
    assert!(cmd_status(&db_path, true).is_ok());
}

// =============================================================================
// LANGUAGE COMMAND TESTS
// =============================================================================

#[test]
fn test_language_normalizes_code() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    cmd_init(&db_path, false).unwrap();

    cmd_language(&db_path, "PT-br", Some("Português")).unwrap();

    let store = Store::open(&db_path).unwrap();
    let pt = store
        .find_language(&LanguageCode::parse("pt").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(pt.name.as_deref(), Some("Português"));
}

#[test]
fn test_language_rejects_duplicates_and_garbage() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    cmd_init(&db_path, false).unwrap();

    cmd_language(&db_path, "en", None).unwrap();
    assert!(cmd_language(&db_path, "en", None).is_err());
    assert!(cmd_language(&db_path, "   ", None).is_err());
}

// =============================================================================
// IMAGE COMMAND TESTS
// =============================================================================

#[test]
fn test_image_registers_absolute_path() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    let image = create_image(&temp);
    cmd_init(&db_path, false).unwrap();

    cmd_image(&db_path, "avatar.jpg", &image).unwrap();

    let store = Store::open(&db_path).unwrap();
    let registered = store.get_image(1).unwrap().unwrap();
    assert_eq!(registered.filename, "avatar.jpg");
    assert!(PathBuf::from(&registered.filepath).is_absolute());
    assert_eq!(
        PathBuf::from(&registered.filepath),
        std::fs::canonicalize(&image).unwrap()
    );
}

#[test]
fn test_image_missing_file_fails() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    cmd_init(&db_path, false).unwrap();

    let result = cmd_image(&db_path, "ghost.png", &temp.path().join("ghost.png"));
    assert!(result.is_err());
}

#[test]
fn test_image_duplicate_filename_fails() {
    let temp = create_temp_dir();
    let db_path = temp.path().join("folio.db");
    let image = create_image(&temp);
    cmd_init(&db_path, false).unwrap();

    cmd_image(&db_path, "avatar.jpg", &image).unwrap();
    let result = cmd_image(&db_path, "avatar.jpg", &image);
    assert!(result.unwrap_err().contains("already registered"));
}
