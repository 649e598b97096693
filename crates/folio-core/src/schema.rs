//! # Schema
//!
//! Table definitions and schema versioning.
//!
//! Each localized entity has a base table and a `<entity>_translation` table.
//! Translation tables carry a `UNIQUE (<entity>_id, language_id)` constraint,
//! so an entity has at most one translation per language.

use crate::Result;
use rusqlite::{Connection, OptionalExtension};

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Base tables reported by `folio status`.
pub const CONTENT_TABLES: &[&str] = &[
    "language",
    "address",
    "institution",
    "education",
    "experience",
    "expertise",
    "page",
    "personal_details",
    "personal_information",
    "social_media",
    "category",
    "work",
    "contact",
    "image",
];

const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS language (
    id INTEGER PRIMARY KEY,
    name TEXT,
    iso639_1 TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS address (
    id INTEGER PRIMARY KEY,
    street TEXT,
    number TEXT,
    zip INTEGER,
    city TEXT,
    country TEXT
);

CREATE TABLE IF NOT EXISTS image (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL UNIQUE,
    filepath TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS institution (
    id INTEGER PRIMARY KEY,
    address_id INTEGER REFERENCES address(id)
);

CREATE TABLE IF NOT EXISTS institution_translation (
    id INTEGER PRIMARY KEY,
    name TEXT,
    institution_id INTEGER NOT NULL REFERENCES institution(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (institution_id, language_id)
);

CREATE TABLE IF NOT EXISTS education (
    id INTEGER PRIMARY KEY,
    start_date TEXT,
    end_date TEXT,
    degree TEXT,
    grade REAL,
    institution_id INTEGER REFERENCES institution(id)
);

CREATE TABLE IF NOT EXISTS education_translation (
    id INTEGER PRIMARY KEY,
    course_of_study TEXT,
    description TEXT,
    education_id INTEGER NOT NULL REFERENCES education(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (education_id, language_id)
);

CREATE TABLE IF NOT EXISTS experience (
    id INTEGER PRIMARY KEY,
    start_date TEXT,
    end_date TEXT,
    url TEXT,
    institution_id INTEGER REFERENCES institution(id)
);

CREATE TABLE IF NOT EXISTS experience_translation (
    id INTEGER PRIMARY KEY,
    title TEXT,
    extract TEXT,
    description TEXT,
    industry TEXT,
    experience_id INTEGER NOT NULL REFERENCES experience(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (experience_id, language_id)
);

CREATE TABLE IF NOT EXISTS expertise (
    id INTEGER PRIMARY KEY,
    icon TEXT,
    sort INTEGER
);

CREATE TABLE IF NOT EXISTS expertise_translation (
    id INTEGER PRIMARY KEY,
    title TEXT,
    description TEXT,
    expertise_id INTEGER NOT NULL REFERENCES expertise(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (expertise_id, language_id)
);

CREATE TABLE IF NOT EXISTS page (
    id INTEGER PRIMARY KEY,
    tech_key TEXT UNIQUE,
    creation_date TEXT
);

CREATE TABLE IF NOT EXISTS page_translation (
    id INTEGER PRIMARY KEY,
    title TEXT,
    abstract TEXT,
    html TEXT,
    page_id INTEGER NOT NULL REFERENCES page(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (page_id, language_id)
);

CREATE TABLE IF NOT EXISTS personal_details (
    id INTEGER PRIMARY KEY,
    name TEXT,
    profile_picture_id INTEGER REFERENCES image(id)
);

CREATE TABLE IF NOT EXISTS personal_details_translation (
    id INTEGER PRIMARY KEY,
    position TEXT,
    abstract TEXT,
    personal_details_id INTEGER NOT NULL REFERENCES personal_details(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (personal_details_id, language_id)
);

CREATE TABLE IF NOT EXISTS personal_information (
    id INTEGER PRIMARY KEY,
    icon TEXT
);

CREATE TABLE IF NOT EXISTS personal_information_translation (
    id INTEGER PRIMARY KEY,
    label TEXT,
    value TEXT,
    personal_information_id INTEGER NOT NULL REFERENCES personal_information(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (personal_information_id, language_id)
);

CREATE TABLE IF NOT EXISTS social_media (
    id INTEGER PRIMARY KEY,
    name TEXT,
    url TEXT,
    color TEXT,
    path TEXT
);

CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS category_translation (
    id INTEGER PRIMARY KEY,
    name TEXT,
    category_id INTEGER NOT NULL REFERENCES category(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (category_id, language_id)
);

CREATE TABLE IF NOT EXISTS work (
    id INTEGER PRIMARY KEY,
    url TEXT,
    thumbnail_id INTEGER REFERENCES image(id)
);

CREATE TABLE IF NOT EXISTS work_translation (
    id INTEGER PRIMARY KEY,
    title TEXT,
    work_id INTEGER NOT NULL REFERENCES work(id),
    language_id INTEGER NOT NULL REFERENCES language(id),
    UNIQUE (work_id, language_id)
);

CREATE TABLE IF NOT EXISTS work_category (
    work_id INTEGER NOT NULL REFERENCES work(id),
    category_id INTEGER NOT NULL REFERENCES category(id),
    PRIMARY KEY (work_id, category_id)
);

CREATE TABLE IF NOT EXISTS contact (
    id INTEGER PRIMARY KEY,
    creation_date TEXT,
    sending_date TEXT,
    send INTEGER NOT NULL DEFAULT 0,
    name TEXT,
    email TEXT,
    message TEXT,
    language_id INTEGER REFERENCES language(id)
);

CREATE INDEX IF NOT EXISTS idx_education_institution ON education(institution_id);
CREATE INDEX IF NOT EXISTS idx_experience_institution ON experience(institution_id);
CREATE INDEX IF NOT EXISTS idx_work_category_category ON work_category(category_id);
"#;

/// Create or upgrade the schema on `conn`.
///
/// Safe to call on every start: an up-to-date database is left untouched.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let current = schema_version(conn)?;
    if current < SCHEMA_VERSION {
        migrate(conn, SCHEMA_V1, SCHEMA_VERSION)?;
    }
    Ok(())
}

/// Apply `ddl` and record `version` atomically. A failure leaves the
/// database as it was.
fn migrate(conn: &Connection, ddl: &str, version: i64) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(ddl)?;
    set_schema_version(&tx, version)?;
    tx.commit()?;
    Ok(())
}

/// Read the recorded schema version, `0` for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i64) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) \
         VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
