//! # Store Module
//!
//! Translation-aware access to the content database.
//!
//! The store owns a single SQLite connection. Reads take `&self`; writes take
//! `&mut self` and run inside one transaction per operation.
//!
//! ## Translation joins
//!
//! Every localized read follows the same shape:
//!
//! ```text
//! entity ──JOIN──► entity_translation ──JOIN──► language (iso639_1 = ?)
//!    │
//!    └──LEFT JOIN──► parent ──LEFT JOIN──► parent_translation (same language)
//! ```
//!
//! An entity without a translation in the requested language is not visible
//! in that language. A parent without one is still returned, unnamed.

/// Build the `(column, value)` list taken by [`upsert_translation`].
macro_rules! fields {
    ($($name:literal => $value:expr),+ $(,)?) => {
        &[$(($name, &$value as &dyn ::rusqlite::types::ToSql)),+]
    };
}

mod contact;
mod education;
mod experience;
mod expertise;
mod institution;
mod page;
mod personal;
mod social_media;
mod work;

use crate::i18n::LanguageCode;
use crate::models::{AddressRead, InstitutionRead, LanguageRead};
use crate::schema::{self, CONTENT_TABLES};
use crate::{Result, StoreError};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Row counts per content table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts(pub BTreeMap<String, i64>);

impl TableCounts {
    /// Count for one table, `0` if unknown.
    #[must_use]
    pub fn get(&self, table: &str) -> i64 {
        self.0.get(table).copied().unwrap_or(0)
    }

    /// Sum over all tables.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.0.values().copied().fold(0_i64, i64::saturating_add)
    }
}

/// The content store.
pub struct Store {
    conn: Connection,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl Store {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Recorded schema version.
    pub fn schema_version(&self) -> Result<i64> {
        schema::schema_version(&self.conn)
    }

    /// Row counts for every content table.
    pub fn counts(&self) -> Result<TableCounts> {
        let mut counts = BTreeMap::new();
        for table in CONTENT_TABLES {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            counts.insert((*table).to_string(), n);
        }
        Ok(TableCounts(counts))
    }

    fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    // =========================================================================
    // Languages
    // =========================================================================

    /// All registered languages, ordered by code.
    pub fn list_languages(&self) -> Result<Vec<LanguageRead>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, iso639_1 FROM language ORDER BY iso639_1")?;
        let rows = stmt.query_map([], language_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Look up a language by code.
    pub fn find_language(&self, code: &LanguageCode) -> Result<Option<LanguageRead>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, iso639_1 FROM language WHERE iso639_1 = ?1",
                [code.as_str()],
                language_from_row,
            )
            .optional()?)
    }

    /// Register a language with a display name. Duplicate codes conflict.
    pub fn add_language(&mut self, code: &LanguageCode, name: Option<&str>) -> Result<LanguageRead> {
        self.conn.execute(
            "INSERT INTO language (name, iso639_1) VALUES (?1, ?2)",
            params![name.unwrap_or(code.as_str()), code.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(LanguageRead {
            id,
            name: Some(name.unwrap_or(code.as_str()).to_string()),
            iso639_1: code.as_str().to_string(),
        })
    }

    /// Id of `code`, registering it (named after its code) when missing.
    pub fn ensure_language(&mut self, code: &LanguageCode) -> Result<i64> {
        ensure_language(&self.conn, code)
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

fn language_from_row(row: &Row<'_>) -> rusqlite::Result<LanguageRead> {
    Ok(LanguageRead {
        id: row.get(0)?,
        name: row.get(1)?,
        iso639_1: row.get(2)?,
    })
}

pub(crate) fn language_id(conn: &Connection, code: &LanguageCode) -> Result<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT id FROM language WHERE iso639_1 = ?1",
            [code.as_str()],
            |row| row.get(0),
        )
        .optional()?)
}

pub(crate) fn ensure_language(conn: &Connection, code: &LanguageCode) -> Result<i64> {
    if let Some(id) = language_id(conn, code)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO language (name, iso639_1) VALUES (?1, ?1)",
        [code.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Check that row `id` exists in `table`.
pub(crate) fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(&format!("SELECT id FROM {table} WHERE id = ?1"), [id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

/// Insert or replace the translation of `owner_id` in `language_id`.
///
/// `table`, `owner_column` and the field names are compile-time constants of
/// this crate, never user input.
pub(crate) fn upsert_translation(
    conn: &Connection,
    table: &str,
    owner_column: &str,
    owner_id: i64,
    language_id: i64,
    fields: &[(&str, &dyn ToSql)],
) -> Result<()> {
    let columns: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (0..fields.len()).map(|i| format!("?{}", i + 3)).collect();
    let updates: Vec<String> = columns
        .iter()
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();

    let sql = format!(
        "INSERT INTO {table} ({owner_column}, language_id, {cols}) VALUES (?1, ?2, {vals}) \
         ON CONFLICT ({owner_column}, language_id) DO UPDATE SET {updates}",
        cols = columns.join(", "),
        vals = placeholders.join(", "),
        updates = updates.join(", "),
    );

    let mut values: Vec<&dyn ToSql> = vec![&owner_id, &language_id];
    values.extend(fields.iter().map(|(_, value)| *value));
    conn.execute(&sql, values.as_slice())?;
    Ok(())
}

/// Address columns starting at `offset`: id, street, number, zip, city, country.
pub(crate) fn address_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<AddressRead>> {
    let Some(id) = row.get::<_, Option<i64>>(offset)? else {
        return Ok(None);
    };
    Ok(Some(AddressRead {
        id,
        street: row.get(offset + 1)?,
        number: row.get(offset + 2)?,
        zip: row.get(offset + 3)?,
        city: row.get(offset + 4)?,
        country: row.get(offset + 5)?,
    }))
}

/// Institution columns starting at `offset`: id, localized name, then the
/// six address columns.
pub(crate) fn institution_from_row(
    row: &Row<'_>,
    offset: usize,
) -> rusqlite::Result<Option<InstitutionRead>> {
    let Some(id) = row.get::<_, Option<i64>>(offset)? else {
        return Ok(None);
    };
    Ok(Some(InstitutionRead {
        id,
        name: row.get(offset + 1)?,
        address: address_from_row(row, offset + 2)?,
    }))
}

/// Select list matching [`institution_from_row`] for aliases `i`, `it`, `a`.
pub(crate) const INSTITUTION_COLUMNS: &str =
    "i.id, it.name, a.id, a.street, a.number, a.zip, a.city, a.country";

/// Map a missing row to `NotFound(what)`.
pub(crate) fn require<T>(value: Option<T>, what: &'static str) -> Result<T> {
    value.ok_or(StoreError::NotFound(what))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse(s).unwrap()
    }

    #[test]
    fn ensure_language_creates_once() {
        let mut store = Store::open_in_memory().unwrap();
        let first = store.ensure_language(&code("de")).unwrap();
        let second = store.ensure_language(&code("de")).unwrap();
        assert_eq!(first, second);

        let langs = store.list_languages().unwrap();
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].name.as_deref(), Some("de"));
    }

    #[test]
    fn add_language_rejects_duplicates() {
        let mut store = Store::open_in_memory().unwrap();
        let en = store.add_language(&code("en"), Some("English")).unwrap();
        assert_eq!(en.name.as_deref(), Some("English"));
        let dup = store.add_language(&code("en"), None);
        assert!(matches!(dup, Err(StoreError::Conflict(_))));
    }

    #[test]
    fn find_language_by_code() {
        let mut store = Store::open_in_memory().unwrap();
        assert!(store.find_language(&code("fr")).unwrap().is_none());
        store.add_language(&code("fr"), Some("Français")).unwrap();
        let fr = store.find_language(&code("fr")).unwrap().unwrap();
        assert_eq!(fr.iso639_1, "fr");
    }

    #[test]
    fn counts_cover_every_table() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_language(&code("en")).unwrap();
        let counts = store.counts().unwrap();
        assert_eq!(counts.0.len(), CONTENT_TABLES.len());
        assert_eq!(counts.get("language"), 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn opened_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");
        {
            let mut store = Store::open(&path).unwrap();
            store.add_language(&code("it"), Some("Italiano")).unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.list_languages().unwrap().len(), 1);
        assert_eq!(store.schema_version().unwrap(), schema::SCHEMA_VERSION);
    }
}
