//! Content pages, addressed by `tech_key` rather than id.

use super::{Store, ensure_language, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{PageCreate, PageRead, PageTranslation};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn select_pages(filter: &str) -> String {
    format!(
        "SELECT p.id, p.tech_key, t.title, t.abstract, t.html, p.creation_date
         FROM page p
         JOIN page_translation t ON t.page_id = p.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         {filter}
         ORDER BY p.id"
    )
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageRead> {
    Ok(PageRead {
        id: row.get(0)?,
        tech_key: row.get(1)?,
        title: row.get(2)?,
        summary: row.get(3)?,
        html: row.get(4)?,
        creation_date: row.get(5)?,
    })
}

fn get_page(conn: &Connection, tech_key: &str, lang: &LanguageCode) -> Result<Option<PageRead>> {
    let sql = select_pages("WHERE p.tech_key = ?2");
    Ok(conn
        .query_row(&sql, params![lang.as_str(), tech_key], page_from_row)
        .optional()?)
}

fn page_id(conn: &Connection, tech_key: &str) -> Result<Option<i64>> {
    Ok(conn
        .query_row("SELECT id FROM page WHERE tech_key = ?1", [tech_key], |row| row.get(0))
        .optional()?)
}

impl Store {
    pub fn list_pages(&self, lang: &LanguageCode) -> Result<Vec<PageRead>> {
        let sql = select_pages("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], page_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The page with `tech_key`, if it is translated into `lang`.
    pub fn get_page(&self, tech_key: &str, lang: &LanguageCode) -> Result<Option<PageRead>> {
        get_page(&self.conn, tech_key, lang)
    }

    /// Create a page dated today (UTC) with its first translation.
    pub fn create_page(&mut self, lang: &LanguageCode, payload: &PageCreate) -> Result<PageRead> {
        let tech_key = payload.tech_key.trim();
        if tech_key.is_empty() {
            return Err(StoreError::Validation("tech_key must not be empty".into()));
        }

        let tx = self.transaction()?;
        if page_id(&tx, tech_key)?.is_some() {
            return Err(StoreError::Conflict(format!(
                "page '{tech_key}' already exists"
            )));
        }
        let today = chrono::Utc::now().date_naive();
        tx.execute(
            "INSERT INTO page (tech_key, creation_date) VALUES (?1, ?2)",
            params![tech_key, today],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "page_translation",
            "page_id",
            id,
            language_id,
            fields![
                "title" => payload.title,
                "abstract" => payload.summary,
                "html" => payload.html,
            ],
        )?;
        let created = get_page(&tx, tech_key, lang)?;
        tx.commit()?;
        require(created, "Page")
    }

    pub fn upsert_page_translation(
        &mut self,
        tech_key: &str,
        lang: &LanguageCode,
        payload: &PageTranslation,
    ) -> Result<PageRead> {
        let tx = self.transaction()?;
        let id = require(page_id(&tx, tech_key)?, "Page")?;
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "page_translation",
            "page_id",
            id,
            language_id,
            fields![
                "title" => payload.title,
                "abstract" => payload.summary,
                "html" => payload.html,
            ],
        )?;
        let updated = get_page(&tx, tech_key, lang)?;
        tx.commit()?;
        require(updated, "Page")
    }
}

// =============================================================================
// TESTS
// =============================================================================
