//! Expertise (skills), ordered by their `sort` key.

use super::{Store, ensure_language, exists, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{ExpertiseCreate, ExpertiseRead, ExpertiseTranslation};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};

// Entries without a sort key go last.
fn select_expertises(filter: &str) -> String {
    format!(
        "SELECT x.id, t.title, t.description, x.icon, x.sort
         FROM expertise x
         JOIN expertise_translation t ON t.expertise_id = x.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         {filter}
         ORDER BY x.sort IS NULL, x.sort, x.id"
    )
}

fn expertise_from_row(row: &Row<'_>) -> rusqlite::Result<ExpertiseRead> {
    Ok(ExpertiseRead {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        sort: row.get(4)?,
    })
}

fn get_expertise(conn: &Connection, id: i64, lang: &LanguageCode) -> Result<Option<ExpertiseRead>> {
    let sql = select_expertises("WHERE x.id = ?2");
    Ok(conn
        .query_row(&sql, params![lang.as_str(), id], expertise_from_row)
        .optional()?)
}

impl Store {
    pub fn list_expertises(&self, lang: &LanguageCode) -> Result<Vec<ExpertiseRead>> {
        let sql = select_expertises("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], expertise_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_expertise(&self, id: i64, lang: &LanguageCode) -> Result<Option<ExpertiseRead>> {
        get_expertise(&self.conn, id, lang)
    }

    pub fn create_expertise(
        &mut self,
        lang: &LanguageCode,
        payload: &ExpertiseCreate,
    ) -> Result<ExpertiseRead> {
        let tx = self.transaction()?;
        tx.execute(
            "INSERT INTO expertise (icon, sort) VALUES (?1, ?2)",
            params![payload.icon, payload.sort],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "expertise_translation",
            "expertise_id",
            id,
            language_id,
            fields!["title" => payload.title, "description" => payload.description],
        )?;
        let created = get_expertise(&tx, id, lang)?;
        tx.commit()?;
        require(created, "Expertise")
    }

    pub fn upsert_expertise_translation(
        &mut self,
        id: i64,
        lang: &LanguageCode,
        payload: &ExpertiseTranslation,
    ) -> Result<ExpertiseRead> {
        let tx = self.transaction()?;
        if !exists(&tx, "expertise", id)? {
            return Err(StoreError::NotFound("Expertise"));
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "expertise_translation",
            "expertise_id",
            id,
            language_id,
            fields!["title" => payload.title, "description" => payload.description],
        )?;
        let updated = get_expertise(&tx, id, lang)?;
        tx.commit()?;
        require(updated, "Expertise")
    }
}

// =============================================================================
// TESTS
// =============================================================================
