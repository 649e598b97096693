//! Professional experience with the localized company name.

use super::{INSTITUTION_COLUMNS, Store, ensure_language, exists, institution_from_row, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{ExperienceCreate, ExperienceRead, ExperienceTranslation};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn select_experiences(filter: &str) -> String {
    format!(
        "SELECT x.id, t.title, t.extract, t.description, t.industry,
                x.url, x.start_date, x.end_date,
                {INSTITUTION_COLUMNS}
         FROM experience x
         JOIN experience_translation t ON t.experience_id = x.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         LEFT JOIN institution i ON i.id = x.institution_id
         LEFT JOIN institution_translation it
                ON it.institution_id = i.id AND it.language_id = l.id
         LEFT JOIN address a ON a.id = i.address_id
         {filter}
         ORDER BY x.id"
    )
}

fn experience_from_row(row: &Row<'_>) -> rusqlite::Result<ExperienceRead> {
    Ok(ExperienceRead {
        id: row.get(0)?,
        title: row.get(1)?,
        extract: row.get(2)?,
        description: row.get(3)?,
        industry: row.get(4)?,
        url: row.get(5)?,
        start_date: row.get(6)?,
        end_date: row.get(7)?,
        company: institution_from_row(row, 8)?,
    })
}

fn get_experience(conn: &Connection, id: i64, lang: &LanguageCode) -> Result<Option<ExperienceRead>> {
    let sql = select_experiences("WHERE x.id = ?2");
    Ok(conn
        .query_row(&sql, params![lang.as_str(), id], experience_from_row)
        .optional()?)
}

impl Store {
    /// Experience entries with a translation in `lang`.
    pub fn list_experiences(&self, lang: &LanguageCode) -> Result<Vec<ExperienceRead>> {
        let sql = select_experiences("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], experience_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_experience(&self, id: i64, lang: &LanguageCode) -> Result<Option<ExperienceRead>> {
        get_experience(&self.conn, id, lang)
    }

    pub fn create_experience(
        &mut self,
        lang: &LanguageCode,
        payload: &ExperienceCreate,
    ) -> Result<ExperienceRead> {
        let tx = self.transaction()?;
        if let Some(institution_id) = payload.institution_id {
            if !exists(&tx, "institution", institution_id)? {
                return Err(StoreError::Validation(format!(
                    "institution {institution_id} does not exist"
                )));
            }
        }
        tx.execute(
            "INSERT INTO experience (start_date, end_date, url, institution_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                payload.start_date,
                payload.end_date,
                payload.url,
                payload.institution_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "experience_translation",
            "experience_id",
            id,
            language_id,
            fields![
                "title" => payload.title,
                "extract" => payload.extract,
                "description" => payload.description,
                "industry" => payload.industry,
            ],
        )?;
        let created = get_experience(&tx, id, lang)?;
        tx.commit()?;
        require(created, "Experience")
    }

    pub fn upsert_experience_translation(
        &mut self,
        id: i64,
        lang: &LanguageCode,
        payload: &ExperienceTranslation,
    ) -> Result<ExperienceRead> {
        let tx = self.transaction()?;
        if !exists(&tx, "experience", id)? {
            return Err(StoreError::NotFound("Experience"));
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "experience_translation",
            "experience_id",
            id,
            language_id,
            fields![
                "title" => payload.title,
                "extract" => payload.extract,
                "description" => payload.description,
                "industry" => payload.industry,
            ],
        )?;
        let updated = get_experience(&tx, id, lang)?;
        tx.commit()?;
        require(updated, "Experience")
    }
}

// =============================================================================
// TESTS
// =============================================================================
