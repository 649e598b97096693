//! Personal details (the profile header) and personal information facts.

use super::{Store, ensure_language, exists, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{
    PersonalDetailsCreate, PersonalDetailsRead, PersonalInformationCreate, PersonalInformationRead,
    PersonalInformationTranslation,
};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};

// =============================================================================
// PERSONAL DETAILS
// =============================================================================

fn select_personal_details(filter: &str) -> String {
    format!(
        "SELECT d.id, d.name, t.position, t.abstract, d.profile_picture_id
         FROM personal_details d
         JOIN personal_details_translation t ON t.personal_details_id = d.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         {filter}
         ORDER BY d.id
         LIMIT 1"
    )
}

fn personal_details_from_row(row: &Row<'_>) -> rusqlite::Result<PersonalDetailsRead> {
    Ok(PersonalDetailsRead {
        id: row.get(0)?,
        name: row.get(1)?,
        position: row.get(2)?,
        summary: row.get(3)?,
        profile_picture_id: row.get(4)?,
    })
}

// =============================================================================
// PERSONAL INFORMATION
// =============================================================================

fn select_personal_information(filter: &str) -> String {
    format!(
        "SELECT p.id, t.label, t.value, p.icon
         FROM personal_information p
         JOIN personal_information_translation t ON t.personal_information_id = p.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         {filter}
         ORDER BY p.id"
    )
}

fn personal_information_from_row(row: &Row<'_>) -> rusqlite::Result<PersonalInformationRead> {
    Ok(PersonalInformationRead {
        id: row.get(0)?,
        label: row.get(1)?,
        value: row.get(2)?,
        icon: row.get(3)?,
    })
}

fn get_personal_information(
    conn: &Connection,
    id: i64,
    lang: &LanguageCode,
) -> Result<Option<PersonalInformationRead>> {
    let sql = select_personal_information("WHERE p.id = ?2");
    Ok(conn
        .query_row(&sql, params![lang.as_str(), id], personal_information_from_row)
        .optional()?)
}

impl Store {
    /// The site owner's details in `lang`.
    ///
    /// Only one record is expected; with several, the oldest translated one
    /// wins.
    pub fn get_personal_details(&self, lang: &LanguageCode) -> Result<Option<PersonalDetailsRead>> {
        let sql = select_personal_details("");
        Ok(self
            .conn
            .query_row(&sql, [lang.as_str()], personal_details_from_row)
            .optional()?)
    }

    pub fn create_personal_details(
        &mut self,
        lang: &LanguageCode,
        payload: &PersonalDetailsCreate,
    ) -> Result<PersonalDetailsRead> {
        let tx = self.transaction()?;
        if let Some(image_id) = payload.profile_picture_id {
            if !exists(&tx, "image", image_id)? {
                return Err(StoreError::Validation(format!(
                    "image {image_id} does not exist"
                )));
            }
        }
        tx.execute(
            "INSERT INTO personal_details (name, profile_picture_id) VALUES (?1, ?2)",
            params![payload.name, payload.profile_picture_id],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "personal_details_translation",
            "personal_details_id",
            id,
            language_id,
            fields!["position" => payload.position, "abstract" => payload.summary],
        )?;
        let created = tx
            .query_row(
                &select_personal_details("WHERE d.id = ?2"),
                params![lang.as_str(), id],
                personal_details_from_row,
            )
            .optional()?;
        tx.commit()?;
        require(created, "Personal details")
    }

    pub fn list_personal_information(
        &self,
        lang: &LanguageCode,
    ) -> Result<Vec<PersonalInformationRead>> {
        let sql = select_personal_information("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], personal_information_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_personal_information(
        &self,
        id: i64,
        lang: &LanguageCode,
    ) -> Result<Option<PersonalInformationRead>> {
        get_personal_information(&self.conn, id, lang)
    }

    pub fn create_personal_information(
        &mut self,
        lang: &LanguageCode,
        payload: &PersonalInformationCreate,
    ) -> Result<PersonalInformationRead> {
        let tx = self.transaction()?;
        tx.execute(
            "INSERT INTO personal_information (icon) VALUES (?1)",
            [&payload.icon],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "personal_information_translation",
            "personal_information_id",
            id,
            language_id,
            fields!["label" => payload.label, "value" => payload.value],
        )?;
        let created = get_personal_information(&tx, id, lang)?;
        tx.commit()?;
        require(created, "Personal information")
    }

    pub fn upsert_personal_information_translation(
        &mut self,
        id: i64,
        lang: &LanguageCode,
        payload: &PersonalInformationTranslation,
    ) -> Result<PersonalInformationRead> {
        let tx = self.transaction()?;
        if !exists(&tx, "personal_information", id)? {
            return Err(StoreError::NotFound("Personal information"));
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "personal_information_translation",
            "personal_information_id",
            id,
            language_id,
            fields!["label" => payload.label, "value" => payload.value],
        )?;
        let updated = get_personal_information(&tx, id, lang)?;
        tx.commit()?;
        require(updated, "Personal information")
    }
}

// =============================================================================
// TESTS
// =============================================================================
