//! Institutions (universities, companies) and their addresses.

use super::{
    INSTITUTION_COLUMNS, Store, address_from_row, ensure_language, exists, institution_from_row,
    require, upsert_translation,
};
use crate::i18n::LanguageCode;
use crate::models::{AddressCreate, AddressRead, InstitutionCreate, InstitutionRead, InstitutionTranslation};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, params};

fn select_institutions(filter: &str) -> String {
    format!(
        "SELECT {INSTITUTION_COLUMNS}
         FROM institution i
         JOIN institution_translation it ON it.institution_id = i.id
         JOIN language l ON l.id = it.language_id AND l.iso639_1 = ?1
         LEFT JOIN address a ON a.id = i.address_id
         {filter}
         ORDER BY i.id"
    )
}

pub(crate) fn get_institution(
    conn: &Connection,
    id: i64,
    lang: &LanguageCode,
) -> Result<Option<InstitutionRead>> {
    let sql = select_institutions("WHERE i.id = ?2");
    let row = conn
        .query_row(&sql, params![lang.as_str(), id], |row| institution_from_row(row, 0))
        .optional()?;
    Ok(row.flatten())
}

impl Store {
    // =========================================================================
    // Addresses
    // =========================================================================

    pub fn create_address(&mut self, payload: &AddressCreate) -> Result<AddressRead> {
        self.conn.execute(
            "INSERT INTO address (street, number, zip, city, country) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                payload.street,
                payload.number,
                payload.zip,
                payload.city,
                payload.country
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        require(self.get_address(id)?, "Address")
    }

    pub fn get_address(&self, id: i64) -> Result<Option<AddressRead>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, street, number, zip, city, country FROM address WHERE id = ?1",
                [id],
                |row| address_from_row(row, 0),
            )
            .optional()?;
        Ok(row.flatten())
    }

    // =========================================================================
    // Institutions
    // =========================================================================

    /// Institutions that have a name in `lang`.
    pub fn list_institutions(&self, lang: &LanguageCode) -> Result<Vec<InstitutionRead>> {
        let sql = select_institutions("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], |row| institution_from_row(row, 0))?;
        let mut out = Vec::new();
        for row in rows {
            out.extend(row?);
        }
        Ok(out)
    }

    pub fn get_institution(&self, id: i64, lang: &LanguageCode) -> Result<Option<InstitutionRead>> {
        get_institution(&self.conn, id, lang)
    }

    /// Create an institution with its name in `lang`.
    pub fn create_institution(
        &mut self,
        lang: &LanguageCode,
        payload: &InstitutionCreate,
    ) -> Result<InstitutionRead> {
        let tx = self.transaction()?;
        if let Some(address_id) = payload.address_id {
            if !exists(&tx, "address", address_id)? {
                return Err(StoreError::Validation(format!(
                    "address {address_id} does not exist"
                )));
            }
        }
        tx.execute(
            "INSERT INTO institution (address_id) VALUES (?1)",
            [payload.address_id],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "institution_translation",
            "institution_id",
            id,
            language_id,
            fields!["name" => payload.name],
        )?;
        let created = get_institution(&tx, id, lang)?;
        tx.commit()?;
        require(created, "Institution")
    }

    /// Set the name of institution `id` in `lang`.
    pub fn upsert_institution_translation(
        &mut self,
        id: i64,
        lang: &LanguageCode,
        payload: &InstitutionTranslation,
    ) -> Result<InstitutionRead> {
        let tx = self.transaction()?;
        if !exists(&tx, "institution", id)? {
            return Err(StoreError::NotFound("Institution"));
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "institution_translation",
            "institution_id",
            id,
            language_id,
            fields!["name" => payload.name],
        )?;
        let updated = get_institution(&tx, id, lang)?;
        tx.commit()?;
        require(updated, "Institution")
    }
}

// =============================================================================
// TESTS
// =============================================================================
