//! Contact inquiries and the image registry.

use super::{Store, language_id, require};
use crate::i18n::LanguageCode;
use crate::models::{ContactRead, ImageRead};
use crate::validation::ContactSubmission;
use crate::{Result, StoreError};
use chrono::Timelike;
use rusqlite::{OptionalExtension, Row, params};

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactRead> {
    Ok(ContactRead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        message: row.get(3)?,
        creation_date: row.get(4)?,
        sending_date: row.get(5)?,
        send: row.get(6)?,
        lang: row.get(7)?,
    })
}

fn image_from_row(row: &Row<'_>) -> rusqlite::Result<ImageRead> {
    Ok(ImageRead {
        id: row.get(0)?,
        filename: row.get(1)?,
        filepath: row.get(2)?,
    })
}

impl Store {
    // =========================================================================
    // Contact
    // =========================================================================

    /// Store a validated inquiry written in `lang`.
    ///
    /// Unlike content creation, the language is never registered here: an
    /// unknown language is rejected with [`StoreError::LanguageNotFound`].
    pub fn save_contact(
        &mut self,
        submission: &ContactSubmission,
        lang: &LanguageCode,
    ) -> Result<ContactRead> {
        submission.validate()?;
        let language_id = language_id(&self.conn, lang)?
            .ok_or_else(|| StoreError::LanguageNotFound(lang.to_string()))?;

        // Second precision, naive UTC.
        let now = chrono::Utc::now().naive_utc();
        let now = now.with_nanosecond(0).unwrap_or(now);
        self.conn.execute(
            "INSERT INTO contact (creation_date, send, name, email, message, language_id)
             VALUES (?1, 0, ?2, ?3, ?4, ?5)",
            params![
                now,
                submission.name.as_deref().map(str::trim),
                submission.email.as_deref().map(str::trim),
                submission.message,
                language_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        require(self.get_contact(id)?, "Contact")
    }

    pub fn get_contact(&self, id: i64) -> Result<Option<ContactRead>> {
        Ok(self
            .conn
            .query_row(
                "SELECT c.id, c.name, c.email, c.message, c.creation_date, c.sending_date,
                        c.send, l.name
                 FROM contact c
                 LEFT JOIN language l ON l.id = c.language_id
                 WHERE c.id = ?1",
                [id],
                contact_from_row,
            )
            .optional()?)
    }

    /// All inquiries, newest first.
    pub fn list_contacts(&self) -> Result<Vec<ContactRead>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, c.email, c.message, c.creation_date, c.sending_date,
                    c.send, l.name
             FROM contact c
             LEFT JOIN language l ON l.id = c.language_id
             ORDER BY c.id DESC",
        )?;
        let rows = stmt.query_map([], contact_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Record an image file. `filename` is unique.
    pub fn register_image(&mut self, filename: &str, filepath: &str) -> Result<ImageRead> {
        if filename.trim().is_empty() || filepath.trim().is_empty() {
            return Err(StoreError::Validation(
                "filename and filepath must not be empty".into(),
            ));
        }
        self.conn
            .execute(
                "INSERT INTO image (filename, filepath) VALUES (?1, ?2)",
                params![filename, filepath],
            )
            .map_err(|err| match StoreError::from(err) {
                StoreError::Conflict(_) => {
                    StoreError::Conflict(format!("image '{filename}' already registered"))
                }
                other => other,
            })?;
        let id = self.conn.last_insert_rowid();
        require(self.get_image(id)?, "Image")
    }

    pub fn get_image(&self, id: i64) -> Result<Option<ImageRead>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, filename, filepath FROM image WHERE id = ?1",
                [id],
                image_from_row,
            )
            .optional()?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
