//! Portfolio works and their categories.
//!
//! A work belongs to any number of categories through `work_category`. The
//! listing query yields one row per (work, category) pair; rows are folded
//! back into one [`WorkRead`] per work.

use super::{Store, ensure_language, exists, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{CategoryCreate, CategoryRead, WorkCreate, WorkRead};
use crate::{Result, StoreError};
use rusqlite::{Connection, params};

// Categories without a name in the work's language are left out.
fn select_works(filter: &str) -> String {
    format!(
        "SELECT w.id, t.title, w.url, w.thumbnail_id, c.id, ct.name
         FROM work w
         JOIN work_translation t ON t.work_id = w.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         LEFT JOIN work_category wc ON wc.work_id = w.id
         LEFT JOIN category_translation ct
                ON ct.category_id = wc.category_id AND ct.language_id = l.id
         LEFT JOIN category c ON c.id = ct.category_id
         {filter}
         ORDER BY w.id, c.id"
    )
}

fn query_works(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<WorkRead>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut works: Vec<WorkRead> = Vec::new();

    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        if works.last().is_none_or(|w| w.id != id) {
            works.push(WorkRead {
                id,
                title: row.get(1)?,
                url: row.get(2)?,
                thumbnail_id: row.get(3)?,
                categories: Vec::new(),
            });
        }
        if let Some(category_id) = row.get::<_, Option<i64>>(4)? {
            if let Some(work) = works.last_mut() {
                work.categories.push(CategoryRead {
                    id: category_id,
                    name: row.get(5)?,
                });
            }
        }
    }
    Ok(works)
}

impl Store {
    // =========================================================================
    // Categories
    // =========================================================================

    pub fn create_category(
        &mut self,
        lang: &LanguageCode,
        payload: &CategoryCreate,
    ) -> Result<CategoryRead> {
        let tx = self.transaction()?;
        tx.execute("INSERT INTO category DEFAULT VALUES", [])?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "category_translation",
            "category_id",
            id,
            language_id,
            fields!["name" => payload.name],
        )?;
        tx.commit()?;
        Ok(CategoryRead {
            id,
            name: payload.name.clone(),
        })
    }

    // =========================================================================
    // Works
    // =========================================================================

    /// Works translated into `lang`, each with its categories named in `lang`.
    pub fn list_works(&self, lang: &LanguageCode) -> Result<Vec<WorkRead>> {
        query_works(&self.conn, &select_works(""), &[&lang.as_str()])
    }

    pub fn get_work(&self, id: i64, lang: &LanguageCode) -> Result<Option<WorkRead>> {
        let works = query_works(&self.conn, &select_works("WHERE w.id = ?2"), &[
            &lang.as_str(),
            &id,
        ])?;
        Ok(works.into_iter().next())
    }

    /// Create a work with its title in `lang`, linked to `category_ids`.
    pub fn create_work(&mut self, lang: &LanguageCode, payload: &WorkCreate) -> Result<WorkRead> {
        let tx = self.transaction()?;
        if let Some(image_id) = payload.thumbnail_id {
            if !exists(&tx, "image", image_id)? {
                return Err(StoreError::Validation(format!(
                    "image {image_id} does not exist"
                )));
            }
        }
        for category_id in &payload.category_ids {
            if !exists(&tx, "category", *category_id)? {
                return Err(StoreError::Validation(format!(
                    "category {category_id} does not exist"
                )));
            }
        }

        tx.execute(
            "INSERT INTO work (url, thumbnail_id) VALUES (?1, ?2)",
            params![payload.url, payload.thumbnail_id],
        )?;
        let id = tx.last_insert_rowid();
        for category_id in &payload.category_ids {
            tx.execute(
                "INSERT OR IGNORE INTO work_category (work_id, category_id) VALUES (?1, ?2)",
                params![id, category_id],
            )?;
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "work_translation",
            "work_id",
            id,
            language_id,
            fields!["title" => payload.title],
        )?;
        let created = query_works(&tx, &select_works("WHERE w.id = ?2"), &[&lang.as_str(), &id])?;
        tx.commit()?;
        require(created.into_iter().next(), "Work")
    }
}

// =============================================================================
// TESTS
// =============================================================================
