//! Social media links. These are the same in every language.

use super::{Store, require};
use crate::Result;
use crate::models::{SocialMediaCreate, SocialMediaRead};
use rusqlite::{OptionalExtension, Row, params};

fn social_media_from_row(row: &Row<'_>) -> rusqlite::Result<SocialMediaRead> {
    Ok(SocialMediaRead {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        color: row.get(3)?,
        path: row.get(4)?,
    })
}

impl Store {
    pub fn list_social_media(&self) -> Result<Vec<SocialMediaRead>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, url, color, path FROM social_media ORDER BY id")?;
        let rows = stmt.query_map([], social_media_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_social_media(&self, id: i64) -> Result<Option<SocialMediaRead>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, url, color, path FROM social_media WHERE id = ?1",
                [id],
                social_media_from_row,
            )
            .optional()?)
    }

    pub fn create_social_media(&mut self, payload: &SocialMediaCreate) -> Result<SocialMediaRead> {
        self.conn.execute(
            "INSERT INTO social_media (name, url, color, path) VALUES (?1, ?2, ?3, ?4)",
            params![payload.name, payload.url, payload.color, payload.path],
        )?;
        let id = self.conn.last_insert_rowid();
        require(self.get_social_media(id)?, "Social media")
    }
}
