//! Education entries with their localized course and university name.

use super::{INSTITUTION_COLUMNS, Store, ensure_language, exists, institution_from_row, require, upsert_translation};
use crate::i18n::LanguageCode;
use crate::models::{EducationCreate, EducationRead, EducationTranslation};
use crate::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn select_educations(filter: &str) -> String {
    format!(
        "SELECT e.id, e.degree, e.grade, e.start_date, e.end_date,
                t.course_of_study, t.description,
                {INSTITUTION_COLUMNS}
         FROM education e
         JOIN education_translation t ON t.education_id = e.id
         JOIN language l ON l.id = t.language_id AND l.iso639_1 = ?1
         LEFT JOIN institution i ON i.id = e.institution_id
         LEFT JOIN institution_translation it
                ON it.institution_id = i.id AND it.language_id = l.id
         LEFT JOIN address a ON a.id = i.address_id
         {filter}
         ORDER BY e.id"
    )
}

fn education_from_row(row: &Row<'_>) -> rusqlite::Result<EducationRead> {
    Ok(EducationRead {
        id: row.get(0)?,
        degree: row.get(1)?,
        grade: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        course_of_study: row.get(5)?,
        description: row.get(6)?,
        university: institution_from_row(row, 7)?,
    })
}

fn get_education(conn: &Connection, id: i64, lang: &LanguageCode) -> Result<Option<EducationRead>> {
    let sql = select_educations("WHERE e.id = ?2");
    Ok(conn
        .query_row(&sql, params![lang.as_str(), id], education_from_row)
        .optional()?)
}

fn check_institution(conn: &Connection, institution_id: Option<i64>) -> Result<()> {
    match institution_id {
        Some(id) if !exists(conn, "institution", id)? => Err(StoreError::Validation(format!(
            "institution {id} does not exist"
        ))),
        _ => Ok(()),
    }
}

impl Store {
    /// Education entries with a translation in `lang`.
    pub fn list_educations(&self, lang: &LanguageCode) -> Result<Vec<EducationRead>> {
        let sql = select_educations("");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([lang.as_str()], education_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_education(&self, id: i64, lang: &LanguageCode) -> Result<Option<EducationRead>> {
        get_education(&self.conn, id, lang)
    }

    /// Create an education entry with its first translation in `lang`.
    pub fn create_education(
        &mut self,
        lang: &LanguageCode,
        payload: &EducationCreate,
    ) -> Result<EducationRead> {
        let tx = self.transaction()?;
        check_institution(&tx, payload.institution_id)?;
        tx.execute(
            "INSERT INTO education (start_date, end_date, degree, grade, institution_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                payload.start_date,
                payload.end_date,
                payload.degree,
                payload.grade,
                payload.institution_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "education_translation",
            "education_id",
            id,
            language_id,
            fields![
                "course_of_study" => payload.course_of_study,
                "description" => payload.description,
            ],
        )?;
        let created = get_education(&tx, id, lang)?;
        tx.commit()?;
        require(created, "Education")
    }

    /// Set the localized fields of education `id` in `lang`.
    pub fn upsert_education_translation(
        &mut self,
        id: i64,
        lang: &LanguageCode,
        payload: &EducationTranslation,
    ) -> Result<EducationRead> {
        let tx = self.transaction()?;
        if !exists(&tx, "education", id)? {
            return Err(StoreError::NotFound("Education"));
        }
        let language_id = ensure_language(&tx, lang)?;
        upsert_translation(
            &tx,
            "education_translation",
            "education_id",
            id,
            language_id,
            fields![
                "course_of_study" => payload.course_of_study,
                "description" => payload.description,
            ],
        )?;
        let updated = get_education(&tx, id, lang)?;
        tx.commit()?;
        require(updated, "Education")
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstitutionCreate, InstitutionTranslation};
    use chrono::NaiveDate;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse(s).unwrap()
    }

    fn bachelor(institution_id: Option<i64>) -> EducationCreate {
        EducationCreate {
            start_date: NaiveDate::from_ymd_opt(2014, 10, 1),
            end_date: NaiveDate::from_ymd_opt(2018, 3, 31),
            degree: Some("B.Sc.".into()),
            grade: Some(1.7),
            institution_id,
            course_of_study: Some("Wirtschaftsinformatik".into()),
            description: Some("Schwerpunkt Datenbanken".into()),
        }
    }

    #[test]
    fn create_and_read_back_with_university() {
        let mut store = Store::open_in_memory().unwrap();
        let de = code("de");
        let uni = store
            .create_institution(&de, &InstitutionCreate {
                name: Some("Hochschule".into()),
                address_id: None,
            })
            .unwrap();

        let edu = store.create_education(&de, &bachelor(Some(uni.id))).unwrap();
        assert_eq!(edu.course_of_study.as_deref(), Some("Wirtschaftsinformatik"));
        assert_eq!(edu.start_date, NaiveDate::from_ymd_opt(2014, 10, 1));
        let university = edu.university.unwrap();
        assert_eq!(university.name.as_deref(), Some("Hochschule"));
        assert!(university.address.is_none());
    }

    #[test]
    fn education_without_institution_has_no_university() {
        let mut store = Store::open_in_memory().unwrap();
        let edu = store.create_education(&code("en"), &bachelor(None)).unwrap();
        assert!(edu.university.is_none());
        assert_eq!(store.list_educations(&code("en")).unwrap().len(), 1);
    }

    #[test]
    fn university_without_translation_is_kept_unnamed() {
        let mut store = Store::open_in_memory().unwrap();
        let uni = store
            .create_institution(&code("de"), &InstitutionCreate {
                name: Some("Hochschule".into()),
                address_id: None,
            })
            .unwrap();
        let edu = store.create_education(&code("en"), &bachelor(Some(uni.id))).unwrap();

        let listed = store.list_educations(&code("en")).unwrap();
        assert_eq!(listed.len(), 1);
        let university = listed[0].university.clone().unwrap();
        assert_eq!(university.id, uni.id);
        assert!(university.name.is_none());

        store
            .upsert_institution_translation(uni.id, &code("en"), &InstitutionTranslation {
                name: Some("University".into()),
            })
            .unwrap();
        let named = store.get_education(edu.id, &code("en")).unwrap().unwrap();
        assert_eq!(named.university.unwrap().name.as_deref(), Some("University"));
    }

    #[test]
    fn education_is_invisible_in_other_languages() {
        let mut store = Store::open_in_memory().unwrap();
        let edu = store.create_education(&code("de"), &bachelor(None)).unwrap();
        assert!(store.get_education(edu.id, &code("en")).unwrap().is_none());

        store
            .upsert_education_translation(edu.id, &code("en"), &EducationTranslation {
                course_of_study: Some("Information Systems".into()),
                description: None,
            })
            .unwrap();
        let en = store.get_education(edu.id, &code("en")).unwrap().unwrap();
        assert_eq!(en.course_of_study.as_deref(), Some("Information Systems"));
        assert_eq!(en.degree.as_deref(), Some("B.Sc."));
    }

    #[test]
    fn unknown_institution_rolls_back() {
        let mut store = Store::open_in_memory().unwrap();
        let err = store.create_education(&code("en"), &bachelor(Some(7))).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.counts().unwrap().get("education"), 0);
    }
}
