//! # Models
//!
//! Read models returned by the store and write payloads accepted by it.
//!
//! Read models carry the localized fields already resolved for one language.
//! Apart from `id`, every field is optional: content is curated by hand and
//! partially filled records are normal.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// LANGUAGE & ADDRESS
// =============================================================================

/// A registered content language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRead {
    pub id: i64,
    pub name: Option<String>,
    pub iso639_1: String,
}

/// Payload for registering a language explicitly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LanguageCreate {
    pub iso639_1: String,
    pub name: Option<String>,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRead {
    pub id: i64,
    pub street: Option<String>,
    pub number: Option<String>,
    pub zip: Option<i64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddressCreate {
    pub street: Option<String>,
    pub number: Option<String>,
    pub zip: Option<i64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

// =============================================================================
// INSTITUTION
// =============================================================================

/// A university or company, with its name in the requested language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRead {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<AddressRead>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InstitutionCreate {
    pub name: Option<String>,
    pub address_id: Option<i64>,
}

/// Localized fields of an institution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InstitutionTranslation {
    pub name: Option<String>,
}

// =============================================================================
// EDUCATION
// =============================================================================

/// An educational qualification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRead {
    pub id: i64,
    pub degree: Option<String>,
    pub grade: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub course_of_study: Option<String>,
    pub description: Option<String>,
    pub university: Option<InstitutionRead>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EducationCreate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub degree: Option<String>,
    pub grade: Option<f64>,
    pub institution_id: Option<i64>,
    pub course_of_study: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EducationTranslation {
    pub course_of_study: Option<String>,
    pub description: Option<String>,
}

// =============================================================================
// EXPERIENCE
// =============================================================================

/// A professional position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRead {
    pub id: i64,
    pub title: Option<String>,
    pub extract: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub company: Option<InstitutionRead>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExperienceCreate {
    pub url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub institution_id: Option<i64>,
    pub title: Option<String>,
    pub extract: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExperienceTranslation {
    pub title: Option<String>,
    pub extract: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
}

// =============================================================================
// EXPERTISE
// =============================================================================

/// A skill or area of knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertiseRead {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExpertiseCreate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExpertiseTranslation {
    pub title: Option<String>,
    pub description: Option<String>,
}

// =============================================================================
// PAGE
// =============================================================================

/// A generic content page addressed by its technical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRead {
    pub id: i64,
    pub tech_key: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub html: Option<String>,
    pub creation_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageCreate {
    pub tech_key: String,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageTranslation {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub html: Option<String>,
}

// =============================================================================
// PERSONAL DETAILS & INFORMATION
// =============================================================================

/// Fixed profile attributes of the site owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetailsRead {
    pub id: i64,
    pub name: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub profile_picture_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonalDetailsCreate {
    pub name: Option<String>,
    pub profile_picture_id: Option<i64>,
    pub position: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
}

/// A short label/value fact (location, email, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInformationRead {
    pub id: i64,
    pub label: Option<String>,
    pub value: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonalInformationCreate {
    pub label: Option<String>,
    pub value: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonalInformationTranslation {
    pub label: Option<String>,
    pub value: Option<String>,
}

// =============================================================================
// SOCIAL MEDIA
// =============================================================================

/// A link to a social profile. Not localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaRead {
    pub id: i64,
    pub name: Option<String>,
    pub url: Option<String>,
    pub color: Option<String>,
    /// SVG path data of the icon.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SocialMediaCreate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub color: Option<String>,
    pub path: Option<String>,
}

// =============================================================================
// WORK & CATEGORY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRead {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CategoryCreate {
    pub name: Option<String>,
}

/// A portfolio item with its localized title and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRead {
    pub id: i64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumbnail_id: Option<i64>,
    pub categories: Vec<CategoryRead>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkCreate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumbnail_id: Option<i64>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

// =============================================================================
// CONTACT & IMAGE
// =============================================================================

/// A stored contact inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRead {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub sending_date: Option<NaiveDateTime>,
    pub send: bool,
    /// Name of the language the inquiry was written in.
    pub lang: Option<String>,
}

/// An image file registered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRead {
    pub id: i64,
    pub filename: String,
    pub filepath: String,
}

// =============================================================================
// TESTS
// =============================================================================
