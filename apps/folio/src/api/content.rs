//! Handlers for the localized content entities.

use super::AppState;
use super::error::{ApiResult, found};
use super::extract::{Admin, Lang, Localized, Param, Payload};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use folio_core::{
    AddressCreate, AddressRead, CategoryCreate, CategoryRead, EducationCreate, EducationRead,
    EducationTranslation, ExperienceCreate, ExperienceRead, ExperienceTranslation,
    ExpertiseCreate, ExpertiseRead, ExpertiseTranslation, InstitutionCreate, InstitutionRead,
    InstitutionTranslation, PageCreate, PageRead, PageTranslation, PersonalDetailsCreate,
    PersonalDetailsRead, PersonalInformationCreate, PersonalInformationRead,
    PersonalInformationTranslation, WorkCreate, WorkRead,
};
use tracing::info;

// =============================================================================
// ADDRESS & INSTITUTION
// =============================================================================

pub async fn create_address(
    _admin: Admin,
    State(state): State<AppState>,
    Payload(payload): Payload<AddressCreate>,
) -> ApiResult<(StatusCode, Json<AddressRead>)> {
    let created = state.db.call(move |s| s.create_address(&payload)).await?;
    info!(id = created.id, "address created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_institutions(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<InstitutionRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_institutions(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_institution(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<InstitutionRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_institution(id, &code)).await?;
    Ok(lang.respond(found(item, "Institution")?))
}

pub async fn create_institution(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<InstitutionCreate>,
) -> ApiResult<Localized<InstitutionRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_institution(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "institution created");
    Ok(lang.created(created))
}

pub async fn update_institution(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
    Payload(payload): Payload<InstitutionTranslation>,
) -> ApiResult<Localized<InstitutionRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_institution_translation(id, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// EDUCATION
// =============================================================================

pub async fn list_educations(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<EducationRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_educations(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_education(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<EducationRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_education(id, &code)).await?;
    Ok(lang.respond(found(item, "Education")?))
}

pub async fn create_education(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<EducationCreate>,
) -> ApiResult<Localized<EducationRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_education(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "education created");
    Ok(lang.created(created))
}

pub async fn update_education(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
    Payload(payload): Payload<EducationTranslation>,
) -> ApiResult<Localized<EducationRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_education_translation(id, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// EXPERIENCE
// =============================================================================

pub async fn list_experiences(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<ExperienceRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_experiences(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_experience(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<ExperienceRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_experience(id, &code)).await?;
    Ok(lang.respond(found(item, "Experience")?))
}

pub async fn create_experience(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<ExperienceCreate>,
) -> ApiResult<Localized<ExperienceRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_experience(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "experience created");
    Ok(lang.created(created))
}

pub async fn update_experience(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
    Payload(payload): Payload<ExperienceTranslation>,
) -> ApiResult<Localized<ExperienceRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_experience_translation(id, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// EXPERTISE
// =============================================================================

pub async fn list_expertises(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<ExpertiseRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_expertises(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_expertise(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<ExpertiseRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_expertise(id, &code)).await?;
    Ok(lang.respond(found(item, "Expertise")?))
}

pub async fn create_expertise(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<ExpertiseCreate>,
) -> ApiResult<Localized<ExpertiseRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_expertise(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "expertise created");
    Ok(lang.created(created))
}

pub async fn update_expertise(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
    Payload(payload): Payload<ExpertiseTranslation>,
) -> ApiResult<Localized<ExpertiseRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_expertise_translation(id, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// PAGE
// =============================================================================

pub async fn list_pages(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<PageRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_pages(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_page(
    State(state): State<AppState>,
    lang: Lang,
    Param(tech_key): Param<String>,
) -> ApiResult<Localized<PageRead>> {
    let code = lang.code();
    let item = state
        .db
        .call(move |s| s.get_page(&tech_key, &code))
        .await?;
    Ok(lang.respond(found(item, "Page")?))
}

pub async fn create_page(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<PageCreate>,
) -> ApiResult<Localized<PageRead>> {
    let code = lang.code();
    let created = state.db.call(move |s| s.create_page(&code, &payload)).await?;
    info!(id = created.id, tech_key = ?created.tech_key, lang = %lang.0, "page created");
    Ok(lang.created(created))
}

pub async fn update_page(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(tech_key): Param<String>,
    Payload(payload): Payload<PageTranslation>,
) -> ApiResult<Localized<PageRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_page_translation(&tech_key, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// PERSONAL DETAILS & INFORMATION
// =============================================================================

pub async fn get_personal_details(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<PersonalDetailsRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_personal_details(&code)).await?;
    Ok(lang.respond(found(item, "Personal details")?))
}

pub async fn create_personal_details(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<PersonalDetailsCreate>,
) -> ApiResult<Localized<PersonalDetailsRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_personal_details(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "personal details created");
    Ok(lang.created(created))
}

pub async fn list_personal_information(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<PersonalInformationRead>>> {
    let code = lang.code();
    let items = state
        .db
        .call(move |s| s.list_personal_information(&code))
        .await?;
    Ok(lang.respond(items))
}

pub async fn get_personal_information(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<PersonalInformationRead>> {
    let code = lang.code();
    let item = state
        .db
        .call(move |s| s.get_personal_information(id, &code))
        .await?;
    Ok(lang.respond(found(item, "Personal information")?))
}

pub async fn create_personal_information(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<PersonalInformationCreate>,
) -> ApiResult<Localized<PersonalInformationRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_personal_information(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "personal information created");
    Ok(lang.created(created))
}

pub async fn update_personal_information(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
    Payload(payload): Payload<PersonalInformationTranslation>,
) -> ApiResult<Localized<PersonalInformationRead>> {
    let code = lang.code();
    let updated = state
        .db
        .call(move |s| s.upsert_personal_information_translation(id, &code, &payload))
        .await?;
    Ok(lang.respond(updated))
}

// =============================================================================
// WORK & CATEGORY
// =============================================================================

pub async fn list_works(
    State(state): State<AppState>,
    lang: Lang,
) -> ApiResult<Localized<Vec<WorkRead>>> {
    let code = lang.code();
    let items = state.db.call(move |s| s.list_works(&code)).await?;
    Ok(lang.respond(items))
}

pub async fn get_work(
    State(state): State<AppState>,
    lang: Lang,
    Param(id): Param<i64>,
) -> ApiResult<Localized<WorkRead>> {
    let code = lang.code();
    let item = state.db.call(move |s| s.get_work(id, &code)).await?;
    Ok(lang.respond(found(item, "Work")?))
}

pub async fn create_work(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<WorkCreate>,
) -> ApiResult<Localized<WorkRead>> {
    let code = lang.code();
    let created = state.db.call(move |s| s.create_work(&code, &payload)).await?;
    info!(id = created.id, categories = created.categories.len(), lang = %lang.0, "work created");
    Ok(lang.created(created))
}

pub async fn create_category(
    _admin: Admin,
    State(state): State<AppState>,
    lang: Lang,
    Payload(payload): Payload<CategoryCreate>,
) -> ApiResult<Localized<CategoryRead>> {
    let code = lang.code();
    let created = state
        .db
        .call(move |s| s.create_category(&code, &payload))
        .await?;
    info!(id = created.id, lang = %lang.0, "category created");
    Ok(lang.created(created))
}
