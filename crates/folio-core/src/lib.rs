//! # Folio Core
//!
//! Localized content store for the Folio portfolio backend.
//!
//! Every piece of public content (education, experience, expertise,
//! institutions, pages, personal details, work items) lives in a base table
//! plus a translation table keyed by language. Reads join the translation row
//! for the requested language; writes create the base row and its first
//! translation in one transaction.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────┐   Accept-Language   ┌──────────────┐
//! │   i18n       │ ──────────────────► │  LanguageCode│
//! └──────────────┘                     └──────┬───────┘
//!                                             │
//! ┌──────────────┐  payloads / reads   ┌──────▼───────┐
//! │   models     │ ◄─────────────────► │    Store     │
//! └──────────────┘                     │  (SQLite)    │
//!                                      └──────────────┘
//! ```
//!
//! This crate is synchronous. The server in `apps/folio` moves store calls
//! onto blocking threads.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod error;
pub mod i18n;
pub mod models;
pub mod schema;
pub mod store;
pub mod validation;

pub use error::StoreError;
pub use i18n::{DEFAULT_LANGUAGE, LanguageCode, negotiate};
pub use models::*;
pub use store::{Store, TableCounts};
pub use validation::{ContactSubmission, validate_email};

/// Result alias used by every store operation.
pub type Result<T> = std::result::Result<T, StoreError>;
