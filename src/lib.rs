//! # dbhaven-input
//!
//! Request parameter extraction and validation for the dbhaven database
//! hosting service.
//!
//! Every inbound request carries untrusted data: URL path segments naming an
//! owner and database, form fields for credentials and flags, optional
//! version numbers. This crate is the single chokepoint that turns that data
//! into validated, strongly-typed values before any business logic sees it.
//! Two concrete gaps are closed here: identifier injection (names that end up
//! in storage paths and queries) and open redirect (a caller-supplied
//! post-login bounce URL).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dbhaven_input::prelude::*;
//!
//! async fn view_table(input: RequestInput) -> Result<Json<Page>, InputError> {
//!     let rules = StandardRules::default();
//!     // owner/database from the path, table and version from the form,
//!     // short-circuiting on the first invalid field
//!     let target = composite::versioned_table_target(&input, &rules, 0)?;
//!     render(target).await
//! }
//! ```
//!
//! Extraction is stateless and request-scoped: a [`request::RequestInput`] is
//! parsed once per request, and every read from it afterwards is pure, so
//! repeated extraction always yields identical results. Validator rejections
//! are logged with their internal detail and surfaced to callers only as
//! generic [`error::InputError`] kinds.

pub mod error;
pub mod extract;
pub mod request;
pub mod rules;

pub use extract::composite;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::error::InputError;
    pub use crate::extract::{
        LoginForm, TableTarget, UserDatabaseVersion, UserFolderDatabase, VersionedTableTarget,
        VersionedTarget, composite, sanitize_bounce,
    };
    pub use crate::request::RequestInput;
    pub use crate::rules::{IdentifierRules, RulesConfig, StandardRules};
}
