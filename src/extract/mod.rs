//! Field, path, and composite extractors
//!
//! This is the chokepoint that turns untrusted request data into validated
//! domain values. Field extractors handle one form/query field each; the path
//! extractor resolves the owner/database pair from the URL; composites chain
//! them into the shapes page handlers need, short-circuiting on the first
//! failure.

pub mod bounce;
pub mod composite;
pub mod fields;
pub mod path;

pub use bounce::sanitize_bounce;
pub use composite::{
    LoginForm, TableTarget, UserDatabaseVersion, UserFolderDatabase, VersionedTableTarget,
    VersionedTarget,
};
