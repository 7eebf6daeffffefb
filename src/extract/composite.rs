//! Composite extractors
//!
//! Each page handler needs a particular bundle of validated values. These
//! functions assemble the bundles from the field and path extractors in a
//! fixed order and stop at the first failure; there are no partial results.

use tracing::warn;

use crate::error::InputError;
use crate::extract::bounce::sanitize_bounce;
use crate::extract::{fields, path};
use crate::request::RequestInput;
use crate::rules::IdentifierRules;

/// An owner/database pair plus an optional table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTarget {
    pub owner: String,
    pub database: String,
    /// Empty when no specific table was requested
    pub table: String,
}

/// An owner/database pair plus optional table and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedTableTarget {
    pub owner: String,
    pub database: String,
    pub table: String,
    /// 0 means "latest"/unspecified
    pub version: usize,
}

/// An owner/database pair plus a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedTarget {
    pub owner: String,
    pub database: String,
    pub version: usize,
}

/// Form-supplied username, database, and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDatabaseVersion {
    pub username: String,
    pub database: String,
    pub version: usize,
}

/// Form-supplied username, folder, and database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFolderDatabase {
    pub username: String,
    pub folder: String,
    pub database: String,
}

/// A submitted credential pair with its sanitized bounce target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Same-origin relative path to redirect to afterwards; may be empty
    pub bounce: String,
}

/// Owner and database from the path, table from the form
pub fn table_target<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
    skip: usize,
) -> Result<TableTarget, InputError> {
    let (owner, database) = path::owner_database(input, rules, skip)?;
    let table = fields::table(input, rules)?;
    Ok(TableTarget {
        owner,
        database,
        table,
    })
}

/// Owner and database from the path, table and version from the form
pub fn versioned_table_target<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
    skip: usize,
) -> Result<VersionedTableTarget, InputError> {
    let (owner, database) = path::owner_database(input, rules, skip)?;
    let table = fields::table(input, rules)?;
    let version = fields::version(input)?;
    Ok(VersionedTableTarget {
        owner,
        database,
        table,
        version,
    })
}

/// Owner and database from the path, version from the form
pub fn versioned_target<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
    skip: usize,
) -> Result<VersionedTarget, InputError> {
    let (owner, database) = path::owner_database(input, rules, skip)?;
    let version = fields::version(input)?;
    Ok(VersionedTarget {
        owner,
        database,
        version,
    })
}

/// Username, database, and version, all from the form
pub fn user_database_version<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
) -> Result<UserDatabaseVersion, InputError> {
    let username = fields::username(input, rules)?;
    let database = fields::database(input, rules)?;
    let version = fields::version(input)?;
    Ok(UserDatabaseVersion {
        username,
        database,
        version,
    })
}

/// Username, folder, and database, all from the form
pub fn user_folder_database<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
) -> Result<UserFolderDatabase, InputError> {
    let username = fields::username(input, rules)?;
    let folder = fields::folder(input, rules)?;
    let database = fields::database(input, rules)?;
    Ok(UserFolderDatabase {
        username,
        folder,
        database,
    })
}

/// The login-shaped extraction
///
/// `Ok(None)` means no login was attempted (both credentials absent, as when
/// the login page is first rendered). Supplying one credential without the
/// other is always `MissingCredential`. The password is never run through
/// identifier rules and never trimmed; the only check is non-emptiness.
pub fn login<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
) -> Result<Option<LoginForm>, InputError> {
    let username = fields::username(input, rules)?;
    let password = input.post_value_raw("pass");

    if username.is_empty() && password.is_empty() {
        return Ok(None);
    }
    if username.is_empty() || password.is_empty() {
        warn!("login attempt with a missing credential");
        return Err(InputError::MissingCredential);
    }

    let bounce = sanitize_bounce(input.post_value_raw("sourceurl"));
    Ok(Some(LoginForm {
        username,
        password: password.to_string(),
        bounce,
    }))
}
