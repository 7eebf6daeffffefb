//! Single-field extractors
//!
//! One function per recognized form/query field. Identifier fields share the
//! same shape: absent means "not supplied" and is fine, present means the
//! value must pass its rule. The database name is the exception: it is always
//! handed to the rule set, so the rules decide whether empty is acceptable.
//! Validator rejection detail goes to the log, never to the caller.

use tracing::warn;

use crate::error::InputError;
use crate::request::RequestInput;
use crate::rules::IdentifierRules;

/// The account identifier, or empty when not supplied
pub fn username<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
) -> Result<String, InputError> {
    let name = input.post_value("username");
    if name.is_empty() {
        return Ok(String::new());
    }
    if let Err(detail) = rules.validate_username(name) {
        warn!(detail = %detail, "username failed validation");
        return Err(InputError::InvalidIdentifier { field: "username" });
    }
    Ok(name.to_string())
}

/// The database name
///
/// Required: unlike the other identifier fields there is no empty-means-absent
/// shortcut here.
pub fn database<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
) -> Result<String, InputError> {
    let name = input.post_value("dbname");
    if let Err(detail) = rules.validate_database(name) {
        warn!(detail = %detail, "database name failed validation");
        return Err(InputError::InvalidIdentifier { field: "database" });
    }
    Ok(name.to_string())
}

/// The storage folder path, or empty when not supplied
pub fn folder<R: IdentifierRules>(input: &RequestInput, rules: &R) -> Result<String, InputError> {
    let path = input.post_value("folder");
    if path.is_empty() {
        return Ok(String::new());
    }
    if let Err(detail) = rules.validate_folder(path) {
        warn!(detail = %detail, "folder failed validation");
        return Err(InputError::InvalidIdentifier { field: "folder" });
    }
    Ok(path.to_string())
}

/// The requested table name, or empty when not supplied
pub fn table<R: IdentifierRules>(input: &RequestInput, rules: &R) -> Result<String, InputError> {
    let name = input.form_value("table");
    if name.is_empty() {
        return Ok(String::new());
    }
    if let Err(detail) = rules.validate_table(name) {
        warn!(detail = %detail, "table name failed validation");
        return Err(InputError::InvalidIdentifier { field: "table" });
    }
    Ok(name.to_string())
}

/// The requested database version; 0 means "latest"/unspecified
pub fn version(input: &RequestInput) -> Result<usize, InputError> {
    let raw = input.form_value("version");
    if raw.is_empty() {
        return Ok(0);
    }
    // Strict base-10 parse: negatives, fractions, and overflow all fail
    raw.parse::<usize>().map_err(|err| {
        warn!(value = raw, error = %err, "version is not a non-negative integer");
        InputError::InvalidVersion
    })
}

/// The public/private flag
///
/// Absence is an error, not a default: callers must be able to tell "the user
/// chose false" apart from "the user chose nothing".
pub fn visibility(input: &RequestInput) -> Result<bool, InputError> {
    let raw = input.post_value("public");
    if raw.is_empty() {
        return Err(InputError::MissingVisibility);
    }
    raw.parse::<bool>().map_err(|err| {
        warn!(value = raw, error = %err, "public flag is not a boolean literal");
        InputError::InvalidVisibility
    })
}
