//! Owner/database resolution from the URL path
//!
//! Routes are mounted under differing prefixes, so callers say how many
//! leading path segments to skip; the two segments after the skipped prefix
//! are always owner and database.

use tracing::warn;

use crate::error::InputError;
use crate::request::RequestInput;
use crate::rules::IdentifierRules;

/// Resolve the owner/database pair from the request path
///
/// `skip` is the number of leading path segments to ignore. The accepted
/// strings are returned raw, without re-casing.
pub fn owner_database<R: IdentifierRules>(
    input: &RequestInput,
    rules: &R,
    skip: usize,
) -> Result<(String, String), InputError> {
    // A leading slash yields an empty first segment, hence skip + 3
    let segments: Vec<&str> = input.path().split('/').collect();
    if segments.len() < skip + 3 {
        warn!(path = input.path(), "URL path is missing the owner/database segments");
        return Err(InputError::MalformedUrl);
    }
    let owner = segments[skip + 1];
    let database = segments[skip + 2];

    if let Err(detail) = rules.validate_owner_database(owner, database) {
        warn!(detail = %detail, "owner/database pair failed validation");
        return Err(InputError::InvalidOwnerOrDatabase);
    }

    Ok((owner.to_string(), database.to_string()))
}
