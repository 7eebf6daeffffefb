//! Parsed per-request input
//!
//! [`RequestInput`] is the one place a request's query string and form body
//! get decoded. Construction is the explicit "ensure parsed" step; everything
//! downstream reads from the already-decoded pairs, so extracting the same
//! field twice always yields the same answer and never re-reads the body.

use std::collections::HashMap;

use axum::body::{Bytes, to_bytes};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use tracing::warn;
use url::form_urlencoded;

use crate::error::InputError;

/// Cap on the decoded form body; anything larger is rejected outright
pub const MAX_FORM_BODY_SIZE: usize = 1024 * 1024;

/// A request's URL path plus its decoded query and form-body fields
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    path: String,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
}

impl RequestInput {
    /// Decode a request's query string and urlencoded body
    ///
    /// Duplicate keys keep the first occurrence. The body must be valid UTF-8
    /// and under [`MAX_FORM_BODY_SIZE`]; anything else is `MalformedBody`.
    pub fn parse(path: impl Into<String>, query: &str, body: &[u8]) -> Result<Self, InputError> {
        if body.len() > MAX_FORM_BODY_SIZE {
            warn!(size = body.len(), "form body exceeds size cap");
            return Err(InputError::MalformedBody);
        }
        if let Err(err) = std::str::from_utf8(body) {
            warn!(error = %err, "form body is not valid UTF-8");
            return Err(InputError::MalformedBody);
        }

        let mut query_pairs = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            query_pairs
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        let mut form_pairs = HashMap::new();
        for (key, value) in form_urlencoded::parse(body) {
            form_pairs
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            path: path.into(),
            query: query_pairs,
            form: form_pairs,
        })
    }

    /// The raw URL path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// A field from the form body or, failing that, the query string (trimmed)
    ///
    /// When a field appears in both places, the body value wins.
    pub fn form_value(&self, name: &str) -> &str {
        self.form
            .get(name)
            .or_else(|| self.query.get(name))
            .map(|value| value.trim())
            .unwrap_or("")
    }

    /// A field from the form body only (trimmed)
    pub fn post_value(&self, name: &str) -> &str {
        self.form.get(name).map(|value| value.trim()).unwrap_or("")
    }

    /// A field from the form body, byte-exact
    ///
    /// Passwords and redirect hints go through here: trimming either would
    /// change what the user actually submitted.
    pub fn post_value_raw(&self, name: &str) -> &str {
        self.form.get(name).map(String::as_str).unwrap_or("")
    }
}

impl<S> FromRequest<S> for RequestInput
where
    S: Send + Sync,
{
    type Rejection = InputError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let path = parts.uri.path().to_string();
        let query = parts.uri.query().unwrap_or("").to_string();

        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| {
                value
                    .trim_start()
                    .starts_with("application/x-www-form-urlencoded")
            });

        let body = if is_form {
            to_bytes(body, MAX_FORM_BODY_SIZE).await.map_err(|err| {
                warn!(error = %err, "failed to read form body");
                InputError::MalformedBody
            })?
        } else {
            Bytes::new()
        };

        Self::parse(path, &query, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === parse ===

    #[test]
    fn test_parse_decodes_query_and_body() {
        let input = RequestInput::parse("/alice/stats.db", "table=users", b"dbname=stats.db")
            .expect("should parse");
        assert_eq!(input.path(), "/alice/stats.db");
        assert_eq!(input.form_value("table"), "users");
        assert_eq!(input.post_value("dbname"), "stats.db");
    }

    #[test]
    fn test_parse_percent_decoding() {
        let input =
            RequestInput::parse("/", "", b"dbname=My%20Database&folder=%2Fprojects").expect("ok");
        assert_eq!(input.post_value("dbname"), "My Database");
        assert_eq!(input.post_value("folder"), "/projects");
    }

    #[test]
    fn test_parse_plus_decodes_to_space() {
        let input = RequestInput::parse("/", "", b"dbname=My+Database").expect("ok");
        assert_eq!(input.post_value("dbname"), "My Database");
    }

    #[test]
    fn test_parse_duplicate_keys_first_wins() {
        let input = RequestInput::parse("/", "version=1&version=2", b"table=a&table=b").expect("ok");
        assert_eq!(input.form_value("version"), "1");
        assert_eq!(input.form_value("table"), "a");
    }

    #[test]
    fn test_parse_rejects_non_utf8_body() {
        let result = RequestInput::parse("/", "", &[0x64, 0x62, 0xff, 0xfe]);
        assert_eq!(result.unwrap_err(), InputError::MalformedBody);
    }

    #[test]
    fn test_parse_rejects_oversized_body() {
        let body = vec![b'a'; MAX_FORM_BODY_SIZE + 1];
        let result = RequestInput::parse("/", "", &body);
        assert_eq!(result.unwrap_err(), InputError::MalformedBody);
    }

    // === accessors ===

    #[test]
    fn test_form_value_prefers_body_over_query() {
        let input = RequestInput::parse("/", "version=3", b"version=7").expect("ok");
        assert_eq!(input.form_value("version"), "7");
    }

    #[test]
    fn test_form_value_falls_back_to_query() {
        let input = RequestInput::parse("/", "table=users", b"").expect("ok");
        assert_eq!(input.form_value("table"), "users");
    }

    #[test]
    fn test_post_value_ignores_query() {
        let input = RequestInput::parse("/", "dbname=fromquery", b"").expect("ok");
        assert_eq!(input.post_value("dbname"), "");
        assert_eq!(input.form_value("dbname"), "fromquery");
    }

    #[test]
    fn test_values_are_trimmed_except_raw() {
        let input = RequestInput::parse("/", "", b"username=+alice+&pass=+secret+").expect("ok");
        assert_eq!(input.post_value("username"), "alice");
        assert_eq!(input.post_value_raw("pass"), " secret ");
    }

    #[test]
    fn test_absent_field_is_empty() {
        let input = RequestInput::parse("/", "", b"").expect("ok");
        assert_eq!(input.form_value("missing"), "");
        assert_eq!(input.post_value("missing"), "");
        assert_eq!(input.post_value_raw("missing"), "");
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let input = RequestInput::parse("/a/b", "version=2", b"username=alice").expect("ok");
        assert_eq!(input.post_value("username"), input.post_value("username"));
        assert_eq!(input.form_value("version"), input.form_value("version"));
    }
}
