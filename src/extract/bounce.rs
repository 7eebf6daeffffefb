//! Post-action bounce target sanitization
//!
//! Login and similar forms carry an optional `sourceurl` telling the service
//! where to send the user afterwards. An attacker who controls that value
//! controls a redirect, so anything that is not provably same-origin is
//! dropped. Dropping is always soft: a bad bounce target never fails the
//! surrounding extraction.

use once_cell::sync::Lazy;
use tracing::{debug, warn};
use url::{ParseError, Url};

// Resolution base for relative references; only its host matters
static BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://bounce.invalid/").expect("invalid bounce base URL"));

/// Reduce an untrusted bounce URL to a same-origin-safe relative path
///
/// Host-bearing URLs (absolute or protocol-relative) come back empty, as do
/// opaque schemes and anything unparsable. Otherwise the result is the path
/// component alone, query and fragment dropped.
pub fn sanitize_bounce(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    match Url::parse(raw) {
        Ok(parsed) => {
            if parsed.has_host() {
                debug!(source = raw, "discarding host-bearing bounce target");
                String::new()
            } else if parsed.cannot_be_a_base() {
                // Opaque content ("javascript:...", "data:...") is not a path
                debug!(source = raw, "discarding opaque bounce target");
                String::new()
            } else {
                parsed.path().to_string()
            }
        }
        Err(ParseError::RelativeUrlWithoutBase) => match BASE.join(raw) {
            // The host comparison also catches protocol-relative references
            // and backslash tricks that resolve off-origin
            Ok(resolved) if resolved.host_str() == BASE.host_str() => {
                if raw.starts_with('?') || raw.starts_with('#') {
                    // A bare query/fragment reference carries no path of its own
                    String::new()
                } else {
                    resolved.path().to_string()
                }
            }
            Ok(_) => {
                debug!(source = raw, "discarding bounce target that resolves off-origin");
                String::new()
            }
            Err(err) => {
                warn!(source = raw, error = %err, "failed to resolve bounce target");
                String::new()
            }
        },
        Err(err) => {
            warn!(source = raw, error = %err, "failed to parse bounce target");
            String::new()
        }
    }
}
