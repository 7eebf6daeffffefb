//! Identifier validation rules
//!
//! The extraction layer never hard-codes what a valid owner, database, folder,
//! table, or username looks like. It goes through the [`IdentifierRules`]
//! capability, so the rule set can be swapped out (and faked in tests) without
//! touching the extractors. [`StandardRules`] is the shipped implementation.
//!
//! Rule rejections return the internal detail as a `String`. That detail is
//! for server-side logs only; extractors convert it into a generic
//! [`InputError`](crate::error::InputError) kind before anything reaches a
//! caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum username length accepted by the default rules
pub const MAX_USERNAME_LENGTH: usize = 63;

/// Maximum database name length accepted by the default rules
pub const MAX_DATABASE_LENGTH: usize = 256;

/// Maximum folder path length accepted by the default rules
pub const MAX_FOLDER_LENGTH: usize = 1024;

/// Maximum table name length accepted by the default rules
pub const MAX_TABLE_LENGTH: usize = 255;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("invalid username regex"));

static DATABASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._ ()+-]*$").expect("invalid database regex"));

static FOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/$|^(/[A-Za-z0-9._-]+)+$").expect("invalid folder regex"));

/// The validation capability injected into every extractor
///
/// Implementations must be pure: same input, same answer, no side effects.
pub trait IdentifierRules: Send + Sync {
    /// Check a username / account identifier
    fn validate_username(&self, name: &str) -> Result<(), String>;

    /// Check a database name
    fn validate_database(&self, name: &str) -> Result<(), String>;

    /// Check a storage folder path
    fn validate_folder(&self, path: &str) -> Result<(), String>;

    /// Check a table name
    fn validate_table(&self, name: &str) -> Result<(), String>;

    /// Check an owner/database pair together
    ///
    /// This is where cross-field policy lives (reserved owner names and the
    /// like), beyond what the single-field rules enforce.
    fn validate_owner_database(&self, owner: &str, database: &str) -> Result<(), String>;
}

/// Tunable limits for [`StandardRules`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Maximum username length
    #[serde(default = "default_max_username")]
    pub max_username_length: usize,

    /// Maximum database name length
    #[serde(default = "default_max_database")]
    pub max_database_length: usize,

    /// Maximum folder path length
    #[serde(default = "default_max_folder")]
    pub max_folder_length: usize,

    /// Maximum table name length
    #[serde(default = "default_max_table")]
    pub max_table_length: usize,

    /// Owner names that can never appear in a URL, compared case-insensitively
    #[serde(default = "default_reserved_owners")]
    pub reserved_owners: Vec<String>,
}

fn default_max_username() -> usize {
    MAX_USERNAME_LENGTH
}

fn default_max_database() -> usize {
    MAX_DATABASE_LENGTH
}

fn default_max_folder() -> usize {
    MAX_FOLDER_LENGTH
}

fn default_max_table() -> usize {
    MAX_TABLE_LENGTH
}

fn default_reserved_owners() -> Vec<String> {
    ["admin", "api", "root", "system", "dbhaven"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_username_length: default_max_username(),
            max_database_length: default_max_database(),
            max_folder_length: default_max_folder(),
            max_table_length: default_max_table(),
            reserved_owners: default_reserved_owners(),
        }
    }
}

impl RulesConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// The shipped rule set
///
/// Each identifier domain gets its own grammar; in particular, table names are
/// not run through the database-name rule (their character sets differ).
#[derive(Debug, Clone, Default)]
pub struct StandardRules {
    config: RulesConfig,
}

impl StandardRules {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }
}

impl IdentifierRules for StandardRules {
    fn validate_username(&self, name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("username is empty".to_string());
        }
        if name.len() > self.config.max_username_length {
            return Err(format!(
                "username is {} bytes, maximum is {}",
                name.len(),
                self.config.max_username_length
            ));
        }
        if !USERNAME_RE.is_match(name) {
            return Err(format!("username '{}' contains invalid characters", name));
        }
        Ok(())
    }

    fn validate_database(&self, name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("database name is empty".to_string());
        }
        if name.len() > self.config.max_database_length {
            return Err(format!(
                "database name is {} bytes, maximum is {}",
                name.len(),
                self.config.max_database_length
            ));
        }
        if name.contains("..") {
            return Err(format!("database name '{}' contains '..'", name));
        }
        if !DATABASE_RE.is_match(name) {
            return Err(format!(
                "database name '{}' contains invalid characters",
                name
            ));
        }
        Ok(())
    }

    fn validate_folder(&self, path: &str) -> Result<(), String> {
        if path.is_empty() {
            return Err("folder path is empty".to_string());
        }
        if path.len() > self.config.max_folder_length {
            return Err(format!(
                "folder path is {} bytes, maximum is {}",
                path.len(),
                self.config.max_folder_length
            ));
        }
        if path.contains("..") {
            return Err(format!("folder path '{}' contains '..'", path));
        }
        if !FOLDER_RE.is_match(path) {
            return Err(format!("folder path '{}' is not a valid folder", path));
        }
        Ok(())
    }

    fn validate_table(&self, name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("table name is empty".to_string());
        }
        if name.len() > self.config.max_table_length {
            return Err(format!(
                "table name is {} bytes, maximum is {}",
                name.len(),
                self.config.max_table_length
            ));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(format!("table name '{}' contains control characters", name));
        }
        if name.contains(['"', '\'', '`', ';', '\\', '/']) {
            return Err(format!("table name '{}' contains invalid characters", name));
        }
        if name != name.trim() {
            return Err(format!(
                "table name '{}' has leading or trailing whitespace",
                name
            ));
        }
        Ok(())
    }

    fn validate_owner_database(&self, owner: &str, database: &str) -> Result<(), String> {
        self.validate_username(owner)
            .map_err(|detail| format!("owner rejected: {}", detail))?;
        if self
            .config
            .reserved_owners
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(owner))
        {
            return Err(format!("owner '{}' is a reserved name", owner));
        }
        self.validate_database(database)
            .map_err(|detail| format!("database rejected: {}", detail))
    }
}
