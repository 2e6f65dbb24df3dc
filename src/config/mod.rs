//! Pipeline configuration.
//!
//! Configuration is read from `~/.config/feedbricks/config.toml` unless a
//! path is given on the command line. If the default file doesn't exist, a
//! commented default configuration is created.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::format::{Item as FormatItem, StrftimeItems};
use serde::Deserialize;

use crate::domain::SortField;
use crate::network::ParseOptions;
use crate::pipeline::AggregateOptions;

pub const DEFAULT_MAX_ITEMS: i64 = 20;
pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d %Y, %-I:%M:%S %P";
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub networks: Vec<NetworkConfig>,
    pub secure: Security,
    pub max_items: i64,
    pub max_title_length: usize,
    pub max_body_length: usize,
    pub date_format: String,
    pub sort_direction: SortDirection,
    pub sort_key: SortKey,
    #[serde(alias = "randomize_display")]
    pub randomize: bool,
    pub randomize_max_items: Option<i64>,
    pub template: Option<String>,
    /// Upper bound on requests in flight at once.
    pub workers: usize,
    /// Per-request timeout; a slow network counts as failed.
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            networks: Vec::new(),
            secure: Security::Auto,
            max_items: DEFAULT_MAX_ITEMS,
            max_title_length: 50,
            max_body_length: 200,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            sort_direction: SortDirection::Desc,
            sort_key: SortKey::default(),
            randomize: false,
            randomize_max_items: None,
            template: None,
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/feedbricks/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedbricks").join("config.toml"))
    }

    /// Write the commented default config to `path`. Returns `false` if a
    /// file is already there.
    pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Created default config at {}", path.display());
        Ok(true)
    }

    /// Reject settings that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_items < 0 {
            return Err(ConfigError::Invalid(format!(
                "max_items must not be negative (got {})",
                self.max_items
            )));
        }
        if let Some(n) = self.randomize_max_items {
            if n < 0 {
                return Err(ConfigError::Invalid(format!(
                    "randomize_max_items must not be negative (got {})",
                    n
                )));
            }
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, FormatItem::Error)) {
            return Err(ConfigError::Invalid(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    pub fn aggregate_options(&self) -> Result<AggregateOptions, ConfigError> {
        self.validate()?;

        let max_items = to_count(self.max_items);
        Ok(AggregateOptions {
            max_items,
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
            randomize: self.randomize,
            randomize_max_items: self.randomize_max_items.map(to_count).unwrap_or(max_items),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_title_length: self.max_title_length,
            max_body_length: self.max_body_length,
            date_format: self.date_format.clone(),
        }
    }

    fn default_config_content() -> String {
        r##"# feedbricks configuration

# Scheme used for network URLs: "auto" (scheme-relative), true (https) or
# false (http).
secure = "auto"

# Display budget and text limits
max_items = 20
max_title_length = 50
max_body_length = 200

# chrono strftime pattern for the rendered date
date_format = "%A, %B %-d %Y, %-I:%M:%S %P"

# "desc"/"descending" or "asc"/"ascending"
sort_direction = "desc"

# Item field to sort on, or false to keep fetch order
sort_key = "rank_key"

# Shuffle the ranked top items and keep randomize_max_items of them
randomize = false
# randomize_max_items = 5

# Per-item display template; placeholders: title, body, link, author,
# source, date, image, network
# template = "[{{source}}] {{title}} ({{date}})"

# Fetching
workers = 10
timeout_secs = 10

[[networks]]
name = "rss"
url = "https://blog.rust-lang.org/feed.xml"

# [[networks]]
# name = "twitter"
# username = "rustlang"

# [[networks]]
# name = "facebook"
# page = "me"
# access_token = "..."
"##
        .to_string()
    }
}

fn to_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// One `[[networks]]` entry: the adapter name and its parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    #[serde(flatten)]
    pub params: BTreeMap<String, ParamValue>,
}

impl NetworkConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Scalar parameter value; rendered to text when building URLs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

/// Transport-security preference for generated URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "SecuritySetting")]
pub enum Security {
    /// Scheme-relative URL.
    #[default]
    Auto,
    ForceSecure,
    ForceInsecure,
}

impl Security {
    pub fn protocol(&self) -> &'static str {
        match self {
            Security::Auto => "",
            Security::ForceSecure => "https:",
            Security::ForceInsecure => "http:",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecuritySetting {
    Flag(bool),
    Mode(String),
}

impl TryFrom<SecuritySetting> for Security {
    type Error = String;

    fn try_from(setting: SecuritySetting) -> Result<Self, Self::Error> {
        match setting {
            SecuritySetting::Flag(true) => Ok(Security::ForceSecure),
            SecuritySetting::Flag(false) => Ok(Security::ForceInsecure),
            SecuritySetting::Mode(mode) => match mode.to_ascii_lowercase().as_str() {
                "auto" | "detect" | "" => Ok(Security::Auto),
                "true" | "secure" | "https" => Ok(Security::ForceSecure),
                "false" | "insecure" | "http" => Ok(Security::ForceInsecure),
                other => Err(format!("unknown secure setting '{}'", other)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[default]
    #[serde(alias = "descending")]
    Desc,
}

/// Field to rank on, or `Disabled` to keep merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SortKeySetting")]
pub enum SortKey {
    Disabled,
    Field(SortField),
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Field(SortField::RankKey)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SortKeySetting {
    Flag(bool),
    Field(String),
}

impl TryFrom<SortKeySetting> for SortKey {
    type Error = String;

    fn try_from(setting: SortKeySetting) -> Result<Self, Self::Error> {
        match setting {
            SortKeySetting::Flag(false) => Ok(SortKey::Disabled),
            SortKeySetting::Flag(true) => Ok(SortKey::default()),
            SortKeySetting::Field(name) => name.parse().map(SortKey::Field),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
