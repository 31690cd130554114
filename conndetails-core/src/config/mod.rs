mod loader;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use value::{ConfigValue, FromConfigValue};

/// Prefix of environment variables that override config keys.
pub const ENV_PREFIX: &str = "CONNDETAILS_";

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "CONNDETAILS_PROFILE";

/// Base name of the YAML config files (`conndetails.yaml`, `conndetails-{profile}.yaml`).
pub const CONFIG_FILE_STEM: &str = "conndetails";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from YAML files, `.env` files and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `conndetails.yaml`
/// 2. `conndetails-{profile}.yaml`
/// 3. `.env`, then `.env.{profile}` (loaded into the process environment,
///    never overwriting variables that are already set)
/// 4. `CONNDETAILS_*` environment variables. `__` separates key segments and
///    a single `_` is kept: `CONNDETAILS_CONNECTION__STRICT` overrides
///    `connection.strict`, `CONNDETAILS_LOGGING__FILTER` overrides
///    `logging.filter`. Only scalar keys can be overridden this way.
///
/// The profile is `CONNDETAILS_PROFILE` when set, otherwise the argument.
#[derive(Debug, Clone)]
pub struct ConnConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl ConnConfig {
    /// Load configuration from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load configuration from the given directory.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());
        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join(format!("{CONFIG_FILE_STEM}.yaml")), &mut values)?;
        loader::load_yaml_file(
            &dir.join(format!("{CONFIG_FILE_STEM}-{active_profile}.yaml")),
            &mut values,
        )?;

        // Neither file overwrites variables that are already set, so the
        // profile file goes first to take precedence over `.env`.
        load_dotenv(&dir.join(format!(".env.{active_profile}")))?;
        load_dotenv(&dir.join(".env"))?;

        for (env_key, env_val) in std::env::vars() {
            if let Some(config_key) = loader::env_key_to_config_key(ENV_PREFIX, &env_key) {
                tracing::trace!(key = %config_key, "config key overridden from environment");
                values.insert(config_key, ConfigValue::String(env_val));
            }
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");
        Ok(ConnConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(ConnConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// Create an empty config.
    pub fn empty() -> Self {
        ConnConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning `default` if the key is missing or malformed.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Like [`get`](Self::get) but a missing key yields `None` while a
    /// malformed value is still an error.
    pub fn get_opt<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => V::from_config_value(value, key).map(Some),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

/// Load a dotenv file. A missing file is skipped; a malformed one is an error
/// rather than a partial load.
fn load_dotenv(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    }
}
