//! Run settings from the environment
//!
//! Variables (a `.env` file in the working directory is loaded first):
//! - `OCI_COMPARTMENT_OCID` - required for the demo run
//! - `OCI_BUCKET_NAME` - defaults to `ace-oci-demo-bucket`
//! - `OCI_OBJECT_PREFIX` - defaults to `ace-demo`
//! - `OCI_PROFILE` - defaults to `DEFAULT`
//! - `OCI_CONFIG_FILE` - defaults to `~/.oci/config`
//!
//! Empty values count as unset.

use crate::oci::config::{self, OciProfile, DEFAULT_PROFILE};
use crate::oci::error::ConfigError;
use std::path::PathBuf;

pub const COMPARTMENT_VAR: &str = "OCI_COMPARTMENT_OCID";
pub const BUCKET_VAR: &str = "OCI_BUCKET_NAME";
pub const PREFIX_VAR: &str = "OCI_OBJECT_PREFIX";
pub const PROFILE_VAR: &str = "OCI_PROFILE";
pub const CONFIG_FILE_VAR: &str = "OCI_CONFIG_FILE";

pub const DEFAULT_BUCKET_NAME: &str = "ace-oci-demo-bucket";
pub const DEFAULT_OBJECT_PREFIX: &str = "ace-demo";

/// Load `.env` from the working directory if present
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Read a process environment variable, treating empty as unset
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get a required variable from `lookup`
pub fn require_env<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
}

fn env_or<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Which profile to load from which config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSelection {
    pub config_file: PathBuf,
    pub profile: String,
}

impl ProfileSelection {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_file = match lookup(CONFIG_FILE_VAR).filter(|v| !v.is_empty()) {
            Some(path) => config::expand_home(&path),
            None => config::default_config_path()?,
        };

        Ok(Self {
            config_file,
            profile: env_or(lookup, PROFILE_VAR, DEFAULT_PROFILE),
        })
    }

    /// Load and validate the selected profile
    pub fn load(&self) -> Result<OciProfile, ConfigError> {
        tracing::info!(
            "Loading OCI profile '{}' from {:?}",
            self.profile,
            self.config_file
        );
        config::load_profile(&self.config_file, &self.profile)
    }
}

/// Target bucket and object prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSettings {
    pub bucket_name: String,
    pub object_prefix: String,
}

impl BucketSettings {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bucket_name: env_or(lookup, BUCKET_VAR, DEFAULT_BUCKET_NAME),
            object_prefix: env_or(lookup, PREFIX_VAR, DEFAULT_OBJECT_PREFIX),
        }
    }
}

impl Default for BucketSettings {
    fn default() -> Self {
        Self {
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            object_prefix: DEFAULT_OBJECT_PREFIX.to_string(),
        }
    }
}

/// Everything the demo run reads from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub compartment_id: String,
    pub bucket: BucketSettings,
    pub profile: ProfileSelection,
}

impl RunSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    /// The compartment is checked first, before any file is touched
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let compartment_id = require_env(lookup, COMPARTMENT_VAR)?;

        Ok(Self {
            compartment_id,
            bucket: BucketSettings::from_lookup(lookup),
            profile: ProfileSelection::from_lookup(lookup)?,
        })
    }
}
