//! OCI config file and profile management
//!
//! This module handles profile loading from `~/.oci/config`. The file is an
//! INI-style document with one section per profile:
//!
//! ```text
//! [DEFAULT]
//! user=ocid1.user.oc1..aaaa
//! fingerprint=20:3b:97:13:55:1c:...
//! key_file=~/.oci/oci_api_key.pem
//! tenancy=ocid1.tenancy.oc1..aaaa
//! region=us-ashburn-1
//! ```
//!
//! Keys in the `[DEFAULT]` section are inherited by every other profile.

use crate::oci::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the section inherited by every other profile
pub const DEFAULT_PROFILE: &str = "DEFAULT";

const REQUIRED_KEYS: [&str; 5] = ["user", "fingerprint", "key_file", "tenancy", "region"];

/// A resolved OCI profile with all required credential fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OciProfile {
    pub name: String,
    pub user: String,
    pub fingerprint: String,
    pub key_file: PathBuf,
    pub tenancy: String,
    pub region: String,
    /// Never serialized
    #[serde(skip)]
    pub pass_phrase: Option<String>,
}

impl OciProfile {
    /// The `keyId` used in request signatures
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }
}

/// Parsed contents of an OCI config file
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    defaults: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl ConfigFile {
    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded OCI config from {:?}", path);
        Ok(Self::parse(&content))
    }

    /// Parse config file contents
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_string();
                if name != DEFAULT_PROFILE {
                    config.sections.entry(name.clone()).or_default();
                }
                current_section = Some(name);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_ascii_lowercase();
                let value = value.trim().to_string();

                match current_section.as_deref() {
                    Some(DEFAULT_PROFILE) => {
                        config.defaults.insert(key, value);
                    }
                    Some(section) => {
                        if let Some(values) = config.sections.get_mut(section) {
                            values.insert(key, value);
                        }
                    }
                    None => {
                        tracing::warn!("Ignoring key '{}' outside of any profile section", key);
                    }
                }
            }
        }

        config
    }

    /// Get all profile names, `DEFAULT` first when it has any keys
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.sections.keys().cloned().collect();
        names.sort();
        if !self.defaults.is_empty() {
            names.insert(0, DEFAULT_PROFILE.to_string());
        }
        names
    }

    /// Look up a raw value for a profile, falling back to `[DEFAULT]`
    pub fn get(&self, profile: &str, key: &str) -> Option<&str> {
        self.sections
            .get(profile)
            .and_then(|values| values.get(key))
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolve a profile, validating that every required key is present
    pub fn profile(&self, name: &str) -> Result<OciProfile, ConfigError> {
        if name != DEFAULT_PROFILE && !self.sections.contains_key(name) {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        }
        if name == DEFAULT_PROFILE && self.defaults.is_empty() {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        }

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| self.get(name, key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys {
                profile: name.to_string(),
                keys: missing,
            });
        }

        let value = |key: &str| self.get(name, key).unwrap_or_default().to_string();

        Ok(OciProfile {
            name: name.to_string(),
            user: value("user"),
            fingerprint: value("fingerprint"),
            key_file: expand_home(&value("key_file")),
            tenancy: value("tenancy"),
            region: value("region"),
            pass_phrase: self.get(name, "pass_phrase").map(str::to_string),
        })
    }
}

/// Default location of the OCI config file
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".oci").join("config"))
        .ok_or(ConfigError::NoHomeDir)
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load a named profile from the config file at `path`
pub fn load_profile(path: &Path, profile: &str) -> Result<OciProfile, ConfigError> {
    ConfigFile::load(path)?.profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
# OCI CLI config
[DEFAULT]
user=ocid1.user.oc1..default
fingerprint=aa:bb:cc
key_file=/keys/default.pem
tenancy=ocid1.tenancy.oc1..root
region=us-ashburn-1

[PROD]
user = ocid1.user.oc1..prod
key_file = /keys/prod.pem
pass_phrase = s3cret
region = eu-frankfurt-1

; incomplete profile with no DEFAULT to fall back on
[EMPTY]
"#;

    #[test]
    fn test_parse_default_profile() {
        let config = ConfigFile::parse(SAMPLE);
        let profile = config.profile("DEFAULT").unwrap();

        assert_eq!(profile.name, "DEFAULT");
        assert_eq!(profile.user, "ocid1.user.oc1..default");
        assert_eq!(profile.fingerprint, "aa:bb:cc");
        assert_eq!(profile.key_file, PathBuf::from("/keys/default.pem"));
        assert_eq!(profile.tenancy, "ocid1.tenancy.oc1..root");
        assert_eq!(profile.region, "us-ashburn-1");
        assert!(profile.pass_phrase.is_none());
    }

    #[test]
    fn test_profile_inherits_from_default() {
        let config = ConfigFile::parse(SAMPLE);
        let profile = config.profile("PROD").unwrap();

        // Own values win
        assert_eq!(profile.user, "ocid1.user.oc1..prod");
        assert_eq!(profile.key_file, PathBuf::from("/keys/prod.pem"));
        assert_eq!(profile.region, "eu-frankfurt-1");
        assert_eq!(profile.pass_phrase.as_deref(), Some("s3cret"));
        // Inherited
        assert_eq!(profile.fingerprint, "aa:bb:cc");
        assert_eq!(profile.tenancy, "ocid1.tenancy.oc1..root");
    }

    #[test]
    fn test_empty_section_inherits_everything() {
        let config = ConfigFile::parse(SAMPLE);
        let profile = config.profile("EMPTY").unwrap();
        assert_eq!(profile.user, "ocid1.user.oc1..default");
    }

    #[test]
    fn test_missing_profile() {
        let config = ConfigFile::parse(SAMPLE);
        let err = config.profile("STAGING").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(ref p) if p == "STAGING"));
    }

    #[test]
    fn test_missing_default_section() {
        let config = ConfigFile::parse("[OTHER]\nuser=u\n");
        let err = config.profile("DEFAULT").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(_)));
    }

    #[test]
    fn test_missing_required_keys() {
        let config = ConfigFile::parse("[DEFAULT]\nuser=u\ntenancy=t\nkey_file=\n");
        match config.profile("DEFAULT").unwrap_err() {
            ConfigError::MissingKeys { profile, keys } => {
                assert_eq!(profile, "DEFAULT");
                assert_eq!(keys, vec!["fingerprint", "key_file", "region"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = ConfigFile::parse(
            "[DEFAULT]\nUSER=u\nFingerprint=f\nkey_file=k\nTenancy=t\nREGION=r\n",
        );
        let profile = config.profile("DEFAULT").unwrap();
        assert_eq!(profile.user, "u");
        assert_eq!(profile.region, "r");
    }

    #[test]
    fn test_profile_names_default_first() {
        let config = ConfigFile::parse(SAMPLE);
        let names = config.profile_names();
        assert_eq!(names, vec!["DEFAULT", "EMPTY", "PROD"]);
    }

    #[test]
    fn test_key_id() {
        let config = ConfigFile::parse(SAMPLE);
        let profile = config.profile("DEFAULT").unwrap();
        assert_eq!(
            profile.key_id(),
            "ocid1.tenancy.oc1..root/ocid1.user.oc1..default/aa:bb:cc"
        );
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~/.oci/key.pem"), home.join(".oci/key.pem"));
        assert_eq!(expand_home("/abs/key.pem"), PathBuf::from("/abs/key.pem"));
        assert_eq!(expand_home("relative.pem"), PathBuf::from("relative.pem"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config");
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileNotFound(ref p) if p == &path));
    }

    #[test]
    fn test_load_profile_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config");
        std::fs::write(&path, SAMPLE).unwrap();

        let profile = load_profile(&path, "PROD").unwrap();
        assert_eq!(profile.region, "eu-frankfurt-1");
    }

    #[test]
    fn test_pass_phrase_not_serialized() {
        let config = ConfigFile::parse(SAMPLE);
        let profile = config.profile("PROD").unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("s3cret"));
    }
}
