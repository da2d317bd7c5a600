use std::path::PathBuf;

use pupilmask_core::NamingConfig;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PupilmaskConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Default pseudonym shape. Command-line flags override it.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Names added to the built-in common first-name list for leak checks.
    #[serde(default)]
    pub extra_common_names: Vec<String>,
    /// Fields substituted when `--fields` is not given.
    #[serde(default)]
    pub default_fields: Vec<String>,
    pub created_at: jiff::Timestamp,
}

impl Default for PupilmaskConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            naming: NamingConfig::default(),
            extra_common_names: Vec::new(),
            default_fields: Vec::new(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("pupilmask"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<PupilmaskConfig> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// The saved config, or the defaults when none has been written yet.
pub fn load_or_default() -> eyre::Result<PupilmaskConfig> {
    if has_config() {
        load_config()
    } else {
        tracing::debug!("no config file, using defaults");
        Ok(PupilmaskConfig::default())
    }
}

pub fn parse_config(contents: &str) -> eyre::Result<PupilmaskConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PupilmaskConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update pupilmask."
        ));
    }

    // v0 → v1: flat scheme/start_at/seed keys move under "naming"
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        let mut naming = serde_json::Map::new();
        for key in ["scheme", "start_at", "seed"] {
            if let Some(value) = obj.remove(key) {
                naming.insert(key.to_string(), value);
            }
        }
        obj.entry("naming")
            .or_insert(serde_json::Value::Object(naming));
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (moved naming settings)");
    }

    Ok(json)
}

pub fn save_config(config: &PupilmaskConfig) -> eyre::Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pupilmask_core::NamingScheme;

    use super::*;

    #[test]
    fn current_config_parses() {
        let config = parse_config(
            r#"{
                "config_version": 1,
                "naming": { "scheme": "Anon-##", "start_at": 5, "seed": 9 },
                "extra_common_names": ["Kai"],
                "default_fields": ["Notes"],
                "created_at": "2026-01-05T09:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(config.naming.start_at, 5);
        assert_eq!(config.naming.seed, Some(9));
        assert_eq!(config.naming.scheme.generate(5, 0), "Anon-05");
        assert_eq!(config.extra_common_names, vec!["Kai"]);
        assert_eq!(config.default_fields, vec!["Notes"]);
    }

    #[test]
    fn unversioned_config_is_migrated() {
        let config = parse_config(r#"{ "scheme": "greek", "seed": 3 }"#).unwrap();

        assert_eq!(config.config_version, 1);
        assert!(matches!(config.naming.scheme, NamingScheme::Greek));
        assert_eq!(config.naming.seed, Some(3));
        assert_eq!(config.naming.start_at, 1);
    }

    #[test]
    fn newer_config_is_rejected() {
        let err = parse_config(r#"{ "config_version": 99, "created_at": "2026-01-05T09:00:00Z" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("newer than this build"));
    }
}
