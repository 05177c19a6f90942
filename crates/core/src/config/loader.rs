//! Engine configuration loader.
//!
//! Loads `rfx.toml`. A missing file is not an error: every field has a
//! default pointing at the standard deployment, so the engine starts with
//! no configuration at all.

use crate::config::error::{ConfigError, ConfigResult};
use rfx_protocol::EngineConfig;
use std::path::Path;

/// Load engine configuration from `path`.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, has
/// invalid TOML syntax, or carries out-of-range progress tuning.
pub fn load_config(path: &Path) -> ConfigResult<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: EngineConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

    validate(&config).map_err(|reason| ConfigError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(config)
}

fn validate(config: &EngineConfig) -> Result<(), String> {
    let progress = &config.progress;
    if progress.floor < 0.0 {
        return Err(format!("progress.floor must be >= 0, got {}", progress.floor));
    }
    if progress.floor >= progress.ceiling {
        return Err(format!(
            "progress.floor ({}) must be below progress.ceiling ({})",
            progress.floor, progress.ceiling
        ));
    }
    if progress.ceiling > 100.0 {
        return Err(format!(
            "progress.ceiling must be <= 100, got {}",
            progress.ceiling
        ));
    }
    if progress.tick_ms == 0 {
        return Err("progress.tick_ms must be nonzero".to_string());
    }
    if progress.approach_factor <= 0.0 || progress.approach_factor >= 1.0 {
        return Err(format!(
            "progress.approach_factor must be in (0, 1), got {}",
            progress.approach_factor
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("rfx.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfx.toml");
        std::fs::write(
            &path,
            r#"
output_bucket = "custom-outputs"

[progress]
ceiling = 90.0
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output_bucket, "custom-outputs");
        assert_eq!(config.progress.ceiling, 90.0);
        // untouched fields keep their defaults
        assert_eq!(config.input_bucket, "presales-rfp-inputs");
        assert_eq!(config.progress.floor, 5.0);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfx.toml");
        std::fs::write(&path, "output_bucket = [unclosed").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_out_of_range_progress_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfx.toml");
        std::fs::write(
            &path,
            r#"
[progress]
floor = 96.0
ceiling = 95.0
"#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
        assert!(err.to_string().contains("floor"));
    }

    #[test]
    fn test_ceiling_above_100_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfx.toml");
        std::fs::write(&path, "[progress]\nceiling = 120.0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }
}
