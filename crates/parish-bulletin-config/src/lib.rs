use parish_bulletin_engine::bulletin::BuildOptions;
use parish_bulletin_engine::markup::DEFAULT_FONT_FAMILY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Logo file expected inside `assets_path`.
pub const LOGO_FILE: &str = "logo.png";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the logo.
    pub assets_path: PathBuf,
    /// Where built documents are written.
    pub output_path: PathBuf,
    pub templates_path: PathBuf,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Default for Config {
    /// Directories relative to the working directory.
    fn default() -> Self {
        Self {
            assets_path: PathBuf::from("assets"),
            output_path: PathBuf::from("output"),
            templates_path: PathBuf::from("templates"),
            font_family: default_font_family(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in every configured directory
        for path in [
            &mut config.assets_path,
            &mut config.output_path,
            &mut config.templates_path,
        ] {
            if let Some(expanded) = Self::expand_path(path) {
                *path = expanded;
            }
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/parish-bulletin");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn logo_path(&self) -> PathBuf {
        self.assets_path.join(LOGO_FILE)
    }

    /// Builder settings for this installation.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(self.logo_path()).font_family(self.font_family.as_str())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn sample() -> Config {
        Config {
            assets_path: PathBuf::from("/srv/bulletin/assets"),
            output_path: PathBuf::from("/srv/bulletin/output"),
            templates_path: PathBuf::from("/srv/bulletin/templates"),
            font_family: "Georgia".to_string(),
        }
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/parish-bulletin/config.toml"));
    }

    #[test]
    fn test_font_family_defaults_to_calibri() {
        let config: Config = toml::from_str(
            r#"
assets_path = "/a"
output_path = "/o"
templates_path = "/t"
"#,
        )
        .unwrap();

        assert_eq!(config.font_family, "Calibri");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/bulletin/assets")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("bulletin/assets"));
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "assets_path = [").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = sample();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_env_vars_expand_on_load() {
        unsafe {
            env::set_var("BULLETIN_ROOT", "/custom/bulletin");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
assets_path = "$BULLETIN_ROOT/assets"
output_path = "$BULLETIN_ROOT/out"
templates_path = "/fixed/templates"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.assets_path, PathBuf::from("/custom/bulletin/assets"));
        assert_eq!(config.output_path, PathBuf::from("/custom/bulletin/out"));
        assert_eq!(config.templates_path, PathBuf::from("/fixed/templates"));

        unsafe {
            env::remove_var("BULLETIN_ROOT");
        }
    }

    #[test]
    fn test_build_options_use_logo_and_font() {
        let options = sample().build_options();

        assert_eq!(options.logo_path, PathBuf::from("/srv/bulletin/assets/logo.png"));
        assert_eq!(options.font_family, "Georgia");
    }
}
