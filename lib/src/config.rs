use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Headless browser settings used for thumbnail capture
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Directory for thumbnail images (defaults to `<datadir>/thumbnails`)
    #[serde(default)]
    pub thumbnails_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Explicit browser binary; searched on PATH when unset
    #[serde(default)]
    pub browser: Option<PathBuf>,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Upper bound for a single capture, including browser startup
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user-agent string sent by the headless browser
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pass `--no-sandbox`; needed when running as root in containers
    #[serde(default)]
    pub no_sandbox: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            browser: None,
            width: default_width(),
            height: default_height(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            no_sandbox: false,
        }
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/18.5 Safari/605.1.15"
        .to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/thumbmark/config.yml)
    /// Falls back to default config if file doesn't exist or can't be read
    pub fn load() -> Self {
        let config_path = Self::default_path();

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}; using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Thumbnail directory, honouring the override
    pub fn thumbnails_dir_or(&self, datadir: &Path) -> PathBuf {
        self.thumbnails_dir
            .clone()
            .unwrap_or_else(|| datadir.join("thumbnails"))
    }

    fn validate(&self) -> Result<()> {
        let c = &self.capture;
        if c.width == 0 || c.height == 0 {
            return Err(crate::error::ThumbmarkError::Config(format!(
                "capture window must be non-zero, got {}x{}",
                c.width, c.height
            )));
        }
        if c.timeout_secs == 0 {
            return Err(crate::error::ThumbmarkError::Config(
                "capture.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.capture.user_agent.contains("Mozilla"));
        assert_eq!(config.capture.timeout_secs, 30);
        assert_eq!((config.capture.width, config.capture.height), (1280, 800));
        assert!(config.capture.browser.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let mut original = Config::default();
        original.capture.browser = Some(PathBuf::from("/usr/bin/chromium"));
        original.capture.timeout_secs = 10;
        original.thumbnails_dir = Some(PathBuf::from("/tmp/thumbs"));

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(loaded.capture.browser, original.capture.browser);
        assert_eq!(loaded.capture.timeout_secs, 10);
        assert_eq!(loaded.thumbnails_dir, original.thumbnails_dir);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/config.yml");
        Config::default().save_to_path(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "capture:\n  timeout_secs: 5\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.capture.timeout_secs, 5);
        assert_eq!(config.capture.width, 1280);
        assert_eq!(config.capture.user_agent, default_user_agent());
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "capture:\n  timeout_secs: 0\n").unwrap();

        let result = Config::load_from_path(temp_file.path());
        assert!(matches!(
            result,
            Err(crate::error::ThumbmarkError::Config(_))
        ));
    }

    #[test]
    fn test_thumbnails_dir_or() {
        let config = Config::default();
        assert_eq!(
            config.thumbnails_dir_or(Path::new("/data")),
            PathBuf::from("/data/thumbnails")
        );

        let config = Config {
            thumbnails_dir: Some(PathBuf::from("/elsewhere")),
            ..Config::default()
        };
        assert_eq!(
            config.thumbnails_dir_or(Path::new("/data")),
            PathBuf::from("/elsewhere")
        );
    }
}
