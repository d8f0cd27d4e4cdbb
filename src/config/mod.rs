use crate::ai::DEFAULT_GEMINI_MODEL;
use crate::engine::TimeRangePolicy;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_REMOTE_URL: &str = "RWORKLOG_REMOTE_URL";
pub const ENV_REMOTE_KEY: &str = "RWORKLOG_REMOTE_KEY";
pub const ENV_GEMINI_KEY: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_user_email")]
    pub user_email: String,
    #[serde(default)]
    pub storage: StorageMode,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub remote_url: String,
    #[serde(default)]
    pub remote_api_key: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_synthesis_timeout_secs")]
    pub synthesis_timeout_secs: u64,
    #[serde(default)]
    pub time_range_policy: TimeRangePolicy,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_user_name() -> String {
    "テストユーザー".to_string()
}
fn default_user_email() -> String {
    "test@example.com".to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}
fn default_typing_delay_ms() -> u64 {
    500
}
fn default_synthesis_timeout_secs() -> u64 {
    30
}
fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            user_email: default_user_email(),
            storage: StorageMode::default(),
            database: default_database(),
            remote_url: String::new(),
            remote_api_key: String::new(),
            gemini_api_key: String::new(),
            gemini_model: default_gemini_model(),
            typing_delay_ms: default_typing_delay_ms(),
            synthesis_timeout_secs: default_synthesis_timeout_secs(),
            time_range_policy: TimeRangePolicy::default(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworklog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rworklog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworklog.sqlite")
    }

    /// Load configuration from file (defaults if missing), then apply
    /// environment overrides for credentials.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var(ENV_REMOTE_URL) {
            self.remote_url = v;
        }
        if let Ok(v) = env::var(ENV_REMOTE_KEY) {
            self.remote_api_key = v;
        }
        if let Ok(v) = env::var(ENV_GEMINI_KEY) {
            self.gemini_api_key = v;
        }
    }

    /// A generative backend is used only with a non-empty credential.
    pub fn ai_enabled(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// `None` disables the caller-side timeout.
    pub fn synthesis_timeout(&self) -> Option<Duration> {
        (self.synthesis_timeout_secs > 0).then(|| Duration::from_secs(self.synthesis_timeout_secs))
    }

    /// Copy with credentials masked, for display.
    pub fn redacted(&self) -> Config {
        fn mask(secret: &str) -> String {
            if secret.is_empty() {
                String::new()
            } else {
                "********".to_string()
            }
        }
        Config {
            remote_api_key: mask(&self.remote_api_key),
            gemini_api_key: mask(&self.gemini_api_key),
            ..self.clone()
        }
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration directory, config file and database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = std::path::Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
