use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/cli.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    /// Never read from the command line.
    pub password: String,
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            username: String::new(),
            password: String::new(),
            data_dir: "data".to_string(),
        }
    }
}

/// Command-line overrides applied on top of file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub data_dir: Option<String>,
}

pub fn load(config_path: Option<&str>, overrides: Overrides) -> Result<AppConfig> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PRESU"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = overrides.base_url {
        settings.base_url = base_url;
    }
    if let Some(username) = overrides.username {
        settings.username = username;
    }
    if let Some(data_dir) = overrides.data_dir {
        settings.data_dir = data_dir;
    }

    Ok(settings)
}
