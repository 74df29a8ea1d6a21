//! Settings: defaults, then an optional TOML file, then the environment.

use crate::error::{Error, Result};
use crate::provider::{AuthMode, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "triviacraft.toml";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub auth_mode: AuthMode,
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            auth_mode: AuthMode::QueryParam,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    auth_mode: Option<String>,
    timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Settings::load`] with an injectable environment lookup.
    ///
    /// An explicit `path` must exist; the default file may be absent.
    pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        let (file, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if let Some(file_cfg) = read_file(file, required)? {
            settings.apply_file(file_cfg)?;
        }

        settings.apply_env(env)?;
        Ok(settings)
    }

    fn apply_file(&mut self, file_cfg: FileSettings) -> Result<()> {
        if let Some(v) = file_cfg.api_key {
            self.api_key = Some(v);
        }
        if let Some(v) = file_cfg.model {
            self.model = v;
        }
        if let Some(v) = file_cfg.base_url {
            self.base_url = v;
        }
        if let Some(v) = file_cfg.auth_mode {
            self.auth_mode = v.parse()?;
        }
        if let Some(v) = file_cfg.timeout_secs {
            self.timeout_secs = Some(v);
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("GEMINI_API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = env("TRIVIA__API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = env("TRIVIA__MODEL") {
            self.model = v;
        }
        if let Some(v) = env("TRIVIA__BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = env("TRIVIA__AUTH_MODE") {
            self.auth_mode = v.parse()?;
        }
        if let Some(v) = env("TRIVIA__TIMEOUT_SECS") {
            let secs = v.trim().parse::<u64>().map_err(|e| {
                Error::config_invalid(format!("TRIVIA__TIMEOUT_SECS is not a number: '{}'", v))
                    .with_operation("config::apply_env")
                    .set_source(e)
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// True when no usable API key was configured anywhere.
    pub fn missing_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            base_url: Some(self.base_url.clone()),
            model: Some(self.model.clone()),
            auth_mode: self.auth_mode,
            timeout_secs: self.timeout_secs,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("auth_mode", &self.auth_mode)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn read_file(path: &Path, required: bool) -> Result<Option<FileSettings>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => return Ok(None),
        Err(e) => {
            return Err(Error::config_invalid(format!("cannot read {}", path.display()))
                .with_operation("config::read_file")
                .with_context("path", path.display().to_string())
                .set_source(e))
        }
    };

    let parsed = toml::from_str::<FileSettings>(&raw).map_err(|e| {
        Error::config_invalid(format!("invalid config file {}", path.display()))
            .with_operation("config::read_file")
            .with_context("path", path.display().to_string())
            .set_source(e)
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(parsed))
}
