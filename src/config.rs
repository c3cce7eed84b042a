use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, TradusError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub subtitle: SubtitleOptions,
    #[serde(default)]
    pub languages: LanguageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Google Translate web endpoint with automatic source detection
    Google,
    /// Local Ollama LLM server
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Which translation backend to use
    pub provider: BackendKind,
    /// Base URL of the backend. Empty means the provider default.
    pub endpoint: String,
    /// LLM model (Ollama only)
    pub model: String,
    /// HTTP timeout for a single translate call, in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Endpoint with the provider default applied
    pub fn resolved_endpoint(&self) -> String {
        if !self.endpoint.trim().is_empty() {
            return self.endpoint.trim_end_matches('/').to_string();
        }
        match self.provider {
            BackendKind::Google => "https://translate.googleapis.com".to_string(),
            BackendKind::Ollama => "http://localhost:11434".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendKind::Google,
            endpoint: String::new(),
            model: "llama3.2:3b".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleOptions {
    /// Re-attach the original leading/trailing whitespace around a translated line
    pub preserve_whitespace: bool,
}

impl Default for SubtitleOptions {
    fn default() -> Self {
        Self {
            preserve_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

impl LanguageOption {
    fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Target language used when none is given on the command line
    pub default_target: String,
    /// Languages presented to the user
    pub options: Vec<LanguageOption>,
}

impl LanguageConfig {
    pub fn is_known(&self, code: &str) -> bool {
        self.options.iter().any(|o| o.code.eq_ignore_ascii_case(code))
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_target: "pt".to_string(),
            options: vec![
                LanguageOption::new("pt", "Português"),
                LanguageOption::new("en", "English"),
                LanguageOption::new("es", "Español"),
                LanguageOption::new("fr", "Français"),
                LanguageOption::new("de", "Deutsch"),
                LanguageOption::new("it", "Italiano"),
            ],
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TradusError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TradusError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TradusError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TradusError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
