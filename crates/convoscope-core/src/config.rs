//! Configuration management for Convoscope

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables checked for the API key
pub mod env_vars {
    /// Primary credential variable
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Legacy variable accepted as a fallback
    pub const API_KEY: &str = "API_KEY";
}

/// Hosted models selectable for analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisModel {
    /// Gemini 2.5 Flash - fast, handles text and audio (default)
    Gemini25Flash,
    /// Gemini 2.5 Pro - slower, stronger reasoning
    Gemini25Pro,
    /// Any other model name, passed to the API verbatim
    Custom(String),
}

impl Default for AnalysisModel {
    fn default() -> Self {
        Self::Gemini25Flash
    }
}

impl AnalysisModel {
    /// Model name as it appears in the generateContent URL
    pub fn api_name(&self) -> &str {
        match self {
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Custom(name) => name,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini25Flash => "Gemini 2.5 Flash",
            Self::Gemini25Pro => "Gemini 2.5 Pro",
            Self::Custom(name) => name,
        }
    }

    /// Resolve a user-supplied name; unknown names become `Custom`
    pub fn from_name(name: &str) -> Self {
        // Normalize model name: replace - and . with _ for matching
        let normalized = name.to_lowercase().replace(['-', '.'], "_");
        match normalized.as_str() {
            "gemini_2_5_flash" | "flash" => Self::Gemini25Flash,
            "gemini_2_5_pro" | "pro" => Self::Gemini25Pro,
            _ => Self::Custom(name.to_string()),
        }
    }
}

/// Generation parameters forwarded with each request
///
/// Unset fields are omitted from the request so the service defaults apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequestOptions {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
}

/// The two analysis modes, each backed by its own system instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Written conversation transcript
    Text,
    /// Recorded conversation audio
    Audio,
}

impl AnalysisKind {
    /// Prompt file stem under the prompts directory
    pub fn prompt_stem(&self) -> &'static str {
        match self {
            Self::Text => "text_analysis",
            Self::Audio => "audio_analysis",
        }
    }
}

/// Source of the Gemini API key
///
/// Resolution happens at call time, so a key exported after startup is
/// picked up without reconstructing the client.
pub trait CredentialProvider: Send + Sync {
    /// Return the API key, or `None` when not configured
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from the process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(env_vars::GEMINI_API_KEY)
            .or_else(|_| std::env::var(env_vars::API_KEY))
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Fixed key, or fixed absence, for tests and embedding
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Option<String>);

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Main configuration
///
/// Missing fields fall back to their defaults, so older or partial config
/// files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Analysis model selection
    pub model: AnalysisModel,
    /// Generation options
    pub request: RequestOptions,
    /// Auto-copy results to clipboard
    pub auto_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: AnalysisModel::default(),
            request: RequestOptions::default(),
            auto_clipboard: false,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "convoscope", "convoscope")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Get the prompts directory
    pub fn prompts_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "convoscope", "convoscope")
            .context("Could not determine data directory")?;
        let prompts_dir = proj_dirs.data_dir().join("prompts");
        std::fs::create_dir_all(&prompts_dir)?;
        Ok(prompts_dir)
    }

    /// Get the system instruction for an analysis mode
    ///
    /// A file named after the mode in the prompts directory overrides the
    /// built-in instruction.
    pub fn instruction_for(&self, kind: AnalysisKind) -> String {
        if let Ok(prompts_dir) = Self::prompts_dir() {
            let prompt_file = prompts_dir.join(format!("{}.txt", kind.prompt_stem()));
            if let Ok(contents) = std::fs::read_to_string(&prompt_file) {
                return contents;
            }
        }

        match kind {
            AnalysisKind::Text => include_str!("../../../prompts/text_analysis.txt").to_string(),
            AnalysisKind::Audio => include_str!("../../../prompts/audio_analysis.txt").to_string(),
        }
    }
}
