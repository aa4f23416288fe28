//! Configuration management for the resume optimizer

use crate::error::{Result, ResumeOptimizerError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub enhancer: EnhancerConfig,
    pub template: TemplateConfig,
    pub output: OutputConfig,
    pub jds: JdConfig,
}

/// Settings for the hosted generative model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancerConfig {
    /// Model identifier passed to the generateContent endpoint.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Base URL of the generative language API.
    pub endpoint: String,
    pub temperature: f32,
    pub max_output_tokens: usize,
}

/// The deck template contract: where the template lives and which
/// placeholder token each resume section fills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: PathBuf,
    /// Section name -> placeholder token, in template order.
    pub placeholders: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Per-run session directories are created under this base.
    pub base_dir: PathBuf,
    pub deck_name: String,
    pub pdf_name: String,
    /// Base name for the per-slide JPEG files.
    pub image_base_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdConfig {
    /// Directory of pre-supplied job description .txt files.
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let mut placeholders = IndexMap::new();
        placeholders.insert("Name".to_string(), "{{NAME}}".to_string());
        placeholders.insert("Summary".to_string(), "{{SUMMARY}}".to_string());
        placeholders.insert("Experience".to_string(), "{{EXPERIENCE}}".to_string());
        placeholders.insert("Education".to_string(), "{{EDUCATION}}".to_string());
        placeholders.insert("Skills".to_string(), "{{SKILLS}}".to_string());
        placeholders.insert("Certifications".to_string(), "{{CERTIFICATIONS}}".to_string());

        Self {
            enhancer: EnhancerConfig {
                model: "gemini-1.5-flash".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                temperature: 0.7,
                max_output_tokens: 2048,
            },
            template: TemplateConfig {
                path: PathBuf::from("assets/resume_template.pptx"),
                placeholders,
            },
            output: OutputConfig {
                base_dir: PathBuf::from("output"),
                deck_name: "optimized_resume.pptx".to_string(),
                pdf_name: "optimized_resume.pdf".to_string(),
                image_base_name: "optimized_resume_slide".to_string(),
            },
            jds: JdConfig {
                dir: PathBuf::from("dummy_jds"),
            },
        }
    }
}

impl Config {
    /// Load the configuration, preferring an explicitly given file over the
    /// default location. An explicit path that does not exist is an error;
    /// a missing default config is created from defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if !path.exists() {
                return Err(ResumeOptimizerError::Configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::read_from(path);
        }

        let config_path = Self::config_path();
        if config_path.exists() {
            Self::read_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeOptimizerError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeOptimizerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-optimizer")
            .join("config.toml")
    }
}
