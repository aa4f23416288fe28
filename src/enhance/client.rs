//! HTTP client for the Gemini generateContent endpoint

use crate::config::EnhancerConfig;
use crate::error::{Result, ResumeOptimizerError};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: usize,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Content,
}

/// Thin client over the hosted generative model. The single outbound network
/// call of the whole pipeline happens here.
pub struct ModelClient {
    http: reqwest::Client,
    config: EnhancerConfig,
    api_key: String,
}

impl ModelClient {
    /// Build a client, resolving the API key from the configured env var.
    pub fn new(config: EnhancerConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ResumeOptimizerError::Configuration(format!(
                "Environment variable {} is not set",
                config.api_key_env
            ))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    /// Send one prompt and return the model's text response.
    ///
    /// Transport, auth/quota and shape failures are all reported as
    /// `EnhancementFailed` with the underlying cause.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!(
            "Calling model {} with a {}-char prompt",
            self.config.model,
            prompt.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ResumeOptimizerError::EnhancementFailed(format!("Model request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeOptimizerError::EnhancementFailed(format!(
                "Model returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            ResumeOptimizerError::EnhancementFailed(format!("Malformed model response: {}", e))
        })?;

        let text = parsed
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| {
                ResumeOptimizerError::EnhancementFailed(
                    "Model response contained no candidates".to_string(),
                )
            })?;

        Ok(text)
    }

    pub fn model_name(&self) -> &str {
        &self.config.model
    }
}
