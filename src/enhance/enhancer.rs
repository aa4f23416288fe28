//! Resume detail enhancement: one model call, one ordered section mapping

use crate::enhance::client::ModelClient;
use crate::enhance::prompts::{PromptParams, PromptTemplates};
use crate::error::{Result, ResumeOptimizerError};
use indexmap::IndexMap;
use log::info;
use regex::Regex;

/// Ordered mapping from section name to model-rewritten content. Insertion
/// order matters: the combined preview and the DOCX export follow it.
pub type EnhancedSections = IndexMap<String, String>;

pub struct ResumeEnhancer {
    client: ModelClient,
    templates: PromptTemplates,
}

impl ResumeEnhancer {
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
        }
    }

    /// Rewrite the resume for the given job description.
    ///
    /// All-or-nothing: a response that cannot be parsed into at least one
    /// section yields `EnhancementFailed` and no partial mapping.
    pub async fn enhance(&self, resume_text: &str, job_text: &str) -> Result<EnhancedSections> {
        if resume_text.trim().is_empty() {
            return Err(ResumeOptimizerError::InvalidInput(
                "Resume text is empty".to_string(),
            ));
        }
        if job_text.trim().is_empty() {
            return Err(ResumeOptimizerError::InvalidInput(
                "Job description is empty".to_string(),
            ));
        }

        let prompt = self.templates.render_tailor_resume(&PromptParams {
            resume_content: resume_text.to_string(),
            job_content: job_text.to_string(),
        });

        let response = self.client.generate(&prompt).await?;
        let sections = parse_sections(&response)?;

        info!(
            "Model {} returned {} sections: {}",
            self.client.model_name(),
            sections.len(),
            sections.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        Ok(sections)
    }
}

/// Parse a `## Heading` structured model response into ordered sections.
pub fn parse_sections(response: &str) -> Result<EnhancedSections> {
    let heading_re = Regex::new(r"(?m)^##\s+(.+?)\s*$").expect("valid heading regex");

    let mut sections = EnhancedSections::new();
    let mut headings = Vec::new();
    for capture in heading_re.captures_iter(response) {
        let whole = capture.get(0).expect("whole match");
        let name = capture.get(1).expect("heading name");
        headings.push((whole.start(), whole.end(), name.as_str().to_string()));
    }

    if headings.is_empty() {
        return Err(ResumeOptimizerError::EnhancementFailed(format!(
            "Model response has no recognizable section headings: {}",
            truncate(response, 120)
        )));
    }

    for (i, (_, body_start, name)) in headings.iter().enumerate() {
        let body_end = headings
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(response.len());
        let body = response[*body_start..body_end].trim().to_string();
        sections.insert(name.clone(), body);
    }

    Ok(sections)
}

/// Combine the enhanced sections into the single preview string the user
/// sees next to the original resume text.
pub fn combined_preview(sections: &EnhancedSections) -> String {
    let mut combined = String::new();
    for (section, content) in sections {
        combined.push_str(&format!("\n--- {} ---\n{}\n", section, content));
    }
    combined.trim().to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhancerConfig;

    fn offline_enhancer(key_env: &str) -> ResumeEnhancer {
        std::env::set_var(key_env, "test-key");
        let config = EnhancerConfig {
            model: "gemini-1.5-flash".to_string(),
            api_key_env: key_env.to_string(),
            endpoint: "https://example.invalid".to_string(),
            temperature: 0.7,
            max_output_tokens: 128,
        };
        ResumeEnhancer::new(ModelClient::new(config).expect("key env var is set"))
    }

    #[tokio::test]
    async fn test_empty_job_description_refused_without_model_call() {
        let enhancer = offline_enhancer("ENHANCER_TEST_KEY_EMPTY_JD");

        // The endpoint is unreachable, so reaching the model at all would
        // fail with EnhancementFailed; the guard must reject first.
        let result = enhancer.enhance("John Doe\nSoftware Engineer", "   ").await;
        assert!(matches!(
            result,
            Err(ResumeOptimizerError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_resume_refused_without_model_call() {
        let enhancer = offline_enhancer("ENHANCER_TEST_KEY_EMPTY_RESUME");

        let result = enhancer.enhance("", "Backend engineer with Python").await;
        assert!(matches!(
            result,
            Err(ResumeOptimizerError::InvalidInput(_))
        ));
    }

    const SAMPLE_RESPONSE: &str = "## Name\nJohn Doe\n\n## Summary\nBackend engineer with 5 years of Python.\n\n## Skills\nPython, AWS, REST APIs\n";

    #[test]
    fn test_parse_sections_preserves_order() {
        let sections = parse_sections(SAMPLE_RESPONSE).unwrap();
        let names: Vec<&String> = sections.keys().collect();
        assert_eq!(names, ["Name", "Summary", "Skills"]);
        assert_eq!(sections.get("Name").unwrap(), "John Doe");
        assert!(sections.get("Skills").unwrap().contains("Python"));
    }

    #[test]
    fn test_parse_sections_all_or_nothing() {
        let result = parse_sections("Sure! Here is your improved resume with no headings.");
        assert!(matches!(
            result,
            Err(ResumeOptimizerError::EnhancementFailed(_))
        ));
    }

    #[test]
    fn test_parse_sections_body_spans_to_next_heading() {
        let response = "## Experience\nAcme Corp\nBuilt services.\n\n## Education\nBS CS";
        let sections = parse_sections(response).unwrap();
        assert_eq!(
            sections.get("Experience").unwrap(),
            "Acme Corp\nBuilt services."
        );
        assert_eq!(sections.get("Education").unwrap(), "BS CS");
    }

    #[test]
    fn test_combined_preview_format() {
        let sections = parse_sections(SAMPLE_RESPONSE).unwrap();
        let preview = combined_preview(&sections);

        assert!(preview.starts_with("--- Name ---"));
        assert!(preview.contains("--- Skills ---"));
        // Section bodies appear under their own markers, in order.
        let skills_pos = preview.find("--- Skills ---").unwrap();
        let summary_pos = preview.find("--- Summary ---").unwrap();
        assert!(summary_pos < skills_pos);
    }

    #[test]
    fn test_combined_preview_is_deterministic() {
        let sections = parse_sections(SAMPLE_RESPONSE).unwrap();
        assert_eq!(combined_preview(&sections), combined_preview(&sections));
    }
}
