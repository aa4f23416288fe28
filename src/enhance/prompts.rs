//! Tailoring prompt for the generative model

use serde::{Deserialize, Serialize};

/// The section headings the model is instructed to produce, in the order the
/// deck template expects them.
pub const SECTION_HEADINGS: &[&str] = &[
    "Name",
    "Summary",
    "Experience",
    "Education",
    "Skills",
    "Certifications",
];

/// Single tailoring prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub tailor_resume: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            tailor_resume: TAILOR_RESUME_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
}

impl PromptTemplates {
    pub fn render_tailor_resume(&self, params: &PromptParams) -> String {
        self.tailor_resume
            .replace("{sections}", &SECTION_HEADINGS.join(", "))
            .replace("{resume}", &params.resume_content)
            .replace("{job}", &params.job_content)
    }
}

const TAILOR_RESUME_TEMPLATE: &str = r#"TASK: Rewrite the resume below so it is tailored to the target job description. Keep every claim truthful to the original resume; improve wording, emphasis and keyword coverage for the role.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Return the rewritten resume organized into exactly these sections, each introduced by a level-2 markdown heading:

{sections}

Example shape:

## Summary
<rewritten summary>

## Skills
<rewritten skills>

IMPORTANT: Use only the section headings listed above. Do not add commentary before the first heading or after the last section."#;
