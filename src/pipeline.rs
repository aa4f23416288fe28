//! End-to-end resume optimization pipeline
//!
//! Runs extraction-fed text through enhancement, placeholder mapping, deck
//! population and the exporters, in order, inside one request-scoped
//! context. Enhancement failure aborts everything downstream; exporter
//! failures are recorded per stage and do not block each other.

use crate::config::{Config, OutputConfig};
use crate::deck::{build_placeholder_map, populate_deck, PlaceholderTable};
use crate::enhance::client::ModelClient;
use crate::enhance::{combined_preview, EnhancedSections, ResumeEnhancer};
use crate::error::{Result, ResumeOptimizerError};
use crate::export::{deck_to_pdf, pdf_to_images, sections_to_docx, text_to_bytes};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Request-scoped output locations. Every run gets its own session
/// directory, so concurrent or repeated runs never collide on paths.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub session_id: String,
    pub work_dir: PathBuf,
    deck_name: String,
    pdf_name: String,
    image_base_name: String,
}

impl PipelineContext {
    pub fn new(output: &OutputConfig) -> Self {
        let session_id = Uuid::new_v4().to_string();
        let work_dir = output.base_dir.join(&session_id);
        Self {
            session_id,
            work_dir,
            deck_name: output.deck_name.clone(),
            pdf_name: output.pdf_name.clone(),
            image_base_name: output.image_base_name.clone(),
        }
    }

    pub fn deck_path(&self) -> PathBuf {
        self.work_dir.join(&self.deck_name)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.work_dir.join(&self.pdf_name)
    }

    pub fn images_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn image_base_name(&self) -> &str {
        &self.image_base_name
    }
}

/// A non-fatal stage failure, kept so the shell can report which downloads
/// are unavailable and why.
#[derive(Debug, Clone)]
pub struct StageFailure {
    pub stage: String,
    pub message: String,
}

/// Everything one pipeline run produced. Absent artifacts correspond to an
/// entry in `failures`.
#[derive(Debug)]
pub struct PipelineArtifacts {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub sections: EnhancedSections,
    pub preview: String,
    pub deck: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub images: Vec<PathBuf>,
    /// In-memory Word document buffer.
    pub document: Option<Vec<u8>>,
    /// In-memory plain-text buffer, always produced.
    pub plain_text: Vec<u8>,
    pub failures: Vec<StageFailure>,
}

impl PipelineArtifacts {
    pub fn first_image(&self) -> Option<&PathBuf> {
        self.images.first()
    }
}

pub struct ResumePipeline {
    enhancer: ResumeEnhancer,
    table: PlaceholderTable,
    template_path: PathBuf,
    output: OutputConfig,
}

impl ResumePipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let client = ModelClient::new(config.enhancer.clone())?;
        Ok(Self {
            enhancer: ResumeEnhancer::new(client),
            table: PlaceholderTable::new(config.template.placeholders.clone()),
            template_path: config.template.path.clone(),
            output: config.output.clone(),
        })
    }

    /// Run the full pipeline on already-extracted resume text.
    pub async fn run(&self, resume_text: &str, job_text: &str) -> Result<PipelineArtifacts> {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return Err(ResumeOptimizerError::InvalidInput(
                "Both resume text and job description are required".to_string(),
            ));
        }

        // Sole external call; failure here aborts every downstream stage.
        let sections = self.enhancer.enhance(resume_text, job_text).await?;
        let preview = combined_preview(&sections);

        let context = PipelineContext::new(&self.output);
        info!(
            "Pipeline session {} writing to {}",
            context.session_id,
            context.work_dir.display()
        );

        let map = build_placeholder_map(&sections, &self.table);
        let mut failures = Vec::new();

        let deck = match populate_deck(&self.template_path, &context.deck_path(), &map) {
            Ok(()) => Some(context.deck_path()),
            Err(e) => {
                warn!("Deck population failed: {}", e);
                failures.push(StageFailure {
                    stage: "deck".to_string(),
                    message: e.to_string(),
                });
                None
            }
        };

        let pdf = match &deck {
            Some(deck_path) => match deck_to_pdf(deck_path, &context.pdf_path()) {
                Ok(()) => Some(context.pdf_path()),
                Err(e) => {
                    warn!("PDF export failed: {}", e);
                    failures.push(StageFailure {
                        stage: "pdf".to_string(),
                        message: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        let images = match &pdf {
            Some(pdf_path) => {
                match pdf_to_images(pdf_path, context.images_dir(), context.image_base_name()) {
                    Ok(images) => images,
                    Err(e) => {
                        warn!("Image export failed: {}", e);
                        failures.push(StageFailure {
                            stage: "images".to_string(),
                            message: e.to_string(),
                        });
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        // Document and text exports depend only on the enhanced sections,
        // so they run even when every deck-derived stage failed.
        let document = match sections_to_docx(&sections) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Document export failed: {}", e);
                failures.push(StageFailure {
                    stage: "docx".to_string(),
                    message: e.to_string(),
                });
                None
            }
        };

        let plain_text = text_to_bytes(&preview);

        Ok(PipelineArtifacts {
            session_id: context.session_id,
            generated_at: Utc::now(),
            sections,
            preview,
            deck,
            pdf,
            images,
            document,
            plain_text,
            failures,
        })
    }
}
