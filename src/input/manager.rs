//! Input manager for handling different file types

use crate::error::{Result, ResumeOptimizerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeOptimizerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeOptimizerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract text from uploaded bytes with a declared extension.
    ///
    /// The bytes are spilled to a temporary copy for the extractors; the copy
    /// is removed when this function returns, whether extraction succeeded or
    /// failed.
    pub async fn extract_upload(&mut self, bytes: &[u8], extension: &str) -> Result<String> {
        if matches!(FileType::from_extension(extension), FileType::Unknown) {
            return Err(ResumeOptimizerError::UnsupportedFormat(format!(
                "Unsupported upload extension: .{}",
                extension
            )));
        }

        let mut temp = tempfile::Builder::new()
            .prefix("resume_upload")
            .suffix(&format!(".{}", extension.to_lowercase()))
            .tempfile()?;
        temp.write_all(bytes)?;
        temp.flush()?;

        // NamedTempFile removes the copy on drop, covering both outcomes.
        // Uploads are one-shot, so bypass the path cache.
        let was_cached = self.enable_cache;
        self.enable_cache = false;
        let result = self.extract_text(temp.path()).await;
        self.enable_cache = was_cached;
        result
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path.extension().and_then(|ext| ext.to_str()).ok_or_else(|| {
            ResumeOptimizerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
