//! Text extraction from the supported resume formats

use crate::error::{Result, ResumeOptimizerError};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use std::path::Path;
use tokio::fs;

/// Leading bytes every well-formed PDF starts with.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // Reject non-PDF byte streams before they ever reach the parser.
        if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
            return Err(ResumeOptimizerError::InvalidFormat(format!(
                "'{}' does not start with the %PDF signature",
                path.display()
            )));
        }

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeOptimizerError::ExtractionFailed(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            ResumeOptimizerError::ExtractionFailed(format!(
                "Failed to parse DOCX '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                let mut line = String::new();
                for para_child in &paragraph.children {
                    if let ParagraphChild::Run(run) = para_child {
                        for run_child in &run.children {
                            if let RunChild::Text(text) = run_child {
                                line.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_pdf_magic_rejected_before_parsing() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"not a pdf at all").unwrap();

        let result = PdfExtractor.extract(file.path()).await;
        match result {
            Err(ResumeOptimizerError::InvalidFormat(_)) => {}
            other => panic!("expected InvalidFormat, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"John Doe\nSoftware Engineer").unwrap();

        let text = PlainTextExtractor.extract(file.path()).await.unwrap();
        assert!(text.contains("John Doe"));
        assert!(text.contains("Software Engineer"));
    }

    #[tokio::test]
    async fn test_truncated_pdf_header_rejected() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%P").unwrap();

        let result = PdfExtractor.extract(file.path()).await;
        assert!(matches!(result, Err(ResumeOptimizerError::InvalidFormat(_))));
    }
}
