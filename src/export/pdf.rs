//! Deck to PDF conversion via LibreOffice

use crate::error::{Result, ResumeOptimizerError};
use log::info;
use std::path::Path;
use std::process::Command;

const STAGE: &str = "pdf";

/// Render the populated deck to a single PDF, one page per slide.
///
/// Shells out to `soffice --headless`; LibreOffice names the product after
/// the deck's file stem, so the result is renamed to the requested path.
pub fn deck_to_pdf(deck: &Path, output_pdf: &Path) -> Result<()> {
    if !deck.exists() {
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            format!("Deck not found: {}", deck.display()),
        ));
    }

    let out_dir = output_pdf
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(out_dir)?;

    let output = Command::new("soffice")
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(out_dir)
        .arg(deck)
        .output()
        .map_err(|e| {
            ResumeOptimizerError::conversion(STAGE, format!("Failed to run soffice: {}", e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            format!("soffice failed: {}", stderr.trim()),
        ));
    }

    let stem = deck
        .file_stem()
        .ok_or_else(|| ResumeOptimizerError::conversion(STAGE, "Deck has no file stem"))?;
    let produced = out_dir.join(stem).with_extension("pdf");

    if !produced.exists() {
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            format!("soffice produced no PDF at {}", produced.display()),
        ));
    }

    if produced != output_pdf {
        std::fs::rename(&produced, output_pdf)?;
    }

    info!("Deck rendered to {}", output_pdf.display());
    Ok(())
}
