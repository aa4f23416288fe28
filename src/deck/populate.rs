//! Deck template population
//!
//! A .pptx file is a zip archive of XML parts. Placeholder substitution is
//! done textually inside each slide part, which leaves the run properties
//! (font, size, position) of the placeholder untouched.

use crate::deck::mapping::PlaceholderMap;
use crate::error::{Result, ResumeOptimizerError};
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

/// Populate the deck template into a fresh output file.
///
/// Tokens present in the template but absent from the map are left as they
/// are. The template itself is never modified.
pub fn populate_deck(template: &Path, output: &Path, map: &PlaceholderMap) -> Result<()> {
    if !template.exists() {
        return Err(ResumeOptimizerError::TemplateNotFound(
            template.display().to_string(),
        ));
    }

    let template_file = File::open(template)?;
    let mut archive = ZipArchive::new(template_file).map_err(|e| {
        ResumeOptimizerError::PopulationFailed(format!(
            "'{}' is not a readable deck archive: {}",
            template.display(),
            e
        ))
    })?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let output_file = File::create(output)?;
    let mut writer = ZipWriter::new(output_file);

    let mut replaced_total = 0usize;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(population_error)?;
        let name = entry.name().to_string();

        if is_slide_part(&name) {
            drop(entry);
            let mut entry = archive.by_index(i).map_err(population_error)?;
            let mut xml = String::new();
            entry.read_to_string(&mut xml).map_err(|e| {
                ResumeOptimizerError::PopulationFailed(format!(
                    "Slide part '{}' is not valid text: {}",
                    name, e
                ))
            })?;

            let (rewritten, replaced) = substitute_placeholders(&xml, map);
            replaced_total += replaced;
            debug!("{}: {} placeholder(s) replaced", name, replaced);

            writer
                .start_file(&name, FileOptions::default())
                .map_err(population_error)?;
            writer.write_all(rewritten.as_bytes())?;
        } else {
            writer.raw_copy_file(entry).map_err(population_error)?;
        }
    }

    writer.finish().map_err(population_error)?;
    info!(
        "Populated deck written to {} ({} placeholder occurrences replaced)",
        output.display(),
        replaced_total
    );
    Ok(())
}

/// Text-bearing slide parts. Relationship files under `_rels` end in `.rels`
/// and are excluded by the extension check.
fn is_slide_part(name: &str) -> bool {
    name.starts_with("ppt/slides/") && name.ends_with(".xml")
}

fn substitute_placeholders(xml: &str, map: &PlaceholderMap) -> (String, usize) {
    let mut result = xml.to_string();
    let mut replaced = 0usize;
    for (token, value) in map {
        let occurrences = result.matches(token.as_str()).count();
        if occurrences > 0 {
            result = result.replace(token.as_str(), &xml_escape(value));
            replaced += occurrences;
        }
    }
    (result, replaced)
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn population_error(e: zip::result::ZipError) -> ResumeOptimizerError {
    ResumeOptimizerError::PopulationFailed(e.to_string())
}
