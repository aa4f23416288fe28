//! PDF to per-slide JPEG conversion via pdftoppm

use crate::error::{Result, ResumeOptimizerError};
use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

const STAGE: &str = "images";

/// Rasterize every PDF page into `<out_dir>/slides_images/<base>_<n>.jpg`
/// with a 1-based page index, returning the ordered list of image paths.
pub fn pdf_to_images(pdf: &Path, out_dir: &Path, base_name: &str) -> Result<Vec<PathBuf>> {
    if !pdf.exists() {
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            format!("PDF not found: {}", pdf.display()),
        ));
    }

    let images_dir = out_dir.join("slides_images");
    std::fs::create_dir_all(&images_dir)?;
    let prefix = images_dir.join("page");

    let output = Command::new("pdftoppm")
        .arg("-jpeg")
        .arg("-r")
        .arg("150")
        .arg(pdf)
        .arg(&prefix)
        .output()
        .map_err(|e| {
            ResumeOptimizerError::conversion(STAGE, format!("Failed to run pdftoppm: {}", e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            format!("pdftoppm failed: {}", stderr.trim()),
        ));
    }

    let produced = collect_page_images(&images_dir)?;

    if produced.is_empty() {
        return Err(ResumeOptimizerError::conversion(
            STAGE,
            "pdftoppm produced no images",
        ));
    }

    let mut images = Vec::with_capacity(produced.len());
    for (i, source) in produced.iter().enumerate() {
        let target = images_dir.join(format!("{}_{}.jpg", base_name, i + 1));
        std::fs::rename(source, &target)?;
        images.push(target);
    }

    info!("Rasterized {} slide image(s) into {}", images.len(), images_dir.display());
    Ok(images)
}

/// Gather pdftoppm's `page-N.jpg` products in page order. Some pdftoppm
/// versions zero-pad the page number and some do not, so the order comes
/// from the parsed number, never from the file name.
fn collect_page_images(images_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut produced: Vec<(usize, PathBuf)> = std::fs::read_dir(images_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();
    produced.sort_by_key(|(n, _)| *n);
    Ok(produced.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<usize> {
    if path.extension()? != "jpg" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("page")?
        .trim_start_matches('-')
        .parse()
        .ok()
}
