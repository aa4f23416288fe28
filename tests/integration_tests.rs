//! Integration tests for the resume optimizer

use resume_optimizer::deck::{build_placeholder_map, populate_deck, PlaceholderTable};
use resume_optimizer::enhance::enhancer::parse_sections;
use resume_optimizer::enhance::{combined_preview, EnhancedSections};
use resume_optimizer::export::{sections_to_docx, text_to_bytes};
use resume_optimizer::input::manager::InputManager;
use resume_optimizer::ResumeOptimizerError;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Python"));
    assert!(text.contains("AWS"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.xyz");
    std::fs::write(&path, "some text").unwrap();

    let result = manager.extract_text(&path).await;
    assert!(matches!(
        result,
        Err(ResumeOptimizerError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_misnamed_pdf_fails_fast_with_invalid_format() {
    let mut manager = InputManager::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, "this is plain text, not a pdf").unwrap();

    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ResumeOptimizerError::InvalidFormat(_))));
}

#[tokio::test]
async fn test_upload_extraction_and_cleanup() {
    let mut manager = InputManager::new();

    let text = manager
        .extract_upload(b"Jane Roe\nData Engineer", "txt")
        .await
        .unwrap();
    assert!(text.contains("Jane Roe"));
    // Uploads are one-shot copies; nothing is retained in the path cache.
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_upload_with_unsupported_extension() {
    let mut manager = InputManager::new();
    let result = manager.extract_upload(b"whatever", "pptx").await;
    assert!(matches!(
        result,
        Err(ResumeOptimizerError::UnsupportedFormat(_))
    ));
}

#[tokio::test]
async fn test_docx_round_trip_through_extractor() {
    // The DOCX exporter's buffer should be readable by the DOCX extractor.
    let mut sections = EnhancedSections::new();
    sections.insert("Summary".to_string(), "Backend engineer.".to_string());
    sections.insert("Skills".to_string(), "Python, AWS".to_string());

    let bytes = sections_to_docx(&sections).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("optimized_resume.docx");
    std::fs::write(&path, &bytes).unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();
    assert!(text.contains("Summary"));
    assert!(text.contains("Backend engineer."));
    assert!(text.contains("Python, AWS"));
}

/// Write a minimal deck archive with one slide containing the given XML body.
fn write_template(path: &Path, slide_xml: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);

    writer
        .start_file("[Content_Types].xml", FileOptions::default())
        .unwrap();
    writer
        .write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();

    writer
        .start_file("ppt/slides/slide1.xml", FileOptions::default())
        .unwrap();
    writer.write_all(slide_xml.as_bytes()).unwrap();

    writer.finish().unwrap();
}

fn read_slide(path: &Path) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut xml = String::new();
    archive
        .by_name("ppt/slides/slide1.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[test]
fn test_populate_deck_replaces_mapped_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.pptx");
    let output = dir.path().join("filled.pptx");
    write_template(
        &template,
        "<p:sp><a:t>{{NAME}}</a:t><a:t>{{SKILLS}}</a:t><a:t>{{SUMMARY}}</a:t></p:sp>",
    );

    let mut sections = EnhancedSections::new();
    sections.insert("Name".to_string(), "John Doe".to_string());
    sections.insert("Skills".to_string(), "Python, AWS".to_string());
    let map = build_placeholder_map(&sections, &PlaceholderTable::default());

    populate_deck(&template, &output, &map).unwrap();

    let xml = read_slide(&output);
    assert!(xml.contains("John Doe"));
    assert!(xml.contains("Python, AWS"));
    // Unmapped placeholder is left in place, not blanked.
    assert!(xml.contains("{{SUMMARY}}"));

    // The template is untouched.
    let template_xml = read_slide(&template);
    assert!(template_xml.contains("{{NAME}}"));
    assert!(!template_xml.contains("John Doe"));
}

#[test]
fn test_populate_deck_is_idempotent_on_output_content() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.pptx");
    write_template(&template, "<a:t>{{SUMMARY}}</a:t>");

    let mut sections = EnhancedSections::new();
    sections.insert("Summary".to_string(), "Backend engineer.".to_string());
    let map = build_placeholder_map(&sections, &PlaceholderTable::default());

    let first = dir.path().join("first.pptx");
    let second = dir.path().join("second.pptx");
    populate_deck(&template, &first, &map).unwrap();
    populate_deck(&template, &second, &map).unwrap();

    assert_eq!(read_slide(&first), read_slide(&second));
}

#[test]
fn test_enhancement_scenario_flows_through_mapping_and_population() {
    // Canned model output for: resume "John Doe / 5 years Python",
    // JD "backend engineer with Python and AWS".
    let response = "## Name\nJohn Doe\n\n## Summary\nBackend engineer with 5 years of Python.\n\n## Skills\nPython, AWS, REST APIs\n";

    let sections = parse_sections(response).unwrap();
    assert!(sections.get("Skills").unwrap().contains("Python"));

    let map = build_placeholder_map(&sections, &PlaceholderTable::default());
    assert!(map.contains_key("{{SKILLS}}"));

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.pptx");
    let output = dir.path().join("filled.pptx");
    write_template(&template, "<a:t>{{SKILLS}}</a:t>");

    populate_deck(&template, &output, &map).unwrap();
    let xml = read_slide(&output);
    assert!(!xml.contains("{{SKILLS}}"));
    assert!(xml.contains("Python"));
}

#[test]
fn test_section_exports_survive_missing_template() {
    let mut sections = EnhancedSections::new();
    sections.insert("Summary".to_string(), "Backend engineer.".to_string());
    let map = build_placeholder_map(&sections, &PlaceholderTable::default());

    let dir = tempfile::tempdir().unwrap();
    let result = populate_deck(
        &PathBuf::from("no/such/template.pptx"),
        &dir.path().join("filled.pptx"),
        &map,
    );
    assert!(matches!(
        result,
        Err(ResumeOptimizerError::TemplateNotFound(_))
    ));

    // Document and text exports depend only on the sections and still work.
    let docx = sections_to_docx(&sections).unwrap();
    assert_eq!(&docx[..2], b"PK");

    let preview = combined_preview(&sections);
    let text = text_to_bytes(&preview);
    assert!(String::from_utf8(text).unwrap().contains("--- Summary ---"));
}
