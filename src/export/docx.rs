//! Enhanced sections to an in-memory Word document

use crate::enhance::EnhancedSections;
use crate::error::{Result, ResumeOptimizerError};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;

const STAGE: &str = "docx";

/// Serialize the enhanced sections into a .docx byte buffer, one bold
/// heading plus body block per section, in mapping order. Nothing is
/// written to disk; the buffer is offered as a download.
pub fn sections_to_docx(sections: &EnhancedSections) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    for (section, content) in sections {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(section.as_str()).bold().size(32)),
        );
        for line in content.lines() {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
        }
        // Blank spacer between sections.
        docx = docx.add_paragraph(Paragraph::new());
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).map_err(|e| {
        ResumeOptimizerError::conversion(STAGE, format!("Failed to pack document: {}", e))
    })?;

    Ok(buffer.into_inner())
}
