//! Format exporters for the populated deck and enhanced sections
//!
//! Each exporter is independent: one failing must not block the others, so
//! every function here returns its own `ConversionFailed` with the stage
//! name it belongs to.

pub mod docx;
pub mod images;
pub mod pdf;
pub mod text;

pub use docx::sections_to_docx;
pub use images::pdf_to_images;
pub use pdf::deck_to_pdf;
pub use text::text_to_bytes;
