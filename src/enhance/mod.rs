//! Resume enhancement via a hosted generative model

pub mod client;
pub mod enhancer;
pub mod prompts;

pub use enhancer::{combined_preview, EnhancedSections, ResumeEnhancer};
