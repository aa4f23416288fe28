//! CLI interface for the resume optimizer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-optimizer")]
#[command(about = "AI-powered resume tailoring and slide-deck export tool")]
#[command(
    long_about = "Upload a resume, provide a job description, and produce a tailored resume as a populated slide deck with PDF, image, DOCX and plain-text exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tailor a resume to a job description and export all formats
    Optimize {
        /// Path to resume file (PDF, DOCX, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a job description file (TXT)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text passed inline
        #[arg(long, conflicts_with = "job")]
        job_text: Option<String>,

        /// Name of a pre-supplied job description from the JD directory
        #[arg(long, conflicts_with_all = ["job", "job_text"])]
        jd_name: Option<String>,

        /// Override the deck template path
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Override the output base directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the generative model
        #[arg(short, long)]
        model: Option<String>,

        /// Print the full before/after preview
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the pre-supplied job description files
    Jds {
        /// Override the JD directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
