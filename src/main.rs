//! Resume optimizer: AI-powered resume tailoring and slide-deck export tool

mod cli;
mod config;
mod deck;
mod enhance;
mod error;
mod export;
mod input;
mod pipeline;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use colored::Colorize;
use config::Config;
use error::{Result, ResumeOptimizerError};
use input::manager::InputManager;
use log::{error, info, warn};
use pipeline::ResumePipeline;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Optimize {
            resume,
            job,
            job_text,
            jd_name,
            template,
            output_dir,
            model,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "docx", "txt"])
                .map_err(|e| ResumeOptimizerError::InvalidInput(format!("Resume file: {}", e)))?;

            if let Some(job_path) = &job {
                cli::validate_file_extension(job_path, &["txt"]).map_err(|e| {
                    ResumeOptimizerError::InvalidInput(format!("Job description file: {}", e))
                })?;
            }

            if let Some(template_path) = template {
                config.template.path = template_path;
            }
            if let Some(base_dir) = output_dir {
                config.output.base_dir = base_dir;
            }
            if let Some(model_name) = model {
                config.enhancer.model = model_name;
            }

            println!("{}", "Resume optimization".bold());
            println!("Resume: {}", resume.display());

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            info!("Extracted {} characters of resume text", resume_text.len());

            let jd_text = resolve_job_description(&config, job, job_text, jd_name).await?;

            if jd_text.trim().is_empty() {
                // Never call the model without a job description.
                warn!("Job description is empty; skipping optimization");
                println!(
                    "{}",
                    "Please provide a job description before optimizing.".yellow()
                );
                return Ok(());
            }

            let pipeline = ResumePipeline::new(&config)?;
            println!("Optimizing with {}...", config.enhancer.model);
            let artifacts = pipeline.run(&resume_text, &jd_text).await?;

            let session_dir = config.output.base_dir.join(&artifacts.session_id);

            // The document and text exports live in memory; persist them
            // next to the deck-derived artifacts so every download has a
            // stable per-session location.
            let text_path = session_dir.join("optimized_resume.txt");
            std::fs::create_dir_all(&session_dir)?;
            std::fs::write(&text_path, &artifacts.plain_text)?;

            let docx_path = artifacts.document.as_ref().map(|bytes| {
                let path = session_dir.join("optimized_resume.docx");
                (path, bytes)
            });
            if let Some((path, bytes)) = &docx_path {
                std::fs::write(path, bytes)?;
            }

            println!("\n{}", "Optimization complete".green().bold());
            println!("Session: {}", artifacts.session_id);
            println!(
                "Generated: {}",
                artifacts.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "Sections rewritten: {}",
                artifacts
                    .sections
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            println!("\n{}", "Available downloads:".bold());
            println!("  TXT:  {}", text_path.display());
            if let Some((path, _)) = &docx_path {
                println!("  DOCX: {}", path.display());
            }
            if let Some(deck) = &artifacts.deck {
                println!("  PPTX: {}", deck.display());
            }
            if let Some(pdf) = &artifacts.pdf {
                println!("  PDF:  {}", pdf.display());
            }
            if let Some(first_image) = artifacts.first_image() {
                println!(
                    "  JPG:  {} ({} slide image(s) total)",
                    first_image.display(),
                    artifacts.images.len()
                );
            }

            if !artifacts.failures.is_empty() {
                println!("\n{}", "Unavailable exports:".yellow().bold());
                for failure in &artifacts.failures {
                    println!("  {}: {}", failure.stage.yellow(), failure.message);
                }
            }

            if detailed {
                println!("\n{}", "Original resume".bold());
                println!("{}", resume_text.trim());
                println!("\n{}", "Optimized resume".bold());
                println!("{}", artifacts.preview);
            }
        }

        Commands::Jds { dir } => {
            let jd_dir = dir.unwrap_or(config.jds.dir);
            let files = list_job_descriptions(&jd_dir)?;

            if files.is_empty() {
                println!("No job description files found in {}", jd_dir.display());
            } else {
                println!("{}", format!("Job descriptions in {}:", jd_dir.display()).bold());
                for name in files {
                    println!("  {}", name);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("{}", "Current configuration".bold());
                println!("Model: {}", config.enhancer.model);
                println!("API key env var: {}", config.enhancer.api_key_env);
                println!("Template: {}", config.template.path.display());
                println!("Output base dir: {}", config.output.base_dir.display());
                println!("JD directory: {}", config.jds.dir.display());
                println!("\nPlaceholder table:");
                for (section, token) in &config.template.placeholders {
                    println!("  {} -> {}", section, token);
                }
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}

/// Pick the job description from the file, inline text, or named JD
/// directory entry, in that priority order.
async fn resolve_job_description(
    config: &Config,
    job: Option<PathBuf>,
    job_text: Option<String>,
    jd_name: Option<String>,
) -> Result<String> {
    if let Some(path) = job {
        return Ok(tokio::fs::read_to_string(&path).await?);
    }
    if let Some(text) = job_text {
        return Ok(text);
    }
    if let Some(name) = jd_name {
        let path = config.jds.dir.join(&name);
        if !path.exists() {
            return Err(ResumeOptimizerError::InvalidInput(format!(
                "No job description named '{}' in {}",
                name,
                config.jds.dir.display()
            )));
        }
        return Ok(tokio::fs::read_to_string(&path).await?);
    }
    Ok(String::new())
}

/// Enumerate the .txt files of the JD directory, filenames verbatim.
fn list_job_descriptions(dir: &PathBuf) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext == "txt")
                .unwrap_or(false)
        })
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}
