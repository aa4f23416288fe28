//! Resume optimizer library

pub mod cli;
pub mod config;
pub mod deck;
pub mod enhance;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;

pub use config::Config;
pub use error::{Result, ResumeOptimizerError};
