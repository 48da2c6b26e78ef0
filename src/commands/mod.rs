//! CLI command definitions and dispatch.

pub mod compile;
pub mod config;
pub mod products;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;

/// Product catalog tooling
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment name; loads `config/default` then `config/{env}`
    /// instead of `--config`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Product listing
    Products(products::ProductsArgs),
    /// Compile filter parameters into a selector
    Compile(compile::CompileArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Products(args) => products::execute(args, app_config, self.format).await,
            Commands::Compile(args) => compile::execute(args, app_config),
            Commands::Config(args) => config::execute(args, app_config),
        }
    }
}
