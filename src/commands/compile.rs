//! Filter compilation command.

use clap::Args;

use crate::output;
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_service::{FilterCompiler, RequestContext};

/// Arguments for the compile command
#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Filter parameters as JSON, e.g. '{"shopIds":["S1"],"priceMin":10}'
    #[arg(default_value = "{}")]
    pub filters: String,
}

/// Print the selector compiled from the given filter parameters
pub fn execute(args: &CompileArgs, config: &AppConfig) -> Result<(), AppError> {
    let value: serde_json::Value = serde_json::from_str(&args.filters)
        .map_err(|e| AppError::validation(format!("Filters are not valid JSON: {e}")))?;

    let compiler = FilterCompiler::new(config.catalog.filters.clone());
    let selector = compiler.compile_value(&RequestContext::anonymous(), value)?;

    output::print_json(&selector);
    Ok(())
}
