use std::fs;

use anyhow::{anyhow, Context, Result};
use quiz_helper_core::config::HelperConfig;

use crate::canonicalize_or_current;
use crate::commands::load_config_or_default;

/// Write a config file with default settings.
pub fn init_config_command(path: &str, dataset: Option<String>, force: bool) -> Result<()> {
    let config_path = canonicalize_or_current(path)?;
    if config_path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }

    let mut config = HelperConfig::default();
    if let Some(dataset) = dataset {
        config = config.with_dataset_path(dataset);
    }

    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    println!("Initialized helper config:");
    println!("  Path: {}", config_path.display());
    println!("  Dataset: {}", config.dataset_path.as_deref().unwrap_or("(none)"));
    println!("  Highlight duration: {} ms", config.highlight_duration_ms);
    println!("  Wait timeout: {} ms", config.wait_timeout_ms);

    Ok(())
}

/// Print the effective configuration (defaults merged with the file, if any).
pub fn show_config_command(config: Option<&str>, json: bool) -> Result<()> {
    let config = load_config_or_default(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Helper Config");
    println!("=============");
    println!("Config version: {}", config.config_version);
    println!("Dataset: {}", config.dataset_path.as_deref().unwrap_or("(none)"));
    println!("Highlight duration: {} ms", config.highlight_duration_ms);
    println!(
        "Wait timeout: {} ms (poll every {} ms)",
        config.wait_timeout_ms, config.wait_interval_ms
    );
    println!("Min question length: {}", config.min_question_len);

    Ok(())
}
