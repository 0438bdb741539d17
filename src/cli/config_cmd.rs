use anyhow::Result;

use crate::cli::output::OutputOptions;
use crate::core::config::{AppConfig, CredentialMode};

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    match AppConfig::default().save_to(&path) {
        Ok(()) => {
            println!("Generated config at {}", path.display());
            println!("  Credentials come from the AWS default chain; set [aws] credentials = \"static\" to use keys instead.");
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn path(_opts: &OutputOptions) -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn check(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `cet config init` to create one.");
        return Ok(());
    }

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        println!("Config is valid: {}", path.display());
        let endpoint = config
            .aws
            .endpoint
            .clone()
            .unwrap_or_else(|| crate::core::explorer::client::default_endpoint(&config.aws.region));
        println!("  Endpoint:    {}", endpoint);
        println!(
            "  Credentials: {}",
            match config.aws.credentials {
                CredentialMode::Default => "AWS default chain",
                CredentialMode::Static => "static keys",
            }
        );
        println!("  Max lookback: {} days", config.settings.max_lookback_days);
    } else {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}
