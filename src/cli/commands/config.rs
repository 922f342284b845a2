//! Configuration command implementation

use crate::cli::context::CliContext;
use crate::config::{ClientConfig, ConfigKey, ConfigValue};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let config_path = CliContext::config_path()?;
    let mut config = ClientConfig::load_from(&config_path)?;

    if show_origin {
        if json {
            println!("{}", serde_json::json!({
                "config_file": config_path.display().to_string(),
                "exists": config_path.exists()
            }));
        } else {
            println!("{}: {}", "Configuration file".bold(), config_path.display().to_string().cyan());
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        print_usage(json);
        return Ok(());
    };

    let config_key = ConfigKey::from_str(&key_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(&config_key)?;
        config.save_to(&config_path)?;

        if json {
            println!("{}", serde_json::json!({
                "action": "unset",
                "key": key_str,
                "status": "success"
            }));
        } else {
            println!("{} {}", "✓".green(), format!("Reset {}", key_str).bold());
        }
    } else if let Some(value_str) = value {
        config.set(config_key, ConfigValue::parse(&value_str))?;
        config.save_to(&config_path)?;

        if json {
            println!("{}", serde_json::json!({
                "action": "set",
                "key": key_str,
                "value": value_str,
                "status": "success"
            }));
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else {
        let value = config.get(&config_key).to_string();
        if json {
            println!("{}", serde_json::json!({
                "key": key_str,
                "value": value
            }));
        } else {
            println!("{}", value);
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &ClientConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let config_map: std::collections::BTreeMap<String, String> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&config_map)?);
    } else {
        println!("{}", "Client Configuration".green().bold());
        println!("{}", "═".repeat(40));
        println!();

        for (key, value) in entries {
            println!("{} = {}", key.bold(), value.cyan());
        }
    }

    Ok(())
}

fn print_usage(json: bool) {
    if json {
        println!("{}", serde_json::json!({
            "error": "No configuration key specified",
            "usage": "merkle-client config <key> [value] or --list"
        }));
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!("{}", "═".repeat(40));
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "merkle-client config <key>".cyan());
    println!("  {} Set value", "merkle-client config <key> <value>".cyan());
    println!("  {} List all", "merkle-client config --list".cyan());
    println!("  {} Reset value", "merkle-client config --unset <key>".cyan());
    println!();
    println!("{}", "Keys:".bold());
    for key in ConfigKey::ALL {
        println!("  {}", key.to_str().green());
    }
}
