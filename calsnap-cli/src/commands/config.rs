use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::CalsnapConfig;

pub fn run(init: bool) -> Result<()> {
    let config_path = CalsnapConfig::config_path()?;

    if init {
        CalsnapConfig::create_default_config(&config_path)?;
        println!("Created {}", config_path.display());
        return Ok(());
    }

    let config = CalsnapConfig::load()?;

    println!("{}", "Paths".bold());
    if config_path.exists() {
        println!("  Config:  {}", config_path.display());
    } else {
        println!(
            "  Config:  {} {}",
            config_path.display(),
            "(not created yet, run `calsnap config --init`)".dimmed()
        );
    }

    println!();
    println!("{}", "Settings".bold());
    let settings = toml::to_string_pretty(&config)?;
    for line in settings.lines() {
        println!("  {}", line);
    }

    let tz = config.timezone()?;
    if config.timezone.is_none() {
        println!("  {}", format!("# timezone = \"{}\" (system)", tz.name()).dimmed());
    }

    Ok(())
}
