//! Issuers command - list the configured issuer profiles.

use clap::Args;
use console::style;

use super::load_config;

/// Arguments for the issuers command.
#[derive(Args)]
pub struct IssuersArgs {
    /// Print profile definitions as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: IssuersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let registry = config.build_registry()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        return Ok(());
    }

    println!(
        "{} {} issuer profile(s), in detection order:",
        style("ℹ").blue(),
        registry.len()
    );

    for (index, profile) in registry.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, style(profile.name()).bold());

        let identifiers: Vec<&str> = profile.identifiers().iter().map(|r| r.as_str()).collect();
        println!("   Identifiers: {}", identifiers.join(", "));

        let fields: Vec<&str> = profile.fields().map(|(field, _)| field.as_str()).collect();
        println!("   Fields ({}): {}", profile.field_count(), fields.join(", "));
    }

    Ok(())
}
