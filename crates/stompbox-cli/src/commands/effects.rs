//! Effect listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use stompbox_chain::{EffectCategory, EffectDescriptor, EffectRegistry};

use super::common;
use crate::GlobalArgs;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect (api or display name)
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,

    /// List the effects the backend reports instead of the built-in catalog
    #[arg(long, conflicts_with = "effect")]
    remote: bool,
}

pub fn run(args: EffectsArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    if args.remote {
        return list_remote(global);
    }

    let registry = EffectRegistry::new();
    match &args.effect {
        Some(name) => {
            let effect = registry
                .find(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", name))?;
            print_effect(effect);
        }
        None => list_catalog(&registry),
    }
    Ok(())
}

fn list_catalog(registry: &EffectRegistry) {
    println!("Available Effects");
    println!("=================");

    for category in [
        EffectCategory::Drive,
        EffectCategory::Modulation,
        EffectCategory::TimeBased,
    ] {
        println!();
        println!("{} - {}", category.name(), category.description());
        for effect in registry.effects_in_category(category) {
            println!("  {:20}  {}", effect.display_name, effect.description);
        }
    }

    println!();
    println!("Use 'stompbox effects <name>' for parameter details.");
}

fn print_effect(effect: &EffectDescriptor) {
    println!("{}", effect.display_name);
    println!("{}", "=".repeat(effect.display_name.len()));
    println!();
    println!("{}", effect.description);
    println!();
    println!("Api name: {}", effect.api_name);
    println!("Category: {}", effect.category.name());
    println!();

    println!("Parameters:");
    println!();
    println!("  {:16}  {}", "Name", "Default");
    println!("  {:16}  {}", "----", "-------");
    for (name, default) in effect.defaults {
        println!("  {:16}  {}", name, default);
    }

    println!();
    println!("Example usage:");
    println!();
    let params: Vec<String> = effect
        .defaults
        .iter()
        .map(|(name, default)| format!("{name}={default}"))
        .collect();
    println!(
        "  stompbox process --input guitar.wav --chain \"{}:{}\"",
        effect.api_name,
        params.join(",")
    );
}

fn list_remote(global: &GlobalArgs) -> anyhow::Result<()> {
    let (_, client) = common::backend(global)?;
    let effects = client.list_available_effects()?;
    let registry = EffectRegistry::new();

    println!("Backend Effects ({})", client.base_url());
    println!();
    println!("  {:20}  {:20}  {}", "Name", "Display", "Defaults");
    println!("  {:20}  {:20}  {}", "----", "-------", "--------");
    for effect in &effects {
        let display = registry.display_name(&effect.name).unwrap_or("(not in catalog)");
        let defaults: Vec<String> = effect
            .default_params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!(
            "  {:20}  {:20}  {}",
            effect.name,
            display,
            defaults.join(", ")
        );
    }

    let missing: Vec<&str> = registry
        .all_effects()
        .iter()
        .map(|e| e.api_name)
        .filter(|name| !effects.iter().any(|r| r.name == *name))
        .collect();
    if !missing.is_empty() {
        println!();
        println!("Not offered by the backend: {}", missing.join(", "));
    }
    Ok(())
}
