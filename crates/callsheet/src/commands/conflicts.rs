//! Conflicts command - report phone numbers with more than one address.

use anyhow::Result;
use callsheet_core::ADDRESS_SEPARATOR;
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the conflicts command.
#[derive(Args, Debug)]
pub struct ConflictsArgs {
    /// Maximum conflicts to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Run the conflicts command.
pub fn run(args: ConflictsArgs, ctx: &Context) -> Result<()> {
    let table = ctx.load_table()?;
    let mut found = callsheet_core::conflicts(&table);
    let total = found.len();
    if let Some(limit) = args.limit {
        found.truncate(limit);
    }

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    println!("{}", style("Address Conflicts").bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    println!();

    if found.is_empty() {
        println!(
            "{}",
            dim.apply_to(format!("No conflicts among {} contacts", table.len()))
        );
        return Ok(());
    }

    let yellow = Style::new().yellow();
    for conflict in &found {
        println!(
            "{} {}",
            yellow.apply_to("⚠"),
            style(&conflict.phone_number).bold()
        );
        println!(
            "  {} {}",
            dim.apply_to("Addresses:"),
            conflict.addresses.join(ADDRESS_SEPARATOR)
        );
        println!(
            "  {} {}",
            dim.apply_to("Contacts: "),
            conflict.identifiers.join(", ")
        );
    }

    if total > found.len() {
        println!();
        println!(
            "{}",
            dim.apply_to(format!("... and {} more", total - found.len()))
        );
    }

    Ok(())
}
