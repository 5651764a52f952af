//! Lookup command - one-shot contact lookup with conflict check.

use std::io::{self, Write};

use anyhow::{Result, anyhow};
use callsheet_core::{ContactMatch, LookupResult};
use clap::Args;
use console::Style;
use serde::Serialize;

use super::Context;

/// Arguments for the lookup command.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Username to look up
    pub identifier: String,
}

/// Lookup response for JSON output.
#[derive(Debug, Serialize)]
struct LookupOutput<'a> {
    identifier: &'a str,
    found: bool,
    conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<&'a ContactMatch>,
}

/// Run the lookup command.
pub fn run(args: LookupArgs, ctx: &Context) -> Result<()> {
    let table = ctx.load_table()?;
    let identifier = args.identifier.trim();
    let result = callsheet_core::lookup(&table, identifier);

    if ctx.json_output {
        let contact = result.found();
        let output = LookupOutput {
            identifier,
            found: contact.is_some(),
            conflict: contact.is_some_and(ContactMatch::has_conflict),
            contact,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        write_lookup(&mut io::stdout().lock(), identifier, &result)?;
    }

    match result {
        LookupResult::Found(_) => Ok(()),
        LookupResult::NotFound => Err(anyhow!("username '{}' not found", identifier)),
    }
}

/// Render a lookup result the way the operator sees it.
pub fn write_lookup<W: Write>(
    out: &mut W,
    identifier: &str,
    result: &LookupResult,
) -> io::Result<()> {
    match result {
        LookupResult::Found(found) => write_match(out, found),
        LookupResult::NotFound => {
            let red = Style::new().red();
            writeln!(
                out,
                "{} Username not found in database: {}",
                red.apply_to("✗"),
                identifier
            )
        }
    }
}

fn write_match<W: Write>(out: &mut W, found: &ContactMatch) -> io::Result<()> {
    let dim = Style::new().dim();
    let bold = Style::new().bold();

    writeln!(out)?;
    writeln!(
        out,
        "Calling {} at address: {}",
        bold.apply_to(&found.identifier),
        found.primary_address
    )?;
    writeln!(out, "{} {}", dim.apply_to("Phone Number:"), found.phone_number)?;

    match found.conflict_summary() {
        Some(addresses) => {
            let yellow = Style::new().yellow();
            writeln!(
                out,
                "{} Address conflict detected. Other addresses associated with this number: {}",
                yellow.apply_to("⚠"),
                addresses
            )
        }
        None => {
            let green = Style::new().green();
            writeln!(
                out,
                "{} No conflicting addresses found for this phone number.",
                green.apply_to("✓")
            )
        }
    }
}
