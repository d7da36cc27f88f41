//! # Types CLI: List the parameter type registry.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use ecfg_types::TypeRegistry;

/// Arguments for the `ecfg types` subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Print the full structure of each descriptor.
    #[arg(long)]
    pub expand: bool,
}

/// One line per bound parameter: name, catalog name and, when expanded,
/// the descriptor structure.
pub fn describe(registry: &TypeRegistry, expand: bool) -> Vec<String> {
    registry
        .parameters()
        .map(|(param, descriptor)| {
            let name = registry.types().name_of(descriptor).unwrap_or("(custom)");
            if expand {
                format!("{param:<20} {name:<30} {descriptor}")
            } else {
                format!("{param:<20} {name}")
            }
        })
        .collect()
}

/// Execute the types subcommand.
pub fn run_types(args: &TypesArgs, registry: &TypeRegistry) -> Result<u8> {
    let mut stdout = std::io::stdout().lock();
    for line in describe(registry, args.expand) {
        writeln!(stdout, "{}", line.trim_end())?;
    }
    Ok(0)
}
