//! Status command - show configuration

use claimgate_oidc::{ClaimCatalog, ClaimsConfig};
use console::style;
use std::path::Path;

pub fn show(config: &ClaimsConfig, path: Option<&Path>) {
    println!("{}", style("Claimgate Status").cyan().bold());
    println!();

    println!("{}", style("Version").bold().underlined());
    println!("  claimgate-cli:   {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("{}", style("Configuration").bold().underlined());
    println!(
        "  Source:          {}",
        match path {
            Some(path) => style(path.display().to_string()).green(),
            None => style("defaults + environment".to_string()).yellow(),
        }
    );
    println!("  Scope strategy:  {}", config.scope_strategy);
    println!();

    println!("{}", style("Claim Catalog").bold().underlined());
    for entry in ClaimCatalog::from_config(config).entries() {
        println!("  {:<20} requires {}", entry.claim, style(&entry.scope).dim());
    }
}
