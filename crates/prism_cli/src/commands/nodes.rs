// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node catalog listing.

#![allow(clippy::print_literal)] // Table headers use literal strings

use crate::error::CliError;
use clap::Args;
use prism_graph::{NodeCategory, NodeDef, NodeRegistry, PortDef};

#[derive(Args)]
pub struct NodesArgs {
    /// Only list nodes in this category (input, math, pattern, color, output)
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,
}

pub fn run(args: NodesArgs) -> Result<(), CliError> {
    let registry = NodeRegistry::builtin();

    let categories = match args.category.as_deref() {
        Some(name) => vec![NodeCategory::from_name(&name.to_lowercase())
            .ok_or_else(|| CliError::UnknownCategory(name.to_string()))?],
        None => registry.categories(),
    };

    for category in categories {
        println!("{}", category.name());
        println!("{}", "=".repeat(category.name().len()));
        println!();
        println!("  {:20}  {:14}  {:32}  {}", "Type", "Label", "Inputs", "Outputs");
        println!("  {:20}  {:14}  {:32}  {}", "----", "-----", "------", "-------");
        for def in registry.types_in_category(category) {
            print_node(def);
        }
        println!();
    }

    Ok(())
}

fn print_node(def: &NodeDef) {
    println!(
        "  {:20}  {:14}  {:32}  {}",
        def.type_id,
        def.label,
        ports(&def.inputs),
        ports(&def.outputs)
    );
    for param in &def.params {
        let default = serde_json::to_string(&param.default).unwrap_or_default();
        let range = match (param.min, param.max) {
            (Some(min), Some(max)) => format!(" [{min}, {max}]"),
            _ => String::new(),
        };
        println!("      param {} ({}) = {default}{range}", param.name, param.kind);
    }
}

/// `name:kind` list of a port signature
fn ports(ports: &[PortDef]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }
    ports
        .iter()
        .map(|p| format!("{}:{}", p.name, p.kind))
        .collect::<Vec<_>>()
        .join(" ")
}
