//! Single-item expansion example, including a recipe cycle.
//!
//! Expands one item from the bundled sample catalog at a chosen quantity,
//! then builds a small cyclic catalog in code to show how the expander
//! truncates a branch that loops back on itself.
//!
//! Run with: `cargo run -p planetcraft-examples --example expand_item -- Laser 4`

use anyhow::Context;
use planetcraft_core::{Catalog, ExpansionPath, NodeKind, Recipe, expand};
use planetcraft_data::load_catalog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let item = args.next().unwrap_or_else(|| "Laser".to_string());
    let quantity: u64 = match args.next() {
        Some(q) => q.parse().with_context(|| format!("invalid quantity '{q}'"))?,
        None => 1,
    };

    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let catalog = load_catalog(&dir)?;

    // --- Sample catalog ---
    let result = expand(&catalog, &item, quantity, &mut ExpansionPath::new());
    tracing::info!(item = %item, quantity, kind = ?result.trace.kind, "item expanded");
    println!("{quantity} x {item}:");
    result.trace.walk(&mut |node, depth| {
        println!(
            "  {:indent$}{} x{} ({:?})",
            "",
            node.name,
            node.quantity,
            node.kind,
            indent = depth * 2
        );
    });
    println!();
    println!("Base materials:");
    for (name, qty) in result.breakdown.base_materials.iter() {
        println!("  {name}: {qty}");
    }

    // --- A cycle: Regenerator needs a Catalyst, which needs a Regenerator ---
    let cyclic = Catalog::builder()
        .item("Regenerator", recipe(&[("Catalyst", 1), ("Iron Bar", 2)]))
        .item("Catalyst", recipe(&[("Regenerator", 1), ("Gold", 3)]))
        .alloy("Iron Bar", recipe(&[("Iron", 10)]))
        .base_materials(["Iron", "Gold"])
        .build()?;

    let looped = expand(&cyclic, "Regenerator", 1, &mut ExpansionPath::new());
    let truncated = looped.trace.truncated_names();
    if !truncated.is_empty() {
        tracing::warn!(truncated = ?truncated, "recipe cycle truncated; totals are incomplete");
    }
    println!();
    println!("1 x Regenerator (cyclic recipe):");
    looped.trace.walk(&mut |node, depth| {
        let flag = if node.kind == NodeKind::CycleTruncated {
            "  <- cycle, not expanded"
        } else {
            ""
        };
        println!(
            "  {:indent$}{} x{}{flag}",
            "",
            node.name,
            node.quantity,
            indent = depth * 2
        );
    });
    println!(
        "Truncated at: {}",
        truncated.join(", ")
    );

    Ok(())
}

fn recipe(entries: &[(&str, u64)]) -> Recipe {
    entries.iter().map(|(n, q)| (n.to_string(), *q)).collect()
}
