//! Project breakdown example: chain, totals, and full expansion.
//!
//! Loads the bundled sample catalog, resolves the prerequisite chain of a
//! project, sums the chain's direct requirements, and expands those totals
//! down to base materials. Unresolved components and cycle-truncated
//! branches are marked in the tree.
//!
//! Run with: `cargo run -p planetcraft-examples --example project_breakdown -- "Solar Array"`
//!
//! A different catalog directory can be given as the second argument.
//! Set `RUST_LOG=debug` to see resolver events.

use anyhow::{Context, bail};
use planetcraft_core::{ExpansionNode, NodeKind, Tally, plan_project};
use planetcraft_data::load_catalog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let project = args.next().unwrap_or_else(|| "Advanced Telescope".to_string());
    let dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"));

    let catalog = load_catalog(&dir)
        .with_context(|| format!("loading catalog from {}", dir.display()))?;

    if catalog.project(&project).is_none() {
        bail!(
            "unknown project '{project}'. Known projects: {}",
            catalog.project_names().join(", ")
        );
    }

    let plan = plan_project(&catalog, &project);
    tracing::info!(
        project = %plan.project,
        chain_len = plan.chain.len(),
        unresolved = plan.breakdown.unresolved_names().len(),
        "project resolved"
    );

    // --- Chain ---
    println!("=== Requirements for \"{}\" ===", plan.project);
    println!();
    println!("Project chain:");
    for (i, name) in plan.chain.iter().enumerate() {
        let entry = catalog.project(name);
        match entry.and_then(|e| e.description.as_deref()) {
            Some(desc) => println!("  {}. {name} -- {desc}", i + 1),
            None => println!("  {}. {name}", i + 1),
        }
        if let Some(notes) = entry.and_then(|e| e.notes.as_deref()) {
            println!("     note: {notes}");
        }
    }

    // --- Flat totals ---
    println!();
    println!("Total requirements (direct, summed over the chain):");
    print_table(&plan.totals);

    // --- Full expansion ---
    let breakdown = &plan.breakdown.breakdown;
    println!();
    println!("Base materials:");
    print_table(&breakdown.base_materials);
    println!();
    println!("Intermediate items:");
    print_table(&breakdown.used_items);
    println!();
    println!("Intermediate alloys:");
    print_table(&breakdown.used_alloys);

    println!();
    println!("Expansion tree:");
    for root in &plan.breakdown.trace {
        print_tree(root);
    }

    let unresolved = plan.breakdown.unresolved_names();
    if !unresolved.is_empty() {
        println!();
        println!("Unresolved components: {}", unresolved.join(", "));
    }

    Ok(())
}

fn print_table(tally: &Tally) {
    if tally.is_empty() {
        println!("  (none)");
        return;
    }
    let width = tally.names().map(str::len).max().unwrap_or(0);
    for (name, qty) in tally.iter() {
        println!("  {name:<width$}  {qty:>14}");
    }
}

fn print_tree(root: &ExpansionNode) {
    root.walk(&mut |node, depth| {
        let marker = match node.kind {
            NodeKind::Item => "",
            NodeKind::Alloy => " [alloy]",
            NodeKind::BaseMaterial => " [base]",
            NodeKind::Unresolved => " [unresolved]",
            NodeKind::CycleTruncated => " [cycle]",
        };
        println!(
            "  {:indent$}{} x{}{marker}",
            "",
            node.name,
            node.quantity,
            indent = depth * 2
        );
    });
}
