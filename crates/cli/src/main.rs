//! `stockroom`: run a seeded inventory through a batch of orders.

mod seed;
mod settings;

use anyhow::Context;
use clap::Parser;

use stockroom_inventory::Inventory;
use stockroom_sales::{place_order, process_orders};

use crate::seed::Seed;
use crate::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    stockroom_observability::init(settings.log_format);

    let seed = Seed::load(&settings.seed)?;
    let inventory = seed
        .build_inventory()
        .context("failed to build inventory from seed")?;
    tracing::info!(products = inventory.len(), orders = seed.orders.len(), "inventory loaded");

    for request in &seed.orders {
        match place_order(&inventory, request) {
            Ok(order) => println!("{}\n", order.get_order_summary()?),
            Err(err) => println!("Order ID: {} - cannot be placed: {err}\n", request.order_id),
        }
    }

    for outcome in process_orders(&inventory, seed.orders.clone()) {
        match outcome.result {
            Ok(receipt) => println!("{receipt}"),
            Err(err) => println!("Order ID: {} - Failed: {err}", outcome.order_id),
        }
    }

    print_report(&inventory)?;

    if let Some(path) = &settings.snapshot_out {
        let snapshot = inventory.snapshot().context("failed to snapshot inventory")?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

fn print_report(inventory: &Inventory) -> anyhow::Result<()> {
    let total = inventory
        .get_total_inventory_value()
        .context("failed to value inventory")?;
    println!("\nInventory Report:\n");
    println!("{}", inventory.generate_inventory_report());
    println!("\nTotal inventory value: ${total:.2}");
    Ok(())
}
