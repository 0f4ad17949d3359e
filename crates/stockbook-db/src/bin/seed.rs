//! # Seed Data Generator
//!
//! Populates the database with demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed 12 products (default)
//! cargo run -p stockbook-db --bin seed
//!
//! # Seed a custom amount
//! cargo run -p stockbook-db --bin seed -- --count 30
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//! ```
//!
//! ## Generated Data
//! Every seeded product goes through the real service operations, so the
//! running totals, history rows, and available stock come out exactly as a
//! live deployment would produce them:
//! - Two or three stock additions on spread-out dates
//! - One or two sales at a markup, never exceeding available stock

use std::env;

use stockbook_db::{Database, DbConfig, InventoryService, SellOutcome};

/// Demo catalog: (name, base unit cost in cents)
const PRODUCTS: &[(&str, i64)] = &[
    ("Widget", 200),
    ("Gadget", 550),
    ("Sprocket", 125),
    ("Flange", 310),
    ("Gizmo", 475),
    ("Doohickey", 90),
    ("Contraption", 1250),
    ("Whatsit", 65),
    ("Thingamajig", 840),
    ("Bracket", 150),
    ("Coupling", 265),
    ("Grommet", 45),
    ("Fastener", 30),
    ("Spindle", 720),
    ("Bushing", 110),
    ("Washer", 15),
    ("Dowel", 55),
    ("Ferrule", 85),
    ("Gasket", 130),
    ("Pulley", 390),
];

/// Dates the demo history is spread across.
const DATES: &[&str] = &[
    "2025-09-01",
    "2025-09-08",
    "2025-09-15",
    "2025-09-22",
    "2025-10-01",
    "2025-10-06",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 12;
    let mut db_path = String::from("./stockbook_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(12);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to seed (default: 12)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let count = count.min(PRODUCTS.len());

    println!("🌱 Stockbook Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let service = InventoryService::new(db);

    println!();
    println!("Seeding inventory...");

    let start = std::time::Instant::now();
    let mut adds = 0usize;
    let mut sells = 0usize;

    for (idx, (name, base_cost)) in PRODUCTS.iter().take(count).enumerate() {
        // Two or three additions at slightly drifting unit costs
        let add_rounds = 2 + idx % 2;
        for round in 0..add_rounds {
            let quantity = 10 + ((idx * 7 + round * 5) % 40) as i64;
            let unit_price = base_cost + (round as i64) * (base_cost / 20).max(1);
            let date = DATES[(idx + round) % DATES.len()];

            service.add_stock(name, quantity, unit_price, date).await?;
            adds += 1;
        }

        // One or two sales at a 40% markup, capped at available stock
        let current = service
            .database()
            .products()
            .get_by_name(name)
            .await?
            .expect("seeded product exists");

        let sell_rounds = 1 + idx % 2;
        for round in 0..sell_rounds {
            let quantity = (current.available_stock / 4).max(1);
            let unit_price = base_cost + (base_cost * 2) / 5;
            let date = DATES[(idx + round + 2) % DATES.len()];

            match service.sell_stock(name, quantity, unit_price, date).await? {
                SellOutcome::Sold(_) => sells += 1,
                SellOutcome::InsufficientStock { .. } => break,
            }
        }

        if (idx + 1) % 5 == 0 {
            println!("  Seeded {} products...", idx + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Seeded {} products ({} adds, {} sells) in {:?}",
        count, adds, sells, elapsed
    );

    // Verify with a summary read
    println!();
    println!("Verifying summary...");
    let analytics = service.enhanced_summary().await?;
    for row in analytics.iter().take(3) {
        println!(
            "  {} → stock {}, profit/loss {} cents",
            row.product.name,
            row.product.available_stock,
            format_cents(row.profit_loss_cents)
        );
    }

    let report = serde_json::json!({
        "products": count,
        "adds": adds,
        "sells": sells,
        "elapsed_ms": elapsed.as_millis() as u64,
    });
    println!();
    println!("{}", serde_json::to_string_pretty(&report)?);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Renders an optional cent amount; analytics fields are absent until a
/// product has history behind them.
fn format_cents(cents: Option<i64>) -> String {
    match cents {
        Some(c) => c.to_string(),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents_handles_absent_values() {
        assert_eq!(format_cents(Some(800)), "800");
        assert_eq!(format_cents(Some(-250)), "-250");
        assert_eq!(format_cents(None), "n/a");
    }
}
