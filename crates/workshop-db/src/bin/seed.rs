//! # Seed Data Generator
//!
//! Populates a workshop database with demo customers and parts, then
//! simulates one multi-line service order.
//!
//! ## Usage
//! ```bash
//! # Seed ./oficina.db (or $WORKSHOP_DB_PATH)
//! cargo run -p workshop-db --bin seed
//!
//! # Specify database path
//! cargo run -p workshop-db --bin seed -- --db ./data/dev.db
//!
//! # Print the resulting tables as JSON
//! cargo run -p workshop-db --bin seed -- --json
//! ```

use chrono::NaiveDate;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use workshop_core::{Money, NewCustomer, NewInventoryItem};
use workshop_db::{Database, DbConfig};

/// (name, phone, email, intake date)
const CUSTOMERS: &[(&str, &str, &str, (i32, u32, u32))] = &[
    ("Ana Souza", "11 98888-7777", "ana.souza@example.com", (2024, 5, 2)),
    ("Bruno Lima", "21 97777-1111", "bruno.lima@example.com", (2024, 5, 6)),
    ("Carla Dias", "31 96666-2222", "carla.dias@example.com", (2024, 5, 9)),
];

/// (name, quantity, purchase price, sale price)
const PARTS: &[(&str, i64, &str, &str)] = &[
    ("Brake Pad", 20, "25.00", "50.00"),
    ("Oil Filter", 15, "12.50", "25.00"),
    ("Spark Plug", 40, "8.90", "18.00"),
    ("Chain Kit", 5, "180.00", "299.90"),
    ("Clutch Cable", 8, "15.00", "32.50"),
    ("Air Filter", 12, "20.00", "42.00"),
];

/// Lines of the demo service order: (part name, quantity)
const DEMO_ORDER: &[(&str, i64)] = &[("Brake Pad", 2), ("Oil Filter", 1), ("Spark Plug", 2)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config = DbConfig::new(&args[i + 1]);
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Workshop Ledger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $WORKSHOP_DB_PATH or ./oficina.db)");
                println!("      --json         Print the tables as JSON after seeding");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %config.database_path.display(), "Seeding workshop database");
    let db = Database::new(config).await?;

    let existing = db.customers().count().await? + db.inventory().count().await?;
    if existing > 0 {
        warn!(rows = existing, "Database already has data, skipping seed");
    } else {
        seed(&db).await?;
    }

    if json {
        let customers = db.customers().list().await?;
        let items = db.inventory().list().await?;
        let orders = db.orders().list().await?;
        let dump = serde_json::json!({
            "customers": customers,
            "inventory_items": items,
            "orders": orders,
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        print_tables(&db).await?;
    }

    db.close().await;
    Ok(())
}

async fn seed(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let customers = db.customers();
    let mut first_customer = None;
    for (name, phone, email, (y, m, d)) in CUSTOMERS {
        let intake_date = NaiveDate::from_ymd_opt(*y, *m, *d).ok_or("invalid intake date")?;
        let customer = customers
            .insert(&NewCustomer::new(*name, *phone, *email, intake_date))
            .await?;
        first_customer.get_or_insert(customer.id);
    }
    info!(count = CUSTOMERS.len(), "Customers registered");

    let inventory = db.inventory();
    for (name, quantity, purchase, sale) in PARTS {
        let item = NewInventoryItem::new(
            *name,
            *quantity,
            purchase.parse::<Money>()?,
            sale.parse::<Money>()?,
        );
        inventory.insert(&item).await?;
    }
    info!(count = PARTS.len(), "Parts registered");

    let customer_id = first_customer.ok_or("no customers seeded")?;
    let simulator = db.simulator();
    let draft = simulator.draft_service_order(customer_id, DEMO_ORDER).await?;
    let rows = simulator.record_service_order(&draft).await?;
    let total = draft.total()?;
    info!(
        customer_id = customer_id,
        rows = rows.len(),
        total = %total,
        "Demo service order simulated"
    );

    Ok(())
}

async fn print_tables(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    println!("Customers");
    for c in db.customers().list().await? {
        println!(
            "  #{:<3} {:<12} {:<15} {:<26} {}",
            c.id, c.name, c.phone, c.email, c.intake_date
        );
    }

    println!();
    println!("Inventory");
    for item in db.inventory().list().await? {
        println!(
            "  #{:<3} {:<14} qty {:>4}  buy {:>8}  sell {:>8}",
            item.id,
            item.name,
            item.quantity,
            item.purchase_price().to_string(),
            item.sale_price().to_string()
        );
    }

    println!();
    println!("Orders");
    for order in db.orders().list().await? {
        println!(
            "  #{:<3} customer {:<3} {:<14} x{:<3} total {:>8}",
            order.id,
            order.customer_id,
            order.item_name,
            order.quantity,
            order.total().to_string()
        );
    }

    Ok(())
}

/// Log filter defaults to `info,workshop=debug,sqlx=warn`; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,workshop=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
