//! # workshop-db: Database Layer for Workshop Ledger
//!
//! Persistence for customers, inventory items and orders, plus the order
//! simulation that records a sale and takes the parts out of stock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form layer (register customer / item, simulate order)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   workshop-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ CustomerRepo  │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ InventoryRepo │    │ 001_initial  │  │   │
//! │  │   │ one SQLite    │    │ OrderRepo     │    │              │  │   │
//! │  │   │ connection    │    ├───────────────┤    └──────────────┘  │   │
//! │  │   │               │◄───│ OrderSimulator│                      │   │
//! │  │   └───────────────┘    └───────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  oficina.db (or $WORKSHOP_DB_PATH)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use workshop_db::{Database, DbConfig};
//! use workshop_core::Money;
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//!
//! let price = db.inventory().sale_price("Brake Pad").await?;
//! db.simulator()
//!     .record_order(customer_id, "Brake Pad", 2, Money::from_cents(10_000))
//!     .await?;
//!
//! db.close().await;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod simulation;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DB_PATH_ENV};

pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::order::OrderRepository;
pub use simulation::OrderSimulator;
