//! # workshop-core: Pure Domain Types for Workshop Ledger
//!
//! Customers, inventory items and order rows, the `Money` type used for every
//! price and total, and the composition rules for multi-line service orders.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form layer (outside this workspace)                                    │
//! │    register customer ── register item ── simulate service order        │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ workshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐               │   │
//! │  │   │   types   │  │   money   │  │    order     │               │   │
//! │  │   │ Customer  │  │   Money   │  │ ServiceOrder │               │   │
//! │  │   │ Inventory │  │  FromStr  │  │  OrderLine   │               │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 workshop-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use workshop_core::{Money, OrderLine, ServiceOrder};
//!
//! let order = ServiceOrder::new(1)
//!     .with_line(OrderLine::new(10, "Brake Pad", 2, Money::from_cents(5000)))
//!     .with_line(OrderLine::new(11, "Oil Filter", 1, Money::from_cents(2500)));
//!
//! assert_eq!(order.total().unwrap().to_string(), "125.00");
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::{OrderLine, ServiceOrder};
pub use types::*;

/// Storage file used when nothing else is configured.
pub const DEFAULT_DB_FILE: &str = "oficina.db";
