//! # Repository Module
//!
//! Database repository implementations for Workshop Ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form layer                                                             │
//! │       │                                                                 │
//! │       │  db.inventory().sale_price("Brake Pad")                        │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── insert(&self, item)                                               │
//! │  ├── list(&self)                                                       │
//! │  ├── sale_price(&self, name)                                           │
//! │  └── adjust_stock(&self, id, delta)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Registration, listing, intake dates
//! - [`InventoryRepository`](inventory::InventoryRepository) - Registration, listing, prices, stock
//! - [`OrderRepository`](order::OrderRepository) - Listing recorded orders

pub mod customer;
pub mod inventory;
pub mod order;
