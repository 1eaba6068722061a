//! In-memory repository for products, customers, and orders.
//!
//! All state lives in process memory for the lifetime of the process; every
//! operation is a synchronous method call.

pub mod manager;

pub use manager::{
    DEFAULT_LOW_STOCK_THRESHOLD, InventoryManager, InventoryReport, OrderRequest, ProductFilter,
};
