//! Sales analytics: read-only queries over the inventory repository.
//!
//! Nothing in this crate mutates state; every query is a linear scan over
//! the repository's orders and products.

pub mod sales;

pub use sales::{CustomerAnalytics, DEFAULT_TOP_LIMIT, ProductSales, SalesAnalytics};
