use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shopstock_core::{CustomerId, ProductId};
use shopstock_inventory::InventoryManager;
use shopstock_orders::{Order, OrderStatus};

/// Default number of entries returned by the top-seller query.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Read model: units sold per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub quantity_sold: u64,
}

/// Read model: one customer's order history in aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerAnalytics {
    pub customer_name: String,
    pub total_orders: usize,
    pub total_spent: Decimal,
    pub average_order_value: Decimal,
}

/// Read-only analytics view over the repository.
///
/// Borrows the repository immutably, so the compiler guarantees no query
/// mutates inventory state.
pub struct SalesAnalytics<'a> {
    inventory: &'a InventoryManager,
}

impl<'a> SalesAnalytics<'a> {
    pub fn new(inventory: &'a InventoryManager) -> Self {
        Self { inventory }
    }

    /// Total revenue over orders whose creation timestamp falls within the
    /// optional inclusive bounds.
    ///
    /// Only confirmed, shipped, and delivered orders count; pending and
    /// cancelled orders are excluded.
    pub fn calculate_revenue(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Decimal {
        self.inventory
            .orders()
            .filter(|order| order.status().counts_toward_revenue())
            .filter(|order| start.is_none_or(|s| order.created_at() >= s))
            .filter(|order| end.is_none_or(|e| order.created_at() <= e))
            .map(Order::calculate_total)
            .sum()
    }

    /// Up to `limit` products ranked by units sold across revenue-counting
    /// orders.
    ///
    /// Ranked by quantity descending, product id ascending on ties. Product
    /// ids no longer present in the repository are silently skipped.
    pub fn top_selling_products(&self, limit: usize) -> Vec<ProductSales> {
        let mut sold: HashMap<&ProductId, u64> = HashMap::new();
        for order in self
            .inventory
            .orders()
            .filter(|order| order.status().counts_toward_revenue())
        {
            for item in order.items() {
                *sold.entry(item.product_id()).or_default() += u64::from(item.quantity());
            }
        }

        let mut ranked: Vec<(&ProductId, u64)> = sold.into_iter().collect();
        ranked.sort_by(|(id_a, qty_a), (id_b, qty_b)| {
            qty_b.cmp(qty_a).then_with(|| id_a.cmp(id_b))
        });
        ranked.truncate(limit);

        ranked
            .into_iter()
            .filter_map(|(product_id, quantity_sold)| {
                self.inventory.get_product(product_id).map(|product| ProductSales {
                    product_id: product_id.clone(),
                    name: product.name().to_string(),
                    quantity_sold,
                })
            })
            .collect()
    }

    /// Aggregate order history for one customer, or `None` if the customer
    /// is unknown.
    ///
    /// Cancelled orders count toward the order total but not toward spend,
    /// and the average divides by the full order count.
    pub fn customer_analytics(&self, customer_id: &CustomerId) -> Option<CustomerAnalytics> {
        let customer = self.inventory.get_customer(customer_id)?;

        let mut total_orders = 0usize;
        let mut total_spent = Decimal::ZERO;
        for order in self
            .inventory
            .orders()
            .filter(|order| order.customer_id() == customer_id)
        {
            total_orders += 1;
            if order.status() != OrderStatus::Cancelled {
                total_spent += order.calculate_total();
            }
        }

        let average_order_value = if total_orders > 0 {
            total_spent / Decimal::from(total_orders)
        } else {
            Decimal::ZERO
        };

        Some(CustomerAnalytics {
            customer_name: customer.name().to_string(),
            total_orders,
            total_spent,
            average_order_value,
        })
    }
}
