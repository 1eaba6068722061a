use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shopstock_core::{CustomerId, DomainError, DomainResult, Entity, OrderId, ProductId};

/// Order status lifecycle.
///
/// Membership in this set is the only constraint; any status may transition
/// to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether orders in this status count toward revenue and sales volume.
    ///
    /// Pending orders are not yet sales; cancelled orders never were.
    pub fn counts_toward_revenue(self) -> bool {
        matches!(self, Self::Confirmed | Self::Shipped | Self::Delivered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::validation(format!(
                "invalid status '{other}': must be one of pending, confirmed, shipped, delivered, cancelled"
            ))),
        }
    }
}

/// Order line: product, quantity, and the unit price captured at order time.
///
/// The captured price is decoupled from the live product price so historical
/// totals stay fixed even if the price later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    product_id: ProductId,
    quantity: u32,
    unit_price: Decimal,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Decimal) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity for {product_id} must be positive"
            )));
        }
        Ok(Self {
            product_id,
            quantity,
            unit_price,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A customer order: an ordered sequence of lines plus a status.
///
/// Holds the owning customer's identifier, resolved through the repository
/// when the customer itself is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    order_id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    created_at: DateTime<Utc>,
    status: OrderStatus,
}

impl Order {
    /// Create an order. New orders always start pending.
    pub fn new(
        order_id: OrderId,
        customer_id: CustomerId,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            customer_id,
            items,
            created_at,
            status: OrderStatus::Pending,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Sum of quantity × unit price over all lines. Pure, no side effects.
    pub fn calculate_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Append a line. No stock or total re-validation happens here; that is
    /// the caller's responsibility.
    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Overwrite the status unconditionally.
    ///
    /// The fixed status set is enforced by the type; string input goes
    /// through [`OrderStatus::from_str`] and fails there.
    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.order_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap()
    }

    fn sample_order() -> Order {
        Order::new(
            OrderId::from_sequence(1),
            CustomerId::new("CUST001"),
            vec![
                OrderItem::new(ProductId::new("LAPTOP001"), 1, Decimal::new(129999, 2)).unwrap(),
                OrderItem::new(ProductId::new("MOUSE001"), 2, Decimal::new(2999, 2)).unwrap(),
            ],
            test_time(),
        )
    }

    #[test]
    fn order_items_reject_zero_quantity() {
        let err = OrderItem::new(ProductId::new("P1"), 0, Decimal::ONE).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        let item = OrderItem::new(ProductId::new("MOUSE001"), 2, Decimal::new(2999, 2)).unwrap();
        assert_eq!(item.line_total(), Decimal::new(5998, 2));
    }

    #[test]
    fn new_orders_start_pending() {
        assert_eq!(sample_order().status(), OrderStatus::Pending);
    }

    #[test]
    fn calculate_total_sums_all_lines() {
        // 1 × 1299.99 + 2 × 29.99 = 1359.97
        assert_eq!(sample_order().calculate_total(), Decimal::new(135997, 2));
    }

    #[test]
    fn add_item_appends_without_revalidation() {
        let mut order = sample_order();
        order.add_item(OrderItem::new(ProductId::new("BOOK001"), 1, Decimal::new(4999, 2)).unwrap());
        assert_eq!(order.items().len(), 3);
        assert_eq!(order.calculate_total(), Decimal::new(140996, 2));
    }

    #[test]
    fn update_status_overwrites_unconditionally() {
        let mut order = sample_order();
        order.update_status(OrderStatus::Delivered);
        assert_eq!(order.status(), OrderStatus::Delivered);
        // No enforced state machine ordering: delivered may go back to pending.
        order.update_status(OrderStatus::Pending);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn status_parses_from_its_display_form() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unrecognized_status_strings_fail_validation() {
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("refunded")),
            _ => panic!("expected Validation error for unrecognized status"),
        }
    }

    #[test]
    fn only_confirmed_shipped_delivered_count_toward_revenue() {
        assert!(!OrderStatus::Pending.counts_toward_revenue());
        assert!(OrderStatus::Confirmed.counts_toward_revenue());
        assert!(OrderStatus::Shipped.counts_toward_revenue());
        assert!(OrderStatus::Delivered.counts_toward_revenue());
        assert!(!OrderStatus::Cancelled.counts_toward_revenue());
    }
}
