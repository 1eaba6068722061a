use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shopstock_core::{DomainError, DomainResult, Entity, ProductId};

/// Catalog entry: a sellable product with a live price and on-hand stock.
///
/// Products are never deleted; stock moves through [`Product::update_stock`]
/// and price through [`Product::apply_discount`]. The serialized form carries
/// all fields with an ISO-8601 creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    product_id: ProductId,
    name: String,
    price: Decimal,
    category: String,
    stock_quantity: i64,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product.
    ///
    /// The creation timestamp is injected by the caller so construction stays
    /// deterministic under test.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        stock_quantity: i64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if stock_quantity < 0 {
            return Err(DomainError::validation("stock quantity cannot be negative"));
        }

        Ok(Self {
            product_id,
            name,
            price,
            category: category.into(),
            stock_quantity,
            created_at,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adjust stock by `delta` (positive restocks, negative consumes).
    ///
    /// Fails without mutating if the adjustment would drive stock below zero.
    /// Returns the new quantity.
    pub fn update_stock(&mut self, delta: i64) -> DomainResult<i64> {
        let updated = self.stock_quantity + delta;
        if updated < 0 {
            return Err(DomainError::validation(format!(
                "insufficient stock for {}: have {}, requested change {}",
                self.name, self.stock_quantity, delta
            )));
        }
        self.stock_quantity = updated;
        Ok(self.stock_quantity)
    }

    /// Apply a percentage discount to the live price.
    ///
    /// `percentage` must lie in `[0, 100]`. Repeated application compounds.
    /// Returns the new price.
    pub fn apply_discount(&mut self, percentage: Decimal) -> DomainResult<Decimal> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(format!(
                "discount percentage must be between 0 and 100, got {percentage}"
            )));
        }
        self.price *= Decimal::ONE - percentage / Decimal::ONE_HUNDRED;
        Ok(self.price)
    }

    /// Value of the on-hand stock at the live price.
    pub fn inventory_value(&self) -> Decimal {
        self.price * Decimal::from(self.stock_quantity)
    }

    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock_quantity <= threshold
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    fn laptop() -> Product {
        Product::new(
            ProductId::new("LAPTOP001"),
            "Gaming Laptop",
            Decimal::new(129999, 2),
            "Electronics",
            15,
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let err = Product::new(
            ProductId::new("P1"),
            "   ",
            Decimal::ONE,
            "Misc",
            1,
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for empty name"),
        }
    }

    #[test]
    fn new_product_rejects_negative_price_and_stock() {
        let err = Product::new(
            ProductId::new("P1"),
            "Widget",
            Decimal::new(-1, 0),
            "Misc",
            1,
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Product::new(
            ProductId::new("P1"),
            "Widget",
            Decimal::ONE,
            "Misc",
            -1,
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_stock_adds_delta_and_returns_new_quantity() {
        let mut product = laptop();
        assert_eq!(product.update_stock(5).unwrap(), 20);
        assert_eq!(product.update_stock(-20).unwrap(), 0);
        assert_eq!(product.stock_quantity(), 0);
    }

    #[test]
    fn update_stock_fails_without_mutating_when_result_would_be_negative() {
        let mut product = laptop();
        let err = product.update_stock(-16).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for negative resulting stock"),
        }
        assert_eq!(product.stock_quantity(), 15);
    }

    #[test]
    fn apply_discount_of_zero_leaves_price_unchanged() {
        let mut product = laptop();
        let price = product.apply_discount(Decimal::ZERO).unwrap();
        assert_eq!(price, Decimal::new(129999, 2));
    }

    #[test]
    fn apply_discount_of_one_hundred_zeroes_the_price() {
        let mut product = laptop();
        let price = product.apply_discount(Decimal::ONE_HUNDRED).unwrap();
        assert_eq!(price, Decimal::ZERO);
    }

    #[test]
    fn apply_discount_rejects_out_of_range_percentages() {
        let mut product = laptop();
        for pct in [Decimal::new(-1, 0), Decimal::new(1001, 1)] {
            let err = product.apply_discount(pct).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert_eq!(product.price(), Decimal::new(129999, 2));
    }

    #[test]
    fn repeated_discounts_compound() {
        let mut product = Product::new(
            ProductId::new("P1"),
            "Widget",
            Decimal::ONE_HUNDRED,
            "Misc",
            1,
            test_time(),
        )
        .unwrap();

        product.apply_discount(Decimal::TEN).unwrap();
        assert_eq!(product.price(), Decimal::new(90, 0));

        // 10% off twice is 19% off, not 20%.
        product.apply_discount(Decimal::TEN).unwrap();
        assert_eq!(product.price(), Decimal::new(81, 0));
    }

    #[test]
    fn inventory_value_is_price_times_stock() {
        let product = laptop();
        assert_eq!(product.inventory_value(), Decimal::new(1949985, 2));
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let product = laptop();
        assert!(!product.is_low_stock(10));
        assert!(product.is_low_stock(15));
        assert!(product.is_low_stock(16));
    }

    #[test]
    fn serialized_form_carries_all_fields_with_iso8601_timestamp() {
        let product = laptop();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["product_id"], "LAPTOP001");
        assert_eq!(json["name"], "Gaming Laptop");
        assert_eq!(json["category"], "Electronics");
        assert_eq!(json["stock_quantity"], 15);
        assert_eq!(json["created_at"], "2024-01-15T09:30:00Z");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: stock never goes negative, whatever adjustment
            /// sequence is attempted; failed adjustments leave stock as-is.
            #[test]
            fn stock_never_negative(
                initial in 0i64..10_000,
                deltas in proptest::collection::vec(-5_000i64..5_000, 0..20)
            ) {
                let mut product = Product::new(
                    ProductId::new("P1"),
                    "Widget",
                    Decimal::ONE,
                    "Misc",
                    initial,
                    test_time(),
                ).unwrap();

                for delta in deltas {
                    let before = product.stock_quantity();
                    match product.update_stock(delta) {
                        Ok(updated) => {
                            prop_assert_eq!(updated, before + delta);
                            prop_assert!(updated >= 0);
                        }
                        Err(_) => {
                            prop_assert!(before + delta < 0);
                            prop_assert_eq!(product.stock_quantity(), before);
                        }
                    }
                }
            }

            /// Property: in-range discounts keep the price non-negative and
            /// never increase it.
            #[test]
            fn discounts_never_increase_price(
                price_cents in 0i64..100_000_000,
                percentages in proptest::collection::vec(0i64..=100, 0..10)
            ) {
                let mut product = Product::new(
                    ProductId::new("P1"),
                    "Widget",
                    Decimal::new(price_cents, 2),
                    "Misc",
                    1,
                    test_time(),
                ).unwrap();

                for pct in percentages {
                    let before = product.price();
                    let after = product.apply_discount(Decimal::from(pct)).unwrap();
                    prop_assert!(after >= Decimal::ZERO);
                    prop_assert!(after <= before);
                }
            }
        }
    }
}
