use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shopstock_catalog::Product;
use shopstock_core::{CustomerId, DomainError, DomainResult, Entity, OrderId, ProductId};
use shopstock_customers::Customer;
use shopstock_orders::{Order, OrderItem, OrderStatus};

/// Stock level at or below which a product counts as low-stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// One requested line when placing an order: a product and a desired quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderRequest {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// AND-combined product search filter.
///
/// `None` imposes no constraint. A present value is always a real bound:
/// `min_price: Some(0)` means "price at least zero", it does not mean unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category() != category {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if product.price() < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if product.price() > max_price {
                return false;
            }
        }
        true
    }
}

/// Snapshot of inventory totals and low-stock products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub total_products: usize,
    pub total_inventory_value: Decimal,
    pub low_stock_count: usize,
    pub low_stock_products: Vec<String>,
}

/// In-memory repository for products, customers, and orders.
///
/// Single-threaded by design; no operation suspends or blocks. Order creation
/// is the only operation touching multiple entries, and it validates the
/// whole request before mutating anything.
#[derive(Debug, Default)]
pub struct InventoryManager {
    products: HashMap<ProductId, Product>,
    customers: HashMap<CustomerId, Customer>,
    orders: HashMap<OrderId, Order>,
    next_order_no: u64,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product. Fails if the id is already taken.
    pub fn add_product(&mut self, product: Product) -> DomainResult<&Product> {
        match self.products.entry(product.id().clone()) {
            Entry::Occupied(existing) => Err(DomainError::validation(format!(
                "product {} already exists",
                existing.key()
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(product)),
        }
    }

    /// Look up a product. No error on miss.
    pub fn get_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Adjust a product's stock by `delta`.
    pub fn update_product_stock(&mut self, product_id: &ProductId, delta: i64) -> DomainResult<i64> {
        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;
        product.update_stock(delta)
    }

    /// Apply a percentage discount to a product's live price.
    ///
    /// Does not touch unit prices already captured on existing orders.
    pub fn apply_product_discount(
        &mut self,
        product_id: &ProductId,
        percentage: Decimal,
    ) -> DomainResult<Decimal> {
        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;
        product.apply_discount(percentage)
    }

    /// Linear scan over the catalog; all supplied filters must match.
    ///
    /// Results are ordered by product id for determinism.
    pub fn search_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        let mut results: Vec<&Product> = self
            .products
            .values()
            .filter(|product| filter.matches(product))
            .collect();
        results.sort_by_key(|product| product.product_id().clone());
        results
    }

    /// Products at or below the given stock threshold, ordered by product id.
    pub fn low_stock_products(&self, threshold: i64) -> Vec<&Product> {
        let mut results: Vec<&Product> = self
            .products
            .values()
            .filter(|product| product.is_low_stock(threshold))
            .collect();
        results.sort_by_key(|product| product.product_id().clone());
        results
    }

    /// Insert a customer, overwriting any existing customer with the same id.
    pub fn add_customer(&mut self, customer: Customer) -> &Customer {
        match self.customers.entry(customer.id().clone()) {
            Entry::Occupied(mut existing) => {
                existing.insert(customer);
                existing.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(customer),
        }
    }

    pub fn get_customer(&self, customer_id: &CustomerId) -> Option<&Customer> {
        self.customers.get(customer_id)
    }

    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Place an order for a customer.
    ///
    /// The entire request is validated before any stock moves: every product
    /// must exist, and the combined requested quantity per product must fit
    /// its current stock. If any line fails, no state changes. On success the
    /// order is stored with a fresh sequential id and pending status, stock is
    /// decremented for every line, and the unit price of each line is captured
    /// from the live product price.
    pub fn create_order(
        &mut self,
        customer_id: &CustomerId,
        requests: &[OrderRequest],
        now: DateTime<Utc>,
    ) -> DomainResult<&Order> {
        if !self.customers.contains_key(customer_id) {
            return Err(DomainError::not_found(format!("customer {customer_id}")));
        }

        let mut items = Vec::with_capacity(requests.len());
        let mut required: HashMap<&ProductId, i64> = HashMap::new();
        for request in requests {
            let product = self
                .products
                .get(&request.product_id)
                .ok_or_else(|| DomainError::not_found(format!("product {}", request.product_id)))?;
            items.push(OrderItem::new(
                request.product_id.clone(),
                request.quantity,
                product.price(),
            )?);
            *required.entry(&request.product_id).or_default() += i64::from(request.quantity);
        }

        for (&product_id, &quantity) in &required {
            let product = self
                .products
                .get(product_id)
                .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;
            if product.stock_quantity() < quantity {
                return Err(DomainError::validation(format!(
                    "insufficient stock for {}: have {}, requested {}",
                    product.name(),
                    product.stock_quantity(),
                    quantity
                )));
            }
        }

        // Validation passed for every line; the decrements below cannot fail.
        for (product_id, quantity) in required {
            self.update_product_stock(product_id, -quantity)?;
        }

        self.next_order_no += 1;
        let order_id = OrderId::from_sequence(self.next_order_no);
        let order = Order::new(order_id.clone(), customer_id.clone(), items, now);
        tracing::debug!(order_id = %order_id, customer_id = %customer_id, "order created");

        Ok(self.orders.entry(order_id).or_insert(order))
    }

    /// Overwrite an order's status. Fails only if the order is unknown.
    pub fn update_order_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> DomainResult<()> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::not_found(format!("order {order_id}")))?;
        order.update_status(status);
        Ok(())
    }

    /// Inventory totals plus low-stock products at the default threshold.
    pub fn generate_inventory_report(&self) -> InventoryReport {
        let low_stock = self.low_stock_products(DEFAULT_LOW_STOCK_THRESHOLD);
        InventoryReport {
            total_products: self.products.len(),
            total_inventory_value: self
                .products
                .values()
                .map(Product::inventory_value)
                .sum(),
            low_stock_count: low_stock.len(),
            low_stock_products: low_stock
                .into_iter()
                .map(|product| product.name().to_string())
                .collect(),
        }
    }
}
