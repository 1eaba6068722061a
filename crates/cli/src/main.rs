//! Demonstration entry point: seeds a small store, places and confirms one
//! order, and prints the inventory report, top sellers, and one customer's
//! analytics as indented JSON.

use chrono::Utc;
use rust_decimal::Decimal;

use shopstock_analytics::SalesAnalytics;
use shopstock_catalog::Product;
use shopstock_core::{CustomerId, ProductId};
use shopstock_customers::Customer;
use shopstock_inventory::{InventoryManager, OrderRequest};
use shopstock_orders::OrderStatus;

fn main() -> anyhow::Result<()> {
    shopstock_observability::init();

    let mut inventory = InventoryManager::new();

    for (id, name, price_cents, category, stock) in [
        ("LAPTOP001", "Gaming Laptop", 129999i64, "Electronics", 15),
        ("MOUSE001", "Wireless Mouse", 2999, "Electronics", 50),
        ("BOOK001", "Programming in Practice", 4999, "Books", 25),
    ] {
        inventory.add_product(Product::new(
            ProductId::new(id),
            name,
            Decimal::new(price_cents, 2),
            category,
            stock,
            Utc::now(),
        )?)?;
    }

    inventory.add_customer(Customer::new(
        CustomerId::new("CUST001"),
        "Alice Johnson",
        "alice@example.com",
        Some("+1234567890".to_string()),
        None,
    )?);
    inventory.add_customer(Customer::new(
        CustomerId::new("CUST002"),
        "Bob Smith",
        "bob@example.com",
        None,
        None,
    )?);

    let order_id = inventory
        .create_order(
            &CustomerId::new("CUST001"),
            &[
                OrderRequest::new("LAPTOP001", 1),
                OrderRequest::new("MOUSE001", 2),
            ],
            Utc::now(),
        )?
        .order_id()
        .clone();
    inventory.update_order_status(&order_id, "confirmed".parse::<OrderStatus>()?)?;
    tracing::info!(order_id = %order_id, "sample order confirmed");

    let report = inventory.generate_inventory_report();
    println!("Inventory Report: {}", serde_json::to_string_pretty(&report)?);

    let analytics = SalesAnalytics::new(&inventory);

    let top_products = analytics.top_selling_products(5);
    println!(
        "Top Selling Products: {}",
        serde_json::to_string_pretty(&top_products)?
    );

    if let Some(stats) = analytics.customer_analytics(&CustomerId::new("CUST001")) {
        println!("Customer Analytics: {}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
