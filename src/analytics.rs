//! Per-item and per-day sales totals over the order history.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{order::Order, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: f64,
    /// Order lines naming this item.
    pub order_count: u32,
    pub average_order_size: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub total_revenue: f64,
    pub order_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    /// Best sellers by quantity first.
    pub top_products: Vec<ProductSales>,
    /// Keyed by UTC `YYYY-MM-DD`.
    pub sales_by_date: BTreeMap<String, DailySales>,
    pub total_orders: usize,
    pub total_revenue: f64,
}

pub fn sales_analytics(orders: &[Order]) -> SalesAnalytics {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut top_products: Vec<ProductSales> = Vec::new();

    for item in orders.iter().flat_map(|order| &order.items) {
        let position = *positions.entry(item.item_name.as_str()).or_insert_with(|| {
            top_products.push(ProductSales {
                name: item.item_name.clone(),
                total_quantity: 0,
                total_revenue: 0.0,
                order_count: 0,
                average_order_size: 0.0,
            });
            top_products.len() - 1
        });
        let product = &mut top_products[position];
        product.total_quantity += u64::from(item.quantity);
        product.total_revenue += item.total_price;
        product.order_count += 1;
    }

    for product in &mut top_products {
        product.average_order_size = product.total_quantity as f64 / product.order_count as f64;
    }
    top_products.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));

    let mut sales_by_date: BTreeMap<String, DailySales> = BTreeMap::new();
    for order in orders {
        let day = sales_by_date
            .entry(order.order_date.format("%Y-%m-%d").to_string())
            .or_default();
        day.total_revenue += order.grand_total;
        day.order_count += 1;
    }

    let total_revenue = orders.iter().map(|order| order.grand_total).sum();

    log::debug!(
        "Analytics over {} orders: {} products, {} days",
        orders.len(),
        top_products.len(),
        sales_by_date.len()
    );

    SalesAnalytics {
        top_products,
        sales_by_date,
        total_orders: orders.len(),
        total_revenue,
    }
}
