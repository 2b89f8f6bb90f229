use std::{fs::File, io::BufReader, io::Read, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One line of an order as the order store exports it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub item_name: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mobile: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub grand_total: f64,
    pub order_date: DateTime<Utc>,
}

impl LineItem {
    pub fn new(item_name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            item_id: None,
            item_name: item_name.into(),
            unit_price,
            quantity,
            total_price: unit_price * quantity as f64,
        }
    }
}

impl Order {
    /// Builds an order whose grand total is the sum of its lines.
    pub fn new(order_date: DateTime<Utc>, items: Vec<LineItem>) -> Self {
        let grand_total = items.iter().map(|item| item.total_price).sum();
        Self {
            user_name: None,
            user_email: None,
            user_mobile: None,
            items,
            grand_total,
            order_date,
        }
    }

    /// Item names in line order, duplicates included.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.item_name.as_str())
    }
}

/// Parses a JSON array of orders.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<Order>> {
    let orders = serde_json::from_reader(reader)?;
    Ok(orders)
}

pub fn load_orders_from_path(path: impl AsRef<Path>) -> Result<Vec<Order>> {
    let file = File::open(path.as_ref())?;
    let orders = load_orders(BufReader::new(file))?;
    log::debug!(
        "Loaded {} orders from {}",
        orders.len(),
        path.as_ref().display()
    );
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use std::io::Write;

    const ORDERS_JSON: &str = r#"[
        {
            "userName": "Asha",
            "userEmail": "asha@example.com",
            "userMobile": "9000000000",
            "items": [
                {"itemId": "p1", "itemName": "Basmati Rice", "unitPrice": 120, "quantity": 2, "totalPrice": 240},
                {"itemName": "Toor Dal", "unitPrice": 90, "quantity": 1, "totalPrice": 90}
            ],
            "grandTotal": 330,
            "orderDate": "2024-03-01T10:15:00Z"
        },
        {
            "items": [{"itemName": "Ghee"}],
            "orderDate": "2024-03-02T08:00:00.000Z"
        }
    ]"#;

    #[test]
    fn parses_store_export() {
        let orders = load_orders(ORDERS_JSON.as_bytes()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].user_name.as_deref(), Some("Asha"));
        assert_eq!(orders[0].items[0].item_id.as_deref(), Some("p1"));
        assert_eq!(orders[0].items[0].quantity, 2);
        assert_eq!(orders[0].grand_total, 330.0);
        assert_eq!(
            orders[0].order_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap()
        );
        assert_eq!(
            orders[0].item_names().collect::<Vec<_>>(),
            vec!["Basmati Rice", "Toor Dal"]
        );
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let orders = load_orders(ORDERS_JSON.as_bytes()).unwrap();
        let ghee = &orders[1].items[0];

        assert_eq!(ghee.quantity, 0);
        assert_eq!(ghee.total_price, 0.0);
        assert_eq!(orders[1].grand_total, 0.0);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = load_orders("[{\"items\": 3}]".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ORDERS_JSON.as_bytes()).unwrap();

        let orders = load_orders_from_path(file.path()).unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_orders_from_path(dir.path().join("orders.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn new_order_sums_lines() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let order = Order::new(
            date,
            vec![LineItem::new("Atta", 2, 50.0), LineItem::new("Salt", 1, 20.0)],
        );
        assert_eq!(order.grand_total, 120.0);
    }
}
