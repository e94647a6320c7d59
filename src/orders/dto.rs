use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::repo::{Order, OrderItem};

/// Order submission body. The admin UI sends camelCase keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub client_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemPayload>,
    #[serde(default)]
    pub delivery_date: Option<Date>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// One requested line: the catalog fields arrive denormalized from the client
/// and are stored as-is, so the order keeps its snapshot forever.
#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub unit: String,
    pub quantity: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// Display-formatted submission timestamp.
    pub date: String,
}

pub fn format_order_date(ts: OffsetDateTime) -> String {
    let desc = format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
    ts.format(&desc).unwrap_or_else(|_| ts.to_string())
}

pub fn format_delivery_date(date: Option<Date>) -> String {
    let desc = format_description!("[day]/[month]/[year]");
    date.and_then(|d| d.format(&desc).ok())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn request_parses_camel_case_body() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{
                "clientId": "client1",
                "clientName": "Chez Louise",
                "clientPhone": "0601020304",
                "deliveryDate": "2026-09-01",
                "items": [
                    {"id": "p1", "name": "Golden apples", "unit": "5kg crate", "quantity": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(req.client_id, "client1");
        assert_eq!(req.delivery_date, Some(date!(2026 - 09 - 01)));
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2.0);
        assert!(req.comment.is_none());
    }

    #[test]
    fn items_default_to_empty() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"clientId": "client1", "clientName": "Chez Louise"}"#)
                .unwrap();
        assert!(req.items.is_empty());
    }

    #[test]
    fn dates_format_day_first() {
        assert_eq!(
            format_order_date(datetime!(2026-08-27 14:03:25 UTC)),
            "27/08/2026 14:03:25"
        );
        assert_eq!(format_delivery_date(Some(date!(2026 - 09 - 01))), "01/09/2026");
        assert_eq!(format_delivery_date(None), "-");
    }
}
