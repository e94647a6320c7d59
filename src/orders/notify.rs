//! Order notification: one email per submitted order to the fixed operator
//! inbox, with the rendered order form attached. By the time this runs the
//! order is already durable, so a dispatch failure is logged and swallowed.

use tracing::{info, warn};

use super::dto::{format_delivery_date, format_order_date};
use super::grouping::CategorySection;
use super::repo::Order;
use crate::config::AppConfig;
use crate::mailer::{Mailer, OutgoingEmail, PdfAttachment};

pub async fn dispatch(
    mailer: &dyn Mailer,
    config: &AppConfig,
    order: &Order,
    sections: &[CategorySection],
    pdf: Vec<u8>,
) {
    let email = OutgoingEmail {
        to: config.order_inbox.clone(),
        subject: order.client_name.clone(),
        html_body: build_html(order, sections),
        attachment: Some(PdfAttachment {
            filename: format!("order_{}.pdf", order.id),
            bytes: pdf,
        }),
    };

    match mailer.send(email).await {
        Ok(()) => info!(order_id = %order.id, to = %config.order_inbox, "order notification sent"),
        Err(e) => warn!(
            error = %e,
            order_id = %order.id,
            "order notification failed; order is already persisted"
        ),
    }
}

fn build_html(order: &Order, sections: &[CategorySection]) -> String {
    let mut html = String::new();
    html.push_str("<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">");
    html.push_str("<h1 style=\"color: #15803d;\">New order received</h1>");
    html.push_str(&format!(
        "<p style=\"font-size: 18px;\"><strong>Order placed by {}</strong></p>",
        order.client_name
    ));
    html.push_str("<p>The order form is attached.</p>");

    html.push_str(
        "<div style=\"background: #f0fdf4; padding: 20px; border-radius: 8px; \
         margin: 20px 0; border-left: 4px solid #15803d;\">",
    );
    html.push_str(&format!("<p><strong>Order no:</strong> {}</p>", order.id));
    html.push_str(&format!(
        "<p><strong>Client:</strong> {}</p>",
        order.client_name
    ));
    if let Some(email) = &order.client_email {
        html.push_str(&format!("<p><strong>Email:</strong> {email}</p>"));
    }
    if let Some(phone) = &order.client_phone {
        html.push_str(&format!("<p><strong>Phone:</strong> {phone}</p>"));
    }
    if let Some(address) = &order.client_address {
        html.push_str(&format!("<p><strong>Delivery address:</strong> {address}</p>"));
    }
    html.push_str(&format!(
        "<p><strong>Requested delivery:</strong> {}</p>",
        format_delivery_date(order.delivery_date)
    ));
    html.push_str(&format!(
        "<p><strong>Placed on:</strong> {}</p>",
        format_order_date(order.order_date)
    ));
    html.push_str("</div>");

    html.push_str("<h3 style=\"color: #15803d;\">Ordered products:</h3>");
    for section in sections {
        html.push_str("<div style=\"margin: 15px 0;\">");
        html.push_str(&format!(
            "<h4 style=\"color: #15803d; margin: 10px 0 5px 0;\">{}</h4>",
            section.title.to_uppercase()
        ));
        html.push_str("<ul style=\"margin: 0; padding-left: 20px;\">");
        for item in &section.items {
            let image = item.product_image.as_deref().unwrap_or("");
            html.push_str(&format!(
                "<li style=\"margin: 5px 0;\">{image} {} - {} {}</li>",
                item.product_name, item.quantity, item.unit
            ));
        }
        html.push_str("</ul></div>");
    }

    if let Some(comment) = order.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        html.push_str(
            "<div style=\"background: #fff7ed; padding: 15px; border-radius: 8px; margin: 20px 0;\">",
        );
        html.push_str("<p style=\"margin: 0; font-weight: bold;\">Client comment:</p>");
        html.push_str(&format!("<p style=\"margin: 10px 0 0 0;\">{comment}</p>"));
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SmtpConfig, SupplierConfig};
    use axum::async_trait;
    use std::sync::Mutex;
    use time::macros::{date, datetime};

    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _email: OutgoingEmail) -> anyhow::Result<()> {
            anyhow::bail!("smtp relay unreachable")
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/test".into(),
            smtp: SmtpConfig {
                host: "localhost".into(),
                port: 587,
                username: "user".into(),
                password: "pass".into(),
                from_address: "orders@example.com".into(),
            },
            order_inbox: "ops@example.com".into(),
            supplier: SupplierConfig {
                name: "SUPPLIER".into(),
                street: "1 Market St".into(),
                city: "Rungis".into(),
                country: "France".into(),
            },
        }
    }

    fn sample_order() -> Order {
        Order {
            id: "cmd42".into(),
            client_id: "client1".into(),
            client_name: "Chez Louise".into(),
            client_email: Some("louise@example.com".into()),
            client_phone: Some("0601020304".into()),
            client_address: Some("3 rue des Halles, Paris".into()),
            delivery_date: Some(date!(2026 - 09 - 01)),
            comment: Some("Ring at the back door".into()),
            order_date: datetime!(2026-08-27 06:30:00 UTC),
        }
    }

    fn sample_sections() -> Vec<CategorySection> {
        vec![CategorySection {
            category: "1: Vegetables".into(),
            title: "Vegetables".into(),
            items: vec![super::super::repo::OrderItem {
                order_id: "cmd42".into(),
                product_id: "p1".into(),
                product_name: "Leek".into(),
                product_image: None,
                unit: "kg".into(),
                quantity: 5.0,
            }],
        }]
    }

    #[tokio::test]
    async fn dispatch_sends_to_operator_inbox_with_attachment() {
        let mailer = RecordingMailer {
            sent: Mutex::new(Vec::new()),
        };
        let config = test_config();
        dispatch(&mailer, &config, &sample_order(), &sample_sections(), vec![1, 2, 3]).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ops@example.com");
        assert_eq!(sent[0].subject, "Chez Louise");
        let attachment = sent[0].attachment.as_ref().unwrap();
        assert_eq!(attachment.filename, "order_cmd42.pdf");
        assert_eq!(attachment.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn dispatch_failure_is_swallowed() {
        let config = test_config();
        // Must not panic or propagate anything.
        dispatch(&FailingMailer, &config, &sample_order(), &sample_sections(), vec![]).await;
    }

    #[test]
    fn html_body_carries_order_summary_and_sections() {
        let html = build_html(&sample_order(), &sample_sections());
        assert!(html.contains("cmd42"));
        assert!(html.contains("Chez Louise"));
        assert!(html.contains("01/09/2026"));
        assert!(html.contains("VEGETABLES"));
        assert!(html.contains("Leek"));
        assert!(html.contains("Ring at the back door"));
    }

    #[test]
    fn html_body_omits_empty_comment() {
        let mut order = sample_order();
        order.comment = Some("   ".into());
        let html = build_html(&order, &sample_sections());
        assert!(!html.contains("Client comment"));
    }
}
