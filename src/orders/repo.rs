use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

use super::dto::{CreateOrderRequest, OrderItemPayload};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub delivery_date: Option<Date>,
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit: String,
    pub quantity: f64,
}

const ORDER_COLUMNS: &str = "id, client_id, client_name, client_email, client_phone, \
                             client_address, delivery_date, comment, order_date";
const ITEM_COLUMNS: &str = "order_id, product_id, product_name, product_image, unit, quantity";

pub async fn insert_order(
    db: &PgPool,
    id: &str,
    req: &CreateOrderRequest,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (id, client_id, client_name, client_email,
                            client_phone, client_address, delivery_date, comment)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(&req.client_id)
    .bind(&req.client_name)
    .bind(&req.client_email)
    .bind(&req.client_phone)
    .bind(&req.client_address)
    .bind(req.delivery_date)
    .bind(&req.comment)
    .execute(db)
    .await
    .context("insert order")?;
    Ok(())
}

pub async fn insert_item(
    db: &PgPool,
    order_id: &str,
    item: &OrderItemPayload,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO order_items (order_id, product_id, product_name, product_image, unit, quantity)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(order_id)
    .bind(&item.id)
    .bind(&item.name)
    .bind(&item.image)
    .bind(&item.unit)
    .bind(item.quantity)
    .execute(db)
    .await
    .context("insert order item")?;
    Ok(())
}

pub async fn fetch(db: &PgPool, id: &str) -> anyhow::Result<Option<(Order, Vec<OrderItem>)>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    let Some(order) = order else {
        return Ok(None);
    };
    let items = items_for_order(db, id).await?;
    Ok(Some((order, items)))
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY order_date DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(orders)
}

pub async fn items_for_order(db: &PgPool, order_id: &str) -> anyhow::Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1"
    ))
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Line items go first, then the order row. The schema has no FK cascade, so
/// this ordering is what keeps orphaned items out of the store.
pub async fn delete(db: &PgPool, id: &str) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin tx")?;
    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await.context("commit tx")?;
    Ok(())
}
