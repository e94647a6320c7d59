use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::ProductPayload;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const PRODUCT_COLUMNS: &str = "id, name, category, unit, image, created_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY category, name"
    ))
    .fetch_all(db)
    .await?;
    Ok(products)
}

pub async fn list_ids(db: &PgPool) -> anyhow::Result<Vec<String>> {
    let ids: Vec<(String,)> = sqlx::query_as("SELECT id FROM products")
        .fetch_all(db)
        .await?;
    Ok(ids.into_iter().map(|(id,)| id).collect())
}

/// id -> category for the whole catalog, used when grouping order line items.
pub async fn category_map(db: &PgPool) -> anyhow::Result<HashMap<String, String>> {
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, category FROM products")
        .fetch_all(db)
        .await?;
    Ok(rows.into_iter().collect())
}

pub async fn insert(db: &PgPool, id: &str, payload: &ProductPayload) -> anyhow::Result<Product> {
    let product = sqlx::query_as::<_, Product>(&format!(
        r#"
        INSERT INTO products (id, name, category, unit, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.unit)
    .bind(&payload.image)
    .fetch_one(db)
    .await?;
    Ok(product)
}

pub async fn update(
    db: &PgPool,
    id: &str,
    payload: &ProductPayload,
) -> anyhow::Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        r#"
        UPDATE products
        SET name = $2, category = $3, unit = $4, image = $5
        WHERE id = $1
        RETURNING {PRODUCT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.unit)
    .bind(&payload.image)
    .fetch_optional(db)
    .await?;
    Ok(product)
}

pub async fn delete(db: &PgPool, id: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
