use sqlx::PgPool;

use crate::products::repo::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The (client, product) pair already existed; visibility is in place
    /// either way, so callers treat this as success.
    Duplicate,
}

pub async fn insert(
    db: &PgPool,
    client_id: &str,
    product_id: &str,
) -> anyhow::Result<InsertOutcome> {
    let res = sqlx::query("INSERT INTO assignments (client_id, product_id) VALUES ($1, $2)")
        .bind(client_id)
        .bind(product_id)
        .execute(db)
        .await;
    match res {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// All assignment rows, ordered by client name then product name.
pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<(String, String)>> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        r#"
        SELECT a.client_id, a.product_id
        FROM assignments a
        JOIN users u ON a.client_id = u.id
        JOIN products p ON a.product_id = p.id
        ORDER BY u.name, p.name
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn products_for_client(db: &PgPool, client_id: &str) -> anyhow::Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.id, p.name, p.category, p.unit, p.image, p.created_at
        FROM products p
        JOIN assignments a ON p.id = a.product_id
        WHERE a.client_id = $1
        ORDER BY p.category, p.name
        "#,
    )
    .bind(client_id)
    .fetch_all(db)
    .await?;
    Ok(products)
}

pub async fn delete(db: &PgPool, client_id: &str, product_id: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM assignments WHERE client_id = $1 AND product_id = $2")
        .bind(client_id)
        .bind(product_id)
        .execute(db)
        .await?;
    Ok(())
}
