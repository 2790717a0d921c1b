use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Order, OrderDetail, OrderLine};

/// Orders for a store, newest first, each with its lines and the summed
/// product price. Rows are written by the storefront checkout; the
/// back-office only reads them.
pub async fn list_for_store(pool: &PgPool, store_id: Uuid) -> Result<Vec<OrderDetail>, sqlx::Error> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE store_id = $1 ORDER BY created_at DESC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    if orders.is_empty() {
        return Ok(vec![]);
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, p.price AS unit_price \
         FROM order_items oi \
         JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = ANY($1)",
    )
    .bind(&order_ids)
    .fetch_all(pool)
    .await?;

    let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = lines_by_order.remove(&order.id).unwrap_or_default();
            let total_price: Decimal = items.iter().map(|line| line.unit_price).sum();
            OrderDetail { order, items, total_price }
        })
        .collect())
}
