use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Category, Color, Product, ProductDetail, ProductImage, Size};

/// Field set shared by product create and full-field update.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub size_id: Uuid,
    pub color_id: Uuid,
    pub image_urls: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

/// Optional list filters, straight from the query string.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub is_featured: Option<bool>,
}

pub async fn insert(
    pool: &PgPool,
    store_id: Uuid,
    input: &ProductInput,
) -> Result<Product, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products \
         (id, store_id, category_id, size_id, color_id, name, price, is_featured, is_archived) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(store_id)
    .bind(input.category_id)
    .bind(input.size_id)
    .bind(input.color_id)
    .bind(&input.name)
    .bind(input.price)
    .bind(input.is_featured)
    .bind(input.is_archived)
    .fetch_one(&mut *tx)
    .await?;

    insert_images(&mut tx, product.id, &input.image_urls).await?;

    tx.commit().await?;
    Ok(product)
}

pub async fn update(
    pool: &PgPool,
    product_id: Uuid,
    store_id: Uuid,
    input: &ProductInput,
) -> Result<Option<Product>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET category_id = $3, size_id = $4, color_id = $5, name = $6, \
         price = $7, is_featured = $8, is_archived = $9, updated_at = now() \
         WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(product_id)
    .bind(store_id)
    .bind(input.category_id)
    .bind(input.size_id)
    .bind(input.color_id)
    .bind(&input.name)
    .bind(input.price)
    .bind(input.is_featured)
    .bind(input.is_archived)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(product) = product else {
        tx.rollback().await?;
        return Ok(None);
    };

    // The image set is replaced wholesale on every update.
    sqlx::query("DELETE FROM product_images WHERE product_id = $1")
        .bind(product.id)
        .execute(&mut *tx)
        .await?;
    insert_images(&mut tx, product.id, &input.image_urls).await?;

    tx.commit().await?;
    Ok(Some(product))
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    urls: &[String],
) -> Result<(), sqlx::Error> {
    for url in urls {
        sqlx::query("INSERT INTO product_images (id, product_id, url) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(product_id)
            .bind(url)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub async fn list_for_store(
    pool: &PgPool,
    store_id: Uuid,
    filters: &ProductFilters,
) -> Result<Vec<ProductDetail>, DatabaseError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products \
         WHERE store_id = $1 \
           AND is_archived = FALSE \
           AND ($2::uuid IS NULL OR category_id = $2) \
           AND ($3::uuid IS NULL OR size_id = $3) \
           AND ($4::uuid IS NULL OR color_id = $4) \
           AND ($5::boolean IS NULL OR is_featured = $5) \
         ORDER BY created_at DESC",
    )
    .bind(store_id)
    .bind(filters.category_id)
    .bind(filters.size_id)
    .bind(filters.color_id)
    .bind(filters.is_featured)
    .fetch_all(pool)
    .await?;

    attach_relations(pool, products).await
}

pub async fn find_in_store(
    pool: &PgPool,
    product_id: Uuid,
    store_id: Uuid,
) -> Result<Option<ProductDetail>, DatabaseError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE id = $1 AND store_id = $2",
    )
    .bind(product_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    match product {
        Some(product) => Ok(attach_relations(pool, vec![product]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn delete(pool: &PgPool, product_id: Uuid, store_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND store_id = $2")
        .bind(product_id)
        .bind(store_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Batch-load images and variant lookups for a page of products, then zip
/// everything into `ProductDetail`s. One query per relation, no per-row
/// round trips.
async fn attach_relations(
    pool: &PgPool,
    products: Vec<Product>,
) -> Result<Vec<ProductDetail>, DatabaseError> {
    if products.is_empty() {
        return Ok(vec![]);
    }

    let product_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let images = sqlx::query_as::<_, ProductImage>(
        "SELECT * FROM product_images WHERE product_id = ANY($1) ORDER BY created_at",
    )
    .bind(&product_ids)
    .fetch_all(pool)
    .await?;

    let mut images_by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in images {
        images_by_product.entry(image.product_id).or_default().push(image);
    }

    let categories = load_lookup::<Category>(pool, "categories", products.iter().map(|p| p.category_id)).await?;
    let sizes = load_lookup::<Size>(pool, "sizes", products.iter().map(|p| p.size_id)).await?;
    let colors = load_lookup::<Color>(pool, "colors", products.iter().map(|p| p.color_id)).await?;

    products
        .into_iter()
        .map(|product| {
            let category = categories.get(&product.category_id).cloned();
            let size = sizes.get(&product.size_id).cloned();
            let color = colors.get(&product.color_id).cloned();
            match (category, size, color) {
                (Some(category), Some(size), Some(color)) => Ok(ProductDetail {
                    images: images_by_product.remove(&product.id).unwrap_or_default(),
                    category,
                    size,
                    color,
                    product,
                }),
                _ => Err(DatabaseError::QueryError(format!(
                    "product {} references a missing category, size, or color",
                    product.id
                ))),
            }
        })
        .collect()
}

async fn load_lookup<T>(
    pool: &PgPool,
    table: &str,
    ids: impl Iterator<Item = Uuid>,
) -> Result<HashMap<Uuid, T>, DatabaseError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin + HasId,
{
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();

    let rows = sqlx::query_as::<_, T>(&format!("SELECT * FROM {} WHERE id = ANY($1)", table))
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|row| (row.id(), row)).collect())
}

/// Lets `load_lookup` key rows by id across the three variant tables.
trait HasId {
    fn id(&self) -> Uuid;
}

impl HasId for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Size {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Color {
    fn id(&self) -> Uuid {
        self.id
    }
}
