//! Postgres product repository
//!
//! - save: INSERT ... RETURNING (id assigned by SERIAL)
//! - find_all: COUNT(*) then LIMIT/OFFSET ordered by id
//! - update/delete: single statement, zero rows means not found

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, ProductRepository};
use crate::models::{Page, Pagination, Product, ProductDraft, ProductId};

/// Product repository backed by a Postgres pool
#[derive(Clone)]
pub struct PgProductRepo {
    pool: PgPool,
}

impl PgProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepo {
    async fn save(&self, draft: ProductDraft) -> Result<Product, DbError> {
        let product: Product = sqlx::query_as(
            r#"
            INSERT INTO products (name, price, amount, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, amount, description
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.amount)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = product.id, "product created");
        Ok(product)
    }

    async fn find_all(&self, pagination: Pagination) -> Result<Page<Product>, DbError> {
        // Separate count so pages past the end still report the real total
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let items: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, price, amount, description
            FROM products
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items,
            total,
            pagination,
        })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Product, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, price, amount, description
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::product_not_found(id))
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DbError> {
        sqlx::query_as(
            r#"
            UPDATE products
            SET name = $1, price = $2, amount = $3, description = $4
            WHERE id = $5
            RETURNING id, name, price, amount, description
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.amount)
        .bind(&draft.description)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::product_not_found(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::product_not_found(id));
        }

        tracing::debug!(%id, "product deleted");
        Ok(())
    }
}
