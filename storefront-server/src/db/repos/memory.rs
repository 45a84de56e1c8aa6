//! In-memory product repository
//!
//! Same contract as `PgProductRepo`; ids come from a counter that never
//! reuses a value, like a SERIAL column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, ProductRepository};
use crate::models::{Page, Pagination, Product, ProductDraft, ProductId};

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// Product repository holding rows in a `BTreeMap` keyed by id
#[derive(Default)]
pub struct MemoryProductRepo {
    inner: RwLock<Inner>,
}

impl MemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepo {
    async fn save(&self, draft: ProductDraft) -> Result<Product, DbError> {
        let mut inner = self.inner.write().await;
        inner.next_id = inner
            .next_id
            .checked_add(1)
            .ok_or(DbError::IdsExhausted { resource: "product" })?;
        let product = Product::from_draft(ProductId::new(inner.next_id), draft);
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_all(&self, pagination: Pagination) -> Result<Page<Product>, DbError> {
        let inner = self.inner.read().await;
        let items = inner
            .rows
            .values()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            total: inner.rows.len() as i64,
            pagination,
        })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Product, DbError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id.get())
            .cloned()
            .ok_or_else(|| DbError::product_not_found(id))
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DbError> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(&id.get())
            .ok_or_else(|| DbError::product_not_found(id))?;

        *row = Product::from_draft(id, draft);
        Ok(row.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), DbError> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| DbError::product_not_found(id))
    }
}
