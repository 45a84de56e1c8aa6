//! Repository implementations for product storage
//!
//! `ProductRepository` is the seam between handlers and storage:
//! - `PgProductRepo` runs SQL against the `products` table
//! - `MemoryProductRepo` keeps rows in a map, for tests and local demos

pub mod memory;
pub mod products;

use async_trait::async_trait;

use crate::models::{Page, Pagination, Product, ProductDraft, ProductId};

pub use memory::MemoryProductRepo;
pub use products::PgProductRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} id sequence exhausted")]
    IdsExhausted { resource: &'static str },
}

impl DbError {
    pub(crate) fn product_not_found(id: ProductId) -> Self {
        Self::NotFound {
            resource: "product",
            id: id.to_string(),
        }
    }
}

/// Persistence operations for products
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Insert a product, returning it with the storage-assigned id.
    async fn save(&self, draft: ProductDraft) -> Result<Product, DbError>;

    /// Fetch one page ordered by id ascending, plus the total row count.
    ///
    /// The caller clamps `pagination`; it is used as given.
    async fn find_all(&self, pagination: Pagination) -> Result<Page<Product>, DbError>;

    /// Fetch a single product. `DbError::NotFound` when no row matches.
    async fn find_by_id(&self, id: ProductId) -> Result<Product, DbError>;

    /// Replace every field except the id. `DbError::NotFound` when no row is affected.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DbError>;

    /// Remove a product. `DbError::NotFound` when no row is affected.
    async fn delete(&self, id: ProductId) -> Result<(), DbError>;
}
