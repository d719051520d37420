use async_trait::async_trait;
use thiserror::Error;

use tienda_core::domain::product::{Product, ProductDraft, ProductId, ProductPatch};
use tienda_core::errors::ValidationError;
use tienda_core::query::ProductFilters;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage read/write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Catalog access seam. Soft-deleted products are invisible to every
/// operation here; only the persisted file keeps them.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All active products in insertion order.
    async fn list_active(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Validates the draft, appends it and flushes the collection. Nothing
    /// is kept in memory or on disk when validation fails.
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// Partial update with validate-then-commit semantics: the patched copy
    /// is validated before it replaces the stored product, so a rejected
    /// update leaves both memory and disk untouched.
    async fn update(&self, id: ProductId, patch: ProductPatch)
        -> Result<Product, RepositoryError>;

    /// Flips the active flag off and flushes. The product stays in storage.
    async fn soft_delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Filtered, sorted view over the active products.
    async fn search(&self, filters: &ProductFilters) -> Result<Vec<Product>, RepositoryError>;

    /// Sorted distinct category names among active products.
    async fn categories(&self) -> Result<Vec<String>, RepositoryError>;
}
