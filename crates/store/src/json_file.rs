use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{info, warn};

use tienda_core::domain::product::{Product, ProductDraft, ProductId, ProductPatch};
use tienda_core::query::ProductFilters;

use crate::fixtures;
use crate::repository::{ProductRepository, RepositoryError};

/// Catalog repository backed by a single pretty-printed JSON array on disk.
///
/// The whole collection lives in memory; every successful mutation rewrites
/// the file in full. The mutex spans each read-modify-persist cycle, so two
/// mutations can never interleave around the file write.
pub struct JsonFileRepository {
    path: PathBuf,
    products: Mutex<Vec<Product>>,
}

impl JsonFileRepository {
    /// Loads the collection from `path`. Any load failure (missing file,
    /// unreadable content, bad JSON) falls back to the sample catalog and
    /// persists it immediately; the cause is only visible in the logs.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let products = match load_products(&path).await {
            Ok(products) => {
                info!(
                    event_name = "store.loaded",
                    path = %path.display(),
                    product_count = products.len(),
                    "catalog loaded from data file"
                );
                products
            }
            Err(cause) => {
                warn!(
                    event_name = "store.seed_fallback",
                    path = %path.display(),
                    cause = %cause,
                    "data file missing or unreadable, seeding sample catalog"
                );
                let products = fixtures::sample_products();
                write_products(&path, &products).await?;
                products
            }
        };

        Ok(Self { path, products: Mutex::new(products) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn load_products(path: &Path) -> Result<Vec<Product>, RepositoryError> {
    let raw = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Whole-file overwrite of every product, active or not. Not transactional:
/// a failure mid-write can leave a truncated file behind.
async fn write_products(path: &Path, products: &[Product]) -> Result<(), RepositoryError> {
    let body = serde_json::to_vec_pretty(products)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[async_trait::async_trait]
impl ProductRepository for JsonFileRepository {
    async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.lock().await;
        Ok(products.iter().filter(|product| product.is_active).cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.lock().await;
        Ok(products.iter().find(|product| product.id == id && product.is_active).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let product = Product::new(draft);
        product.validate()?;

        let mut products = self.products.lock().await;
        products.push(product.clone());
        if let Err(error) = write_products(&self.path, &products).await {
            products.pop();
            return Err(error);
        }

        info!(
            event_name = "store.product_created",
            product_id = %product.id,
            category = %product.category,
            "product created"
        );
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.lock().await;
        let position = products
            .iter()
            .position(|product| product.id == id && product.is_active)
            .ok_or(RepositoryError::NotFound(id))?;

        // Validate a patched copy first; the stored product only changes
        // once the proposed state is known to be valid.
        let mut updated = products[position].clone();
        updated.apply_patch(&patch);
        updated.validate()?;

        let previous = std::mem::replace(&mut products[position], updated.clone());
        if let Err(error) = write_products(&self.path, &products).await {
            products[position] = previous;
            return Err(error);
        }

        info!(event_name = "store.product_updated", product_id = %id, "product updated");
        Ok(updated)
    }

    async fn soft_delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self.products.lock().await;
        let position = products
            .iter()
            .position(|product| product.id == id && product.is_active)
            .ok_or(RepositoryError::NotFound(id))?;

        let mut deleted = products[position].clone();
        deleted.deactivate();

        let previous = std::mem::replace(&mut products[position], deleted);
        if let Err(error) = write_products(&self.path, &products).await {
            products[position] = previous;
            return Err(error);
        }

        info!(event_name = "store.product_deleted", product_id = %id, "product soft-deleted");
        Ok(())
    }

    async fn search(&self, filters: &ProductFilters) -> Result<Vec<Product>, RepositoryError> {
        let active = {
            let products = self.products.lock().await;
            products.iter().filter(|product| product.is_active).cloned().collect::<Vec<_>>()
        };
        Ok(filters.apply(active))
    }

    async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let products = self.products.lock().await;
        let categories: BTreeSet<String> = products
            .iter()
            .filter(|product| product.is_active)
            .map(|product| product.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }
}
