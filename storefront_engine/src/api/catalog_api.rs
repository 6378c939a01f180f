//! Unified API for store, category and product administration.

use std::fmt::Debug;

use crate::{
    db_types::{Category, NewCategory, NewProduct, NewStore, Product, Store},
    objects::ProductUpdate,
    traits::{CatalogApiError, CatalogManagement},
};

/// The `CatalogApi` provides store, category and product administration.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_store(&self, store: NewStore) -> Result<Store, CatalogApiError> {
        self.db.insert_store(store).await
    }

    pub async fn store_by_id(&self, store_id: i64) -> Result<Option<Store>, CatalogApiError> {
        self.db.fetch_store(store_id).await
    }

    /// Creates a category under a store. The store must exist.
    pub async fn create_category(&self, category: NewCategory) -> Result<Category, CatalogApiError> {
        self.db.insert_category(category).await
    }

    pub async fn categories_for_store(&self, store_id: i64) -> Result<Vec<Category>, CatalogApiError> {
        self.db.fetch_categories_for_store(store_id).await
    }

    /// Creates a product. The category must belong to the same store as the product.
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        self.db.insert_product(product).await
    }

    pub async fn product_by_id(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError> {
        self.db.fetch_product(product_id).await
    }

    /// Fetches a store's products, newest first.
    pub async fn products_for_store(&self, store_id: i64) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products_for_store(store_id).await
    }

    /// Applies a partial update to a product. An empty update is an error rather than a silent no-op.
    pub async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError> {
        self.db.update_product(product_id, update).await
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError> {
        self.db.delete_product(product_id).await
    }
}
