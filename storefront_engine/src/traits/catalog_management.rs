use thiserror::Error;

use crate::{
    db_types::{Category, NewCategory, NewProduct, NewStore, Product, Store},
    objects::ProductUpdate,
};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Store {0} not found")]
    StoreNotFound(i64),
    #[error("Category {0} not found")]
    CategoryNotFound(i64),
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Category {category_id} does not belong to store {store_id}")]
    CategoryStoreMismatch { category_id: i64, store_id: i64 },
    #[error("No fields to update")]
    UpdateNoOp,
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait CatalogManagement: Clone {
    async fn insert_store(&self, store: NewStore) -> Result<Store, CatalogApiError>;

    async fn fetch_store(&self, store_id: i64) -> Result<Option<Store>, CatalogApiError>;

    /// Creates a category under a store. The store must exist; category names are unique per store.
    async fn insert_category(&self, category: NewCategory) -> Result<Category, CatalogApiError>;

    async fn fetch_categories_for_store(&self, store_id: i64) -> Result<Vec<Category>, CatalogApiError>;

    /// Creates a product. The category must exist and belong to the product's store.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;

    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError>;

    async fn fetch_products_for_store(&self, store_id: i64) -> Result<Vec<Product>, CatalogApiError>;

    /// Applies a partial update. An empty update is rejected with [`CatalogApiError::UpdateNoOp`]; a category
    /// change is validated against the product's store.
    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError>;

    /// Deletes a product. Cart rows referencing it are removed by the schema's cascade.
    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError>;
}
