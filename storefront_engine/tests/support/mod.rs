use sf_common::Money;
use storefront_engine::{
    db_types::{NewCategory, NewProduct, NewStore},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CatalogManagement,
    SqliteDatabase,
};

pub struct Seed {
    pub db: SqliteDatabase,
    pub store_id: i64,
    pub category_id: i64,
    pub product_ids: Vec<i64>,
}

/// Creates a fresh database with one store, one category and a handful of products.
///
/// Product `n` (zero-based) is seeded with a price of `(n + 1) * 5000` paise and the given stock level.
pub async fn seed_catalog(num_products: usize, stock: i64) -> Seed {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    let store =
        db.insert_store(NewStore::new("Test Store", "merchant-1")).await.expect("Error creating store");
    let category = db
        .insert_category(NewCategory::new(store.id, "General"))
        .await
        .expect("Error creating category");
    let mut product_ids = Vec::with_capacity(num_products);
    for n in 0..num_products {
        let price = Money::from(((n as i64) + 1) * 5000);
        let product = db
            .insert_product(NewProduct::new(store.id, category.id, format!("Product {n}"), price, stock))
            .await
            .expect("Error creating product");
        product_ids.push(product.id);
    }
    Seed { db, store_id: store.id, category_id: category.id, product_ids }
}
