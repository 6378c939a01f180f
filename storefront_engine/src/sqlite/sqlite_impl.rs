//! `SqliteDatabase` is a concrete implementation of a storefront backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module. The checkout and cancellation flows run inside a single transaction each; stock counts, the order
//! snapshot and the cart can never drift apart.

use std::fmt::Debug;

use log::*;
use sf_common::Money;
use sqlx::{SqliteConnection, SqlitePool};

use super::db::{addresses, cart, catalog, new_pool, orders, payments, products};
use crate::{
    db_types::{
        Address,
        Category,
        NewAddress,
        NewCategory,
        NewOrder,
        NewPayment,
        NewProduct,
        NewStore,
        Order,
        OrderStatus,
        Payment,
        PaymentStatus,
        Product,
        Store,
    },
    objects::{AddressUpdate, CartItemWithProduct, CartTotal, OrderQueryFilter, OrderWithItems, ProductUpdate},
    traits::{
        AddressApiError,
        AddressBook,
        CartApiError,
        CartManagement,
        CatalogApiError,
        CatalogManagement,
        OrderFlow,
        OrderFlowError,
        PaymentApiError,
        PaymentManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool with the given maximum number of connections and connects to the database.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Resolves the delivery address an order was placed against, if it still exists.
async fn address_for_order(order: &Order, conn: &mut SqliteConnection) -> Result<Option<Address>, sqlx::Error> {
    match order.address_id {
        Some(address_id) => addresses::fetch_address(address_id, conn).await,
        None => Ok(None),
    }
}

impl OrderFlow for SqliteDatabase {
    async fn checkout(&self, order: NewOrder) -> Result<OrderWithItems, OrderFlowError> {
        if order.items.is_empty() {
            return Err(OrderFlowError::EmptyOrder);
        }
        let mut tx = self.pool.begin().await?;
        if let Some(address_id) = order.address_id {
            if addresses::fetch_address(address_id, &mut tx).await?.is_none() {
                return Err(OrderFlowError::AddressNotFound(address_id));
            }
        }
        let mut total_amount = Money::default();
        let mut lines = Vec::with_capacity(order.items.len());
        for line in &order.items {
            if line.quantity <= 0 {
                return Err(OrderFlowError::InvalidQuantity(line.quantity));
            }
            let product = products::fetch_product(line.product_id, &mut tx)
                .await?
                .ok_or(OrderFlowError::ProductNotFound(line.product_id))?;
            // The price agreed at add-to-cart time wins over the live price.
            let unit_price = cart::fetch_cart_item_for_product(&order.user_id, line.product_id, &mut tx)
                .await?
                .map(|item| item.unit_price)
                .unwrap_or(product.price);
            let affected = products::decrement_stock(line.product_id, line.quantity, &mut tx).await?;
            if affected == 0 {
                debug!(
                    "🛒️ Checkout for {} rejected: product {} has {} units left, {} requested",
                    order.user_id, product.id, product.stock, line.quantity
                );
                return Err(OrderFlowError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
            total_amount += unit_price * line.quantity;
            lines.push((line.product_id, line.quantity, unit_price));
        }
        let record = orders::insert_order(&order, total_amount, &mut tx).await?;
        let mut items = Vec::with_capacity(lines.len());
        for (product_id, quantity, unit_price) in lines {
            items.push(orders::insert_order_item(record.id, product_id, quantity, unit_price, &mut tx).await?);
        }
        let cleared = cart::clear_cart(&order.user_id, &mut tx).await?;
        let address = address_for_order(&record, &mut tx).await?;
        tx.commit().await?;
        debug!(
            "📦️ Order #{} created for {}: {} for {} line(s), {cleared} cart row(s) cleared",
            record.id,
            record.user_id,
            record.total_amount,
            items.len()
        );
        Ok(OrderWithItems { order: record, items, address, payment: None })
    }

    async fn cancel_order(&self, order_id: i64) -> Result<OrderWithItems, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::fetch_order(order_id, &mut tx).await?.ok_or(OrderFlowError::OrderNotFound(order_id))?;
        if order.status == OrderStatus::Cancelled {
            return Err(OrderFlowError::OrderAlreadyCancelled(order_id));
        }
        let items = orders::items_for_order(order_id, &mut tx).await?;
        for item in &items {
            products::restock(item.product_id, item.quantity, &mut tx).await?;
        }
        let payment = match payments::fetch_payment_for_order(order_id, &mut tx).await? {
            Some(p) => payments::update_payment_status(p.id, PaymentStatus::Refunded, &mut tx).await?,
            None => None,
        };
        let order = orders::update_order_status(order_id, OrderStatus::Cancelled, &mut tx).await?;
        let address = address_for_order(&order, &mut tx).await?;
        tx.commit().await?;
        debug!("📦️ Order #{order_id} cancelled. {} line(s) restocked", items.len());
        Ok(OrderWithItems { order, items, address, payment })
    }

    async fn fetch_order_with_items(&self, order_id: i64) -> Result<Option<OrderWithItems>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let order = match orders::fetch_order(order_id, &mut conn).await? {
            Some(order) => order,
            None => return Ok(None),
        };
        let items = orders::items_for_order(order_id, &mut conn).await?;
        let address = address_for_order(&order, &mut conn).await?;
        let payment = payments::fetch_payment_for_order(order_id, &mut conn).await?;
        Ok(Some(OrderWithItems { order, items, address, payment }))
    }

    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<OrderWithItems>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let records = orders::search_orders(query, &mut conn).await?;
        let mut result = Vec::with_capacity(records.len());
        for order in records {
            let items = orders::items_for_order(order.id, &mut conn).await?;
            let address = address_for_order(&order, &mut conn).await?;
            let payment = payments::fetch_payment_for_order(order.id, &mut conn).await?;
            result.push(OrderWithItems { order, items, address, payment });
        }
        Ok(result)
    }
}

impl CartManagement for SqliteDatabase {
    async fn upsert_cart_item(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartItemWithProduct, CartApiError> {
        if quantity <= 0 {
            return Err(CartApiError::InvalidQuantity(quantity));
        }
        let mut tx = self.pool.begin().await?;
        let product =
            products::fetch_product(product_id, &mut tx).await?.ok_or(CartApiError::ProductNotFound(product_id))?;
        if product.stock < quantity {
            return Err(CartApiError::InsufficientStock { product_id, requested: quantity, available: product.stock });
        }
        let item = match cart::fetch_cart_item_for_product(user_id, product_id, &mut tx).await? {
            // Merge with the existing row. The original price snapshot is kept.
            Some(existing) => cart::set_quantity(existing.id, existing.quantity + quantity, &mut tx)
                .await?
                .ok_or(CartApiError::CartItemNotFound(existing.id))?,
            None => cart::insert_cart_item(user_id, product_id, quantity, product.price, &mut tx).await?,
        };
        tx.commit().await?;
        trace!("🛒️ Cart row #{} for {user_id} now holds {} × product {product_id}", item.id, item.quantity);
        Ok(CartItemWithProduct { item, product })
    }

    async fn update_cart_item_quantity(
        &self,
        cart_item_id: i64,
        quantity: i64,
    ) -> Result<CartItemWithProduct, CartApiError> {
        if quantity <= 0 {
            return Err(CartApiError::InvalidQuantity(quantity));
        }
        let mut tx = self.pool.begin().await?;
        let existing =
            cart::fetch_cart_item(cart_item_id, &mut tx).await?.ok_or(CartApiError::CartItemNotFound(cart_item_id))?;
        let product = products::fetch_product(existing.product_id, &mut tx)
            .await?
            .ok_or(CartApiError::ProductNotFound(existing.product_id))?;
        if product.stock < quantity {
            return Err(CartApiError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock,
            });
        }
        let item = cart::set_quantity(cart_item_id, quantity, &mut tx)
            .await?
            .ok_or(CartApiError::CartItemNotFound(cart_item_id))?;
        tx.commit().await?;
        Ok(CartItemWithProduct { item, product })
    }

    async fn remove_cart_item(&self, cart_item_id: i64) -> Result<(), CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = cart::delete_cart_item(cart_item_id, &mut conn).await?;
        if deleted == 0 {
            return Err(CartApiError::CartItemNotFound(cart_item_id));
        }
        Ok(())
    }

    async fn clear_cart(&self, user_id: &str) -> Result<u64, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let cleared = cart::clear_cart(user_id, &mut conn).await?;
        debug!("🛒️ Cleared {cleared} cart row(s) for {user_id}");
        Ok(cleared)
    }

    async fn fetch_cart_items(&self, user_id: &str) -> Result<Vec<CartItemWithProduct>, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let rows = cart::cart_items_for_user(user_id, &mut conn).await?;
        let mut result = Vec::with_capacity(rows.len());
        for item in rows {
            let product = products::fetch_product(item.product_id, &mut conn)
                .await?
                .ok_or(CartApiError::ProductNotFound(item.product_id))?;
            result.push(CartItemWithProduct { item, product });
        }
        Ok(result)
    }

    async fn cart_total(&self, user_id: &str) -> Result<CartTotal, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let total = cart::live_cart_total(user_id, &mut conn).await?;
        Ok(total)
    }
}

impl PaymentManagement for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentApiError> {
        let mut tx = self.pool.begin().await?;
        let order_id = payment.order_id;
        if orders::fetch_order(order_id, &mut tx).await?.is_none() {
            return Err(PaymentApiError::OrderNotFound(order_id));
        }
        if payments::fetch_payment_for_order(order_id, &mut tx).await?.is_some() {
            return Err(PaymentApiError::PaymentAlreadyExists(order_id));
        }
        let payment = payments::insert_payment(payment, &mut tx).await?;
        tx.commit().await?;
        debug!("💰️ Payment #{} ({}) recorded against order #{order_id}", payment.id, payment.method);
        Ok(payment)
    }

    async fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<Payment, PaymentApiError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::update_payment_status(payment_id, status, &mut conn)
            .await?
            .ok_or(PaymentApiError::PaymentNotFound(payment_id))?;
        debug!("💰️ Payment #{payment_id} status set to {status}");
        Ok(payment)
    }

    async fn fetch_payment(&self, payment_id: i64) -> Result<Option<Payment>, PaymentApiError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_payment(payment_id, &mut conn).await?;
        Ok(payment)
    }

    async fn fetch_payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, PaymentApiError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_payment_for_order(order_id, &mut conn).await?;
        Ok(payment)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_store(&self, store: NewStore) -> Result<Store, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let store = catalog::insert_store(store, &mut conn).await?;
        debug!("🏪️ Store #{} ({}) created", store.id, store.name);
        Ok(store)
    }

    async fn fetch_store(&self, store_id: i64) -> Result<Option<Store>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let store = catalog::fetch_store(store_id, &mut conn).await?;
        Ok(store)
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let store_id = category.store_id;
        if catalog::fetch_store(store_id, &mut tx).await?.is_none() {
            return Err(CatalogApiError::StoreNotFound(store_id));
        }
        let category = catalog::insert_category(category, &mut tx).await?;
        tx.commit().await?;
        Ok(category)
    }

    async fn fetch_categories_for_store(&self, store_id: i64) -> Result<Vec<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let categories = catalog::categories_for_store(store_id, &mut conn).await?;
        Ok(categories)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        if catalog::fetch_store(product.store_id, &mut tx).await?.is_none() {
            return Err(CatalogApiError::StoreNotFound(product.store_id));
        }
        let category = catalog::fetch_category(product.category_id, &mut tx)
            .await?
            .ok_or(CatalogApiError::CategoryNotFound(product.category_id))?;
        if category.store_id != product.store_id {
            return Err(CatalogApiError::CategoryStoreMismatch {
                category_id: product.category_id,
                store_id: product.store_id,
            });
        }
        let product = products::insert_product(product, &mut tx).await?;
        tx.commit().await?;
        debug!("🏪️ Product #{} ({}) created in store #{}", product.id, product.name, product.store_id);
        Ok(product)
    }

    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product(product_id, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_products_for_store(&self, store_id: i64) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::products_for_store(store_id, &mut conn).await?;
        Ok(products)
    }

    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let existing =
            products::fetch_product(product_id, &mut tx).await?.ok_or(CatalogApiError::ProductNotFound(product_id))?;
        if let Some(category_id) = update.category_id {
            let category =
                catalog::fetch_category(category_id, &mut tx).await?.ok_or(CatalogApiError::CategoryNotFound(category_id))?;
            if category.store_id != existing.store_id {
                return Err(CatalogApiError::CategoryStoreMismatch { category_id, store_id: existing.store_id });
            }
        }
        let product =
            products::update_product(product_id, update, &mut tx).await?.ok_or(CatalogApiError::ProductNotFound(product_id))?;
        tx.commit().await?;
        Ok(product)
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = products::delete_product(product_id, &mut conn).await?;
        if deleted == 0 {
            return Err(CatalogApiError::ProductNotFound(product_id));
        }
        debug!("🏪️ Product #{product_id} deleted");
        Ok(())
    }
}

impl AddressBook for SqliteDatabase {
    async fn insert_address(&self, address: NewAddress) -> Result<Address, AddressApiError> {
        let mut conn = self.pool.acquire().await?;
        let address = addresses::insert_address(address, &mut conn).await?;
        debug!("📮️ Address #{} created for {}", address.id, address.user_id);
        Ok(address)
    }

    async fn fetch_address(&self, address_id: i64) -> Result<Option<Address>, AddressApiError> {
        let mut conn = self.pool.acquire().await?;
        let address = addresses::fetch_address(address_id, &mut conn).await?;
        Ok(address)
    }

    async fn fetch_addresses_for_user(&self, user_id: &str) -> Result<Vec<Address>, AddressApiError> {
        let mut conn = self.pool.acquire().await?;
        let addresses = addresses::addresses_for_user(user_id, &mut conn).await?;
        Ok(addresses)
    }

    async fn update_address(&self, address_id: i64, update: AddressUpdate) -> Result<Address, AddressApiError> {
        let mut conn = self.pool.acquire().await?;
        let address = addresses::update_address(address_id, update, &mut conn)
            .await?
            .ok_or(AddressApiError::AddressNotFound(address_id))?;
        Ok(address)
    }

    async fn delete_address(&self, address_id: i64) -> Result<(), AddressApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = addresses::delete_address(address_id, &mut conn).await?;
        if deleted == 0 {
            return Err(AddressApiError::AddressNotFound(address_id));
        }
        debug!("📮️ Address #{address_id} deleted");
        Ok(())
    }
}
