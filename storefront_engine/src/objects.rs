//! Composite objects returned by the engine APIs and the query filter used to search orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sf_common::Money;

use crate::db_types::{Address, CartItem, Order, OrderItem, OrderStatus, Payment, Product};

/// An order joined with its line items, its delivery address and, if one exists, its payment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub address: Option<Address>,
    pub payment: Option<Payment>,
}

/// A cart row joined with its product, as returned by the cart endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemWithProduct {
    pub item: CartItem,
    pub product: Product,
}

/// The live value of a cart: Σ current product price × quantity. Deliberately not frozen; checkout re-snapshots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CartTotal {
    pub total: Money,
    pub item_count: i64,
}

//--------------------------------------  OrderQueryFilter  ----------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderQueryFilter {
    pub user_id: Option<String>,
    pub store_id: Option<i64>,
    pub status: Option<Vec<OrderStatus>>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl OrderQueryFilter {
    pub fn with_user_id<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_store_id(mut self, store_id: i64) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status.get_or_insert_with(Vec::new).push(status);
        self
    }

    /// A filter with a `Some(vec![])` status counts as empty, since no status clause will be emitted for it.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() &&
            self.store_id.is_none() &&
            self.status.as_ref().map(Vec::is_empty).unwrap_or(true) &&
            self.since.is_none() &&
            self.until.is_none()
    }
}

//--------------------------------------   ProductUpdate   -----------------------------------------------------------
/// A partial update to a product. Only the supplied fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub category_id: Option<i64>,
}

impl ProductUpdate {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none() && self.category_id.is_none()
    }
}

//--------------------------------------   AddressUpdate   -----------------------------------------------------------
/// A partial update to an address-book entry. Only the supplied fields are written; `user_id` never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
}

impl AddressUpdate {
    pub fn with_full_name<S: Into<String>>(mut self, full_name: S) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address_line1<S: Into<String>>(mut self, line: S) -> Self {
        self.address_line1 = Some(line.into());
        self
    }

    pub fn with_pincode<S: Into<String>>(mut self, pincode: S) -> Self {
        self.pincode = Some(pincode.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() &&
            self.phone.is_none() &&
            self.address_line1.is_none() &&
            self.address_line2.is_none() &&
            self.city.is_none() &&
            self.state.is_none() &&
            self.pincode.is_none() &&
            self.country.is_none()
    }
}
