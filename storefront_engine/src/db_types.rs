use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sf_common::Money;
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------   OrderStatus     -----------------------------------------------------------
/// Lifecycle status of an order. Only the `Pending -> Cancelled` transition carries any logic (restock + refund
/// flag); the shipping states exist for storefront display and are set by back-office tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order has been placed; payment has not been confirmed.
    Pending,
    /// Payment for the order has been confirmed.
    Paid,
    Shipped,
    Delivered,
    /// The order was cancelled. The row is retained for the audit trail; stock has been restored.
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatus::Pending
        })
    }
}

//--------------------------------------   PaymentMethod   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cod,
    Upi,
    Card,
    NetBanking,
    Wallet,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Cod => "COD",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "CARD",
            PaymentMethod::NetBanking => "NET_BANKING",
            PaymentMethod::Wallet => "WALLET",
        };
        write!(f, "{s}")
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(Self::Cod),
            "UPI" => Ok(Self::Upi),
            "CARD" => Ok(Self::Card),
            "NET_BANKING" => Ok(Self::NetBanking),
            "WALLET" => Ok(Self::Wallet),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------   PaymentStatus   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Refunded,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            "REFUNDED" => Ok(Self::Refunded),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------      Store        -----------------------------------------------------------
/// A tenant. Stores own their categories, products and orders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub owner_id: Option<String>,
}

impl NewStore {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, owner_id: S2) -> Self {
        Self { name: name.into(), owner_id: Some(owner_id.into()) }
    }
}

//--------------------------------------     Category      -----------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub store_id: i64,
    pub name: String,
}

impl NewCategory {
    pub fn new<S: Into<String>>(store_id: i64, name: S) -> Self {
        Self { store_id, name: name.into() }
    }
}

//--------------------------------------      Product      -----------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: Money,
    /// Units available for sale. Never negative; decremented by checkout and restored by cancellation.
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub store_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl NewProduct {
    pub fn new<S: Into<String>>(store_id: i64, category_id: i64, name: S, price: Money, stock: i64) -> Self {
        Self { store_id, category_id, name: name.into(), price, stock }
    }
}

//--------------------------------------     CartItem      -----------------------------------------------------------
/// A single line in a user's cart. `unit_price` is the price snapshot taken when the product was first added;
/// checkout charges this price, not whatever the product costs at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: i64,
    pub user_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      Address      -----------------------------------------------------------
/// A delivery address in a user's address book. Orders reference an address by id at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAddress {
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

impl NewAddress {
    pub fn new<S1, S2, S3, S4>(user_id: S1, full_name: S2, phone: S3, address_line1: S4) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            full_name: full_name.into(),
            phone: phone.into(),
            address_line1: address_line1.into(),
            address_line2: None,
            city: String::default(),
            state: String::default(),
            pincode: String::default(),
            country: String::default(),
        }
    }

    pub fn with_locality<S1, S2, S3, S4>(mut self, city: S1, state: S2, pincode: S3, country: S4) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        self.city = city.into();
        self.state = state.into();
        self.pincode = pincode.into();
        self.country = country.into();
        self
    }
}

//--------------------------------------       Order       -----------------------------------------------------------
/// An immutable snapshot of a purchase. `total_amount` is frozen at checkout and is never recomputed from live
/// product prices. Only `status` may change after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub store_id: i64,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub address_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A checkout request. Line items carry no price; unit prices are resolved server-side from the cart snapshot
/// (or the live product price for direct checkouts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: String,
    pub store_id: i64,
    pub items: Vec<NewOrderItem>,
    pub address_id: Option<i64>,
}

impl NewOrder {
    pub fn new<S: Into<String>>(user_id: S, store_id: i64, items: Vec<NewOrderItem>) -> Self {
        Self { user_id: user_id.into(), store_id, items, address_id: None }
    }

    pub fn with_address(mut self, address_id: i64) -> Self {
        self.address_id = Some(address_id);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

//--------------------------------------     OrderItem     -----------------------------------------------------------
/// A line item captured at checkout. `unit_price` is decoupled from the live product price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
}

//--------------------------------------      Payment      -----------------------------------------------------------
/// A payment attempt against an order. Payments own the link to their order (`order_id` is unique); orders carry
/// no payment column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub order_id: i64,
    pub amount: Money,
    pub method: PaymentMethod,
}

impl NewPayment {
    pub fn new(order_id: i64, amount: Money, method: PaymentMethod) -> Self {
        Self { order_id, amount, method }
    }
}
