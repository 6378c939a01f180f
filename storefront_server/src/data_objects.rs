use std::fmt::Display;

use serde::{Deserialize, Serialize};
use sf_common::Money;
use storefront_engine::db_types::{NewOrderItem, PaymentMethod, PaymentStatus};

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Body for `POST /order`. Prices are never accepted from the client; the server snapshots them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub store_id: i64,
    pub items: Vec<NewOrderItem>,
    #[serde(default)]
    pub address_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub user_id: String,
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Body for `POST /store/{store_id}/category`. The store id comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Body for `POST /store/{store_id}/product`. The store id comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub category_id: i64,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: i64,
    pub amount: Money,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrderRequest {
    /// Amount in paise
    pub amount: Money,
    #[serde(default)]
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrderResponse {
    pub id: String,
    pub amount: Money,
    pub currency: String,
    pub receipt: String,
}

/// Body for `POST /payment/razorpay/verify`, matching the field names Razorpay posts back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayVerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}
