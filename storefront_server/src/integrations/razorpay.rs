//! Razorpay gateway integration.
//!
//! Gateway orders are built locally: the client-side checkout widget only needs an order reference, the amount in
//! paise and the currency. Signature verification is the part that matters, and it happens entirely server-side
//! against the configured key secret.

use chrono::Utc;
use log::*;
use sf_common::Money;

use crate::{
    config::RazorpayConfig,
    data_objects::{RazorpayOrderResponse, RazorpayVerifyRequest},
    helpers::verify_signature,
};

#[derive(Clone, Debug)]
pub struct RazorpayApi {
    config: RazorpayConfig,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Self {
        Self { config }
    }

    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// Builds a new gateway order for the given amount.
    ///
    /// The receipt defaults to `receipt_<unix-millis>` when the caller does not supply one.
    pub fn create_order(&self, amount: Money, receipt: Option<String>) -> RazorpayOrderResponse {
        let id = format!("order_{:016x}", rand::random::<u64>());
        let receipt = receipt.unwrap_or_else(|| {
            format!("receipt_{}", Utc::now().timestamp_millis())
        });
        debug!("💳️ Created gateway order {id} for {amount} ({receipt})");
        RazorpayOrderResponse { id, amount, currency: self.config.currency.clone(), receipt }
    }

    /// Verifies the signature on a checkout callback. The MAC comparison is constant time.
    pub fn verify_payment(&self, req: &RazorpayVerifyRequest) -> bool {
        let valid = verify_signature(
            self.config.key_secret.reveal(),
            &req.razorpay_order_id,
            &req.razorpay_payment_id,
            &req.razorpay_signature,
        );
        if !valid {
            warn!(
                "💳️ Signature verification failed for gateway order {} / payment {}",
                req.razorpay_order_id, req.razorpay_payment_id
            );
        }
        valid
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::helpers::calculate_signature;
    use sf_common::Secret;

    fn api() -> RazorpayApi {
        RazorpayApi::new(RazorpayConfig {
            key_id: "rzp_test_key".into(),
            key_secret: Secret::new("test_secret".into()),
            currency: "INR".into(),
        })
    }

    #[test]
    fn gateway_orders_carry_amount_and_currency() {
        let api = api();
        let order = api.create_order(Money::from(150_000), None);
        assert!(order.id.starts_with("order_"));
        assert!(order.receipt.starts_with("receipt_"));
        assert_eq!(order.amount, Money::from(150_000));
        assert_eq!(order.currency, "INR");
        let order = api.create_order(Money::from(500), Some("receipt_custom".into()));
        assert_eq!(order.receipt, "receipt_custom");
    }

    #[test]
    fn verify_accepts_a_correctly_signed_callback() {
        let api = api();
        let signature = calculate_signature("test_secret", "order_1", "pay_1");
        let req = RazorpayVerifyRequest {
            razorpay_order_id: "order_1".into(),
            razorpay_payment_id: "pay_1".into(),
            razorpay_signature: signature,
        };
        assert!(api.verify_payment(&req));
        let req = RazorpayVerifyRequest { razorpay_payment_id: "pay_2".into(), ..req };
        assert!(!api.verify_payment(&req));
    }
}
