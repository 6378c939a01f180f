use std::env;

use log::*;
use sf_common::Secret;

const DEFAULT_STF_HOST: &str = "127.0.0.1";
const DEFAULT_STF_PORT: u16 = 3000;
const DEFAULT_CURRENCY: &str = "INR";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Razorpay gateway configuration
    pub razorpay: RazorpayConfig,
}

#[derive(Clone, Debug, Default)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Secret<String>,
    /// Currency code used for gateway orders, e.g. "INR"
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STF_HOST.to_string(),
            port: DEFAULT_STF_PORT,
            database_url: String::default(),
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("STF_HOST").ok().unwrap_or_else(|| DEFAULT_STF_HOST.into());
        let port = env::var("STF_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for STF_PORT. {e} Using the default, {DEFAULT_STF_PORT}, instead."
                    );
                    DEFAULT_STF_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_STF_PORT);
        let database_url = env::var("STF_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ STF_DATABASE_URL is not set. Please set it to the URL for the storefront database.");
            String::default()
        });
        let razorpay = RazorpayConfig::from_env_or_defaults();
        Self { host, port, database_url, razorpay }
    }
}

impl RazorpayConfig {
    pub fn from_env_or_defaults() -> Self {
        let key_id = env::var("STF_RAZORPAY_KEY_ID").ok().unwrap_or_else(|| {
            error!("🪛️ STF_RAZORPAY_KEY_ID is not set. Please set it to your Razorpay key id.");
            String::default()
        });
        let key_secret = env::var("STF_RAZORPAY_KEY_SECRET").ok().unwrap_or_else(|| {
            error!(
                "🪛️ STF_RAZORPAY_KEY_SECRET is not set. Payment signature verification will reject every request."
            );
            String::default()
        });
        let key_secret = Secret::new(key_secret);
        let currency = env::var("STF_RAZORPAY_CURRENCY").ok().unwrap_or_else(|| {
            info!("🪛️ STF_RAZORPAY_CURRENCY is not set. Using the default, {DEFAULT_CURRENCY}.");
            DEFAULT_CURRENCY.into()
        });
        Self { key_id, key_secret, currency }
    }
}
