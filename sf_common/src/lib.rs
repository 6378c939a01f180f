mod money;
mod secret;

pub use money::{Money, MoneyConversionError, INR_CURRENCY_CODE};
pub use secret::Secret;
