//! Checkout configuration: what is being sold, for how much, and where to POST.
//!
//! Every field has a default, so `CheckoutConfig::default()` reproduces the
//! stock premium-upgrade page. Hosts can also ship it as JSON:
//!
//! ```rust,ignore
//! let config = CheckoutConfig::from_json(r#"{ "price": { "amount": 5000, "currency": "NGN" } }"#)?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::{PaymentRequest, SessionCredentials};

/// Currencies Paystack settles in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Ghs,
    Ngn,
    Zar,
    Kes,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Ghs => "GHS",
            Currency::Ngn => "NGN",
            Currency::Zar => "ZAR",
            Currency::Kes => "KES",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in the currency's minor unit (pesewas, kobo, cents).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: u64,
    #[serde(default)]
    pub currency: Currency,
}

impl Price {
    pub fn new(amount: u64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::new(2500, Currency::Ghs)
    }
}

impl fmt::Display for Price {
    /// `2500 GHS` renders as `25.00 GHS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount / 100,
            self.amount % 100,
            self.currency
        )
    }
}

/// Copy and wiring for [`PaystackCheckout`](crate::PaystackCheckout).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Backend path that answers with a redirect to Paystack.
    pub endpoint: String,
    /// Shown to the user only; the backend decides what is actually charged.
    pub price: Price,
    /// Name of the plan being bought, used in the description line.
    pub plan: String,
    pub heading: String,
    pub button_label: String,
    pub processing_label: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            endpoint: "/pay/".to_string(),
            price: Price::default(),
            plan: "premium".to_string(),
            heading: "Upgrade to Premium".to_string(),
            button_label: "Pay with Paystack".to_string(),
            processing_label: "Processing...".to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn description(&self) -> String {
        format!(
            "Pay {} to upgrade your account to {}.",
            self.price, self.plan
        )
    }

    pub fn request(&self, credentials: SessionCredentials) -> PaymentRequest {
        PaymentRequest::new(self.endpoint.clone(), credentials)
    }
}
