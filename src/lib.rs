//! Yew component and helpers for starting a Paystack hosted checkout.

pub mod checkout_component;
pub mod client;
pub mod components;
pub mod config;
pub mod state;

pub use checkout_component::*;
pub use client::{
    FALLBACK_MESSAGE, ErrorType, PaymentRedirect, PaymentRequest, PaymentResult, PaystackError,
    SessionCredentials,
};
pub use config::*;
pub use state::*;
