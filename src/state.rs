//! View state for the checkout button and the guard against double submission.

use std::cell::Cell;
use std::rc::Rc;

use crate::client::PaymentResult;
use crate::config::CheckoutConfig;

/// What the checkout renders: Idle, Loading, or Idle with an error line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutState {
    pub loading: bool,
    pub error: Option<String>,
}

impl CheckoutState {
    /// State while a request is outstanding; any previous error is cleared.
    pub fn pending() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }

    /// State once an attempt has settled, whatever the outcome.
    pub fn settled(result: &PaymentResult) -> Self {
        let error = match result {
            PaymentResult::Redirect(_) => None,
            PaymentResult::Error(err) => Some(err.message.clone()),
        };
        Self {
            loading: false,
            error,
        }
    }

    pub fn button_label<'a>(&self, config: &'a CheckoutConfig) -> &'a str {
        if self.loading {
            &config.processing_label
        } else {
            &config.button_label
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.loading
    }
}

/// Shared "a payment request is in flight" flag.
///
/// Checked and set synchronously in the click handler, so a second click that
/// lands before the disabled button re-renders still dispatches nothing.
#[derive(Clone, Debug, Default)]
pub struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    /// Claim the flag, or `None` if another attempt holds it.
    pub fn try_acquire(&self) -> Option<InFlightTicket> {
        if self.0.replace(true) {
            return None;
        }
        Some(InFlightTicket(self.0.clone()))
    }

    pub fn is_held(&self) -> bool {
        self.0.get()
    }
}

/// Releases the [`InFlight`] flag when dropped.
#[derive(Debug)]
pub struct InFlightTicket(Rc<Cell<bool>>);

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{PaymentRedirect, PaystackError, FALLBACK_MESSAGE};

    #[test]
    fn pending_shows_processing_and_disables() {
        let config = CheckoutConfig::default();
        let state = CheckoutState::pending();
        assert_eq!(state.button_label(&config), "Processing...");
        assert!(state.is_disabled());
        assert_eq!(state.error, None);
    }

    #[test]
    fn settled_always_clears_loading() {
        let config = CheckoutConfig::default();
        let outcomes = [
            PaymentResult::Redirect(PaymentRedirect {
                url: "https://checkout.paystack.com/x".into(),
            }),
            PaymentResult::Error(PaystackError::network("offline")),
        ];
        for outcome in &outcomes {
            let state = CheckoutState::settled(outcome);
            assert!(!state.loading);
            assert!(!state.is_disabled());
            assert_eq!(state.button_label(&config), "Pay with Paystack");
        }
    }

    #[test]
    fn settled_error_keeps_message_and_redirect_has_none() {
        let failed = CheckoutState::settled(&PaymentResult::Error(PaystackError::network("x")));
        assert_eq!(failed.error.as_deref(), Some(FALLBACK_MESSAGE));

        let redirected = CheckoutState::settled(&PaymentResult::Redirect(PaymentRedirect {
            url: "https://checkout.paystack.com/x".into(),
        }));
        assert_eq!(redirected.error, None);
    }

    #[test]
    fn second_acquire_is_refused_until_release() {
        let in_flight = InFlight::default();
        let ticket = in_flight.try_acquire().expect("first acquire");
        assert!(in_flight.is_held());
        assert!(in_flight.try_acquire().is_none());

        drop(ticket);
        assert!(!in_flight.is_held());
        assert!(in_flight.try_acquire().is_some());
    }

    #[test]
    fn clones_share_the_flag() {
        let in_flight = InFlight::default();
        let other = in_flight.clone();
        let _ticket = in_flight.try_acquire().unwrap();
        assert!(other.try_acquire().is_none());
    }
}
