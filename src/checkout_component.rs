//! A drop-in Yew component that sends the user to Paystack's hosted checkout.
//!
//! Clicking the button POSTs to your backend, which initializes the Paystack
//! transaction and answers with a redirect. The component follows that
//! redirect with a full-page navigation, or shows the backend's error inline.

use crate::{
    client::{complete_payment, initiate_payment, redirect_to, PaymentResult},
    components::Button,
    config::CheckoutConfig,
    state::{CheckoutState, InFlight},
    PaymentRedirect, PaystackError, SessionCredentials,
};
use yew::prelude::*;

/// Properties for the [`PaystackCheckout`] component.
///
/// Every field is optional.
///
/// # Fields
///
/// * `config` – Endpoint, price and copy (default: 25.00 GHS premium upgrade via `/pay/`).
/// * `credentials` – How the POST authenticates (default: session cookies).
/// * `csrf_token` – Sent as `X-CSRFToken` when set.
/// * `on_redirect` – Invoked with the Paystack URL once navigation has been started.
/// * `on_error` – Invoked with [`PaystackError`] when initiation fails.
/// * `children` – Extra Yew nodes rendered between the description and the button.
#[derive(Properties, PartialEq, Clone)]
pub struct PaystackCheckoutProps {
    #[prop_or_default]
    pub config: CheckoutConfig,
    #[prop_or_default]
    pub credentials: SessionCredentials,
    #[prop_or_default]
    pub csrf_token: Option<String>,
    #[prop_or_default]
    pub on_redirect: Callback<PaymentRedirect>,
    #[prop_or_default]
    pub on_error: Callback<PaystackError>,
    #[prop_or_default]
    pub children: Children,
}

/// Yew function component rendering the premium-upgrade call to action.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_paystack::{PaystackCheckout, PaystackError, SessionCredentials};
///
/// #[function_component(Upgrade)]
/// fn upgrade() -> Html {
///     let on_error = Callback::from(|err: PaystackError| {
///         log::error!("Payment failed: {}", err);
///     });
///
///     html! {
///         <PaystackCheckout
///             credentials={SessionCredentials::Cookies}
///             csrf_token={Some("token-from-cookie".to_string())}
///             {on_error}
///         />
///     }
/// }
/// ```
#[function_component(PaystackCheckout)]
pub fn paystack_checkout(props: &PaystackCheckoutProps) -> Html {
    let state = use_state(CheckoutState::default);
    let in_flight = (*use_state(InFlight::default)).clone();

    let on_click = {
        let state = state.clone();
        let on_redirect = props.on_redirect.clone();
        let on_error = props.on_error.clone();
        let request = props
            .config
            .request(props.credentials.clone())
            .with_csrf_token(props.csrf_token.clone());

        Callback::from(move |_: MouseEvent| {
            // `disabled` only lands after a re-render; this check is immediate.
            let Some(ticket) = in_flight.try_acquire() else {
                log::debug!("payment already in flight, ignoring click");
                return;
            };
            state.set(CheckoutState::pending());

            let state = state.clone();
            let request = request.clone();
            let on_redirect = on_redirect.clone();
            let on_error = on_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                log::info!("initiating payment via {}", request.endpoint);
                let result = complete_payment(initiate_payment(&request), redirect_to).await;
                match &result {
                    PaymentResult::Redirect(redirect) => {
                        log::info!("redirecting to {}", redirect.url);
                        on_redirect.emit(redirect.clone());
                    }
                    PaymentResult::Error(err) => {
                        log::warn!("payment initiation failed: {}", err);
                        on_error.emit(err.clone());
                    }
                }
                state.set(CheckoutState::settled(&result));
                drop(ticket);
            });
        })
    };

    let config = &props.config;
    html! {
        <div class="ypk-checkout" style="padding: 2rem;">
            <h1>{ config.heading.clone() }</h1>
            <p>{ config.description() }</p>
            { for props.children.iter() }
            <Button
                label={AttrValue::from(state.button_label(config).to_string())}
                onclick={on_click}
                disabled={state.is_disabled()}
                busy={state.loading}
            />
            {
                if let Some(msg) = &state.error {
                    html!{ <p class="ypk-error" style="color: red;">{ msg.clone() }</p> }
                } else {
                    Html::default()
                }
            }
        </div>
    }
}
