//! yew_paystack/src/client.rs
//!
//! High-level Rust API for starting a Paystack hosted checkout from a Yew app.
//!
//! The browser never talks to Paystack directly. Your backend initializes the
//! transaction and answers the POST with an HTTP redirect to Paystack's
//! `authorization_url`; the browser follows it, and we hand the whole page over.
//!
//! This module provides:
//! - `SessionCredentials` to say explicitly how the request authenticates.
//! - `PaymentRequest` describing the POST (endpoint, credentials, CSRF token).
//! - `initiate_payment()` to send the request and classify the reply.
//! - `interpret_reply()` to turn a raw `ServerReply` into a `PaymentResult`.
//! - `complete_payment()` to follow a redirect outcome with a full-page navigation.
//! - `redirect_to()` to set `window.location.href`.
//!
//! # Example Usage
//! ```rust,ignore
//! use yew_paystack::client::{
//!     complete_payment, initiate_payment, redirect_to, PaymentRequest, PaymentResult,
//!     SessionCredentials,
//! };
//!
//! wasm_bindgen_futures::spawn_local(async move {
//!     let request = PaymentRequest::new("/pay/", SessionCredentials::Cookies);
//!     match complete_payment(initiate_payment(&request), redirect_to).await {
//!         PaymentResult::Redirect(to) => log::info!("Leaving for {}", to.url),
//!         PaymentResult::Error(err) => log::error!("Error: {}", err.message),
//!     }
//! });
//! ```

use std::fmt;
use std::future::Future;

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::JsValue;
use web_sys::RequestCredentials;

/// Text shown whenever the server does not supply its own message.
pub const FALLBACK_MESSAGE: &str = "Payment initiation failed";

/// Header Django (and most session-cookie backends) read the CSRF token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// How the payment request proves who the user is.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionCredentials {
    /// Send the browser's session cookies along (`credentials: "include"`).
    #[default]
    Cookies,
    /// Send `Authorization: Bearer <token>`; cookies stay same-origin only.
    Bearer(String),
    /// Send nothing. Useful against endpoints that do their own auth.
    Omit,
}

impl SessionCredentials {
    fn mode(&self) -> RequestCredentials {
        match self {
            SessionCredentials::Cookies => RequestCredentials::Include,
            SessionCredentials::Bearer(_) => RequestCredentials::SameOrigin,
            SessionCredentials::Omit => RequestCredentials::Omit,
        }
    }
}

/// Everything needed to issue the payment-initiation POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Backend path or URL that answers with a redirect, e.g. `"/pay/"`.
    pub endpoint: String,
    pub credentials: SessionCredentials,
    /// Sent as `X-CSRFToken` when present.
    pub csrf_token: Option<String>,
}

impl PaymentRequest {
    pub fn new(endpoint: impl Into<String>, credentials: SessionCredentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let SessionCredentials::Bearer(token) = &self.credentials {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        if let Some(token) = &self.csrf_token {
            headers.push((CSRF_HEADER, token.clone()));
        }
        headers
    }
}

/// Destination the backend redirected us to (Paystack's checkout page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRedirect {
    pub url: String,
}

/// Strongly-typed outcome of one payment-initiation attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentResult {
    /// The backend redirected; the page is being handed over to `url`.
    Redirect(PaymentRedirect),
    /// The attempt failed. `message` is what the user should see.
    Error(PaystackError),
}

/// Where a failure came from. Only `message` is ever shown to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorType {
    /// The request never completed.
    Network,
    /// The backend answered without redirecting.
    Server,
    /// Setting `window.location` failed.
    Navigation,
}

/// A failed payment initiation.
#[derive(Clone, Debug, PartialEq)]
pub struct PaystackError {
    /// Human-readable message: the backend's `message`, or [`FALLBACK_MESSAGE`].
    pub message: String,
    pub error_type: ErrorType,
    /// HTTP status of the non-redirect reply, if there was one.
    pub status: Option<u16>,
    /// Diagnostic detail for logs; never rendered.
    pub detail: Option<String>,
}

impl PaystackError {
    fn fallback(error_type: ErrorType, detail: Option<String>) -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
            error_type,
            status: None,
            detail,
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::fallback(ErrorType::Network, Some(detail.into()))
    }

    pub fn navigation(detail: impl Into<String>) -> Self {
        Self::fallback(ErrorType::Navigation, Some(detail.into()))
    }
}

impl fmt::Display for PaystackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PaystackError {}

/// The parts of a fetch `Response` that decide the outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerReply {
    pub redirected: bool,
    /// Final URL after redirects were followed.
    pub url: String,
    pub status: u16,
    /// Parsed JSON body, or `None` when it was missing or not JSON.
    pub body: Option<JsonValue>,
}

/// Classify a reply from the payment endpoint.
///
/// A followed redirect wins regardless of status. Otherwise the body's
/// `message` string is surfaced; an absent, empty or non-string `message`
/// falls back to [`FALLBACK_MESSAGE`].
pub fn interpret_reply(reply: ServerReply) -> PaymentResult {
    if reply.redirected && !reply.url.is_empty() {
        return PaymentResult::Redirect(PaymentRedirect { url: reply.url });
    }

    let message = reply
        .body
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(|v| v.as_str())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string());

    let detail = match (&message, &reply.body) {
        (None, None) => Some("response body was not JSON".to_string()),
        (None, Some(_)) => Some("response carried no message".to_string()),
        _ => None,
    };

    PaymentResult::Error(PaystackError {
        message: message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        error_type: ErrorType::Server,
        status: Some(reply.status),
        detail,
    })
}

/// POST to the payment endpoint and classify what came back.
///
/// Never fails outright: transport errors become `PaymentResult::Error`
/// with [`ErrorType::Network`].
pub async fn initiate_payment(request: &PaymentRequest) -> PaymentResult {
    let mut builder = Request::post(&request.endpoint).credentials(request.credentials.mode());
    for (name, value) in request.headers() {
        builder = builder.header(name, &value);
    }

    match builder.send().await {
        Ok(response) => interpret_reply(read_reply(response).await),
        Err(err) => PaymentResult::Error(gloo_to_paystack_error(err)),
    }
}

async fn read_reply(response: Response) -> ServerReply {
    let redirected = response.redirected();
    let url = response.url();
    let status = response.status();
    // A followed redirect lands on Paystack's HTML page; don't bother parsing it.
    let body = if redirected {
        None
    } else {
        response.json::<JsonValue>().await.ok()
    };
    ServerReply {
        redirected,
        url,
        status,
        body,
    }
}

/// Run an initiation future and, if it produced a redirect, navigate there once.
///
/// A navigation failure turns the outcome into an [`ErrorType::Navigation`] error.
pub async fn complete_payment<F, N>(attempt: F, navigate: N) -> PaymentResult
where
    F: Future<Output = PaymentResult>,
    N: FnOnce(&str) -> Result<(), PaystackError>,
{
    match attempt.await {
        PaymentResult::Redirect(redirect) => match navigate(&redirect.url) {
            Ok(()) => PaymentResult::Redirect(redirect),
            Err(err) => PaymentResult::Error(err),
        },
        failed => failed,
    }
}

/// Full-page navigation: `window.location.href = url`.
pub fn redirect_to(url: &str) -> Result<(), PaystackError> {
    let window = web_sys::window().ok_or_else(|| PaystackError::navigation("no window"))?;
    window.location().set_href(url).map_err(js_to_paystack_error)
}

#[derive(Deserialize)]
struct JsErrorPayload {
    message: String,
}

/// Convert a thrown `JsValue` into a navigation error, keeping whatever text it had.
fn js_to_paystack_error(value: JsValue) -> PaystackError {
    let detail = from_value::<JsErrorPayload>(value.clone())
        .map(|payload| payload.message)
        .unwrap_or_else(|_| value.as_string().unwrap_or_else(|| format!("{:?}", value)));
    PaystackError::navigation(detail)
}

fn gloo_to_paystack_error(err: gloo_net::Error) -> PaystackError {
    PaystackError::network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn reply(redirected: bool, body: Option<JsonValue>) -> ServerReply {
        ServerReply {
            redirected,
            url: if redirected {
                "https://checkout.paystack.com/abc123".to_string()
            } else {
                "https://app.example.com/pay/".to_string()
            },
            status: if redirected { 200 } else { 400 },
            body,
        }
    }

    fn error_of(result: PaymentResult) -> PaystackError {
        match result {
            PaymentResult::Error(err) => err,
            other => panic!("expected an error, got {:?}", other),
        }
    }

    #[test]
    fn redirect_reply_yields_destination() {
        let result = interpret_reply(reply(true, None));
        assert_eq!(
            result,
            PaymentResult::Redirect(PaymentRedirect {
                url: "https://checkout.paystack.com/abc123".to_string()
            })
        );
    }

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let err = error_of(interpret_reply(reply(
            false,
            Some(json!({ "message": "Card declined" })),
        )));
        assert_eq!(err.message, "Card declined");
        assert_eq!(err.error_type, ErrorType::Server);
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn missing_message_falls_back() {
        let err = error_of(interpret_reply(reply(false, Some(json!({ "status": "failed" })))));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn empty_or_non_string_message_falls_back() {
        let err = error_of(interpret_reply(reply(false, Some(json!({ "message": "" })))));
        assert_eq!(err.message, FALLBACK_MESSAGE);

        let err = error_of(interpret_reply(reply(false, Some(json!({ "message": 42 })))));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn unparseable_body_falls_back() {
        let err = error_of(interpret_reply(reply(false, None)));
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert_eq!(err.detail.as_deref(), Some("response body was not JSON"));
    }

    #[test]
    fn redirect_flag_without_url_is_not_followed() {
        let mut r = reply(true, None);
        r.url.clear();
        let err = error_of(interpret_reply(r));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn cookie_credentials_send_no_extra_headers() {
        let request = PaymentRequest::new("/pay/", SessionCredentials::Cookies);
        assert!(request.headers().is_empty());
        assert_eq!(request.credentials.mode(), RequestCredentials::Include);
    }

    #[test]
    fn bearer_and_csrf_become_headers() {
        let request = PaymentRequest::new("/pay/", SessionCredentials::Bearer("tok".into()))
            .with_csrf_token(Some("csrf-1".into()));
        assert_eq!(
            request.headers(),
            vec![
                ("Authorization", "Bearer tok".to_string()),
                (CSRF_HEADER, "csrf-1".to_string()),
            ]
        );
        assert_eq!(request.credentials.mode(), RequestCredentials::SameOrigin);
        assert_eq!(
            SessionCredentials::Omit.mode(),
            RequestCredentials::Omit
        );
    }

    #[test]
    fn display_includes_status_and_detail() {
        let err = error_of(interpret_reply(reply(false, None)));
        assert_eq!(
            err.to_string(),
            "Payment initiation failed (HTTP 400): response body was not JSON"
        );
    }

    #[tokio::test]
    async fn redirect_navigates_exactly_once() {
        let visited = RefCell::new(Vec::new());
        let result = complete_payment(async { interpret_reply(reply(true, None)) }, |url: &str| {
            visited.borrow_mut().push(url.to_string());
            Ok(())
        })
        .await;

        assert!(matches!(result, PaymentResult::Redirect(_)));
        assert_eq!(
            visited.into_inner(),
            vec!["https://checkout.paystack.com/abc123".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_attempt_never_navigates() {
        let visited = RefCell::new(0);
        let result = complete_payment(
            async { PaymentResult::Error(PaystackError::network("connection reset")) },
            |_: &str| {
                *visited.borrow_mut() += 1;
                Ok(())
            },
        )
        .await;

        let err = error_of(result);
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert_eq!(err.error_type, ErrorType::Network);
        assert_eq!(visited.into_inner(), 0);
    }

    #[tokio::test]
    async fn navigation_failure_becomes_error() {
        let result = complete_payment(async { interpret_reply(reply(true, None)) }, |_: &str| {
            Err(PaystackError::navigation("blocked"))
        })
        .await;

        let err = error_of(result);
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert_eq!(err.error_type, ErrorType::Navigation);
    }
}
