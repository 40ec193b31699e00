//! Handler and Configuration Error Types

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::panic;
use std::sync::{Arc, Once};
use thiserror::Error;
use tower_http::catch_panic::ResponseForPanic;

use crate::logging::AlertLog;

/// Message returned for any failure the caller cannot fix
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors while turning a request body into an alert
///
/// The `Display` text carries the detail and is only ever logged;
/// callers see [`SummarizeError::public_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// Body is not valid JSON
    #[error("Invalid JSON in request body: {0}")]
    InvalidJson(String),

    /// `alert` absent or empty
    #[error("No alert text provided in request")]
    MissingAlert,

    /// Anything else
    #[error("Unexpected error processing alert: {0}")]
    Internal(String),
}

impl SummarizeError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::InvalidJson(_) | SummarizeError::MissingAlert => {
                StatusCode::BAD_REQUEST
            }
            SummarizeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    pub fn public_message(&self) -> &'static str {
        match self {
            SummarizeError::InvalidJson(_) => "Invalid JSON in request body",
            SummarizeError::MissingAlert => "No alert text provided",
            SummarizeError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Report to the logging collaborator at the matching level
    pub fn log_to(&self, log: &dyn AlertLog) {
        match self {
            SummarizeError::MissingAlert => log.warning(&self.to_string()),
            SummarizeError::InvalidJson(_) | SummarizeError::Internal(_) => {
                log.error(&self.to_string())
            }
        }
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

thread_local! {
    /// Location and backtrace of the last panic on this thread
    static PANIC_SITE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a hook that records where a panic happened before the
/// previous hook runs. The responder picks the record up on the same thread.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            let backtrace = Backtrace::capture();
            let site = match backtrace.status() {
                BacktraceStatus::Captured => format!("at {location}\n{backtrace}"),
                _ => format!("at {location}"),
            };
            PANIC_SITE.with(|slot| *slot.borrow_mut() = Some(site));
            previous(info);
        }));
    });
}

/// Turns a panic inside the router into the opaque JSON 500
#[derive(Clone)]
pub struct PanicResponder {
    log: Arc<dyn AlertLog>,
}

impl PanicResponder {
    pub fn new(log: Arc<dyn AlertLog>) -> Self {
        install_panic_hook();
        Self { log }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let payload = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            "handler panicked".to_string()
        };

        let detail = match PANIC_SITE.with(|slot| slot.borrow_mut().take()) {
            Some(site) => format!("{payload} {site}"),
            None => payload,
        };

        let error = SummarizeError::Internal(detail);
        error.log_to(self.log.as_ref());
        error.into_response()
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// Value present but unusable
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
