//! Domain failures as HTTP responses.
//!
//! Pages re-render their own form errors; whatever reaches this mapping is
//! answered as JSON with a status picked from the error code. Internal
//! failures are logged in full and answered with a generic message that
//! keeps only the trace id.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::trace_id::TRACE_ID_HEADER;
use crate::domain::{Error, ErrorCode};

/// Result of a handler whose failures render through [`ResponseError`].
pub type ApiResult<T> = Result<T, Error>;

const GENERIC_MESSAGE: &str = "Internal server error";

/// Body safe to show a client.
fn public_body(failure: &Error) -> Cow<'_, Error> {
    if failure.code() != ErrorCode::InternalError {
        return Cow::Borrowed(failure);
    }
    let generic = Error::internal(GENERIC_MESSAGE);
    Cow::Owned(
        failure
            .trace_id()
            .and_then(|id| generic.clone().try_with_trace_id(id).ok())
            .unwrap_or(generic),
    )
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = public_body(self);
        if matches!(body, Cow::Owned(_)) {
            error!(message = %self.message(), trace_id = ?self.trace_id(), "request failed");
        }
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(body.as_ref())
    }
}

/// Framework failures surfacing in handlers, such as session decoding, are
/// internal; their text stays in the log.
impl From<actix_web::Error> for Error {
    fn from(cause: actix_web::Error) -> Self {
        error!(error = %cause, "framework error in handler");
        Self::internal(GENERIC_MESSAGE)
    }
}
