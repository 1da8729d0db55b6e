//! Raw response returned by a transport.

use bytes::Bytes;
use http::StatusCode;
use std::ops::Range;

/// Status codes treated as success. 300 and above are failures.
pub const SUCCESS_STATUS: Range<u16> = 200..300;

/// Check whether a status code is a success.
pub fn is_success_status(status: u16) -> bool {
    SUCCESS_STATUS.contains(&status)
}

/// Status code and fully read body of one response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    body: Bytes,
}

impl RawResponse {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the status lies in [`SUCCESS_STATUS`].
    pub fn is_success(&self) -> bool {
        is_success_status(self.status.as_u16())
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Get the response body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consume the response and return the body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }
}
