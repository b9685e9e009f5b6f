//! The response surface the checks run against.
//!
//! The engine owns no HTTP transport. Tests hand it anything exposing a
//! status code, a URL, and the raw body text; [`RawResponse`] is a bundled
//! owned implementation for test doubles and for clients that surface
//! plain strings.

use serde_json::Value;

/// An HTTP-response-like value.
///
/// Implement this for your client's response type to run checks directly
/// against it. Decoding is provided: [`json`](Self::json) parses
/// [`text`](Self::text) with `serde_json`.
pub trait HttpResponse {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// The requested URL, used in failure messages. Empty when unknown.
    fn url(&self) -> &str;

    /// The raw body text.
    fn text(&self) -> &str;

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not valid JSON.
    fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.text())
    }
}

/// Simple owned response for testing and string-based clients.
///
/// # Example
///
/// ```
/// use dotcheck_http::{HttpResponse, RawResponse};
///
/// let resp = RawResponse::builder()
///     .status(404)
///     .url("http://api.test/dags/missing")
///     .body("{\"detail\": \"not found\"}")
///     .build();
///
/// assert_eq!(resp.status(), 404);
/// assert!(resp.json().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    status: u16,
    url: String,
    body: String,
}

impl RawResponse {
    /// Create a builder for `RawResponse`.
    #[must_use]
    pub fn builder() -> RawResponseBuilder {
        RawResponseBuilder::default()
    }

    /// A 200 response with the given body and no URL.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            url: String::new(),
            body: body.into(),
        }
    }

    /// A response with the given status and body, no URL.
    #[must_use]
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            url: String::new(),
            body: body.into(),
        }
    }
}

impl HttpResponse for RawResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn text(&self) -> &str {
        &self.body
    }
}

/// Builder for [`RawResponse`].
#[derive(Debug, Default)]
pub struct RawResponseBuilder {
    response: RawResponse,
}

impl RawResponseBuilder {
    /// Set the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.response.status = status;
        self
    }

    /// Set the request URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.response.url = url.into();
        self
    }

    /// Set the raw body text.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.response.body = body.into();
        self
    }

    /// Build the `RawResponse`.
    #[must_use]
    pub fn build(self) -> RawResponse {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_sets_all_fields() {
        let resp = RawResponse::builder()
            .status(201)
            .url("http://api.test/pets")
            .body("{\"id\": 7}")
            .build();

        assert_eq!(resp.status(), 201);
        assert_eq!(resp.url(), "http://api.test/pets");
        assert_eq!(resp.json().unwrap(), json!({"id": 7}));
    }

    #[test]
    fn ok_defaults_to_200() {
        let resp = RawResponse::ok("[]");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.url(), "");
        assert_eq!(resp.json().unwrap(), json!([]));
    }

    #[test]
    fn json_fails_on_garbage() {
        let resp = RawResponse::ok("<html>oops</html>");
        assert!(resp.json().is_err());
    }
}
