//! Transport-level observability hook
//!
//! A single interface injected into the gateway so request/response logging
//! is a cross-cutting concern rather than duplicated at every call site.

/// Observer notified around each network exchange
pub trait TransportObserver: Send + Sync {
    /// Called with the outgoing request before transmission
    ///
    /// The body is the JSON payload as sent; credentials travel in headers
    /// and are never passed to the observer.
    fn on_request(&self, method: &str, url: &str, body: &serde_json::Value);

    /// Called with the raw response body once received
    fn on_response(&self, status: u16, body: &str);
}

/// Observer that logs exchanges through `tracing`
///
/// The authorization credential is reported masked, matching what a
/// captured request would show after redaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransportObserver for TracingObserver {
    fn on_request(&self, method: &str, url: &str, body: &serde_json::Value) {
        let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        tracing::debug!(
            method,
            url,
            authorization = "Bearer ***masked***",
            body = %pretty,
            "outgoing request"
        );
    }

    fn on_response(&self, status: u16, body: &str) {
        tracing::debug!(status, body, "incoming response");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Observer that records calls for assertions
    #[derive(Default)]
    struct Recording {
        requests: Mutex<Vec<String>>,
        responses: Mutex<Vec<u16>>,
    }

    impl TransportObserver for Recording {
        fn on_request(&self, _method: &str, url: &str, _body: &serde_json::Value) {
            self.requests.lock().unwrap().push(url.to_owned());
        }

        fn on_response(&self, status: u16, _body: &str) {
            self.responses.lock().unwrap().push(status);
        }
    }

    #[test]
    fn observer_is_object_safe() {
        let observer: Box<dyn TransportObserver> = Box::new(Recording::default());
        observer.on_request("POST", "http://localhost/v1/chat/completions", &serde_json::json!({}));
        observer.on_response(200, "{}");
    }
}
