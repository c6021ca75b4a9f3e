//! Mock completion backend for integration tests
//!
//! Serves a queue of canned chat-completion responses in order, capturing
//! every request body for assertions. A failing variant answers with a
//! fixed error status instead.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Mock backend serving predictable chat-completion responses
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Canned response bodies, served front to back; the last one repeats
    responses: Mutex<VecDeque<serde_json::Value>>,
    /// Captured request bodies, in arrival order
    captured: Mutex<Vec<serde_json::Value>>,
    /// Fixed failure status; when set, no canned response is served
    fail_status: Option<u16>,
    /// Retry-After header value for 429 responses
    retry_after: Option<u64>,
}

impl MockLlm {
    /// Start a mock serving the given responses in order
    pub async fn start(responses: Vec<serde_json::Value>) -> anyhow::Result<Self> {
        Self::start_inner(responses, None, None).await
    }

    /// Start a mock that answers every request with the given status
    pub async fn start_failing(status: u16, retry_after: Option<u64>) -> anyhow::Result<Self> {
        Self::start_inner(Vec::new(), Some(status), retry_after).await
    }

    async fn start_inner(
        responses: Vec<serde_json::Value>,
        fail_status: Option<u16>,
        retry_after: Option<u64>,
    ) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            responses: Mutex::new(responses.into()),
            captured: Mutex::new(Vec::new()),
            fail_status,
            retry_after,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for pointing a gateway at the mock
    ///
    /// Includes `/v1` since the gateway appends `/chat/completions`.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/v1", self.addr)).expect("mock address is a valid URL")
    }

    /// Number of completion requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Captured request bodies, in arrival order
    pub fn captured(&self) -> Vec<serde_json::Value> {
        self.state.captured.lock().unwrap().clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.captured.lock().unwrap().push(body);

    if let Some(status) = state.fail_status {
        let mut headers = HeaderMap::new();
        if let Some(seconds) = state.retry_after {
            headers.insert("retry-after", seconds.to_string().parse().unwrap());
        }
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, headers, Json(serde_json::json!({"error": "mock failure"})));
    }

    let mut responses = state.responses.lock().unwrap();
    let response = if responses.len() > 1 {
        responses.pop_front().unwrap()
    } else {
        responses.front().cloned().unwrap_or_else(|| text_response("Hello from mock"))
    };

    (StatusCode::OK, HeaderMap::new(), Json(response))
}

// -- Canned response builders --

/// Plain assistant text response
pub fn text_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-mock",
        "model": "mock-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

/// Assistant text with reasoning-summary fragments
pub fn reasoning_response(content: &str, fragments: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-mock",
        "model": "mock-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
                "reasoning_summary": fragments,
            },
            "finish_reason": "stop"
        }]
    })
}

/// Assistant turn issuing the given tool calls
pub fn tool_call_response(calls: &[(&str, &str, &str)]) -> serde_json::Value {
    let tool_calls: Vec<serde_json::Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            serde_json::json!({
                "id": id,
                "type": "function",
                "function": { "name": name, "arguments": arguments }
            })
        })
        .collect();

    serde_json::json!({
        "id": "chatcmpl-mock",
        "model": "mock-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": null, "tool_calls": tool_calls },
            "finish_reason": "tool_calls"
        }]
    })
}
