use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;

/// One request as the mock homeserver saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Raw path, percent-encoding intact
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    recorded: Vec<Recorded>,
    routes: Vec<(String, String, u16, String)>,
}

type Shared = Arc<Mutex<MockState>>;

/// Homeserver stand-in on a free local port. Unscripted requests get `200 {}`.
pub struct MockHomeserver {
    pub base_url: String,
    state: Shared,
}

impl MockHomeserver {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock homeserver")?;

        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        })
    }

    /// Script the reply for an exact method and raw path
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.state.lock().unwrap().routes.push((
            method.to_string(),
            path.to_string(),
            status,
            body.to_string(),
        ));
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().recorded.clone()
    }

    pub fn calls(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.recorded()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();

    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let (status, reply) = state
        .routes
        .iter()
        .find(|(m, p, _, _)| *m == recorded.method && *p == recorded.path)
        .map(|(_, _, status, body)| (*status, body.clone()))
        .unwrap_or((200, "{}".to_string()));

    state.recorded.push(recorded);

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}
