use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;

use crate::api::{AdminRequest, AdminResponse, Transport};
use crate::error::AdminResult;

/// Transport double: records every request and answers from a script.
///
/// Rules are matched in insertion order on method plus a path suffix;
/// unmatched requests get `200 {}`.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    requests: Vec<AdminRequest>,
    rules: Vec<Rule>,
}

struct Rule {
    method: Method,
    path_suffix: String,
    response: AdminResponse,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` requests whose path ends with `path_suffix`
    pub fn respond(
        &self,
        method: Method,
        path_suffix: &str,
        status: u16,
        body: &str,
    ) -> &Self {
        self.inner.lock().unwrap().rules.push(Rule {
            method,
            path_suffix: path_suffix.to_string(),
            response: AdminResponse::new(status, body),
        });
        self
    }

    pub fn requests(&self) -> Vec<AdminRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: Method, path_suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path().ends_with(path_suffix))
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: AdminRequest) -> AdminResult<AdminResponse> {
        let mut state = self.inner.lock().unwrap();
        let response = state
            .rules
            .iter()
            .find(|rule| rule.method == request.method && request.path().ends_with(&rule.path_suffix))
            .map(|rule| rule.response.clone())
            .unwrap_or_else(|| AdminResponse::new(200, "{}"));
        state.requests.push(request);
        Ok(response)
    }
}
