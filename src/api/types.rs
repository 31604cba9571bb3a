use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outgoing call to the homeserver, built fresh per operation.
#[derive(Debug, Clone)]
pub struct AdminRequest {
    pub method: Method,
    pub url: String,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl AdminRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    /// Attach the token as the `access_token` query parameter
    pub fn access_token(mut self, token: &str) -> Self {
        self.query.push(("access_token".to_string(), token.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path component of the URL, still percent-encoded
    pub fn path(&self) -> &str {
        let after_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        after_scheme
            .find('/')
            .map(|idx| &after_scheme[idx..])
            .unwrap_or("/")
    }
}

/// Raw status and body of a homeserver reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub status: u16,
    pub body: String,
}

impl AdminResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 is the only status treated as success
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Parsed body, or `None` when the body is not JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn str_field(&self, name: &str) -> Option<String> {
        self.json()?
            .get(name)?
            .as_str()
            .map(str::to_string)
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.json()?.get(name)?.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keeps_percent_encoding() {
        let req = AdminRequest::new(
            Method::POST,
            "https://matrix.org/_matrix/client/r0/admin/deactivate/%40bad%3Amatrix.org",
        );
        assert_eq!(req.path(), "/_matrix/client/r0/admin/deactivate/%40bad%3Amatrix.org");
    }

    #[test]
    fn fields_default_when_absent_or_not_json() {
        let resp = AdminResponse::new(200, r#"{"num_quarantined": 7}"#);
        assert_eq!(resp.u64_field("num_quarantined"), Some(7));
        assert_eq!(resp.str_field("room_id"), None);

        let html = AdminResponse::new(502, "<html>Bad Gateway</html>");
        assert_eq!(html.json(), None);
        assert_eq!(html.u64_field("num_quarantined"), None);
    }

    #[test]
    fn only_200_is_success() {
        assert!(AdminResponse::new(200, "{}").is_success());
        assert!(!AdminResponse::new(201, "{}").is_success());
        assert!(!AdminResponse::new(404, "{}").is_success());
    }
}
