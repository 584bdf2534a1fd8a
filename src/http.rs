use reqwest::{Client, Method};
use serde_json::Value;

/// JSON request seam every API call goes through.
///
/// The real implementation is [`ReqwestTransport`]; tests substitute a
/// scripted in-memory backend that records calls.
pub trait HttpTransport {
    fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Value, String>>;
}

impl<T: HttpTransport> HttpTransport for &T {
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, String> {
        (**self).request_json(method, url, body, token).await
    }
}

/// reqwest-backed transport for the Feishu open API.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, String> {
        let mut request = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json; charset=utf-8");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Bitable API error ({}): {}", status, body));
        }

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse JSON: {e}"))
    }
}
