use reqwest::Method;
use serde_json::json;

use crate::http::HttpTransport;

/// Exchange the long-lived app credentials for a short-lived tenant token.
///
/// Every invocation performs a fresh exchange; tokens are never cached
/// across runs.
pub async fn fetch_tenant_access_token<T: HttpTransport>(
    transport: &T,
    api_base: &str,
    app_id: &str,
    app_secret: &str,
) -> Result<String, String> {
    let token_url = format!(
        "{}/open-apis/auth/v3/tenant_access_token/internal",
        api_base.trim_end_matches('/')
    );

    let body = json!({
        "app_id": app_id,
        "app_secret": app_secret,
    });

    let resp = transport
        .request_json(Method::POST, &token_url, Some(&body), None)
        .await?;

    let token = resp
        .get("tenant_access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Failed to get tenant access token: {resp}"))?;

    if token.trim().is_empty() {
        return Err("Tenant access token was empty".to_string());
    }

    Ok(token.to_string())
}
