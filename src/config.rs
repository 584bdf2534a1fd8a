use std::env;

const DEFAULT_API_BASE: &str = "https://open.feishu.cn";

/// Connection settings for one Bitable base.
#[derive(Debug, Clone)]
pub struct Config {
    /// Open API base URL, overridable for private deployments.
    pub api_base: String,
    /// Application identifier used for the token exchange.
    pub app_id: String,
    /// Application secret used for the token exchange.
    pub app_secret: String,
    /// App token addressing the Bitable base.
    pub app_token: String,
}

impl Config {
    pub fn new(api_base: &str, app_id: &str, app_secret: &str, app_token: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            app_token: app_token.to_string(),
        }
    }

    /// Read the `FEISHU_*` environment variables.
    ///
    /// `FEISHU_API_BASE` is optional and defaults to the public endpoint;
    /// the error names every required variable that is missing.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let api_base = lookup("FEISHU_API_BASE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut missing = vec![];
        let mut required = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let app_id = required("FEISHU_APP_ID");
        let app_secret = required("FEISHU_APP_SECRET");
        let app_token = required("FEISHU_BASE_APP_TOKEN");

        if !missing.is_empty() {
            return Err(format!("Missing env vars: {}", missing.join("/")));
        }

        Ok(Self::new(&api_base, &app_id, &app_secret, &app_token))
    }
}
