use reqwest::Method;
use serde_json::{Value, json};

use crate::LogLevel;
use crate::auth::credentials::fetch_tenant_access_token;
use crate::bitable::field::{FieldConfig, FieldMeta};
use crate::bitable::parse::{expect_ok, parse_created_record_id, parse_list_page};
use crate::bitable::record::{Record, RecordFields};
use crate::bitable::table::TableMeta;
use crate::config::Config;
use crate::http::HttpTransport;

const TABLE_PAGE_SIZE: i32 = 100;
const FIELD_PAGE_SIZE: i32 = 200;
const RECORD_PAGE_SIZE: i32 = 500;

/// HTTP client for one Bitable base.
pub struct BaseClient<T> {
    transport: T,
    api_base: String,
    app_token: String,
    tenant_token: String,
    log_level: LogLevel,
}

impl<T: HttpTransport> BaseClient<T> {
    /// Create a client from an already-acquired tenant token.
    pub fn new(
        transport: T,
        api_base: &str,
        app_token: &str,
        tenant_token: &str,
        log_level: LogLevel,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            app_token: app_token.to_string(),
            tenant_token: tenant_token.to_string(),
            log_level,
        }
    }

    /// Exchange credentials for a tenant token and build the client.
    pub async fn connect(transport: T, config: &Config, log_level: LogLevel) -> Result<Self, String> {
        let token = fetch_tenant_access_token(
            &transport,
            &config.api_base,
            &config.app_id,
            &config.app_secret,
        )
        .await?;

        Ok(Self::new(
            transport,
            &config.api_base,
            &config.app_token,
            &token,
            log_level,
        ))
    }

    fn tables_url(&self) -> String {
        format!(
            "{}/open-apis/bitable/v1/apps/{}/tables",
            self.api_base, self.app_token
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, String> {
        if matches!(self.log_level, LogLevel::Debug) {
            println!("Url: {:?}", url);
        }

        let json = self
            .transport
            .request_json(Method::GET, url, None, Some(&self.tenant_token))
            .await?;
        expect_ok(&json)?;
        Ok(json)
    }

    async fn mutate_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, String> {
        if matches!(self.log_level, LogLevel::Debug) {
            println!("Url: {:?}", url);
        }

        let json = self
            .transport
            .request_json(method, url, body, Some(&self.tenant_token))
            .await?;
        expect_ok(&json)?;
        Ok(json)
    }

    /// Follow `page_token` until the listing reports no more pages.
    async fn list_paged<Item: serde::de::DeserializeOwned>(
        &self,
        base_url: &str,
        page_size: i32,
    ) -> Result<Vec<Item>, String> {
        let mut items: Vec<Item> = vec![];
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!("{}?page_size={}", base_url, page_size);
            if let Some(token) = &page_token {
                url.push_str("&page_token=");
                url.push_str(&urlencoding::encode(token));
            }

            let json = self.get_json(&url).await?;
            let page = parse_list_page(&json)?;
            items.extend(page.items);

            if !page.has_more {
                break;
            }

            match page.page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(items)
    }

    /// List every table in the base.
    pub async fn list_tables(&self) -> Result<Vec<TableMeta>, String> {
        self.list_paged(&self.tables_url(), TABLE_PAGE_SIZE).await
    }

    /// List every field of a table.
    pub async fn list_fields(&self, table_id: &str) -> Result<Vec<FieldMeta>, String> {
        let url = format!("{}/{}/fields", self.tables_url(), table_id);
        self.list_paged(&url, FIELD_PAGE_SIZE).await
    }

    /// Create a field; non-zero response codes fail loudly, no retry.
    pub async fn create_field(&self, table_id: &str, config: &FieldConfig) -> Result<(), String> {
        let url = format!("{}/{}/fields", self.tables_url(), table_id);
        let body = serde_json::to_value(config)
            .map_err(|e| format!("Failed to serialize field config: {e}"))?;
        self.mutate_json(Method::POST, &url, Some(&body)).await?;
        Ok(())
    }

    /// Patch a field; transitions the service rejects surface as errors.
    pub async fn update_field(
        &self,
        table_id: &str,
        field_id: &str,
        config: &FieldConfig,
    ) -> Result<(), String> {
        let url = format!("{}/{}/fields/{}", self.tables_url(), table_id, field_id);
        let body = serde_json::to_value(config)
            .map_err(|e| format!("Failed to serialize field config: {e}"))?;
        self.mutate_json(Method::PATCH, &url, Some(&body)).await?;
        Ok(())
    }

    pub async fn delete_field(&self, table_id: &str, field_id: &str) -> Result<(), String> {
        let url = format!("{}/{}/fields/{}", self.tables_url(), table_id, field_id);
        self.mutate_json(Method::DELETE, &url, None).await?;
        Ok(())
    }

    pub async fn delete_table(&self, table_id: &str) -> Result<(), String> {
        let url = format!("{}/{}", self.tables_url(), table_id);
        self.mutate_json(Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// Create a record and return its identifier.
    pub async fn create_record(
        &self,
        table_id: &str,
        fields: &RecordFields,
    ) -> Result<String, String> {
        let url = format!("{}/{}/records", self.tables_url(), table_id);
        let body = json!({ "fields": fields });
        let json = self.mutate_json(Method::POST, &url, Some(&body)).await?;
        parse_created_record_id(&json)
    }

    /// List every record of a table.
    pub async fn list_records(&self, table_id: &str) -> Result<Vec<Record>, String> {
        let url = format!("{}/{}/records", self.tables_url(), table_id);
        self.list_paged(&url, RECORD_PAGE_SIZE).await
    }

    /// Set the given fields on an existing record.
    pub async fn update_record(
        &self,
        table_id: &str,
        record_id: &str,
        fields: &RecordFields,
    ) -> Result<(), String> {
        let url = format!("{}/{}/records/{}", self.tables_url(), table_id, record_id);
        let body = json!({ "fields": fields });
        self.mutate_json(Method::PUT, &url, Some(&body)).await?;
        Ok(())
    }
}
