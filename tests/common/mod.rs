#![allow(dead_code)]

//! In-memory Bitable standing in for the remote service: scripted
//! responses, a call log, and just enough schema/record state to drive
//! whole tasks end to end.

use std::sync::Mutex;

use reqwest::Method;
use serde_json::{Value, json};

use feishu_bitable_admin::http::HttpTransport;

pub const API_BASE: &str = "https://fake.feishu.local";
pub const APP_TOKEN: &str = "bascnFAKE";
pub const TENANT_TOKEN: &str = "t-fake";

/// One request the fake has served, query string stripped.
#[derive(Clone, Debug)]
pub struct Call {
    pub method: String,
    pub path: String,
}

#[derive(Clone)]
struct FakeField {
    id: String,
    name: String,
    field_type: i64,
    is_primary: bool,
    property: Option<Value>,
}

struct FakeRecord {
    id: String,
    fields: Value,
}

struct FakeTable {
    id: String,
    name: String,
    fields: Vec<FakeField>,
    records: Vec<FakeRecord>,
}

#[derive(Default)]
struct State {
    token_response: Option<Value>,
    tables: Vec<FakeTable>,
    next_table: u32,
    next_field: u32,
    next_record: u32,
    list_page_size: Option<usize>,
    rejected_field_creates: Vec<String>,
    rejected_field_updates: Vec<String>,
    calls: Vec<Call>,
}

pub struct FakeBitable {
    state: Mutex<State>,
}

impl FakeBitable {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn add_table(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_table += 1;
        let id = format!("tbl{}", state.next_table);
        state.tables.push(FakeTable {
            id: id.clone(),
            name: name.to_string(),
            fields: vec![],
            records: vec![],
        });
        id
    }

    fn push_field(&self, table: &str, name: &str, field_type: i64, is_primary: bool, property: Option<Value>) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_field += 1;
        let id = format!("fld{}", state.next_field);
        let field = FakeField {
            id: id.clone(),
            name: name.to_string(),
            field_type,
            is_primary,
            property,
        };
        let table = state
            .tables
            .iter_mut()
            .find(|t| t.name == table)
            .unwrap_or_else(|| panic!("no such table: {table}"));
        table.fields.push(field);
        id
    }

    pub fn add_field(&self, table: &str, name: &str, field_type: i64) -> String {
        self.push_field(table, name, field_type, false, None)
    }

    pub fn add_primary_field(&self, table: &str, name: &str) -> String {
        self.push_field(table, name, 1, true, None)
    }

    pub fn add_select_field(&self, table: &str, name: &str, options: &[&str]) -> String {
        let options: Vec<Value> = options
            .iter()
            .enumerate()
            .map(|(index, option)| json!({"name": option, "id": format!("opt{}", index + 1)}))
            .collect();
        self.push_field(table, name, 3, false, Some(json!({ "options": options })))
    }

    pub fn add_link_field(&self, table: &str, name: &str, target_table_id: &str, multiple: bool) -> String {
        self.push_field(
            table,
            name,
            18,
            false,
            Some(json!({"table_id": target_table_id, "multiple": multiple})),
        )
    }

    pub fn add_field_with_property(&self, table: &str, name: &str, field_type: i64, property: Value) -> String {
        self.push_field(table, name, field_type, false, Some(property))
    }

    pub fn add_record(&self, table: &str, fields: Value) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_record += 1;
        let id = format!("rec{}", state.next_record);
        let record = FakeRecord {
            id: id.clone(),
            fields,
        };
        let table = state
            .tables
            .iter_mut()
            .find(|t| t.name == table)
            .unwrap_or_else(|| panic!("no such table: {table}"));
        table.records.push(record);
        id
    }

    pub fn set_token_response(&self, response: Value) {
        self.state.lock().unwrap().token_response = Some(response);
    }

    pub fn set_list_page_size(&self, page_size: usize) {
        self.state.lock().unwrap().list_page_size = Some(page_size);
    }

    /// Make field creations with this name answer a non-zero code.
    pub fn reject_field_create(&self, field_name: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_field_creates
            .push(field_name.to_string());
    }

    /// Make field updates on this name fail at the transport level.
    pub fn reject_field_update(&self, field_name: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_field_updates
            .push(field_name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, method: &str, path_contains: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.method == method && call.path.contains(path_contains))
            .count()
    }

    pub fn table_id(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id.clone())
    }

    pub fn table_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn field_names(&self, table: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Identifier and type code of a field, by table and field name.
    pub fn field_info(&self, table: &str, field: &str) -> Option<(String, i64)> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == table)?
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| (f.id.clone(), f.field_type))
    }

    pub fn field_property(&self, table: &str, field: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == table)?
            .fields
            .iter()
            .find(|f| f.name == field)?
            .property
            .clone()
    }

    /// `(record_id, fields)` snapshots of a table, in creation order.
    pub fn records(&self, table: &str) -> Vec<(String, Value)> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| {
                t.records
                    .iter()
                    .map(|r| (r.id.clone(), r.fields.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl State {
    fn paged(&self, items: Vec<Value>, query: &str) -> Value {
        let offset: usize = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page_token="))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let page_size = self.list_page_size.unwrap_or(usize::MAX);
        let start = offset.min(items.len());
        let end = start.saturating_add(page_size).min(items.len());
        let has_more = end < items.len();
        let page_token = if has_more {
            end.to_string()
        } else {
            String::new()
        };
        json!({
            "code": 0,
            "data": {
                "has_more": has_more,
                "page_token": page_token,
                "items": items[start..end].to_vec(),
                "total": items.len(),
            }
        })
    }

    fn field_json(field: &FakeField) -> Value {
        json!({
            "field_id": field.id,
            "field_name": field.name,
            "type": field.field_type,
            "is_primary": field.is_primary,
            "property": field.property,
        })
    }

    fn table_position(&self, table_id: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.id == table_id)
    }

    fn not_exist() -> Value {
        json!({"code": 1254045, "msg": "NotExist"})
    }

    fn ok() -> Value {
        json!({"code": 0, "msg": "success", "data": {}})
    }

    fn list_tables_page(&self, query: &str) -> Value {
        let items = self
            .tables
            .iter()
            .map(|t| json!({"table_id": t.id, "name": t.name, "revision": 1}))
            .collect();
        self.paged(items, query)
    }

    fn delete_table(&mut self, table_id: &str) -> Value {
        match self.table_position(table_id) {
            Some(index) => {
                self.tables.remove(index);
                Self::ok()
            }
            None => Self::not_exist(),
        }
    }

    fn list_fields_page(&self, table_id: &str, query: &str) -> Value {
        let Some(index) = self.table_position(table_id) else {
            return Self::not_exist();
        };
        let items = self.tables[index].fields.iter().map(Self::field_json).collect();
        self.paged(items, query)
    }

    fn create_field(&mut self, table_id: &str, body: Option<&Value>) -> Result<Value, String> {
        let body = body.ok_or("field create without body")?;
        let name = body
            .get("field_name")
            .and_then(|v| v.as_str())
            .ok_or("field create without field_name")?
            .to_string();
        let field_type = body
            .get("type")
            .and_then(|v| v.as_i64())
            .ok_or("field create without type")?;

        if self.rejected_field_creates.contains(&name) {
            return Ok(json!({"code": 1254001, "msg": "FieldCreateRejected"}));
        }

        let Some(index) = self.table_position(table_id) else {
            return Ok(Self::not_exist());
        };

        self.next_field += 1;
        let field = FakeField {
            id: format!("fld{}", self.next_field),
            name,
            field_type,
            is_primary: false,
            property: body.get("property").cloned(),
        };
        let response = json!({"code": 0, "data": {"field": Self::field_json(&field)}});
        self.tables[index].fields.push(field);
        Ok(response)
    }

    fn update_field(
        &mut self,
        table_id: &str,
        field_id: &str,
        body: Option<&Value>,
    ) -> Result<Value, String> {
        let body = body.ok_or("field update without body")?;
        let Some(index) = self.table_position(table_id) else {
            return Ok(Self::not_exist());
        };
        let Some(field) = self.tables[index]
            .fields
            .iter_mut()
            .find(|f| f.id == field_id)
        else {
            return Ok(Self::not_exist());
        };

        if self.rejected_field_updates.contains(&field.name) {
            return Err(format!(
                "Bitable API error (400 Bad Request): field {} cannot change type",
                field.name
            ));
        }

        if let Some(name) = body.get("field_name").and_then(|v| v.as_str()) {
            field.name = name.to_string();
        }
        if let Some(field_type) = body.get("type").and_then(|v| v.as_i64()) {
            field.field_type = field_type;
        }
        if let Some(property) = body.get("property") {
            field.property = Some(property.clone());
        }
        Ok(Self::ok())
    }

    fn delete_field(&mut self, table_id: &str, field_id: &str) -> Value {
        let Some(index) = self.table_position(table_id) else {
            return Self::not_exist();
        };
        let fields = &mut self.tables[index].fields;
        match fields.iter().position(|f| f.id == field_id) {
            Some(position) => {
                fields.remove(position);
                json!({"code": 0, "data": {"deleted": true}})
            }
            None => Self::not_exist(),
        }
    }

    fn create_record(&mut self, table_id: &str, body: Option<&Value>) -> Result<Value, String> {
        let body = body.ok_or("record create without body")?;
        let fields = body
            .get("fields")
            .cloned()
            .ok_or("record create without fields")?;

        let Some(index) = self.table_position(table_id) else {
            return Ok(Self::not_exist());
        };

        self.next_record += 1;
        let record = FakeRecord {
            id: format!("rec{}", self.next_record),
            fields,
        };
        let response = json!({
            "code": 0,
            "data": {"record": {"record_id": record.id, "fields": record.fields}}
        });
        self.tables[index].records.push(record);
        Ok(response)
    }

    fn list_records_page(&self, table_id: &str, query: &str) -> Value {
        let Some(index) = self.table_position(table_id) else {
            return Self::not_exist();
        };
        let items = self.tables[index]
            .records
            .iter()
            .map(|r| json!({"record_id": r.id, "fields": r.fields}))
            .collect();
        self.paged(items, query)
    }

    fn update_record(&mut self, table_id: &str, record_id: &str, body: Option<&Value>) -> Value {
        let Some(fields) = body.and_then(|b| b.get("fields")).and_then(|f| f.as_object()) else {
            return Self::not_exist();
        };
        let Some(index) = self.table_position(table_id) else {
            return Self::not_exist();
        };
        let Some(record) = self.tables[index]
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
        else {
            return Self::not_exist();
        };

        let Some(existing) = record.fields.as_object_mut() else {
            return Self::not_exist();
        };
        for (key, value) in fields {
            existing.insert(key.clone(), value.clone());
        }
        Self::ok()
    }
}

impl HttpTransport for FakeBitable {
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        _token: Option<&str>,
    ) -> Result<Value, String> {
        let mut state = self.state.lock().unwrap();

        let rest = url
            .strip_prefix(API_BASE)
            .ok_or_else(|| format!("Unexpected url: {url}"))?;
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };
        state.calls.push(Call {
            method: method.to_string(),
            path: path.to_string(),
        });

        if path == "/open-apis/auth/v3/tenant_access_token/internal" {
            return Ok(state.token_response.clone().unwrap_or_else(|| {
                json!({"code": 0, "tenant_access_token": TENANT_TOKEN, "expire": 7200})
            }));
        }

        let prefix = format!("/open-apis/bitable/v1/apps/{APP_TOKEN}");
        let Some(resource) = path.strip_prefix(prefix.as_str()) else {
            return Err(format!("Bitable API error (404 Not Found): {path}"));
        };
        let segments: Vec<&str> = resource.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["tables"] if method == Method::GET => Ok(state.list_tables_page(query)),
            ["tables", table_id] if method == Method::DELETE => Ok(state.delete_table(table_id)),
            ["tables", table_id, "fields"] if method == Method::GET => {
                Ok(state.list_fields_page(table_id, query))
            }
            ["tables", table_id, "fields"] if method == Method::POST => {
                state.create_field(table_id, body)
            }
            ["tables", table_id, "fields", field_id] if method == Method::PATCH => {
                state.update_field(table_id, field_id, body)
            }
            ["tables", table_id, "fields", field_id] if method == Method::DELETE => {
                Ok(state.delete_field(table_id, field_id))
            }
            ["tables", table_id, "records"] if method == Method::POST => {
                state.create_record(table_id, body)
            }
            ["tables", table_id, "records"] if method == Method::GET => {
                Ok(state.list_records_page(table_id, query))
            }
            ["tables", table_id, "records", record_id] if method == Method::PUT => {
                Ok(state.update_record(table_id, record_id, body))
            }
            _ => Err(format!("Bitable API error (404 Not Found): {method} {path}")),
        }
    }
}

/// Client wired to the fake, skipping the token exchange.
pub fn client_for(
    fake: &FakeBitable,
) -> feishu_bitable_admin::bitable::serviceclient::BaseClient<&FakeBitable> {
    feishu_bitable_admin::bitable::serviceclient::BaseClient::new(
        fake,
        API_BASE,
        APP_TOKEN,
        TENANT_TOKEN,
        feishu_bitable_admin::LogLevel::Information,
    )
}

/// Connection settings pointing at the fake.
pub fn fake_config() -> feishu_bitable_admin::config::Config {
    feishu_bitable_admin::config::Config::new(API_BASE, "cli_fake", "s3cret", APP_TOKEN)
}
