use serde::de::DeserializeOwned;
use serde_json::Value;

/// One page of a paginated listing.
#[derive(Debug)]
pub(crate) struct ListPage<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub page_token: Option<String>,
}

/// Reject envelopes whose `code` is present and non-zero.
pub(crate) fn expect_ok(json: &Value) -> Result<(), String> {
    match json.get("code").and_then(|v| v.as_i64()) {
        None | Some(0) => Ok(()),
        Some(code) => {
            let msg = json.get("msg").and_then(|v| v.as_str()).unwrap_or("");
            Err(format!("Bitable error code {}: {}", code, msg))
        }
    }
}

/// Parse `data.items` plus the continuation marker from a listing envelope.
pub(crate) fn parse_list_page<T: DeserializeOwned>(json: &Value) -> Result<ListPage<T>, String> {
    let data = json
        .get("data")
        .ok_or_else(|| "Invalid response from Bitable".to_string())?;

    let items = match data.get("items") {
        None | Some(Value::Null) => vec![],
        Some(items) => serde_json::from_value(items.clone())
            .map_err(|e| format!("Failed to parse Bitable items: {e}"))?,
    };

    let has_more = match data.get("has_more") {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(value)) => value.eq_ignore_ascii_case("true"),
        _ => false,
    };

    let page_token = data
        .get("page_token")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(ListPage {
        items,
        has_more,
        page_token,
    })
}

/// Extract `data.record.record_id` from a record-creation envelope.
pub(crate) fn parse_created_record_id(json: &Value) -> Result<String, String> {
    json.get("data")
        .and_then(|data| data.get("record"))
        .and_then(|record| record.get("record_id"))
        .and_then(|id| id.as_str())
        .map(|id| id.to_string())
        .ok_or_else(|| format!("Failed to create record: {json}"))
}
