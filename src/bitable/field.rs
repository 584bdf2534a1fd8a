use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field type codes as defined by the Bitable API.
pub mod field_type {
    pub const TEXT: i64 = 1;
    pub const NUMBER: i64 = 2;
    pub const SINGLE_SELECT: i64 = 3;
    pub const DATE: i64 = 5;
    pub const CHECKBOX: i64 = 7;
    pub const PERSON: i64 = 11;
    pub const URL: i64 = 15;
    pub const LINK: i64 = 18;
    pub const FORMULA: i64 = 20;
    pub const PROGRESS: i64 = 99002;
    pub const RATING: i64 = 99004;
}

/// One option of a single-select field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SelectOption {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: None,
        }
    }
}

/// Type-specific property bag attached to a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldProperty {
    /// Options of a single-select field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Expression text of a formula field, submitted verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_expression: Option<String>,
    /// Target table of a link field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Whether a link field accepts multiple records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    /// Additional property keys returned by the API.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Field metadata as returned by the field listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Opaque field identifier, scoped to its table.
    pub field_id: String,
    /// Human-readable field name; treated as a unique key by the tasks.
    pub field_name: String,
    /// Field type code.
    #[serde(rename = "type")]
    pub field_type: i64,
    /// True for the table's primary field.
    #[serde(default)]
    pub is_primary: bool,
    /// Type-specific property bag.
    #[serde(default)]
    pub property: Option<FieldProperty>,
    /// Additional fields returned by the API.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Payload for creating or patching a field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldConfig {
    pub field_name: String,
    #[serde(rename = "type")]
    pub field_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<FieldProperty>,
}

impl FieldConfig {
    pub fn new(field_name: &str, field_type: i64) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type,
            property: None,
        }
    }

    pub fn single_select(field_name: &str, option_names: &[&str]) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type::SINGLE_SELECT,
            property: Some(FieldProperty {
                options: Some(option_names.iter().map(|n| SelectOption::named(n)).collect()),
                ..FieldProperty::default()
            }),
        }
    }

    pub fn formula(field_name: &str, expression: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type::FORMULA,
            property: Some(FieldProperty {
                formula_expression: Some(expression.to_string()),
                ..FieldProperty::default()
            }),
        }
    }

    pub fn link(field_name: &str, target_table_id: &str, multiple: bool) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type::LINK,
            property: Some(FieldProperty {
                table_id: Some(target_table_id.to_string()),
                multiple: Some(multiple),
                ..FieldProperty::default()
            }),
        }
    }
}
