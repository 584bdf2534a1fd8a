use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bitable table metadata as returned by the table listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    /// Opaque table identifier.
    pub table_id: String,
    /// Human-readable table name; treated as a unique key by the tasks.
    pub name: String,
    /// Additional fields returned by the API.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
