use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field values keyed by field name, shaped according to each field's type.
pub type RecordFields = HashMap<String, Value>;

/// Bitable record as returned by the record listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Opaque record identifier, scoped to its table.
    pub record_id: String,
    /// Field values keyed by field name.
    #[serde(default)]
    pub fields: RecordFields,
}
