use std::collections::HashMap;

use crate::bitable::field::FieldMeta;
use crate::bitable::table::TableMeta;

/// Build a table-name → table-id map.
///
/// Names are the keys every task resolves through even though identifiers
/// are the true primary keys; the service does not guarantee uniqueness,
/// so a duplicate is a hard error rather than a silent first-match win.
pub fn table_index(tables: &[TableMeta]) -> Result<HashMap<String, String>, String> {
    let mut index = HashMap::new();
    for table in tables {
        if index
            .insert(table.name.clone(), table.table_id.clone())
            .is_some()
        {
            return Err(format!("Duplicate table name: {}", table.name));
        }
    }
    Ok(index)
}

/// Build a field-name → metadata map; duplicate names are a hard error.
pub fn field_index(fields: &[FieldMeta]) -> Result<HashMap<String, FieldMeta>, String> {
    let mut index = HashMap::new();
    for field in fields {
        if index
            .insert(field.field_name.clone(), field.clone())
            .is_some()
        {
            return Err(format!("Duplicate field name: {}", field.field_name));
        }
    }
    Ok(index)
}

/// Name of the table's primary field, when the listing marks one.
pub fn primary_field_name(fields: &[FieldMeta]) -> Option<String> {
    fields
        .iter()
        .find(|field| field.is_primary)
        .map(|field| field.field_name.clone())
}

/// Per-field option-name → option-id maps for single-select fields.
pub fn select_options(fields: &[FieldMeta]) -> HashMap<String, HashMap<String, String>> {
    let mut map = HashMap::new();
    for field in fields {
        let Some(options) = field.property.as_ref().and_then(|p| p.options.as_ref()) else {
            continue;
        };
        if options.is_empty() {
            continue;
        }
        let by_name = options
            .iter()
            .map(|opt| (opt.name.clone(), opt.id.clone().unwrap_or_default()))
            .collect();
        map.insert(field.field_name.clone(), by_name);
    }
    map
}
