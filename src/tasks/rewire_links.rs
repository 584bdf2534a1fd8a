use crate::bitable::field::{FieldConfig, FieldMeta, field_type};
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{OKRPLAN_TABLE, base_table_index, table_field_index};

/// Link fields that must point at the OKRPlan table.
pub fn link_rewire_sets() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Evidence", vec!["KeyResult", "Action"]),
        ("Ideas", vec!["KeyResults"]),
        ("FocusBlocks", vec!["Action", "KR"]),
    ]
}

fn is_single_link_to(meta: &FieldMeta, target_table_id: &str) -> bool {
    if meta.field_type != field_type::LINK {
        return false;
    }
    let Some(property) = meta.property.as_ref() else {
        return false;
    };
    property.table_id.as_deref() == Some(target_table_id) && !property.multiple.unwrap_or(false)
}

/// Repoint link fields at OKRPlan.
///
/// A field already linking there is left alone; anything else under the
/// name is deleted and recreated as a single link. The target table is a
/// hard prerequisite, source tables are skipped when absent.
pub async fn rewire_links_to_okrplan<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<(), String> {
    let tables = base_table_index(client).await?;
    let target_id = tables
        .get(OKRPLAN_TABLE)
        .ok_or_else(|| format!("Target table not found: {OKRPLAN_TABLE}"))?;

    for (table_name, field_names) in link_rewire_sets() {
        let Some(table_id) = tables.get(table_name) else {
            println!("Table not found: {table_name}");
            continue;
        };
        let fields = table_field_index(client, table_id).await?;

        for field_name in field_names {
            if let Some(meta) = fields.get(field_name) {
                if is_single_link_to(meta, target_id) {
                    println!("{table_name}.{field_name} already links to {OKRPLAN_TABLE}");
                    continue;
                }
                println!("Deleting {}.{} ({})", table_name, field_name, meta.field_id);
                if let Err(err) = client.delete_field(table_id, &meta.field_id).await {
                    println!("Failed to delete field {}: {}", meta.field_id, err);
                }
            }
            println!("Creating {table_name}.{field_name} -> {OKRPLAN_TABLE}");
            let config = FieldConfig::link(field_name, target_id, false);
            if let Err(err) = client.create_field(table_id, &config).await {
                println!("Failed to create link field {field_name}: {err}");
            }
        }
    }

    println!("Link rewiring done.");
    Ok(())
}
