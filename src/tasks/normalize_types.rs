use crate::bitable::field::{FieldConfig, field_type};
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{base_table_index, table_field_index};

/// Desired type codes for fields the template originally created as text.
pub fn desired_type_sets() -> Vec<(&'static str, Vec<(&'static str, i64)>)> {
    vec![
        ("Objectives", vec![("Owner", field_type::PERSON)]),
        (
            "KeyResults",
            vec![
                ("Progress", field_type::PROGRESS),
                ("Confidence", field_type::RATING),
            ],
        ),
        ("Evidence", vec![("Link", field_type::URL)]),
        ("UsageGuide", vec![("Link", field_type::URL)]),
    ]
}

/// Patch fields whose type differs from the desired code.
///
/// Matching fields are untouched; transitions the service rejects are
/// reported and skipped, the rest of the batch proceeds.
pub async fn normalize_field_types<T: HttpTransport>(client: &BaseClient<T>) -> Result<(), String> {
    let tables = base_table_index(client).await?;

    for (table_name, desired) in desired_type_sets() {
        let Some(table_id) = tables.get(table_name) else {
            println!("Table not found: {table_name}");
            continue;
        };
        let existing = table_field_index(client, table_id).await?;

        for (field_name, desired_type) in desired {
            let Some(meta) = existing.get(field_name) else {
                println!("- Field missing: {table_name}.{field_name}");
                continue;
            };
            if meta.field_type == desired_type {
                continue;
            }
            println!(
                "Updating {}.{}: {} -> {}",
                table_name, field_name, meta.field_type, desired_type
            );
            let config = FieldConfig::new(field_name, desired_type);
            if let Err(err) = client.update_field(table_id, &meta.field_id, &config).await {
                println!("- Update not supported for {field_name}: {err}");
            }
        }
    }

    println!("Field type normalization done.");
    Ok(())
}
