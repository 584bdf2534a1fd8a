//! One-shot administrative workflows. Every task follows the same shape:
//! resolve names to identifiers, mutate idempotently, print one line per
//! action taken, skipped or failed. Batch tasks are best-effort and a rerun
//! completes whatever an interrupted run left behind.

/// Delete retired fields and tables.
pub mod cleanup;
/// Ensure field sets exist on their tables.
pub mod ensure_fields;
/// Patch field types to the desired codes.
pub mod normalize_types;
/// Point link fields at the OKRPlan table.
pub mod rewire_links;
/// Install the progress-score formula field.
pub mod score_field;
/// Seed linked sample records.
pub mod seed_mock_data;
/// Backfill due dates and plan dates on seeded records.
pub mod seed_plan_dates;
/// Seed the usage-guide step records.
pub mod seed_usage_guide;
/// Install the week-label formula field.
pub mod week_formula;

use std::collections::HashMap;

use crate::bitable::field::{FieldConfig, FieldMeta};
use crate::bitable::schema;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;

pub(crate) const OKRPLAN_TABLE: &str = "OKRPlan";

/// Outcome of an idempotent formula-field installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaFieldOutcome {
    /// The formula field was created on this run.
    Created,
    /// A formula field of that name already exists; nothing to do.
    AlreadyInstalled,
    /// A differently-typed field holds the name; left for a human.
    ManualFixRequired,
    /// The service rejected the create; the expression was printed for
    /// manual installation.
    CreateFailed,
}

pub(crate) async fn base_table_index<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<HashMap<String, String>, String> {
    let tables = client.list_tables().await?;
    schema::table_index(&tables)
}

pub(crate) async fn table_field_index<T: HttpTransport>(
    client: &BaseClient<T>,
    table_id: &str,
) -> Result<HashMap<String, FieldMeta>, String> {
    let fields = client.list_fields(table_id).await?;
    schema::field_index(&fields)
}

/// Create each missing field of `desired` on the table.
///
/// A field already present with the desired type is left alone. A field
/// present with a different type is never overwritten; the task prints a
/// manual-intervention instruction and moves on. Create failures abandon
/// that field only.
pub(crate) async fn ensure_fields_on_table<T: HttpTransport>(
    client: &BaseClient<T>,
    table_name: &str,
    table_id: &str,
    desired: &[FieldConfig],
) -> Result<(), String> {
    let existing = table_field_index(client, table_id).await?;

    for config in desired {
        match existing.get(&config.field_name) {
            Some(meta) if meta.field_type == config.field_type => continue,
            Some(meta) => {
                println!(
                    "{}.{} exists with type {} (wanted {}). Please delete it in the table UI first, then rerun this task.",
                    table_name, config.field_name, meta.field_type, config.field_type
                );
            }
            None => {
                println!("Creating {}.{}", table_name, config.field_name);
                if let Err(err) = client.create_field(table_id, config).await {
                    println!("Failed to create field {}: {}", config.field_name, err);
                }
            }
        }
    }

    Ok(())
}
