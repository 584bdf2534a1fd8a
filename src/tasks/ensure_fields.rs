use crate::bitable::field::{FieldConfig, field_type};
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{OKRPLAN_TABLE, base_table_index, ensure_fields_on_table};

/// Working-set fields kept on the flattened OKRPlan table.
pub fn okrplan_field_set() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("Objective_Title", field_type::TEXT),
        FieldConfig::new("KR_Title", field_type::TEXT),
        FieldConfig::single_select("KR_Type", &["Metric", "Milestone", "Deliverable"]),
        FieldConfig::new("KR_Target", field_type::TEXT),
        FieldConfig::new("KR_Progress", field_type::NUMBER),
        FieldConfig::new("KR_Confidence", field_type::NUMBER),
        FieldConfig::new("KR_Due_Date", field_type::DATE),
        FieldConfig::single_select("KR_Risk", &["Green", "Yellow", "Red"]),
        FieldConfig::new("Action_Title", field_type::TEXT),
        FieldConfig::single_select(
            "Action_Status",
            &["Backlog", "Today", "Doing", "Done", "Blocked"],
        ),
        FieldConfig::new("Action_Est_Minutes", field_type::NUMBER),
        FieldConfig::new("Action_Due", field_type::DATE),
        FieldConfig::new("Action_Plan_Start", field_type::DATE),
        FieldConfig::new("Action_Plan_End", field_type::DATE),
        FieldConfig::new("Action_Guardrail_Flag", field_type::CHECKBOX),
        FieldConfig::new("Action_Risk_Tags", field_type::TEXT),
        FieldConfig::new("Action_Drift_Flag", field_type::CHECKBOX),
    ]
}

/// Schedule-planning date fields on the relational tables.
pub fn planning_field_sets() -> Vec<(&'static str, Vec<FieldConfig>)> {
    vec![
        (
            "KeyResults",
            vec![FieldConfig::new("Due_Date", field_type::DATE)],
        ),
        (
            "Actions",
            vec![
                FieldConfig::new("Plan_Start", field_type::DATE),
                FieldConfig::new("Plan_End", field_type::DATE),
            ],
        ),
    ]
}

/// Ensure the OKRPlan working set. The table itself is a hard prerequisite.
pub async fn ensure_okrplan_fields<T: HttpTransport>(client: &BaseClient<T>) -> Result<(), String> {
    let tables = base_table_index(client).await?;
    let table_id = tables
        .get(OKRPLAN_TABLE)
        .ok_or_else(|| format!("{OKRPLAN_TABLE} table not found"))?;

    ensure_fields_on_table(client, OKRPLAN_TABLE, table_id, &okrplan_field_set()).await?;
    println!("OKRPlan fields ensured.");
    Ok(())
}

/// Ensure the planning date fields; missing tables are skipped with a note.
pub async fn ensure_planning_fields<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<(), String> {
    let tables = base_table_index(client).await?;

    for (table_name, fields) in planning_field_sets() {
        let Some(table_id) = tables.get(table_name) else {
            println!("Table not found: {table_name}");
            continue;
        };
        ensure_fields_on_table(client, table_name, table_id, &fields).await?;
    }

    println!("Planning fields ensured.");
    Ok(())
}
