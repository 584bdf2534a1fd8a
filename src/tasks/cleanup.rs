use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{OKRPLAN_TABLE, base_table_index, table_field_index};

/// Planning fields retired after the schedule moved to Plan_Start/Plan_End.
pub fn retired_planning_fields() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Actions", vec!["Plan_Date", "Plan_Hours", "Plan_Week", "Plan"]),
        ("FocusBlocks", vec!["Plan"]),
    ]
}

/// The OKRPlan working set, for tearing the flattened table back down.
pub fn okrplan_working_set_names() -> Vec<&'static str> {
    vec![
        "Objective_Title",
        "KR_Title",
        "KR_Type",
        "KR_Target",
        "KR_Progress",
        "KR_Confidence",
        "KR_Due_Date",
        "KR_Risk",
        "Action_Title",
        "Action_Status",
        "Action_Est_Minutes",
        "Action_Due",
        "Action_Plan_Start",
        "Action_Plan_End",
        "Action_Guardrail_Flag",
        "Action_Risk_Tags",
        "Action_Drift_Flag",
    ]
}

/// Tables superseded by the OKRPlan flattening.
pub fn retired_tables() -> Vec<&'static str> {
    vec!["Plan", "WeeklyPlan", "TimeLog"]
}

async fn delete_fields_on_table<T: HttpTransport>(
    client: &BaseClient<T>,
    table_name: &str,
    table_id: &str,
    field_names: &[&str],
) -> Result<(), String> {
    let fields = table_field_index(client, table_id).await?;

    for field_name in field_names {
        let Some(meta) = fields.get(*field_name) else {
            println!("Field not found: {table_name}.{field_name}");
            continue;
        };
        println!(
            "Deleting field: {}.{} ({})",
            table_name, field_name, meta.field_id
        );
        if let Err(err) = client.delete_field(table_id, &meta.field_id).await {
            println!("Failed to delete field {}: {}", meta.field_id, err);
        }
    }

    Ok(())
}

/// Delete the named fields; missing tables and fields are skipped.
pub async fn delete_fields<T: HttpTransport>(
    client: &BaseClient<T>,
    sets: &[(&str, Vec<&str>)],
) -> Result<(), String> {
    let tables = base_table_index(client).await?;

    for (table_name, field_names) in sets {
        let Some(table_id) = tables.get(*table_name) else {
            println!("Table not found: {table_name}");
            continue;
        };
        delete_fields_on_table(client, table_name, table_id, field_names).await?;
    }

    println!("Field cleanup done.");
    Ok(())
}

/// Delete the OKRPlan working set; the table is a hard prerequisite.
pub async fn delete_okrplan_fields<T: HttpTransport>(client: &BaseClient<T>) -> Result<(), String> {
    let tables = base_table_index(client).await?;
    let table_id = tables
        .get(OKRPLAN_TABLE)
        .ok_or_else(|| format!("{OKRPLAN_TABLE} table not found"))?;

    delete_fields_on_table(client, OKRPLAN_TABLE, table_id, &okrplan_working_set_names()).await?;
    println!("OKRPlan cleanup done.");
    Ok(())
}

/// Delete the named tables in sorted order; missing tables are skipped.
pub async fn delete_tables<T: HttpTransport>(
    client: &BaseClient<T>,
    names: &[&str],
) -> Result<(), String> {
    let tables = base_table_index(client).await?;

    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_unstable();

    for name in sorted {
        let Some(table_id) = tables.get(name) else {
            println!("Table not found: {name}");
            continue;
        };
        println!("Deleting table: {} ({})", name, table_id);
        if let Err(err) = client.delete_table(table_id).await {
            println!("Failed to delete table {}: {}", table_id, err);
        }
    }

    println!("Cleanup done.");
    Ok(())
}
