use crate::bitable::field::{FieldConfig, field_type};
use crate::bitable::formula;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{FormulaFieldOutcome, base_table_index, table_field_index};

const ACTIONS_TABLE: &str = "Actions";
const PLAN_WEEK_FIELD: &str = "Plan_Week";
// Preferred source date first.
const SOURCE_FIELDS: [&str; 3] = ["Plan_End", "Plan_Start", "Plan_Date"];

/// Install the `Plan_Week` week-label formula on the Actions table, derived
/// from the first planning date field present.
pub async fn convert_plan_week_to_formula<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<FormulaFieldOutcome, String> {
    let tables = base_table_index(client).await?;
    let table_id = tables
        .get(ACTIONS_TABLE)
        .ok_or_else(|| format!("{ACTIONS_TABLE} table not found"))?;

    let existing = table_field_index(client, table_id).await?;

    if let Some(plan_week) = existing.get(PLAN_WEEK_FIELD) {
        if plan_week.field_type == field_type::FORMULA {
            println!("Plan_Week already formula.");
            return Ok(FormulaFieldOutcome::AlreadyInstalled);
        }
        println!(
            "Plan_Week exists but is not formula. Please delete it in the table UI first, then rerun this task."
        );
        return Ok(FormulaFieldOutcome::ManualFixRequired);
    }

    let source = SOURCE_FIELDS
        .iter()
        .find_map(|name| existing.get(*name))
        .ok_or_else(|| {
            "Plan_End/Plan_Start/Plan_Date field not found; cannot build Plan_Week formula."
                .to_string()
        })?;

    let expression = formula::week_label_expression(table_id, &source.field_id);
    let config = FieldConfig::formula(PLAN_WEEK_FIELD, &expression);

    match client.create_field(table_id, &config).await {
        Ok(()) => {
            println!("Created Plan_Week formula field.");
            Ok(FormulaFieldOutcome::Created)
        }
        Err(err) => {
            println!("Failed to create Plan_Week formula field: {err}");
            println!("Please create it manually with formula_expression: {expression}");
            Ok(FormulaFieldOutcome::CreateFailed)
        }
    }
}
