use crate::bitable::field::{FieldConfig, field_type};
use crate::bitable::formula;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::{FormulaFieldOutcome, OKRPLAN_TABLE, base_table_index, table_field_index};

const SCORE_FIELD: &str = "Score";
const PLAN_START_FIELD: &str = "预期开始";
const PLAN_END_FIELD: &str = "预期结束";
const PROGRESS_FIELD: &str = "Action Progress";

/// Install the `Score` progress formula on the OKRPlan table.
///
/// An existing formula field is left alone; an existing field of any other
/// type is left for a human to delete first.
pub async fn add_okrplan_score_field<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<FormulaFieldOutcome, String> {
    let tables = base_table_index(client).await?;
    let table_id = tables
        .get(OKRPLAN_TABLE)
        .ok_or_else(|| format!("{OKRPLAN_TABLE} table not found"))?;

    let existing = table_field_index(client, table_id).await?;

    if let Some(score) = existing.get(SCORE_FIELD) {
        if score.field_type == field_type::FORMULA {
            println!("Score formula field already exists.");
            return Ok(FormulaFieldOutcome::AlreadyInstalled);
        }
        println!(
            "Score field exists but is not formula. Please delete it in the table UI first, then rerun this task."
        );
        return Ok(FormulaFieldOutcome::ManualFixRequired);
    }

    let (plan_start, plan_end, progress) = match (
        existing.get(PLAN_START_FIELD),
        existing.get(PLAN_END_FIELD),
        existing.get(PROGRESS_FIELD),
    ) {
        (Some(start), Some(end), Some(progress)) => (start, end, progress),
        _ => {
            return Err(format!(
                "Missing required fields: {PLAN_START_FIELD}/{PLAN_END_FIELD}/{PROGRESS_FIELD}"
            ));
        }
    };

    let expression = formula::progress_score_expression(
        table_id,
        &plan_start.field_id,
        &plan_end.field_id,
        &progress.field_id,
    );
    let config = FieldConfig::formula(SCORE_FIELD, &expression);

    match client.create_field(table_id, &config).await {
        Ok(()) => {
            println!("Score formula field created.");
            Ok(FormulaFieldOutcome::Created)
        }
        Err(err) => {
            println!("Failed to create Score formula field: {err}");
            println!("Please create it manually with formula_expression:");
            println!("{expression}");
            Ok(FormulaFieldOutcome::CreateFailed)
        }
    }
}
