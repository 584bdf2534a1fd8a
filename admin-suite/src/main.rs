use feishu_bitable_admin::LogLevel;
use feishu_bitable_admin::bitable::serviceclient::BaseClient;
use feishu_bitable_admin::config::Config;
use feishu_bitable_admin::http::ReqwestTransport;
use feishu_bitable_admin::tasks;

const TASKS: [(&str, &str); 12] = [
    ("ensure-okrplan-fields", "create the missing OKRPlan working-set fields"),
    ("add-planning-fields", "create the KeyResults/Actions planning date fields"),
    ("add-okrplan-score-field", "install the Score progress formula"),
    ("convert-plan-week-to-formula", "install the Plan_Week label formula"),
    ("normalize-field-types", "patch field types to the desired codes"),
    ("rewire-links-to-okrplan", "point link fields at the OKRPlan table"),
    ("cleanup-fields", "delete retired planning fields"),
    ("cleanup-okrplan-fields", "delete the OKRPlan working-set fields"),
    ("cleanup-tables", "delete retired tables"),
    ("seed-mock-data", "create linked sample records"),
    ("seed-plan-dates", "backfill due dates and plan dates on seeded records"),
    ("seed-usage-guide", "create the usage-guide step records"),
];

fn print_usage() {
    println!("Usage: bitable-admin <task>");
    println!();
    println!("Tasks:");
    for (name, summary) in TASKS {
        println!("  {name:<30} {summary}");
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let Some(task) = args.next() else {
        print_usage();
        return Err("No task given".to_string());
    };

    if !TASKS.iter().any(|(name, _)| *name == task) {
        print_usage();
        return Err(format!("Unknown task: {task}"));
    }

    let config = Config::from_env()?;
    let client =
        BaseClient::connect(ReqwestTransport::new(), &config, LogLevel::Information).await?;

    match task.as_str() {
        "ensure-okrplan-fields" => tasks::ensure_fields::ensure_okrplan_fields(&client).await?,
        "add-planning-fields" => tasks::ensure_fields::ensure_planning_fields(&client).await?,
        "add-okrplan-score-field" => {
            tasks::score_field::add_okrplan_score_field(&client).await?;
        }
        "convert-plan-week-to-formula" => {
            tasks::week_formula::convert_plan_week_to_formula(&client).await?;
        }
        "normalize-field-types" => tasks::normalize_types::normalize_field_types(&client).await?,
        "rewire-links-to-okrplan" => tasks::rewire_links::rewire_links_to_okrplan(&client).await?,
        "cleanup-fields" => {
            tasks::cleanup::delete_fields(&client, &tasks::cleanup::retired_planning_fields())
                .await?
        }
        "cleanup-okrplan-fields" => tasks::cleanup::delete_okrplan_fields(&client).await?,
        "cleanup-tables" => {
            tasks::cleanup::delete_tables(&client, &tasks::cleanup::retired_tables()).await?
        }
        "seed-mock-data" => {
            tasks::seed_mock_data::seed_mock_data(&client).await?;
        }
        "seed-plan-dates" => tasks::seed_plan_dates::seed_plan_dates(&client).await?,
        "seed-usage-guide" => tasks::seed_usage_guide::seed_usage_guide(&client).await?,
        _ => {}
    }

    Ok(())
}
