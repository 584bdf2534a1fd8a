use chrono::NaiveDate;
use serde_json::json;

use crate::bitable::record::RecordFields;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::base_table_index;

const KR_DUE_DATE: &str = "2026-01-31";

/// Plan date and daily-hours budget per seeded action title.
fn action_plan_map() -> Vec<(&'static str, &'static str, i64)> {
    vec![
        ("补充对照实验统计，产出价值验证结论", "2026-01-05", 4),
        ("汇总消费价值结论，沉淀 1 页结论 memo", "2026-01-16", 4),
        ("做漏斗分阶段转化对比分析", "2026-01-12", 4),
        ("梳理提效空间与算法策略建议", "2026-01-22", 4),
        ("验证搜索对供给撬动的边界条件", "2026-01-19", 4),
        ("形成冷启动链路方案初稿", "2026-01-29", 4),
    ]
}

/// UTC midnight of a `YYYY-MM-DD` date as epoch milliseconds.
pub(crate) fn date_to_ms(date: &str) -> Result<i64, String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {date}: {e}"))?;
    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("Invalid date {date}"))?;
    Ok(midnight.and_utc().timestamp_millis())
}

/// Backfill `Due_Date` on the seeded key results and `Plan_Date`/`Plan_Hours`
/// on the seeded actions, matched by title. Unmatched records are untouched.
pub async fn seed_plan_dates<T: HttpTransport>(client: &BaseClient<T>) -> Result<(), String> {
    let tables = base_table_index(client).await?;

    let kr_table = tables
        .get("KeyResults")
        .ok_or_else(|| "KeyResults table not found".to_string())?;

    let kr_due = date_to_ms(KR_DUE_DATE)?;
    for record in client.list_records(kr_table).await? {
        if !record.fields.contains_key("KR_Title") {
            continue;
        }
        let mut fields = RecordFields::new();
        fields.insert("Due_Date".to_string(), json!(kr_due));
        if let Err(err) = client.update_record(kr_table, &record.record_id, &fields).await {
            println!("Failed to update record {}: {}", record.record_id, err);
        }
    }

    let action_table = tables
        .get("Actions")
        .ok_or_else(|| "Actions table not found".to_string())?;

    let plan_map = action_plan_map();
    for record in client.list_records(action_table).await? {
        let Some(title) = record.fields.get("Action_Title").and_then(|v| v.as_str()) else {
            continue;
        };
        let Some((_, date, hours)) = plan_map.iter().find(|(t, _, _)| *t == title) else {
            continue;
        };
        let mut fields = RecordFields::new();
        fields.insert("Plan_Date".to_string(), json!(date_to_ms(date)?));
        fields.insert("Plan_Hours".to_string(), json!(hours));
        if let Err(err) = client
            .update_record(action_table, &record.record_id, &fields)
            .await
        {
            println!("Failed to update record {}: {}", record.record_id, err);
        }
    }

    println!("Plan dates seeded.");
    Ok(())
}
