use std::collections::HashMap;

use chrono::Utc;
use serde_json::json;

use crate::bitable::record::RecordFields;
use crate::bitable::schema;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::base_table_index;

/// Record identifiers created by one seeding run, in creation order.
#[derive(Debug)]
pub struct MockDataSummary {
    pub objective_id: String,
    pub kr_ids: Vec<String>,
    pub action_ids: Vec<String>,
    pub evidence_ids: Vec<String>,
    pub weekly_plan_id: String,
    pub idea_id: String,
}

struct KrSeed {
    title: &'static str,
    kr_type: &'static str,
    progress: i64,
    confidence: i64,
}

struct ActionSeed {
    kr_index: usize,
    title: &'static str,
    minutes: i64,
}

struct EvidenceSeed {
    kr_index: usize,
    title: &'static str,
    evidence_type: &'static str,
}

fn kr_seeds() -> Vec<KrSeed> {
    vec![
        KrSeed {
            title: "完成优质UGC价值验证结论",
            kr_type: "Milestone",
            progress: 30,
            confidence: 3,
        },
        KrSeed {
            title: "完成漏斗效率分析并明确提效空间",
            kr_type: "Deliverable",
            progress: 20,
            confidence: 3,
        },
        KrSeed {
            title: "验证搜索对优质UGC供给的撬动上限",
            kr_type: "Milestone",
            progress: 10,
            confidence: 2,
        },
    ]
}

fn action_seeds() -> Vec<ActionSeed> {
    vec![
        ActionSeed { kr_index: 0, title: "补充对照实验统计，产出价值验证结论", minutes: 90 },
        ActionSeed { kr_index: 0, title: "汇总消费价值结论，沉淀 1 页结论 memo", minutes: 60 },
        ActionSeed { kr_index: 1, title: "做漏斗分阶段转化对比分析", minutes: 90 },
        ActionSeed { kr_index: 1, title: "梳理提效空间与算法策略建议", minutes: 60 },
        ActionSeed { kr_index: 2, title: "验证搜索对供给撬动的边界条件", minutes: 90 },
        ActionSeed { kr_index: 2, title: "形成冷启动链路方案初稿", minutes: 60 },
    ]
}

fn evidence_seeds() -> Vec<EvidenceSeed> {
    vec![
        EvidenceSeed { kr_index: 0, title: "价值验证实验对照分析", evidence_type: "Experiment" },
        EvidenceSeed { kr_index: 1, title: "漏斗效率分析结果", evidence_type: "Dashboard" },
    ]
}

/// Per-table context needed while building record payloads.
struct TableContext {
    table_id: String,
    primary: Option<String>,
    options: HashMap<String, HashMap<String, String>>,
}

async fn table_context<T: HttpTransport>(
    client: &BaseClient<T>,
    tables: &HashMap<String, String>,
    name: &str,
) -> Result<TableContext, String> {
    let table_id = tables
        .get(name)
        .ok_or_else(|| format!("{name} table not found"))?;
    let fields = client.list_fields(table_id).await?;

    Ok(TableContext {
        table_id: table_id.clone(),
        primary: schema::primary_field_name(&fields),
        options: schema::select_options(&fields),
    })
}

/// Set a select value only when the option actually exists on the field.
fn set_select(context: &TableContext, payload: &mut RecordFields, field_name: &str, option: &str) {
    if context
        .options
        .get(field_name)
        .is_some_and(|options| options.contains_key(option))
    {
        payload.insert(field_name.to_string(), json!(option));
    }
}

fn set_primary(context: &TableContext, payload: &mut RecordFields, title: &str) {
    if let Some(primary) = &context.primary {
        payload.insert(primary.clone(), json!(title));
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seed one objective, its key results, actions, evidence, a weekly plan
/// and a parked idea, wiring the link fields from the record identifiers
/// returned by the prior creates.
///
/// This is a one-shot bootstrap: there is no idempotency check and
/// reseeding creates duplicates. Any create failure is fatal.
pub async fn seed_mock_data<T: HttpTransport>(
    client: &BaseClient<T>,
) -> Result<MockDataSummary, String> {
    let tables = base_table_index(client).await?;

    let objectives = table_context(client, &tables, "Objectives").await?;
    let key_results = table_context(client, &tables, "KeyResults").await?;
    let actions = table_context(client, &tables, "Actions").await?;
    let evidence = table_context(client, &tables, "Evidence").await?;
    let weekly = table_context(client, &tables, "WeeklyPlan").await?;
    let ideas = table_context(client, &tables, "Ideas").await?;

    let objective_title = "O1 - 优质UGC搜索价值验证";
    let mut payload = RecordFields::new();
    set_primary(&objectives, &mut payload, objective_title);
    payload.insert("O_Title".to_string(), json!(objective_title));
    payload.insert("Cycle".to_string(), json!("2025 Q1"));
    let objective_id = client.create_record(&objectives.table_id, &payload).await?;

    let mut kr_ids = vec![];
    for kr in kr_seeds() {
        let mut payload = RecordFields::new();
        set_primary(&key_results, &mut payload, kr.title);
        payload.insert("KR_Title".to_string(), json!(kr.title));
        payload.insert("Target".to_string(), json!(""));
        payload.insert("Progress".to_string(), json!(kr.progress));
        set_select(&key_results, &mut payload, "KR_Type", kr.kr_type);
        payload.insert("Confidence".to_string(), json!(kr.confidence));
        payload.insert("Objective".to_string(), json!([objective_id]));
        kr_ids.push(client.create_record(&key_results.table_id, &payload).await?);
    }

    let mut action_ids = vec![];
    for action in action_seeds() {
        let mut payload = RecordFields::new();
        set_primary(&actions, &mut payload, action.title);
        payload.insert("Action_Title".to_string(), json!(action.title));
        payload.insert("Est_Minutes".to_string(), json!(action.minutes));
        payload.insert("Due".to_string(), json!(now_ms()));
        set_select(&actions, &mut payload, "Status", "Backlog");
        payload.insert("KeyResult".to_string(), json!([kr_ids[action.kr_index]]));
        action_ids.push(client.create_record(&actions.table_id, &payload).await?);
    }

    let mut evidence_ids = vec![];
    for item in evidence_seeds() {
        let mut payload = RecordFields::new();
        set_primary(&evidence, &mut payload, item.title);
        payload.insert("Evidence_Title".to_string(), json!(item.title));
        payload.insert("Link".to_string(), json!("https://example.com"));
        payload.insert("Date".to_string(), json!(now_ms()));
        set_select(&evidence, &mut payload, "Evidence_Type", item.evidence_type);
        payload.insert("KeyResult".to_string(), json!([kr_ids[item.kr_index]]));
        payload.insert(
            "Action".to_string(),
            json!([action_ids[item.kr_index * 2]]),
        );
        evidence_ids.push(client.create_record(&evidence.table_id, &payload).await?);
    }

    let weekly_title = "本周重点交付";
    let mut payload = RecordFields::new();
    set_primary(&weekly, &mut payload, weekly_title);
    payload.insert("Week_Start".to_string(), json!(now_ms()));
    payload.insert(
        "Deliverable".to_string(),
        json!("完成价值验证结论 + 漏斗分析初稿"),
    );
    payload.insert("Risk".to_string(), json!("实验样本不足影响结论稳定性"));
    payload.insert("Time_Budget_Min".to_string(), json!(600));
    payload.insert("KeyResults".to_string(), json!(kr_ids));
    let weekly_plan_id = client.create_record(&weekly.table_id, &payload).await?;

    let idea_title = "探索优质UGC冷启动激励机制";
    let mut payload = RecordFields::new();
    set_primary(&ideas, &mut payload, idea_title);
    payload.insert("Idea_Title".to_string(), json!(idea_title));
    payload.insert("Est_Minutes".to_string(), json!(120));
    set_select(&ideas, &mut payload, "Status", "Parking");
    payload.insert("Notes".to_string(), json!("等待结论后再评估是否转正"));
    payload.insert("KeyResults".to_string(), json!([kr_ids[2]]));
    let idea_id = client.create_record(&ideas.table_id, &payload).await?;

    println!("Mock OKR data created.");

    Ok(MockDataSummary {
        objective_id,
        kr_ids,
        action_ids,
        evidence_ids,
        weekly_plan_id,
        idea_id,
    })
}
