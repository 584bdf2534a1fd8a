use serde_json::json;

use crate::bitable::record::RecordFields;
use crate::bitable::schema;
use crate::bitable::serviceclient::BaseClient;
use crate::http::HttpTransport;
use crate::tasks::base_table_index;

pub(crate) struct GuideStep {
    pub step: i64,
    pub title: &'static str,
    pub instruction: &'static str,
}

pub(crate) fn guide_steps() -> Vec<GuideStep> {
    vec![
        GuideStep {
            step: 1,
            title: "初始化模板",
            instruction: "运行 scripts/init_base.sh 创建 7+ 张表结构，并生成 generated/base_schema.json。",
        },
        GuideStep {
            step: 2,
            title: "录入 OKR",
            instruction: "在 Objectives 填写 O_Title/Owner/Cycle；在 KeyResults 创建 3-5 条 KR 并关联 Objective。",
        },
        GuideStep {
            step: 3,
            title: "建立 Action Bank",
            instruction: "在 Actions 为每个 KR 建 5-10 条可执行动作（30-90 分钟粒度）。",
        },
        GuideStep {
            step: 4,
            title: "每日拉取 MIT",
            instruction: "每天从 Action Bank 选 1-2 条最重要任务，状态改为 Today。",
        },
        GuideStep {
            step: 5,
            title: "产出证据",
            instruction: "完成 Action 后新增 Evidence，并关联 KR/Action。没有证据就不能算进度。",
        },
        GuideStep {
            step: 6,
            title: "周计划与复盘",
            instruction: "在 WeeklyPlan 记录本周交付/预算/风险；周末复盘补证据与结论。",
        },
        GuideStep {
            step: 7,
            title: "偏航检测与纠偏",
            instruction: "关注连续无 Evidence 天数、未关联 KR 的 Action 数量；触发后执行三步纠偏。",
        },
        GuideStep {
            step: 8,
            title: "Parking Lot",
            instruction: "新任务 >30 分钟且无法关联 KR 时放入 Ideas；探索要有预算和产出。",
        },
    ]
}

/// Seed the eight usage-guide step records. Create failures are fatal.
pub async fn seed_usage_guide<T: HttpTransport>(client: &BaseClient<T>) -> Result<(), String> {
    let tables = base_table_index(client).await?;
    let table_id = tables
        .get("UsageGuide")
        .ok_or_else(|| "UsageGuide table not found".to_string())?;

    let fields = client.list_fields(table_id).await?;
    let primary = schema::primary_field_name(&fields);

    for step in guide_steps() {
        let mut payload = RecordFields::new();
        payload.insert("Step_Number".to_string(), json!(step.step));
        payload.insert("Title".to_string(), json!(step.title));
        payload.insert("Instruction".to_string(), json!(step.instruction));
        if let Some(primary) = &primary {
            payload.insert(primary.clone(), json!(format!("{}. {}", step.step, step.title)));
        }
        client.create_record(table_id, &payload).await?;
    }

    println!("Usage guide data created.");
    Ok(())
}
