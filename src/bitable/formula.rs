//! Formula expressions are built as plain text and submitted verbatim; the
//! grammar is owned by the remote service and nothing is validated locally.

/// Reference to a field in the Bitable formula path syntax.
pub fn field_ref(table_id: &str, field_id: &str) -> String {
    format!("bitable::$table[{table_id}].$field[{field_id}]")
}

/// Progress score: reported progress ratio measured against the date-based
/// expected progress between the planned start and end, clamped and rounded
/// to a 0-based percentage. Blank plan dates yield a blank score.
pub fn progress_score_expression(
    table_id: &str,
    plan_start_id: &str,
    plan_end_id: &str,
    progress_id: &str,
) -> String {
    let plan_start = field_ref(table_id, plan_start_id);
    let plan_end = field_ref(table_id, plan_end_id);
    let progress = field_ref(table_id, progress_id);

    // Progress values above 1 are percentages, below are ratios.
    let progress_ratio = format!("IF({progress}>1, {progress}/100, {progress})");
    let duration_days = format!("DATE_DIFF({plan_end}, {plan_start}, \"days\")");
    let elapsed_days = format!("DATE_DIFF(NOW(), {plan_start}, \"days\")");
    let time_progress = format!(
        "IF({duration_days}=0, 1, MIN(1, MAX(0, {elapsed_days}/{duration_days})))"
    );

    format!(
        "IF(AND({plan_start}<>\"\", {plan_end}<>\"\"), \
         MAX(0, ROUND(100*(1+({progress_ratio}-{time_progress})))), \"\")"
    )
}

/// Week-number label with a leading zero for single-digit week numbers.
pub fn week_label_expression(table_id: &str, date_field_id: &str) -> String {
    let date = field_ref(table_id, date_field_id);
    format!(
        "IF(LEN(WEEKNUM({date},2))=1, \
         CONCATENATE(\"第0\", WEEKNUM({date},2), \"周\"), \
         CONCATENATE(\"第\", WEEKNUM({date},2), \"周\"))"
    )
}
