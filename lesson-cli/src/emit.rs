//! Output emitters for extracted lesson records.
//!
//! Two targets: a JSON report for inspection and piping, and a seed SQL
//! script for the ingestion database. Both lean on the payload mapping from
//! the library; nothing here reshapes question data.

use lesson_extract::{payload, LessonRecord};
use serde_json::json;

/// All records as a pretty-printed JSON array.
pub fn json_report(records: &[LessonRecord]) -> String {
    let values: Vec<serde_json::Value> = records
        .iter()
        .map(|record| {
            json!({
                "path_type": record.track,
                "order_index": record.order_index,
                "title": record.title,
                "objective": record.objective,
                "competence_tag": payload::competence_tag(&record.title),
                "content": payload::content_value(record),
            })
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&values).expect("json values always serialize");
    text.push('\n');
    text
}

/// All records as INSERT statements keyed by (track, ordinal), with the
/// content payload inlined as jsonb.
pub fn seed_sql(records: &[LessonRecord]) -> String {
    let mut lines = vec![
        "-- ============================================".to_string(),
        format!("-- Lesson seed script: {} records", records.len()),
        "-- Generated from the track source documents".to_string(),
        "-- ============================================".to_string(),
        String::new(),
        "-- Remove existing lessons before running this:".to_string(),
        "--   DELETE FROM lessons;".to_string(),
        String::new(),
    ];

    for record in records {
        let content = payload::content_value(record);
        let content_json =
            sql_escape(&serde_json::to_string(&content).expect("json values always serialize"));
        lines.push(format!(
            "INSERT INTO lessons (path_type, order_index, title, objective, estimated_duration, competence_tag, content) VALUES\n('{}', {}, '{}',\n'{}',\n20,\n'{}',\n'{}'::jsonb);",
            record.track,
            record.order_index,
            sql_escape(&record.title),
            sql_escape(&record.objective),
            payload::competence_tag(&record.title),
            content_json,
        ));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn sql_escape(text: &str) -> String {
    text.replace('\'', "''")
}
