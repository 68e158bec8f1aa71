//! Persisted-content payload mapping.
//!
//! Downstream ingestion expects one JSON payload per lesson shaped
//! `{text, tasks, followUps, quiz:{questions}}`, plus a topical tag derived
//! from the title. The field conventions differ per collection (tasks carry a
//! hint, follow-ups an adaptive feedback line, quiz entries an explanation),
//! so the mapping is spelled out here instead of deriving it.

use crate::record::{LessonRecord, Question, QuestionKind};
use serde_json::{json, Value};

const TASK_HINT: &str = "Think about the key points from this lesson.";
const FOLLOW_UP_FEEDBACK: &str = "Great thinking! Review the key points if you need help.";

/// The JSON content payload for one record.
pub fn content_value(record: &LessonRecord) -> Value {
    json!({
        "text": record.body_text,
        "tasks": record.tasks.iter().map(task_value).collect::<Vec<_>>(),
        "followUps": record.follow_ups.iter().map(follow_up_value).collect::<Vec<_>>(),
        "quiz": {
            "questions": record.quiz_questions.iter().map(quiz_value).collect::<Vec<_>>(),
        },
    })
}

fn task_value(question: &Question) -> Value {
    let mut value = json!({
        "id": question.id,
        "type": "interactive",
        "question": question.prompt,
        "questionFormat": question.kind.format(),
        "hint": TASK_HINT,
    });
    insert_kind_fields(&mut value, &question.kind);
    value
}

fn follow_up_value(question: &Question) -> Value {
    let mut value = json!({
        "id": question.id,
        "question": question.prompt,
        "questionFormat": question.kind.format(),
        "adaptive": true,
        "feedback": FOLLOW_UP_FEEDBACK,
    });
    insert_kind_fields(&mut value, &question.kind);
    value
}

fn quiz_value(question: &Question) -> Value {
    let mut value = json!({
        "id": question.id,
        "question": question.prompt,
        "type": question.kind.format(),
        "explanation": question.explanation.clone().unwrap_or_default(),
    });
    insert_kind_fields(&mut value, &question.kind);
    value
}

fn insert_kind_fields(value: &mut Value, kind: &QuestionKind) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    match kind {
        QuestionKind::TextAnswer => {}
        QuestionKind::MultipleChoice { options, correct } => {
            object.insert("options".to_string(), json!(options));
            object.insert("correct".to_string(), json!(correct));
        }
        QuestionKind::FillInBlank { answer } => {
            object.insert("correctAnswer".to_string(), json!(answer));
        }
        QuestionKind::DragDrop {
            items,
            correct_order,
        } => {
            object.insert("items".to_string(), json!(items));
            object.insert("correct_order".to_string(), json!(correct_order));
        }
    }
}

/// Topical tag for a record, one of three fixed categories inferred from
/// title keywords.
pub fn competence_tag(title: &str) -> &'static str {
    let title_lower = title.to_lowercase();
    if title_lower.contains("first aid") || title_lower.contains("emergency") {
        "first aid"
    } else if title_lower.contains("safe")
        || title_lower.contains("health")
        || title_lower.contains("prevent")
        || title_lower.contains("hygiene")
    {
        "safe"
    } else {
        "anatomy"
    }
}
