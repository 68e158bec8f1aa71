//! Core data structures for assembled lesson records.

use serde::Serialize;
use std::fmt;

/// Course track a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Track {
    #[serde(rename = "Pre-Med")]
    PreMed,
    #[serde(rename = "Med")]
    Med,
}

impl Track {
    /// The label used in persisted records ("Pre-Med" / "Med").
    pub fn label(&self) -> &'static str {
        match self {
            Track::PreMed => "Pre-Med",
            Track::Med => "Med",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Interactive format assigned to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    TextAnswer,
    MultipleChoice,
    FillInBlank,
    DragDrop,
}

impl QuestionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFormat::TextAnswer => "text_answer",
            QuestionFormat::MultipleChoice => "multiple_choice",
            QuestionFormat::FillInBlank => "fill_in_blank",
            QuestionFormat::DragDrop => "drag_drop",
        }
    }
}

/// Format-specific payload of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Open response, no additional fields.
    TextAnswer,
    /// Four distinct options, one correct.
    MultipleChoice { options: Vec<String>, correct: usize },
    /// The prompt carries one blank marker in place of the redacted term.
    FillInBlank { answer: String },
    /// Ordered item set; `correct_order` is the extraction order.
    DragDrop {
        items: Vec<String>,
        correct_order: Vec<usize>,
    },
}

impl QuestionKind {
    pub fn format(&self) -> QuestionFormat {
        match self {
            QuestionKind::TextAnswer => QuestionFormat::TextAnswer,
            QuestionKind::MultipleChoice { .. } => QuestionFormat::MultipleChoice,
            QuestionKind::FillInBlank { .. } => QuestionFormat::FillInBlank,
            QuestionKind::DragDrop { .. } => QuestionFormat::DragDrop,
        }
    }
}

/// One synthesized practice question.
///
/// `id` is the 1-based position within the question's collection. The
/// explanation is present only for quiz-collection questions.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: usize,
    pub prompt: String,
    pub kind: QuestionKind,
    pub explanation: Option<String>,
}

/// A fully assembled lesson, ready for the persistence layer.
///
/// Every question collection is non-empty: the assembler substitutes a
/// synthetic fallback question when extraction yields nothing for a section.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonRecord {
    pub track: Track,
    pub order_index: usize,
    pub title: String,
    pub objective: String,
    pub body_text: String,
    pub tasks: Vec<Question>,
    pub follow_ups: Vec<Question>,
    pub quiz_questions: Vec<Question>,
}
