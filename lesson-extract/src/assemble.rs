//! Lesson assembly: locate a lesson's block and sections, run the pipeline,
//! and build one record.
//!
//! Failure policy: a lesson whose title marker is missing is an error for the
//! single-lesson entry point and a logged skip for the batch entry point.
//! Everything below that level (missing sections, synthesis shortfalls) is
//! absorbed with a default so a record always comes out structurally
//! complete.

use crate::answer;
use crate::classify;
use crate::error::ExtractError;
use crate::explain;
use crate::markup::{char_len, normalize, truncate_chars};
use crate::record::{LessonRecord, Question, QuestionFormat, QuestionKind, Track};
use crate::section::{self, find_ci};
use crate::statement::{self, BoundaryMode};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// Options for one extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub boundary_mode: BoundaryMode,
}

/// Marker opening any lesson title heading, used to bound quiz sections.
static NEXT_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\fs51\\fsmilli25995\s+\\cf2\s+\d+\s+\|").unwrap());

/// The extraction pipeline, configured once and reused across lessons.
#[derive(Debug, Clone, Default)]
pub struct LessonExtractor {
    options: ExtractOptions,
}

impl LessonExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        LessonExtractor { options }
    }

    /// Extract every lesson ordinal in `1..=count` from `document`.
    ///
    /// Lessons whose title marker cannot be located are logged and skipped;
    /// the rest of the batch is unaffected. Only an empty document is fatal.
    pub fn extract_all(
        &self,
        document: &str,
        track: Track,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<LessonRecord>, ExtractError> {
        if document.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        let mut records = Vec::new();
        for ordinal in 1..=count {
            match self.extract_lesson(document, track, ordinal, rng) {
                Ok(record) => {
                    log::info!(
                        "{track} lesson {ordinal}: {} tasks, {} follow-ups, {} quiz questions",
                        record.tasks.len(),
                        record.follow_ups.len(),
                        record.quiz_questions.len()
                    );
                    records.push(record);
                }
                Err(err) => log::warn!("{track} lesson {ordinal} skipped: {err}"),
            }
        }
        Ok(records)
    }

    /// Extract the lesson with the given ordinal.
    pub fn extract_lesson(
        &self,
        document: &str,
        track: Track,
        ordinal: usize,
        rng: &mut impl Rng,
    ) -> Result<LessonRecord, ExtractError> {
        if document.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        let mode = self.options.boundary_mode;

        let (block, title) =
            lesson_block(document, ordinal).ok_or(ExtractError::TitleNotFound(ordinal))?;

        let objective = extract_objective(block, &title);
        let mut body_parts: Vec<String> = Vec::new();
        if let Some(intro) = passage(block, "In this lesson", &intro_end_markers(ordinal)) {
            let intro = normalize(intro);
            if char_len(&intro) > 20 {
                body_parts.push(intro);
            }
        }
        if let Some(body) = passage(block, &format!("Lesson {ordinal}:"), &body_end_markers()) {
            let body = normalize(body);
            if char_len(&body) > 20 {
                body_parts.push(body);
            }
        }

        // Starter Questions -> tasks. Synthesis sees the text gathered so far.
        let mut tasks = Vec::new();
        if let Some(span) = section::locate(
            block,
            "Starter Questions:",
            &[
                "Key Points:",
                "Questions:",
                "More to Learn:",
                "Skill Check:",
            ],
        ) {
            let context = body_parts.join(" ");
            for statement in statement::split(span, mode) {
                let id = tasks.len() + 1;
                tasks.push(build_question(id, &statement, &context, rng, false));
            }
        }

        // Key Points feed the body text, both as bullets and as a labeled
        // passage.
        if let Some(span) = section::locate(
            block,
            "Key Points:",
            &["Questions:", "More to Learn:", "Skill Check:"],
        ) {
            for bullet in statement::split(span, mode) {
                if char_len(&bullet) > 10 {
                    body_parts.push(format!("\n\n\u{2022} {bullet}"));
                }
            }
            let cleaned = normalize(span);
            if char_len(&cleaned) > 20 {
                body_parts.push(format!("\n\nKey Points:\n{cleaned}"));
            }
        }

        // First standalone Questions section -> follow-ups.
        let mut follow_ups = Vec::new();
        let question_sections = questions_offsets(block);
        if let Some(&offset) = question_sections.first() {
            let rest = &block[offset + "Questions:".len()..];
            let end = ["More to Learn:", "Skill Check:", r"\fs51"]
                .iter()
                .filter_map(|marker| find_ci(rest, marker))
                .min()
                .unwrap_or(rest.len());
            let context = body_parts.join(" ");
            for statement in statement::split(&rest[..end], mode) {
                if char_len(&statement) > 500 {
                    continue;
                }
                let id = follow_ups.len() + 1;
                follow_ups.push(build_question(id, &statement, &context, rng, false));
            }
        }

        if let Some(span) =
            section::locate(block, "More to Learn:", &["Skill Check:", "Questions:"])
        {
            let cleaned = normalize(span);
            if char_len(&cleaned) > 20 {
                body_parts.push(format!("\n\nMore to Learn:\n{cleaned}"));
            }
        }

        // Skill Check -> quiz; without one, the last Questions section serves
        // when the block has more than one.
        let mut quiz_questions = Vec::new();
        if let Some(span) = quiz_span(block, &question_sections) {
            let context = body_parts.join(" ");
            for statement in statement::split(span, mode) {
                if char_len(&statement) > 500 {
                    continue;
                }
                let id = quiz_questions.len() + 1;
                quiz_questions.push(build_question(id, &statement, &context, rng, true));
            }
        }

        let body_text = if body_parts.is_empty() {
            format!("Content for {title}")
        } else {
            body_parts.join("\n\n")
        };

        if tasks.is_empty() {
            log::warn!("{track} lesson {ordinal}: no tasks extracted, substituting fallback");
            tasks.push(Question {
                id: 1,
                prompt: "What did you learn from this lesson?".to_string(),
                kind: QuestionKind::TextAnswer,
                explanation: None,
            });
        }
        if follow_ups.is_empty() {
            log::warn!("{track} lesson {ordinal}: no follow-ups extracted, substituting fallback");
            follow_ups.push(Question {
                id: 1,
                prompt: "Can you explain the main concept?".to_string(),
                kind: QuestionKind::TextAnswer,
                explanation: None,
            });
        }
        if quiz_questions.is_empty() {
            log::warn!("{track} lesson {ordinal}: no quiz extracted, synthesizing fallback");
            let prompt = format!("What is the main takeaway from this lesson about {title}?");
            let choices = answer::multiple_choice(&prompt, &body_text, rng);
            let explanation = explain::explanation(&prompt, &body_text);
            quiz_questions.push(Question {
                id: 1,
                prompt,
                kind: QuestionKind::MultipleChoice {
                    options: choices.options,
                    correct: choices.correct,
                },
                explanation: Some(explanation),
            });
        }

        Ok(LessonRecord {
            track,
            order_index: ordinal,
            title,
            objective,
            body_text,
            tasks,
            follow_ups,
            quiz_questions,
        })
    }
}

/// Classify a statement and synthesize its format-specific fields. A
/// fill-in-the-blank that cannot find a redactable sentence downgrades to
/// open response.
fn build_question(
    id: usize,
    statement: &str,
    context: &str,
    rng: &mut impl Rng,
    with_explanation: bool,
) -> Question {
    let explanation = with_explanation.then(|| explain::explanation(statement, context));
    let (prompt, kind) = match classify::classify(statement) {
        QuestionFormat::TextAnswer => (statement.to_string(), QuestionKind::TextAnswer),
        QuestionFormat::MultipleChoice => {
            let choices = answer::multiple_choice(statement, context, rng);
            (
                statement.to_string(),
                QuestionKind::MultipleChoice {
                    options: choices.options,
                    correct: choices.correct,
                },
            )
        }
        QuestionFormat::FillInBlank => match answer::fill_in_blank(context, rng) {
            Some(blank) => (
                blank.prompt,
                QuestionKind::FillInBlank {
                    answer: blank.answer,
                },
            ),
            None => {
                log::debug!("no redactable sentence for blank, downgrading to text answer");
                (statement.to_string(), QuestionKind::TextAnswer)
            }
        },
        QuestionFormat::DragDrop => {
            let items = answer::drag_drop_items(statement, context);
            let correct_order = (0..items.len()).collect();
            (
                statement.to_string(),
                QuestionKind::DragDrop {
                    items,
                    correct_order,
                },
            )
        }
    };
    Question {
        id,
        prompt,
        kind,
        explanation,
    }
}

/// Locate the lesson's block (title marker to the next ordinal's marker or
/// document end) and its normalized title.
fn lesson_block(document: &str, ordinal: usize) -> Option<(&str, String)> {
    let title_re = Regex::new(&format!(
        r"\\fs51\\fsmilli25995\s+(?:\\cf2\s+)?{ordinal}\s+\|\s+(?s:(.*?))\\fs(?:21|51)"
    ))
    .ok()?;
    let captures = title_re.captures(document)?;
    let whole = captures.get(0)?;
    let title = normalize(captures.get(1)?.as_str());

    let next_re = Regex::new(&format!(
        r"\\fs51\\fsmilli25995\s+(?:\\cf2\s+)?{}\s+\|",
        ordinal + 1
    ))
    .ok()?;
    let start = whole.start();
    let end = next_re
        .find(&document[start..])
        .map(|m| start + m.start())
        .unwrap_or(document.len());
    Some((&document[start..end], title))
}

/// Objective passage: "After this lesson ..." up to the next heading marker,
/// capped at 500 characters. Falls back to a templated objective.
fn extract_objective(block: &str, title: &str) -> String {
    match find_ci(block, "After this lesson") {
        Some(offset) => {
            let rest = &block[offset..];
            let end = find_ci(rest, r"\fs51").unwrap_or(rest.len());
            let mut objective = normalize(&rest[..end]);
            if char_len(&objective) > 500 {
                objective = format!("{}...", truncate_chars(&objective, 497));
            }
            objective
        }
        None => format!("Learn about {title}"),
    }
}

fn intro_end_markers(ordinal: usize) -> [String; 3] {
    [
        "After this lesson".to_string(),
        format!("Lesson {ordinal}:"),
        "Starter Questions:".to_string(),
    ]
}

fn body_end_markers() -> [String; 6] {
    [
        "Starter Questions:".to_string(),
        "Key Points:".to_string(),
        "Questions:".to_string(),
        "More to Learn:".to_string(),
        "Skill Check:".to_string(),
        r"\fs51".to_string(),
    ]
}

/// A raw passage from `start_marker` to the nearest end marker. Unlike
/// [`section::locate`], a passage requires a terminator: prose that runs into
/// nothing recognizable is dropped rather than swallowing the block tail.
fn passage<'a>(block: &'a str, start_marker: &str, end_markers: &[String]) -> Option<&'a str> {
    let start = find_ci(block, start_marker)?;
    let rest = &block[start..];
    let end = end_markers
        .iter()
        .filter_map(|marker| find_ci(rest, marker))
        .min()?;
    Some(&rest[..end])
}

/// Offsets of standalone "Questions:" headers, excluding the tail of
/// "Starter Questions:" matches.
fn questions_offsets(block: &str) -> Vec<usize> {
    let needle = "Questions:";
    let mut offsets = Vec::new();
    let mut from = 0;
    while let Some(relative) = find_ci(&block[from..], needle) {
        let offset = from + relative;
        let preceded_by_starter = offset >= 8
            && block.as_bytes()[offset - 8..offset].eq_ignore_ascii_case(b"Starter ");
        if !preceded_by_starter {
            offsets.push(offset);
        }
        from = offset + needle.len();
    }
    offsets
}

/// The quiz source span: the Skill Check section when present, otherwise the
/// last Questions section when the block has more than one.
fn quiz_span<'a>(block: &'a str, question_sections: &[usize]) -> Option<&'a str> {
    if let Some(offset) = find_ci(block, "Skill Check:") {
        let rest = &block[offset + "Skill Check:".len()..];
        let end = NEXT_TITLE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
        return Some(&rest[..end]);
    }
    if question_sections.len() > 1 {
        let offset = *question_sections.last()?;
        let rest = &block[offset + "Questions:".len()..];
        let end = NEXT_TITLE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
        return Some(&rest[..end]);
    }
    None
}
