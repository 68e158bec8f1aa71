//! Answer synthesis: correct answers, distractors, blanks, and ordering
//! items, derived heuristically from the lesson's body text.
//!
//! Everything here is best-effort. Each synthesizer cascades through tiers:
//! topic-specific sentence matching, then generic keyword overlap, then fixed
//! templates, so a question always receives *something* plausible. The
//! produced answer keys are advisory, not ground truth.
//!
//! Randomness (option shuffling, key-term selection) comes from an
//! explicitly passed rng handle so that callers can seed runs
//! deterministically.

use crate::markup::{char_len, split_sentences, truncate_chars};
use crate::vocab::{
    BODY_SYSTEMS, DRAG_TERMS, FILLER_WORDS, KEY_TERM_FAMILIES, ORGANS, OVERLAP_STOPWORDS,
    STOPWORDS,
};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;

/// The marker substituted for a redacted key term.
pub const BLANK_MARKER: &str = "______";

/// A synthesized multiple-choice option set.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    pub options: Vec<String>,
    pub correct: usize,
}

/// A fill-in-the-blank prompt with its redacted term.
#[derive(Debug, Clone, PartialEq)]
pub struct Blank {
    pub prompt: String,
    pub answer: String,
}

/// Synthesize four options for a multiple-choice question.
///
/// The returned set always holds exactly four pairwise-distinct options of at
/// most 80 characters, shuffled, with `correct` pointing at the derived
/// correct answer.
pub fn multiple_choice(question: &str, body: &str, rng: &mut impl Rng) -> Choices {
    let question_lower = question.to_lowercase();
    let body_lower = body.to_lowercase();
    let sentences = split_sentences(body);

    let correct = correct_answer(&question_lower, &body_lower, &sentences);
    let correct = truncate_chars(&correct, 80);
    let wrongs = distractors(&question_lower, &body_lower, &correct);

    let mut options = vec![correct.clone()];
    options.extend(wrongs);
    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|option| *option == correct)
        .expect("correct option survives the shuffle");
    Choices {
        options,
        correct: correct_index,
    }
}

fn has_professionals_cue(question_lower: &str) -> bool {
    question_lower.contains("hospital")
        || question_lower.contains("people you might meet")
        || question_lower.contains("healthcare professional")
}

fn correct_answer(question_lower: &str, body_lower: &str, sentences: &[String]) -> String {
    let mut correct = if has_professionals_cue(question_lower) {
        Some(professionals_answer(body_lower))
    } else {
        None
    };

    if correct.is_none() {
        correct = topic_answer(question_lower, sentences);
    }

    if correct.as_deref().map_or(true, |c| char_len(c) < 15) {
        if let Some(found) = overlap_answer(question_lower, sentences) {
            correct = Some(found);
        }
    }

    match correct {
        Some(found) if char_len(&found) >= 15 => found,
        _ => template_answer(question_lower, sentences),
    }
}

/// Roster the healthcare professionals actually mentioned in the body.
fn professionals_answer(body_lower: &str) -> String {
    let mut found: Vec<&str> = Vec::new();
    if body_lower.contains("nurse") {
        found.push("Nurses");
    }
    if body_lower.contains("pharmacist") {
        found.push("Pharmacists");
    }
    if body_lower.contains("doctor") || body_lower.contains("pediatrician") {
        found.push("Doctors");
    }
    if body_lower.contains("surgeon") {
        found.push("Surgeons");
    }
    if body_lower.contains("technician") {
        found.push("Lab technicians");
    }
    if found.is_empty() {
        "Doctors, nurses, and healthcare professionals".to_string()
    } else {
        let roster = found[..found.len().min(3)].join(", ");
        format!("{roster} work in hospitals")
    }
}

/// Tier (a): topic-specific sentence matching. Body sentences qualify when a
/// topic word from the question co-occurs with a verb characteristic of that
/// topic. The shortest qualifying sentence wins.
fn topic_answer(question_lower: &str, sentences: &[String]) -> Option<String> {
    let mut candidates: Vec<String> = Vec::new();

    let push_matching = |candidates: &mut Vec<String>,
                         topics: &[&str],
                         verbs: &[&str],
                         max_len: usize| {
        for sentence in sentences {
            let lower = sentence.to_lowercase();
            if topics.iter().any(|t| lower.contains(t))
                && verbs.iter().any(|v| lower.contains(v))
                && char_len(sentence) < max_len
            {
                candidates.push(sentence.trim().to_string());
            }
        }
    };

    if question_lower.contains("system") {
        if question_lower.contains("skeletal") || question_lower.contains("bone") {
            push_matching(
                &mut candidates,
                &["skeletal"],
                &["provides", "protects", "supports"],
                120,
            );
        } else if question_lower.contains("circulatory")
            || question_lower.contains("heart")
            || question_lower.contains("blood")
        {
            push_matching(
                &mut candidates,
                &["circulatory", "heart", "blood"],
                &["pumps", "transports", "delivers"],
                120,
            );
        } else if question_lower.contains("respiratory")
            || question_lower.contains("lung")
            || question_lower.contains("breath")
        {
            push_matching(
                &mut candidates,
                &["respiratory", "lung", "breath"],
                &["oxygen", "breathe"],
                120,
            );
        } else if question_lower.contains("work together") || question_lower.contains("cooperate") {
            for sentence in sentences {
                let lower = sentence.to_lowercase();
                if ["work together", "cooperate", "collaborate"]
                    .iter()
                    .any(|t| lower.contains(t))
                    && char_len(sentence) < 100
                {
                    candidates.push(sentence.trim().to_string());
                }
            }
        }
    } else if question_lower.contains("organ") {
        for sentence in sentences {
            let len = char_len(sentence);
            if sentence.to_lowercase().contains("organ") && len > 20 && len < 100 {
                candidates.push(sentence.trim().to_string());
            }
        }
    } else if question_lower.contains("cell") {
        for sentence in sentences {
            let lower = sentence.to_lowercase();
            if lower.contains("cell")
                && (lower.contains("building block") || lower.contains("basic"))
                && char_len(sentence) < 100
            {
                candidates.push(sentence.trim().to_string());
            }
        }
    }

    // Generic pass regardless of topic: sentences sharing the first two
    // significant question words.
    let words: Vec<&str> = question_lower
        .split_whitespace()
        .filter(|w| char_len(w) > 4 && !STOPWORDS.contains(w))
        .collect();
    for word in words.iter().take(2) {
        for sentence in sentences {
            let len = char_len(sentence);
            if sentence.to_lowercase().contains(word) && len > 20 && len < 100 {
                candidates.push(sentence.trim().to_string());
            }
        }
    }

    candidates.sort_by_key(|c| char_len(c));
    candidates.into_iter().next()
}

/// Tier (b): generic keyword-overlap scoring, ranked by overlap count
/// descending then length ascending.
fn overlap_answer(question_lower: &str, sentences: &[String]) -> Option<String> {
    let keywords: Vec<&str> = question_lower
        .split_whitespace()
        .filter(|w| char_len(w) > 3 && !OVERLAP_STOPWORDS.contains(w))
        .collect();
    let mut scored: Vec<(usize, usize, String)> = Vec::new();
    for sentence in sentences {
        let len = char_len(sentence);
        if len > 15 && len < 100 {
            let lower = sentence.to_lowercase();
            let overlap = keywords.iter().filter(|k| lower.contains(*k)).count();
            if overlap > 0 {
                scored.push((overlap, len, sentence.trim().to_string()));
            }
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .next()
        .map(|(_, _, sentence)| truncate_chars(&sentence, 100))
}

/// Tier (c): fixed topic-keyed templates.
fn template_answer(question_lower: &str, sentences: &[String]) -> String {
    if question_lower.contains("system") {
        let template = if question_lower.contains("skeletal") || question_lower.contains("bone") {
            "Provides structure and protects organs"
        } else if question_lower.contains("muscular") || question_lower.contains("muscle") {
            "Enables movement and supports the body"
        } else if question_lower.contains("circulatory")
            || question_lower.contains("heart")
            || question_lower.contains("blood")
        {
            "Transports oxygen and nutrients throughout the body"
        } else if question_lower.contains("respiratory")
            || question_lower.contains("lung")
            || question_lower.contains("breath")
        {
            "Brings in oxygen and removes carbon dioxide"
        } else if question_lower.contains("nervous")
            || question_lower.contains("brain")
            || question_lower.contains("nerve")
        {
            "Controls body functions and processes information"
        } else if question_lower.contains("digestive") || question_lower.contains("stomach") {
            "Breaks down food and absorbs nutrients"
        } else {
            "Body systems work together to maintain health"
        };
        return template.to_string();
    }
    if question_lower.contains("organ") {
        let template = if question_lower.contains("heart") {
            "Pumps blood throughout the body"
        } else if question_lower.contains("lung") {
            "Exchanges oxygen and carbon dioxide"
        } else if question_lower.contains("brain") {
            "Controls thoughts, movements, and body functions"
        } else {
            "Structures made of tissues that perform specific functions"
        };
        return template.to_string();
    }
    if question_lower.contains("cell") {
        return "The basic building blocks of all living things".to_string();
    }
    if question_lower.contains("work together") || question_lower.contains("collaborate") {
        return "Systems must cooperate to keep the body healthy".to_string();
    }
    if question_lower.contains("why") {
        for sentence in sentences {
            let lower = sentence.to_lowercase();
            let len = char_len(sentence);
            if (lower.contains("because") || lower.contains("reason") || lower.contains("important"))
                && len > 30
                && len < 200
            {
                return truncate_chars(sentence.trim(), 150);
            }
        }
        return "This is important for maintaining proper body function".to_string();
    }

    // Last resort before the generic sentence: anything sharing a long
    // question word.
    let words: Vec<&str> = question_lower
        .split_whitespace()
        .filter(|w| char_len(w) > 4)
        .collect();
    for sentence in sentences {
        let lower = sentence.to_lowercase();
        let len = char_len(sentence);
        if words.iter().take(2).any(|w| lower.contains(w)) && len > 30 && len < 200 {
            return truncate_chars(sentence.trim(), 150);
        }
    }
    "This concept is essential for understanding how the body works".to_string()
}

/// Negations used to pad the distractor set when the topic templates come up
/// short. Pool members are pairwise distinct so padding never introduces a
/// duplicate option.
const PAD_NEGATIONS: [&str; 5] = [
    "This is not correct",
    "This is only sometimes true",
    "This does not apply here",
    "This is unrelated",
    "This does not affect the body",
];

/// Derive exactly three distractors: topic near-miss templates naming sibling
/// entities present in the body but absent from the correct answer, generic
/// negation fallbacks, then pool padding.
fn distractors(question_lower: &str, body_lower: &str, correct: &str) -> Vec<String> {
    let correct_lower = correct.to_lowercase();
    let mut wrongs: Vec<String> = Vec::new();

    if has_professionals_cue(question_lower) {
        wrongs.extend(
            [
                "Only doctors work in hospitals",
                "Hospitals don't have different types of staff",
                "Patients are the only people in hospitals",
            ]
            .map(String::from),
        );
    } else if question_lower.contains("system")
        || BODY_SYSTEMS
            .iter()
            .any(|s| question_lower.contains(&s.to_lowercase()))
    {
        let independent =
            question_lower.contains("work together") || question_lower.contains("cooperate");
        for system in BODY_SYSTEMS {
            let system_lower = system.to_lowercase();
            if body_lower.contains(&system_lower) && !correct_lower.contains(&system_lower) {
                if independent {
                    wrongs.push(format!("The {system} system functions independently"));
                } else {
                    wrongs.push(format!("The {system} system is not involved"));
                }
                if wrongs.len() >= 3 {
                    break;
                }
            }
        }
        if wrongs.len() < 3 {
            wrongs.extend(
                [
                    "Each system works in isolation",
                    "Only one system is active at a time",
                    "Systems don't need to communicate",
                ]
                .map(String::from),
            );
        }
    } else if question_lower.contains("organ")
        || ORGANS
            .iter()
            .any(|o| question_lower.contains(&o.to_lowercase()))
    {
        for organ in ORGANS {
            let organ_lower = organ.to_lowercase();
            if body_lower.contains(&organ_lower) && !correct_lower.contains(&organ_lower) {
                wrongs.push(format!("The {organ} has a different function"));
                if wrongs.len() >= 3 {
                    break;
                }
            }
        }
        if wrongs.len() < 3 {
            wrongs.extend(
                [
                    "Organs function independently",
                    "Only one organ is necessary",
                    "Organs don't need to work together",
                ]
                .map(String::from),
            );
        }
    } else if question_lower.contains("cell") || question_lower.contains("tissue") {
        wrongs.extend(
            [
                "Cells function independently",
                "Tissues are not made of cells",
                "Cells don't form organs",
            ]
            .map(String::from),
        );
    } else if question_lower.contains("why") {
        wrongs.extend(
            [
                "This is not important",
                "This doesn't affect the body",
                "This only happens sometimes",
            ]
            .map(String::from),
        );
    } else if question_lower.contains("what") || question_lower.contains("which") {
        wrongs.extend(
            [
                "This is not correct",
                "This doesn't apply here",
                "This is unrelated",
            ]
            .map(String::from),
        );
    } else {
        wrongs.extend(
            [
                "This concept is not important",
                "This doesn't apply to the body",
                "This is only sometimes true",
            ]
            .map(String::from),
        );
    }

    let mut filtered: Vec<String> = Vec::new();
    for wrong in wrongs {
        if wrong.to_lowercase() != correct_lower && !filtered.contains(&wrong) {
            filtered.push(wrong);
            if filtered.len() == 3 {
                break;
            }
        }
    }
    let mut pads = PAD_NEGATIONS.iter();
    while filtered.len() < 3 {
        let Some(pad) = pads.next() else { break };
        if pad.to_lowercase() != correct_lower
            && !filtered.iter().any(|f| f.eq_ignore_ascii_case(pad))
        {
            filtered.push(pad.to_string());
        }
    }
    filtered
        .into_iter()
        .map(|w| truncate_chars(&w, 80))
        .collect()
}

/// Build a fill-in-the-blank prompt by redacting a key term from a body
/// sentence. Returns `None` when no candidate term has a usable sentence, in
/// which case the caller downgrades the question to open response.
pub fn fill_in_blank(body: &str, rng: &mut impl Rng) -> Option<Blank> {
    let terms = key_terms(body);
    if terms.is_empty() {
        return None;
    }
    let start = rng.gen_range(0..terms.len());
    for offset in 0..terms.len() {
        let term = &terms[(start + offset) % terms.len()];
        if let Some(blank) = redact(body, term) {
            return Some(blank);
        }
    }
    None
}

/// Up to ten candidate key terms from the fixed term families, first-seen
/// order, deduplicated.
fn key_terms(body: &str) -> Vec<String> {
    let lower = body.to_lowercase();
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for family in KEY_TERM_FAMILIES.iter() {
        for found in family.find_iter(&lower) {
            let term = found.as_str();
            if char_len(term) > 3 && !FILLER_WORDS.contains(&term) && seen.insert(term.to_string())
            {
                terms.push(term.to_string());
                if terms.len() == 10 {
                    return terms;
                }
            }
        }
    }
    terms
}

/// Redact one whole-word occurrence of `term` in a body sentence. Sentences
/// where the term appears more than once, or survives redaction inside a
/// longer word, are skipped so the prompt ends up with exactly one blank and
/// no leaked answer. Sentences of 20-200 characters are preferred.
fn redact(body: &str, term: &str) -> Option<Blank> {
    let word = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).ok()?;
    let mut fallback: Option<Blank> = None;
    for sentence in split_sentences(body) {
        if sentence.contains(BLANK_MARKER) {
            continue;
        }
        if word.find_iter(&sentence).count() != 1 {
            continue;
        }
        let prompt = word.replace(&sentence, BLANK_MARKER).into_owned();
        if prompt.to_lowercase().contains(term) {
            continue;
        }
        let len = char_len(&sentence);
        let blank = Blank {
            prompt,
            answer: term.to_string(),
        };
        if len > 20 && len < 200 {
            return Some(blank);
        }
        if fallback.is_none() {
            fallback = Some(blank);
        }
    }
    fallback
}

/// Items for a drag-and-drop question: fixed vocabulary terms present in both
/// the statement and the body, capitalized, at most six. Fewer than two
/// matches falls back to generic placeholders.
pub fn drag_drop_items(question: &str, body: &str) -> Vec<String> {
    let question_lower = question.to_lowercase();
    let body_lower = body.to_lowercase();
    let mut items: Vec<String> = Vec::new();
    for term in DRAG_TERMS {
        if question_lower.contains(term) && body_lower.contains(term) {
            items.push(capitalize(term));
            if items.len() == 6 {
                break;
            }
        }
    }
    if items.len() < 2 {
        return (1..=4).map(|i| format!("Item {i}")).collect();
    }
    items
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
