//! Explanation synthesis for quiz questions.
//!
//! An explanation is the first body sentence that shares a significant word
//! with the statement and reads explanatory (carries a cue word like
//! "because" or "helps"). Topic templates cover the misses.

use crate::markup::{char_len, split_sentences, truncate_chars};
use crate::vocab::{EXPLANATORY_CUES, STOPWORDS};
use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derive a short supporting explanation for `question` from `body`.
pub fn explanation(question: &str, body: &str) -> String {
    let question_lower = question.to_lowercase();
    let sentences = split_sentences(body);

    let keywords: Vec<&str> = question_lower
        .split_whitespace()
        .filter(|w| char_len(w) > 4 && !STOPWORDS.contains(w))
        .take(3)
        .collect();

    for keyword in &keywords {
        for sentence in &sentences {
            let lower = sentence.to_lowercase();
            let len = char_len(sentence);
            if lower.contains(keyword)
                && len > 40
                && len < 250
                && EXPLANATORY_CUES.iter().any(|cue| lower.contains(cue))
            {
                let cleaned = SPACE_RUN.replace_all(sentence.trim(), " ").into_owned();
                if char_len(&cleaned) > 30 {
                    return truncate_chars(&cleaned, 200);
                }
            }
        }
    }

    template_explanation(&question_lower)
}

fn template_explanation(question_lower: &str) -> String {
    if question_lower.contains("system") {
        let template = if question_lower.contains("skeletal") {
            "The skeletal system provides the body's framework, protects internal organs, and works with muscles to enable movement."
        } else if question_lower.contains("circulatory") || question_lower.contains("heart") {
            "The circulatory system pumps blood throughout the body, delivering oxygen and nutrients to cells while removing waste products."
        } else if question_lower.contains("respiratory") || question_lower.contains("lung") {
            "The respiratory system brings oxygen into the body and removes carbon dioxide, working closely with the circulatory system."
        } else if question_lower.contains("nervous") || question_lower.contains("brain") {
            "The nervous system controls all body functions, processes sensory information, and coordinates responses through the brain and nerves."
        } else {
            "Body systems work together to maintain health. Each system has specific functions but they must cooperate for the body to function properly."
        };
        return template.to_string();
    }
    if question_lower.contains("organ") {
        let template = if question_lower.contains("heart") {
            "The heart is a muscular organ that pumps blood throughout the body, delivering oxygen and nutrients to all cells."
        } else if question_lower.contains("lung") {
            "The lungs are organs that exchange oxygen and carbon dioxide with the blood, essential for breathing."
        } else if question_lower.contains("brain") {
            "The brain is the control center of the nervous system, processing information and controlling body functions."
        } else {
            "Organs are structures made of different tissues that work together to perform specific functions in the body."
        };
        return template.to_string();
    }
    if question_lower.contains("cell") {
        return "Cells are the smallest units of life. They combine to form tissues, which form organs, which form systems."
            .to_string();
    }
    if question_lower.contains("work together") {
        return "Body systems must work together because each system depends on others. For example, the respiratory and circulatory systems work together to deliver oxygen to cells."
            .to_string();
    }
    "This concept is important for understanding how the human body functions and maintains health."
        .to_string()
}
