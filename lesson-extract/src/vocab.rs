//! Domain vocabulary shared by the synthesizers.
//!
//! All matching over these tables is case-insensitive; entries are stored in
//! the case they are compared or emitted in.

use once_cell::sync::Lazy;
use regex::Regex;

/// Interrogative filler words excluded when picking significant words from a
/// statement.
pub(crate) const STOPWORDS: &[&str] = &[
    "what", "which", "where", "when", "why", "how", "does", "doesn", "would", "could", "should",
    "think", "about",
];

/// Wider stopword list used by the generic keyword-overlap scorer.
pub(crate) const OVERLAP_STOPWORDS: &[&str] = &[
    "what", "which", "where", "when", "why", "how", "does", "doesn", "would", "could", "should",
    "think", "about", "from", "this", "that", "the", "and", "or", "but",
];

/// Body systems used for topic matching and near-miss distractors.
pub(crate) const BODY_SYSTEMS: &[&str] = &[
    "Skeletal",
    "Muscular",
    "Circulatory",
    "Respiratory",
    "Nervous",
    "Digestive",
];

/// Major organs used for topic matching and near-miss distractors.
pub(crate) const ORGANS: &[&str] = &["Heart", "Lungs", "Brain", "Stomach", "Kidneys", "Liver"];

/// Terms eligible as drag-and-drop items when present in both the statement
/// and the lesson body.
pub(crate) const DRAG_TERMS: &[&str] = &[
    "heart",
    "lungs",
    "brain",
    "stomach",
    "kidneys",
    "liver",
    "blood",
    "oxygen",
    "carbon dioxide",
    "arteries",
    "veins",
    "nerves",
    "muscles",
    "bones",
    "cells",
    "tissues",
    "organs",
    "skeletal",
    "muscular",
    "circulatory",
    "respiratory",
    "nervous",
    "digestive",
];

/// Term families eligible as fill-in-the-blank redaction targets.
pub(crate) static KEY_TERM_FAMILIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(heart|brain|lungs|stomach|kidney|liver|muscle|bone|cell|tissue|organ|system)\b",
        r"\b(blood|oxygen|carbon|dioxide|nutrient|waste|energy|protein|vitamin|mineral)\b",
        r"\b(circulatory|respiratory|digestive|nervous|skeletal|muscular|immune|endocrine)\b",
        r"\b(artery|vein|capillary|nerve|neuron|hormone|enzyme|antibody)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Function words never used as redaction targets.
pub(crate) const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
];

/// Cue words marking a sentence as explanatory in register.
pub(crate) const EXPLANATORY_CUES: &[&str] = &[
    "because",
    "helps",
    "allows",
    "enables",
    "important",
    "essential",
    "function",
    "works",
    "provides",
];
