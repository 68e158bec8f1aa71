//! Lesson extraction and question synthesis for marked-up course documents
//!
//!     This crate turns semi-structured lesson documents (rich-text course
//!     material with embedded control codes) into structured lesson records,
//!     including auto-generated practice questions in four interactive
//!     formats (open response, multiple choice, fill in the blank, drag and
//!     drop).
//!
//! Architecture
//!
//!     The pipeline is a chain of small, individually testable stages. The
//!     assembler locates a lesson's block and named sections, the splitter
//!     turns raw section spans into discrete statements, the classifier
//!     assigns each statement an interactive format, and the synthesizers
//!     derive answers, distractors, and explanations from the lesson's own
//!     body text. There is no schema guarantee on the input: every stage is
//!     expected to degrade to a sensible default rather than fail when a
//!     document diverges from the template.
//!
//!     This is a pure lib: it powers the lessons CLI but is shell agnostic.
//!     No code here prints, reads files, or touches env vars.
//!
//!     The file structure:
//!     .
//!     ├── error.rs                # Error taxonomy (document-level only)
//!     ├── markup.rs               # Control-code normalization
//!     ├── section.rs              # Section header location
//!     ├── statement.rs            # Statement splitting conventions
//!     ├── classify.rs             # Ordered lexical rule table
//!     ├── vocab.rs                # Domain vocabulary tables
//!     ├── answer.rs               # Answer/distractor/blank/item synthesis
//!     ├── explain.rs              # Explanation synthesis
//!     ├── assemble.rs             # Lesson assembly and batch driver
//!     ├── record.rs               # Lesson record data model
//!     └── payload.rs              # Persisted-content JSON mapping
//!
//! Determinism
//!
//!     Extraction is a deterministic function of (document, ordinal) except
//!     for option shuffling and key-term selection, which draw from an rng
//!     handle the caller passes in. Seed the rng to make runs reproducible;
//!     tests rely on this.
//!
//! Answer quality
//!
//!     Synthesized answer keys are heuristic and advisory. Distractors are
//!     near-miss templates over entities found in the body text and are not
//!     guaranteed to be factually wrong; drag-and-drop answers preserve
//!     extraction order rather than inferring a semantic order.

pub mod answer;
pub mod assemble;
pub mod classify;
pub mod error;
pub mod explain;
pub mod markup;
pub mod payload;
pub mod record;
pub mod section;
pub mod statement;

mod vocab;

pub use assemble::{ExtractOptions, LessonExtractor};
pub use error::ExtractError;
pub use record::{LessonRecord, Question, QuestionFormat, QuestionKind, Track};
pub use statement::BoundaryMode;
