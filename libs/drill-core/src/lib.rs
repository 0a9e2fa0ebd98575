//! Review engine for a Japanese flashcard trainer.
//!
//! Provides:
//! - Romaji to kana conversion while typing (lowercase hiragana, uppercase katakana)
//! - Answer classification, including strict multi-reading "hard mode"
//! - A bounded-window review queue with shuffling and requeueing
//! - The session driver that ties them to a reviewer and a result sink

pub mod answers;
pub mod error;
pub mod item;
pub mod kana;
pub mod matching;
pub mod question;
pub mod queue;
pub mod session;
pub mod settings;
pub mod types;

pub use answers::{AnswerEntry, AnswerEvaluator, MatchOptions};
pub use error::{DrillError, Result};
pub use item::{ContextSentence, Item, ItemCategory, ItemId};
pub use kana::KanaTranscoder;
pub use matching::{close_match, normalize_answer, sequence_ratio, CLOSE_MATCH_RATIO};
pub use question::Question;
pub use queue::{ItemResult, QuestionKey, ReviewQueue, DEFAULT_WINDOW_SIZE};
pub use session::{
    lesson_batches, run_lessons, Feedback, Prompt, ResultSink, ReviewSession, Reviewer,
    SessionStats, LESSON_BATCH_SIZE,
};
pub use settings::{EffectiveSettings, Settings, SettingsOverrides};
pub use types::{AnswerType, Aspect, ItemKind, ReadingKind};
