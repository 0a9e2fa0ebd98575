//! Answer sets and answer classification.

use crate::error::{DrillError, Result};
use crate::kana::{is_katakana, katakana_to_hiragana};
use crate::matching::{close_match, normalize_answer, CLOSE_MATCH_RATIO};
use crate::types::{AnswerType, Aspect, ReadingKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One acceptable or known-but-rejected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    /// Normalized answer text.
    pub value: String,
    pub primary: bool,
    pub accepted: bool,
    /// Reading sub-kind; always `None` for meanings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReadingKind>,
}

impl AnswerEntry {
    pub fn new(value: &str, primary: bool, accepted: bool) -> Self {
        Self {
            value: normalize_answer(value),
            primary,
            accepted,
            kind: None,
        }
    }

    /// The canonical answer; also accepted.
    pub fn primary(value: &str) -> Self {
        Self::new(value, true, true)
    }

    pub fn accepted(value: &str) -> Self {
        Self::new(value, false, true)
    }

    /// A known answer for the item that is not accepted for this question.
    pub fn rejected(value: &str) -> Self {
        Self::new(value, false, false)
    }

    pub fn with_kind(mut self, kind: ReadingKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Options controlling how strictly an answer is judged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Require every reading, comma separated, and katakana where due.
    pub hard_mode: bool,
    /// Similarity at or above which a meaning is "a bit off".
    pub close_match_ratio: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            hard_mode: false,
            close_match_ratio: CLOSE_MATCH_RATIO,
        }
    }
}

impl MatchOptions {
    pub fn hard(hard_mode: bool) -> Self {
        Self {
            hard_mode,
            ..Self::default()
        }
    }
}

/// The answers for one aspect of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluator {
    aspect: Aspect,
    entries: Vec<AnswerEntry>,
}

impl AnswerEvaluator {
    pub fn new(aspect: Aspect, entries: Vec<AnswerEntry>) -> Self {
        Self { aspect, entries }
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn entries(&self) -> &[AnswerEntry] {
        &self.entries
    }

    /// The canonical answer.
    pub fn primary(&self) -> Result<&AnswerEntry> {
        self.entries
            .iter()
            .find(|entry| entry.primary)
            .ok_or(DrillError::NoPrimaryAnswer {
                aspect: self.aspect,
            })
    }

    pub fn acceptable(&self) -> Vec<&AnswerEntry> {
        self.entries.iter().filter(|entry| entry.accepted).collect()
    }

    pub fn unacceptable(&self) -> Vec<&AnswerEntry> {
        self.entries.iter().filter(|entry| !entry.accepted).collect()
    }

    /// Acceptable answers in hard mode.
    ///
    /// A reading with exactly two acceptable answers that sound the same
    /// (one katakana, one hiragana) only accepts the spelling that starts
    /// with katakana.
    pub fn hard_mode_acceptable(&self) -> Vec<&AnswerEntry> {
        let answers = self.acceptable();
        if self.aspect != Aspect::Reading || answers.len() != 2 {
            return answers;
        }

        let same_sound =
            katakana_to_hiragana(&answers[0].value) == katakana_to_hiragana(&answers[1].value);
        if !same_sound {
            return answers;
        }

        if let Some(katakana) = answers
            .iter()
            .copied()
            .find(|entry| entry.value.chars().next().is_some_and(is_katakana))
        {
            return vec![katakana];
        }
        answers
    }

    /// Acceptable values joined for display.
    pub fn answer_values(&self) -> String {
        self.acceptable()
            .iter()
            .map(|entry| entry.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Classify an answer with the default near-match ratio.
    pub fn solve(&self, input: &str, hard_mode: bool) -> AnswerType {
        self.classify(input, MatchOptions::hard(hard_mode))
    }

    /// Classify an answer.
    pub fn classify(&self, input: &str, options: MatchOptions) -> AnswerType {
        let input = normalize_answer(input);

        let answer = if options.hard_mode && self.aspect == Aspect::Reading {
            self.classify_all_readings(&input)
        } else {
            self.classify_single(&input, options.close_match_ratio)
        };

        tracing::trace!(aspect = %self.aspect, input = %input, answer = answer.as_str(), "classified answer");
        answer
    }

    fn classify_single(&self, input: &str, close_match_ratio: f64) -> AnswerType {
        let acceptable = self.acceptable();

        if acceptable.iter().any(|entry| entry.value == input) {
            return AnswerType::Correct;
        }

        // Near matches only make sense for meanings
        if self.aspect == Aspect::Meaning
            && close_match(
                input,
                acceptable.iter().map(|entry| entry.value.as_str()),
                close_match_ratio,
            )
            .is_some()
        {
            return AnswerType::ABitOff;
        }

        if self.unacceptable().iter().any(|entry| entry.value == input) {
            return AnswerType::Inexact;
        }

        AnswerType::Incorrect
    }

    fn classify_all_readings(&self, input: &str) -> AnswerType {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();

        let wanted = self.hard_mode_acceptable();
        let want: HashSet<&str> = wanted.iter().map(|entry| entry.value.as_str()).collect();
        let given: HashSet<&str> = parts.iter().copied().collect();

        if given == want {
            return AnswerType::Correct;
        }

        let known = |part: &&str| {
            want.contains(*part)
                || self
                    .unacceptable()
                    .iter()
                    .any(|entry| entry.value == **part)
        };
        if parts.len() == wanted.len() && parts.iter().all(known) {
            return AnswerType::Inexact;
        }

        AnswerType::Incorrect
    }
}
