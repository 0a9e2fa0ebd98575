//! A single (item, aspect) question and its per-session state.

use crate::answers::{AnswerEvaluator, MatchOptions};
use crate::item::Item;
use crate::types::{AnswerType, Aspect};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Question {
    item: Arc<Item>,
    aspect: Aspect,
    solved: bool,
    wrong_count: u32,
}

impl Question {
    /// `None` when the item has no answers for `aspect`.
    pub fn new(item: Arc<Item>, aspect: Aspect) -> Option<Self> {
        item.evaluator(aspect)?;
        Some(Self {
            item,
            aspect,
            solved: false,
            wrong_count: 0,
        })
    }

    /// One question per aspect of the item.
    pub fn for_item(item: &Arc<Item>) -> Vec<Self> {
        item.aspects()
            .into_iter()
            .filter_map(|aspect| Self::new(Arc::clone(item), aspect))
            .collect()
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn evaluator(&self) -> &AnswerEvaluator {
        match (self.aspect, self.item.readings()) {
            (Aspect::Reading, Some(readings)) => readings,
            // Construction guarantees readings exist for reading questions
            _ => self.item.meanings(),
        }
    }

    /// Classify an answer and update state: `Incorrect` counts a wrong
    /// answer, `Correct` solves the question.
    pub fn solve(&mut self, input: &str, hard_mode: bool) -> AnswerType {
        self.solve_with(input, MatchOptions::hard(hard_mode))
    }

    pub fn solve_with(&mut self, input: &str, options: MatchOptions) -> AnswerType {
        let answer = self.evaluator().classify(input, options);
        match answer {
            AnswerType::Incorrect => self.wrong_count += 1,
            AnswerType::Correct => self.solved = true,
            AnswerType::Inexact | AnswerType::ABitOff => {}
        }
        answer
    }

    pub fn add_wrong_answer(&mut self) {
        self.wrong_count += 1;
    }

    /// Solve after the user validated a near miss or overrode a verdict.
    pub fn mark_solved(&mut self) {
        self.solved = true;
    }

    /// Number of answers expected in hard mode.
    pub fn expected_answers(&self, hard_mode: bool) -> usize {
        if hard_mode && self.aspect == Aspect::Reading {
            self.evaluator().hard_mode_acceptable().len()
        } else {
            1
        }
    }

    /// Prompt text, e.g. `kanji - reading (2 answers): `.
    pub fn prompt_label(&self, hard_mode: bool) -> String {
        let kind = self.item.kind();
        if hard_mode && self.aspect == Aspect::Reading {
            let count = self.expected_answers(true);
            let noun = if count == 1 { "answer" } else { "answers" };
            format!("{kind} - {} ({count} {noun}): ", self.aspect)
        } else {
            format!("{kind} - {}: ", self.aspect)
        }
    }

    /// What an `Inexact` answer should be steered towards: the primary
    /// reading kind, or the aspect itself.
    pub fn wanted(&self) -> String {
        self.evaluator()
            .primary()
            .ok()
            .and_then(|entry| entry.kind)
            .map_or_else(|| self.aspect.to_string(), |kind| kind.to_string())
    }
}
