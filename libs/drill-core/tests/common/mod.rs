//! Common test utilities for integration tests.
//!
//! `ScriptedReviewer` plays back answers per question so sessions can run
//! without a terminal, whatever order the queue shuffles them into.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::{HashMap, VecDeque};

use drill_core::{
    Aspect, DrillError, Feedback, Item, ItemId, Prompt, Question, Result, Reviewer, SessionStats,
};

#[derive(Debug, Default)]
pub struct ScriptedReviewer {
    answers: HashMap<(ItemId, Aspect), VecDeque<String>>,
    current: Option<(ItemId, Aspect)>,
    pub accept_close_matches: bool,
    pub claim_correct: bool,
    pub prompts: Vec<Prompt>,
    pub feedback: Vec<Feedback>,
    pub taught: Vec<ItemId>,
    pub presented: usize,
}

impl ScriptedReviewer {
    pub fn new() -> Self {
        Self {
            accept_close_matches: true,
            ..Self::default()
        }
    }

    /// Queue answers for one question, in the order they will be typed.
    pub fn script(mut self, item_id: ItemId, aspect: Aspect, answers: &[&str]) -> Self {
        self.answers
            .entry((item_id, aspect))
            .or_default()
            .extend(answers.iter().map(|answer| answer.to_string()));
        self
    }

    pub fn rejecting_close_matches(mut self) -> Self {
        self.accept_close_matches = false;
        self
    }

    pub fn claiming_correct(mut self) -> Self {
        self.claim_correct = true;
        self
    }
}

impl Reviewer for ScriptedReviewer {
    fn present(&mut self, _progress: &SessionStats, question: &Question) {
        self.presented += 1;
        self.current = Some((question.item().id, question.aspect()));
    }

    /// Runs out of answers like a user pressing Ctrl-C.
    fn answer(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts.push(prompt.clone());
        self.current
            .and_then(|key| self.answers.get_mut(&key))
            .and_then(VecDeque::pop_front)
            .ok_or(DrillError::Interrupted)
    }

    fn accept_close_match(&mut self, _question: &Question) -> Result<bool> {
        Ok(self.accept_close_matches)
    }

    fn claim_correct(&mut self, _question: &Question) -> Result<bool> {
        Ok(self.claim_correct)
    }

    fn feedback(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    fn teach(&mut self, item: &Item) -> Result<()> {
        self.taught.push(item.id);
        Ok(())
    }
}
