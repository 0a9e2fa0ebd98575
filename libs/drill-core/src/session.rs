//! Review and lesson session driver.
//!
//! The session owns the queue and runs the answer loop. Terminal input and
//! result submission are reached only through [`Reviewer`] and
//! [`ResultSink`].

use crate::answers::MatchOptions;
use crate::error::Result;
use crate::item::Item;
use crate::queue::{ItemResult, QuestionKey, ReviewQueue};
use crate::question::Question;
use crate::settings::EffectiveSettings;
use crate::types::{AnswerType, Aspect};
use serde::Serialize;

/// Lessons are taught and quizzed this many items at a time.
pub const LESSON_BATCH_SIZE: usize = 3;

/// Interactive side of a session.
pub trait Reviewer {
    /// Show the next question's subject.
    fn present(&mut self, progress: &SessionStats, question: &Question);

    /// Collect one answer. Reading prompts expect kana.
    fn answer(&mut self, prompt: &Prompt) -> Result<String>;

    /// Whether a near miss should count as correct.
    fn accept_close_match(&mut self, _question: &Question) -> Result<bool> {
        Ok(true)
    }

    /// Whether the user insists a wrong answer was right.
    fn claim_correct(&mut self, _question: &Question) -> Result<bool> {
        Ok(false)
    }

    fn feedback(&mut self, feedback: Feedback);

    /// Show a lesson item before it is quizzed.
    fn teach(&mut self, _item: &Item) -> Result<()> {
        Ok(())
    }
}

/// Receives each completed item once.
pub trait ResultSink {
    fn submit(&mut self, result: &ItemResult);
}

impl ResultSink for Vec<ItemResult> {
    fn submit(&mut self, result: &ItemResult) {
        self.push(*result);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: String,
    pub aspect: Aspect,
    /// Answers expected, comma separated, when above one.
    pub expected_answers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// A known answer, but not the one asked for.
    TryAgain { wanted: String },
    /// Close to an accepted answer; confirmation follows.
    CloseMatch { answers: String },
    Incorrect {
        answers: String,
        mnemonic: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total: usize,
    pub completed: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl SessionStats {
    /// Percentage of correct answers, rounded to 2 decimals.
    pub fn correct_rate(&self) -> Option<f64> {
        let answered = self.correct + self.incorrect;
        if answered == 0 {
            return None;
        }
        let rate = self.correct as f64 / answered as f64 * 100.0;
        Some((rate * 100.0).round() / 100.0)
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

/// What the user decided about a classified answer.
enum Verdict {
    Correct,
    Wrong,
}

pub struct ReviewSession<'a, R: ?Sized, S: ?Sized> {
    queue: ReviewQueue,
    settings: EffectiveSettings,
    reviewer: &'a mut R,
    sink: &'a mut S,
    stats: SessionStats,
}

impl<'a, R, S> ReviewSession<'a, R, S>
where
    R: Reviewer + ?Sized,
    S: ResultSink + ?Sized,
{
    /// Build a session over the first `settings.limit` usable items.
    pub fn new(
        items: Vec<Item>,
        settings: EffectiveSettings,
        reviewer: &'a mut R,
        sink: &'a mut S,
    ) -> Self {
        let items = usable_items(items, settings.limit);
        let queue = ReviewQueue::new(items, settings.window_size);
        Self::with_queue(queue, settings, reviewer, sink)
    }

    pub fn with_queue(
        queue: ReviewQueue,
        settings: EffectiveSettings,
        reviewer: &'a mut R,
        sink: &'a mut S,
    ) -> Self {
        let stats = SessionStats {
            total: queue.active_item_count() + queue.backlog_len(),
            ..SessionStats::default()
        };
        Self {
            queue,
            settings,
            reviewer,
            sink,
            stats,
        }
    }

    /// Carry counters over from an earlier session, with `total` spanning
    /// both.
    pub fn continuing(mut self, previous: &SessionStats, total: usize) -> Self {
        self.stats = SessionStats {
            total,
            ..previous.clone()
        };
        self
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Ask questions until every item is completed.
    ///
    /// On error the current question goes back to the front of the queue
    /// unchanged.
    pub fn run(&mut self) -> Result<SessionStats> {
        while let Some(key) = self.queue.pop_next() {
            if let Err(error) = self.ask(key) {
                self.queue.restore(key);
                return Err(error);
            }
        }
        tracing::debug!(
            completed = self.stats.completed,
            correct = self.stats.correct,
            incorrect = self.stats.incorrect,
            "session finished"
        );
        Ok(self.stats.clone())
    }

    fn options(&self) -> MatchOptions {
        MatchOptions {
            hard_mode: self.settings.hard_mode,
            close_match_ratio: self.settings.close_match_ratio,
        }
    }

    /// One question, from prompt to resolution. Nothing is changed until
    /// every answer the outcome depends on has been collected.
    fn ask(&mut self, key: QuestionKey) -> Result<()> {
        let options = self.options();
        let Some(question) = self.queue.question(key) else {
            return Ok(());
        };

        self.reviewer.present(&self.stats, question);
        let prompt = Prompt {
            label: question.prompt_label(options.hard_mode),
            aspect: question.aspect(),
            expected_answers: question.expected_answers(options.hard_mode),
        };

        let (input, answer) = loop {
            let input = self.reviewer.answer(&prompt)?;
            let answer = question.evaluator().classify(&input, options);
            if answer != AnswerType::Inexact {
                break (input, answer);
            }
            self.reviewer.feedback(Feedback::TryAgain {
                wanted: question.wanted(),
            });
        };

        let answers = question.evaluator().answer_values();
        let verdict = match answer {
            AnswerType::Correct => {
                self.reviewer.feedback(Feedback::Correct);
                Verdict::Correct
            }
            AnswerType::ABitOff => {
                self.reviewer.feedback(Feedback::CloseMatch { answers });
                if self.reviewer.accept_close_match(question)? {
                    Verdict::Correct
                } else {
                    Verdict::Wrong
                }
            }
            AnswerType::Incorrect | AnswerType::Inexact => {
                let mnemonic = if self.settings.display_mnemonics {
                    question.item().mnemonic(question.aspect()).map(str::to_string)
                } else {
                    None
                };
                self.reviewer
                    .feedback(Feedback::Incorrect { answers, mnemonic });
                let may_claim = self.settings.double_check && question.aspect() == Aspect::Meaning;
                if may_claim && self.reviewer.claim_correct(question)? {
                    Verdict::Correct
                } else {
                    Verdict::Wrong
                }
            }
        };

        self.apply(key, &input, answer, verdict, options);
        Ok(())
    }

    fn apply(
        &mut self,
        key: QuestionKey,
        input: &str,
        answer: AnswerType,
        verdict: Verdict,
        options: MatchOptions,
    ) {
        let Some(question) = self.queue.question_mut(key) else {
            return;
        };
        question.solve_with(input, options);

        match verdict {
            Verdict::Correct => {
                self.stats.correct += 1;
                if let Some(result) = self.queue.complete(key) {
                    self.stats.completed += 1;
                    self.sink.submit(&result);
                }
            }
            Verdict::Wrong => {
                // Only a rejected near miss is not yet counted by the solve
                if answer == AnswerType::ABitOff {
                    question.add_wrong_answer();
                }
                self.stats.incorrect += 1;
                self.queue.requeue(key);
            }
        }
    }
}

/// Keep the first `limit` items, skipping any with a missing primary answer.
fn usable_items(items: Vec<Item>, limit: usize) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| match item.validate() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(item_id = item.id, %error, "skipping item");
                false
            }
        })
        .take(limit)
        .collect()
}

/// Split lesson items into teaching batches.
pub fn lesson_batches(items: Vec<Item>) -> Vec<Vec<Item>> {
    let mut batches = Vec::new();
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        batches.push(items.by_ref().take(LESSON_BATCH_SIZE).collect());
    }
    batches
}

/// Teach items batch by batch, quizzing each batch before the next.
///
/// The counters are returned alongside the outcome so an interrupted run
/// still reports the batches it got through.
pub fn run_lessons<R, S>(
    items: Vec<Item>,
    settings: &EffectiveSettings,
    reviewer: &mut R,
    sink: &mut S,
) -> (SessionStats, Result<()>)
where
    R: Reviewer + ?Sized,
    S: ResultSink + ?Sized,
{
    let items = usable_items(items, settings.limit);
    let total = items.len();
    let mut stats = SessionStats {
        total,
        ..SessionStats::default()
    };

    for batch in lesson_batches(items) {
        for item in &batch {
            if let Err(error) = reviewer.teach(item) {
                return (stats, Err(error));
            }
        }
        let queue = ReviewQueue::new(batch, settings.window_size);
        let mut session = ReviewSession::with_queue(queue, settings.clone(), reviewer, sink)
            .continuing(&stats, total);
        let outcome = session.run();
        stats = session.stats().clone();
        if let Err(error) = outcome {
            return (stats, Err(error));
        }
    }
    (stats, Ok(()))
}
