//! Bounded-window review scheduler.
//!
//! Items are drawn from a backlog into an active window of at most
//! `window_size` items. Every unsolved question of an active item is either
//! waiting in the shuffled queue or checked out by the caller.

use crate::item::{Item, ItemId};
use crate::question::Question;
use crate::types::Aspect;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Default number of concurrently active items.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Identifies one question in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub item_id: ItemId,
    pub aspect: Aspect,
}

/// Wrong answer counts of a fully solved item, ready for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    pub item_id: ItemId,
    pub meaning_wrong: u32,
    pub reading_wrong: u32,
}

#[derive(Debug)]
pub struct ReviewQueue {
    window_size: usize,
    backlog: VecDeque<Arc<Item>>,
    active: HashMap<ItemId, Vec<Question>>,
    pending: VecDeque<QuestionKey>,
    rng: StdRng,
}

impl ReviewQueue {
    pub fn new(items: impl IntoIterator<Item = Item>, window_size: usize) -> Self {
        Self::with_rng(items, window_size, StdRng::from_os_rng())
    }

    /// Deterministic ordering for a given seed.
    pub fn seeded(items: impl IntoIterator<Item = Item>, window_size: usize, seed: u64) -> Self {
        Self::with_rng(items, window_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(items: impl IntoIterator<Item = Item>, window_size: usize, rng: StdRng) -> Self {
        let mut queue = Self {
            window_size: window_size.max(1),
            backlog: items.into_iter().map(Arc::new).collect(),
            active: HashMap::new(),
            pending: VecDeque::new(),
            rng,
        };
        queue.rebuild();
        queue
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Pull backlog items into the window until it is full, then shuffle.
    pub fn rebuild(&mut self) {
        let mut added = 0;
        while self.active.len() < self.window_size {
            let Some(item) = self.backlog.pop_front() else {
                break;
            };
            if self.active.contains_key(&item.id) {
                tracing::warn!(item_id = item.id, "skipping duplicate item");
                continue;
            }
            let questions = Question::for_item(&item);
            if questions.is_empty() {
                continue;
            }
            self.pending.extend(questions.iter().map(|question| QuestionKey {
                item_id: item.id,
                aspect: question.aspect(),
            }));
            self.active.insert(item.id, questions);
            added += 1;
        }
        self.shuffle();

        tracing::debug!(
            added,
            active = self.active.len(),
            backlog = self.backlog.len(),
            pending = self.pending.len(),
            "rebuilt review queue"
        );
    }

    /// Uniformly permute the waiting questions.
    pub fn shuffle(&mut self) {
        self.pending.make_contiguous().shuffle(&mut self.rng);
    }

    /// Check out the next question. It stays active until it is
    /// completed, requeued or restored.
    pub fn pop_next(&mut self) -> Option<QuestionKey> {
        self.pending.pop_front()
    }

    /// Return a checked-out question to the front untouched.
    pub fn restore(&mut self, key: QuestionKey) {
        if self.question(key).is_some() {
            self.pending.push_front(key);
        }
    }

    /// Shuffle, then put the question at the back.
    pub fn requeue(&mut self, key: QuestionKey) {
        self.shuffle();
        if self.question(key).is_some() {
            self.pending.push_back(key);
            tracing::debug!(item_id = key.item_id, aspect = %key.aspect, "requeued question");
        }
    }

    pub fn question(&self, key: QuestionKey) -> Option<&Question> {
        self.active
            .get(&key.item_id)?
            .iter()
            .find(|question| question.aspect() == key.aspect)
    }

    pub fn question_mut(&mut self, key: QuestionKey) -> Option<&mut Question> {
        self.active
            .get_mut(&key.item_id)?
            .iter_mut()
            .find(|question| question.aspect() == key.aspect)
    }

    /// Solve a checked-out question. When that finishes its item, the
    /// item leaves the window, the window is refilled and the item's
    /// result is returned.
    pub fn complete(&mut self, key: QuestionKey) -> Option<ItemResult> {
        let question = self.question_mut(key)?;
        question.mark_solved();

        let done = self
            .active
            .get(&key.item_id)
            .is_some_and(|questions| questions.iter().all(Question::is_solved));
        if !done {
            return None;
        }

        let questions = self.active.remove(&key.item_id)?;
        let wrong = |aspect: Aspect| {
            questions
                .iter()
                .find(|question| question.aspect() == aspect)
                .map_or(0, Question::wrong_count)
        };
        let result = ItemResult {
            item_id: key.item_id,
            meaning_wrong: wrong(Aspect::Meaning),
            reading_wrong: wrong(Aspect::Reading),
        };
        tracing::debug!(
            item_id = result.item_id,
            meaning_wrong = result.meaning_wrong,
            reading_wrong = result.reading_wrong,
            "item completed"
        );

        self.rebuild();
        Some(result)
    }

    /// Items in the window, including those with a checked-out question.
    pub fn active_item_count(&self) -> usize {
        self.active.len()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Questions waiting to be asked.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// No active items remain and the backlog is exhausted.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.backlog.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &QuestionKey> {
        self.pending.iter()
    }
}
