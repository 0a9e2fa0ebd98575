//! Factory functions for study items used across integration tests.

use drill_core::{AnswerEntry, AnswerEvaluator, Aspect, Item, ItemId, ReadingKind};

pub fn meanings(entries: Vec<AnswerEntry>) -> AnswerEvaluator {
    AnswerEvaluator::new(Aspect::Meaning, entries)
}

pub fn readings(entries: Vec<AnswerEntry>) -> AnswerEvaluator {
    AnswerEvaluator::new(Aspect::Reading, entries)
}

/// 一: "one", onyomi いち, with the kunyomi and nanori known but rejected.
pub fn ichi(id: ItemId) -> Item {
    Item::kanji(
        id,
        "一",
        meanings(vec![AnswerEntry::primary("One")]),
        readings(vec![
            AnswerEntry::primary("いち").with_kind(ReadingKind::Onyomi),
            AnswerEntry::rejected("ひと").with_kind(ReadingKind::Kunyomi),
            AnswerEntry::rejected("かず").with_kind(ReadingKind::Nanori),
        ]),
    )
    .with_mnemonics(
        Some("Lying on the <radical>ground</radical> is one.".to_string()),
        Some("<reading>Itchy</reading> back.".to_string()),
    )
}

/// 何: two accepted readings and one rejected.
pub fn nani(id: ItemId) -> Item {
    Item::vocabulary(
        id,
        "何",
        meanings(vec![AnswerEntry::primary("What")]),
        readings(vec![
            AnswerEntry::primary("なに").with_kind(ReadingKind::Kunyomi),
            AnswerEntry::accepted("なん").with_kind(ReadingKind::Kunyomi),
            AnswerEntry::rejected("はははは"),
        ]),
    )
}

/// A radical with a meaning only.
pub fn ground(id: ItemId) -> Item {
    Item::radical(
        id,
        Some("一"),
        meanings(vec![AnswerEntry::primary("Ground")]),
    )
}

/// A radical whose answer set has no primary entry.
pub fn broken(id: ItemId) -> Item {
    Item::radical(id, None, meanings(vec![AnswerEntry::accepted("gun")]))
}
