//! Study items and the question aspects they carry.

use crate::answers::AnswerEvaluator;
use crate::error::Result;
use crate::types::{Aspect, ItemKind};
use serde::{Deserialize, Serialize};

/// Upstream identifier of a study item.
pub type ItemId = u64;

/// Item category together with the answers it legitimately has.
///
/// Radicals only have a meaning; kanji and vocabulary also have a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemCategory {
    Radical {
        meanings: AnswerEvaluator,
    },
    Kanji {
        meanings: AnswerEvaluator,
        readings: AnswerEvaluator,
    },
    Vocabulary {
        meanings: AnswerEvaluator,
        readings: AnswerEvaluator,
    },
}

/// Example sentence shown with vocabulary lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSentence {
    pub ja: String,
    pub en: String,
}

/// An immutable study unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Radicals drawn as images have no characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    pub category: ItemCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning_mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_mnemonic: Option<String>,
    /// Items this one is built from, e.g. the radicals of a kanji.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_sentences: Vec<ContextSentence>,
}

impl Item {
    pub fn new(id: ItemId, characters: Option<String>, category: ItemCategory) -> Self {
        Self {
            id,
            characters,
            category,
            meaning_mnemonic: None,
            reading_mnemonic: None,
            component_ids: Vec::new(),
            context_sentences: Vec::new(),
        }
    }

    pub fn radical(id: ItemId, characters: Option<&str>, meanings: AnswerEvaluator) -> Self {
        Self::new(
            id,
            characters.map(str::to_string),
            ItemCategory::Radical { meanings },
        )
    }

    pub fn kanji(
        id: ItemId,
        characters: &str,
        meanings: AnswerEvaluator,
        readings: AnswerEvaluator,
    ) -> Self {
        Self::new(
            id,
            Some(characters.to_string()),
            ItemCategory::Kanji { meanings, readings },
        )
    }

    pub fn vocabulary(
        id: ItemId,
        characters: &str,
        meanings: AnswerEvaluator,
        readings: AnswerEvaluator,
    ) -> Self {
        Self::new(
            id,
            Some(characters.to_string()),
            ItemCategory::Vocabulary { meanings, readings },
        )
    }

    pub fn with_mnemonics(mut self, meaning: Option<String>, reading: Option<String>) -> Self {
        self.meaning_mnemonic = meaning;
        self.reading_mnemonic = reading;
        self
    }

    pub fn with_components(mut self, component_ids: Vec<ItemId>) -> Self {
        self.component_ids = component_ids;
        self
    }

    pub fn with_context_sentences(mut self, sentences: Vec<ContextSentence>) -> Self {
        self.context_sentences = sentences;
        self
    }

    pub fn kind(&self) -> ItemKind {
        match self.category {
            ItemCategory::Radical { .. } => ItemKind::Radical,
            ItemCategory::Kanji { .. } => ItemKind::Kanji,
            ItemCategory::Vocabulary { .. } => ItemKind::Vocabulary,
        }
    }

    pub fn meanings(&self) -> &AnswerEvaluator {
        match &self.category {
            ItemCategory::Radical { meanings }
            | ItemCategory::Kanji { meanings, .. }
            | ItemCategory::Vocabulary { meanings, .. } => meanings,
        }
    }

    pub fn readings(&self) -> Option<&AnswerEvaluator> {
        match &self.category {
            ItemCategory::Radical { .. } => None,
            ItemCategory::Kanji { readings, .. } | ItemCategory::Vocabulary { readings, .. } => {
                Some(readings)
            }
        }
    }

    pub fn evaluator(&self, aspect: Aspect) -> Option<&AnswerEvaluator> {
        match aspect {
            Aspect::Meaning => Some(self.meanings()),
            Aspect::Reading => self.readings(),
        }
    }

    /// Aspects asked about this item, meaning first.
    pub fn aspects(&self) -> Vec<Aspect> {
        let mut aspects = vec![Aspect::Meaning];
        if self.readings().is_some() {
            aspects.push(Aspect::Reading);
        }
        aspects
    }

    pub fn mnemonic(&self, aspect: Aspect) -> Option<&str> {
        match aspect {
            Aspect::Meaning => self.meaning_mnemonic.as_deref(),
            Aspect::Reading => self.reading_mnemonic.as_deref(),
        }
    }

    /// Text shown when the item is presented.
    pub fn display_characters(&self) -> &str {
        self.characters.as_deref().unwrap_or("?")
    }

    /// Check every answer set has a primary entry.
    pub fn validate(&self) -> Result<()> {
        for aspect in self.aspects() {
            if let Some(evaluator) = self.evaluator(aspect) {
                evaluator.primary()?;
            }
        }
        Ok(())
    }
}
