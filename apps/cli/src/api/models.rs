//! Wire types of the study API and their conversion into engine items.

use chrono::{DateTime, Local, Utc};
use drill_core::{
    AnswerEntry, AnswerEvaluator, Aspect, ContextSentence, Item, ItemCategory, ItemId, ItemKind,
    ReadingKind,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Paginated collection envelope.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pages: Option<Pages>,
}

#[derive(Debug, Deserialize)]
pub struct Pages {
    pub next_url: Option<String>,
}

// === Summary ===

#[derive(Debug, Deserialize)]
pub struct SummaryReport {
    pub data: SummaryData,
}

#[derive(Debug, Deserialize)]
pub struct SummaryData {
    pub lessons: Vec<Bucket>,
    pub reviews: Vec<Bucket>,
}

/// Subjects that become available at a given time.
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub available_at: DateTime<Utc>,
    pub subject_ids: Vec<ItemId>,
}

impl SummaryReport {
    /// Lessons available now.
    pub fn lesson_ids(&self) -> &[ItemId] {
        self.data
            .lessons
            .first()
            .map(|bucket| bucket.subject_ids.as_slice())
            .unwrap_or_default()
    }

    /// Reviews available now.
    pub fn review_ids(&self) -> &[ItemId] {
        self.data
            .reviews
            .first()
            .map(|bucket| bucket.subject_ids.as_slice())
            .unwrap_or_default()
    }

    /// Non-empty upcoming review buckets falling on `today` in local time.
    pub fn upcoming_today(&self, today: chrono::NaiveDate) -> Vec<(DateTime<Local>, usize)> {
        self.data
            .reviews
            .iter()
            .skip(1)
            .filter(|bucket| !bucket.subject_ids.is_empty())
            .map(|bucket| (bucket.available_at.with_timezone(&Local), bucket.subject_ids.len()))
            .filter(|(at, _)| at.date_naive() == today)
            .collect()
    }
}

// === Subjects ===

#[derive(Debug, Deserialize)]
pub struct SubjectResource {
    pub id: ItemId,
    pub object: String,
    pub data: SubjectData,
}

#[derive(Debug, Deserialize)]
pub struct SubjectData {
    pub characters: Option<String>,
    pub meanings: Vec<ApiMeaning>,
    #[serde(default)]
    pub auxiliary_meanings: Vec<ApiAuxiliaryMeaning>,
    #[serde(default)]
    pub readings: Vec<ApiReading>,
    #[serde(default)]
    pub meaning_mnemonic: Option<String>,
    #[serde(default)]
    pub reading_mnemonic: Option<String>,
    #[serde(default)]
    pub component_subject_ids: Vec<ItemId>,
    #[serde(default)]
    pub context_sentences: Vec<ApiContextSentence>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMeaning {
    pub meaning: String,
    pub primary: bool,
    pub accepted_answer: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiAuxiliaryMeaning {
    pub meaning: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiReading {
    pub reading: String,
    pub primary: bool,
    pub accepted_answer: bool,
    /// Only kanji readings carry a type.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiContextSentence {
    pub en: String,
    pub ja: String,
}

impl SubjectResource {
    pub fn into_item(self) -> Result<Item> {
        let kind = ItemKind::from_str(&self.object).ok_or_else(|| ApiError::UnknownSubject {
            id: self.id,
            object: self.object.clone(),
        })?;
        let data = self.data;

        let mut meanings: Vec<AnswerEntry> = data
            .meanings
            .iter()
            .map(|m| AnswerEntry::new(&m.meaning, m.primary, m.accepted_answer))
            .collect();
        meanings.extend(data.auxiliary_meanings.iter().filter_map(|aux| {
            match aux.kind.as_str() {
                "whitelist" => Some(AnswerEntry::accepted(&aux.meaning)),
                "blacklist" => Some(AnswerEntry::rejected(&aux.meaning)),
                _ => None,
            }
        }));
        let meanings = AnswerEvaluator::new(Aspect::Meaning, meanings);

        let readings = AnswerEvaluator::new(
            Aspect::Reading,
            data.readings
                .iter()
                .map(|r| {
                    let entry = AnswerEntry::new(&r.reading, r.primary, r.accepted_answer);
                    match r.kind.as_deref().and_then(ReadingKind::from_str) {
                        Some(kind) => entry.with_kind(kind),
                        None => entry,
                    }
                })
                .collect(),
        );

        let category = match kind {
            ItemKind::Radical => ItemCategory::Radical { meanings },
            ItemKind::Kanji => ItemCategory::Kanji { meanings, readings },
            ItemKind::Vocabulary => ItemCategory::Vocabulary { meanings, readings },
        };

        Ok(Item::new(self.id, data.characters, category)
            .with_mnemonics(data.meaning_mnemonic, data.reading_mnemonic)
            .with_components(data.component_subject_ids)
            .with_context_sentences(
                data.context_sentences
                    .into_iter()
                    .map(|s| ContextSentence { ja: s.ja, en: s.en })
                    .collect(),
            ))
    }
}

// === Submissions ===

#[derive(Debug, Serialize)]
pub struct CreateReviewRequest {
    pub review: ReviewBody,
}

#[derive(Debug, Serialize)]
pub struct ReviewBody {
    pub subject_id: ItemId,
    pub incorrect_meaning_answers: u32,
    pub incorrect_reading_answers: u32,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentResource {
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kanji_json() -> serde_json::Value {
        json!({
            "id": 440,
            "object": "kanji",
            "url": "https://api.wanikani.com/v2/subjects/440",
            "data": {
                "level": 1,
                "characters": "一",
                "meanings": [
                    {"meaning": "One", "primary": true, "accepted_answer": true}
                ],
                "auxiliary_meanings": [{"type": "whitelist", "meaning": "1"}],
                "readings": [
                    {"type": "onyomi", "primary": true, "accepted_answer": true, "reading": "いち"},
                    {"type": "kunyomi", "primary": false, "accepted_answer": false, "reading": "ひと"},
                    {"type": "nanori", "primary": false, "accepted_answer": false, "reading": "かず"}
                ],
                "component_subject_ids": [1],
                "meaning_mnemonic": "Lying on the <radical>ground</radical> is <kanji>One</kanji>.",
                "reading_mnemonic": "Extremely <reading>itchy</reading> (いち)."
            }
        })
    }

    #[test]
    fn test_kanji_subject_into_item() {
        let resource: SubjectResource = serde_json::from_value(kanji_json()).unwrap();
        let item = resource.into_item().unwrap();

        assert_eq!(item.id, 440);
        assert_eq!(item.kind(), ItemKind::Kanji);
        assert_eq!(item.display_characters(), "一");
        assert_eq!(item.component_ids, vec![1]);
        assert_eq!(item.meanings().answer_values(), "one, 1");

        let readings = item.readings().unwrap();
        assert_eq!(readings.answer_values(), "いち");
        assert_eq!(readings.unacceptable().len(), 2);
        assert_eq!(readings.primary().unwrap().kind, Some(ReadingKind::Onyomi));
    }

    #[test]
    fn test_radical_without_characters() {
        let resource: SubjectResource = serde_json::from_value(json!({
            "id": 8762,
            "object": "radical",
            "data": {
                "characters": null,
                "meanings": [{"meaning": "Gun", "primary": true, "accepted_answer": true}],
                "auxiliary_meanings": [{"type": "blacklist", "meaning": "Pistol"}],
                "meaning_mnemonic": "A <radical>gun</radical>."
            }
        }))
        .unwrap();
        let item = resource.into_item().unwrap();

        assert_eq!(item.kind(), ItemKind::Radical);
        assert_eq!(item.characters, None);
        assert!(item.readings().is_none());
        assert_eq!(item.meanings().unacceptable()[0].value, "pistol");
    }

    #[test]
    fn test_vocabulary_readings_without_type() {
        let resource: SubjectResource = serde_json::from_value(json!({
            "id": 2467,
            "object": "vocabulary",
            "data": {
                "characters": "一",
                "meanings": [{"meaning": "One", "primary": true, "accepted_answer": true}],
                "readings": [{"primary": true, "accepted_answer": true, "reading": "いち"}],
                "context_sentences": [{"en": "One more, please.", "ja": "もう一つください。"}]
            }
        }))
        .unwrap();
        let item = resource.into_item().unwrap();

        assert_eq!(item.kind(), ItemKind::Vocabulary);
        assert_eq!(item.readings().unwrap().primary().unwrap().kind, None);
        assert_eq!(item.context_sentences.len(), 1);
        assert_eq!(item.context_sentences[0].ja, "もう一つください。");
    }

    #[test]
    fn test_unknown_subject_type() {
        let resource: SubjectResource = serde_json::from_value(json!({
            "id": 9210,
            "object": "kana_vocabulary",
            "data": {
                "characters": "ある",
                "meanings": [{"meaning": "To Be", "primary": true, "accepted_answer": true}]
            }
        }))
        .unwrap();
        assert!(matches!(
            resource.into_item(),
            Err(ApiError::UnknownSubject { id: 9210, .. })
        ));
    }

    #[test]
    fn test_summary_buckets() {
        let report: SummaryReport = serde_json::from_value(json!({
            "object": "report",
            "data": {
                "lessons": [
                    {"available_at": "2018-04-11T00:00:00.000000Z", "subject_ids": [25, 26]}
                ],
                "next_reviews_at": "2018-04-11T11:00:00.000000Z",
                "reviews": [
                    {"available_at": "2018-04-11T00:00:00.000000Z", "subject_ids": [21, 23, 24]},
                    {"available_at": "2018-04-11T10:00:00.000000Z", "subject_ids": [27, 28, 29]},
                    {"available_at": "2018-04-11T13:00:00.000000Z", "subject_ids": []},
                    {"available_at": "2018-04-11T15:00:00.000000Z", "subject_ids": [30, 31]}
                ]
            }
        }))
        .unwrap();

        assert_eq!(report.lesson_ids(), &[25, 26]);
        assert_eq!(report.review_ids(), &[21, 23, 24]);

        let day = Utc
            .with_ymd_and_hms(2018, 4, 11, 10, 0, 0)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        let counts: Vec<usize> = report
            .upcoming_today(day)
            .into_iter()
            .map(|(_, count)| count)
            .collect();
        assert!(counts.contains(&3));
        assert!(!counts.contains(&0));
    }

    #[test]
    fn test_empty_summary() {
        let report: SummaryReport =
            serde_json::from_value(json!({"data": {"lessons": [], "reviews": []}})).unwrap();
        assert!(report.lesson_ids().is_empty());
        assert!(report.review_ids().is_empty());
    }

    #[test]
    fn test_review_request_shape() {
        let request = CreateReviewRequest {
            review: ReviewBody {
                subject_id: 440,
                incorrect_meaning_answers: 1,
                incorrect_reading_answers: 0,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "review": {
                    "subject_id": 440,
                    "incorrect_meaning_answers": 1,
                    "incorrect_reading_answers": 0
                }
            })
        );
    }

    #[test]
    fn test_paginated_collection() {
        let page: Collection<AssignmentResource> = serde_json::from_value(json!({
            "object": "collection",
            "pages": {"per_page": 500, "next_url": null, "previous_url": null},
            "data": [{"id": 80463006, "object": "assignment", "data": {}}]
        }))
        .unwrap();
        assert_eq!(page.data[0].id, 80463006);
        assert!(page.pages.and_then(|p| p.next_url).is_none());
    }
}
