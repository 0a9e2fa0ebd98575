//! Property-based tests for the transcoder and the review queue.

mod common;

use std::collections::HashSet;

use common::fixtures::{ground, ichi};
use drill_core::{Item, KanaTranscoder, ReviewQueue};
use proptest::prelude::*;

fn arb_typed_char() -> impl Strategy<Value = char> {
    // Vowels and n at higher weight for more realistic romaji
    prop_oneof![
        4 => prop::sample::select(vec!['a', 'i', 'u', 'e', 'o', 'n']),
        3 => prop::sample::select(vec![
            'k', 's', 't', 'h', 'm', 'y', 'r', 'w', 'g', 'z', 'd', 'b', 'p', 'c', 'f', 'j',
            'l', 'v', 'x', 'q',
        ]),
        2 => prop::sample::select(vec!['A', 'K', 'S', 'T', 'N', 'O', 'Y']),
        1 => prop::sample::select(vec!['-', ',', '\'']),
    ]
}

fn arb_typed() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_typed_char(), 0..16).prop_map(|chars| chars.into_iter().collect())
}

fn items(count: usize) -> Vec<Item> {
    (1..=count as u64)
        .map(|id| if id % 3 == 0 { ground(id) } else { ichi(id) })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn deleting_once_per_rendered_char_empties(typed in arb_typed()) {
        let mut transcoder = KanaTranscoder::new();
        transcoder.append_latin(&typed);
        let rendered = transcoder.render().chars().count();
        for _ in 0..rendered {
            transcoder.delete_last();
        }
        prop_assert_eq!(transcoder.render(), "");
        prop_assert!(transcoder.is_empty());
    }

    #[test]
    fn render_is_pure(typed in arb_typed()) {
        let transcoder = KanaTranscoder::from_latin(typed.clone());
        let first = transcoder.render();
        prop_assert_eq!(transcoder.render(), first);
        prop_assert_eq!(transcoder.latin(), typed.as_str());
    }

    #[test]
    fn incremental_typing_matches_whole_buffer(typed in arb_typed()) {
        let mut transcoder = KanaTranscoder::new();
        for c in typed.chars() {
            transcoder.append_latin(&c.to_string());
        }
        prop_assert_eq!(transcoder.render(), KanaTranscoder::from_latin(typed).render());
    }

    #[test]
    fn lowercase_never_renders_katakana(typed in "[a-z,'-]{0,16}") {
        let rendered = KanaTranscoder::from_latin(typed).render();
        prop_assert!(!drill_core::kana::contains_katakana(&rendered));
    }

    #[test]
    fn queue_window_stays_bounded(
        count in 0usize..40,
        window in 1usize..12,
        seed in any::<u64>(),
        outcomes in prop::collection::vec(any::<bool>(), 0..200),
    ) {
        let mut queue = ReviewQueue::seeded(items(count), window, seed);
        let mut outcomes = outcomes.into_iter();
        let mut completed = HashSet::new();

        prop_assert!(queue.active_item_count() <= window);
        while let Some(key) = queue.pop_next() {
            // Once the scripted outcomes run out every answer is right
            if outcomes.next().unwrap_or(true) {
                if let Some(result) = queue.complete(key) {
                    prop_assert!(completed.insert(result.item_id));
                    if queue.backlog_len() > 0 {
                        prop_assert_eq!(queue.active_item_count(), window);
                    }
                }
            } else {
                queue.requeue(key);
            }
            prop_assert!(queue.active_item_count() <= window);
        }

        prop_assert_eq!(completed.len(), count);
        prop_assert!(queue.is_empty());
    }
}
