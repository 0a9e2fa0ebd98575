//! Kana input and script helpers.
//!
//! Typed Latin letters are converted to kana as the user types: lowercase
//! runs become hiragana, uppercase runs become katakana.

mod table;
mod transcoder;

pub use transcoder::KanaTranscoder;

use std::collections::HashMap;
use std::sync::OnceLock;

use table::{MAX_KEY_LEN, ROMAJI_TABLE};

fn romaji_map() -> &'static HashMap<&'static str, &'static str> {
    static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    INSTANCE.get_or_init(|| ROMAJI_TABLE.iter().copied().collect())
}

/// Longest table entry at the start of `chars`, as (latin length, hiragana).
pub(crate) fn lookup_longest(chars: &[char]) -> Option<(usize, &'static str)> {
    let map = romaji_map();
    let max = chars.len().min(MAX_KEY_LEN);
    (1..=max).rev().find_map(|len| {
        let key: String = chars[..len].iter().collect();
        map.get(key.as_str()).map(|kana| (len, *kana))
    })
}

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30FA}').contains(&c)
}

/// A hiragana or katakana letter. The long vowel mark is not a letter.
pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// Whether typed reading input is ready to submit: kana, commas and
/// long vowel marks only.
pub fn is_kana_answer(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_kana(c) || c == ',' || c == 'ー')
}

pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_hiragana(c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Fold katakana to hiragana so both spellings of a sound compare equal.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

pub fn contains_katakana(s: &str) -> bool {
    s.chars().any(is_katakana)
}
