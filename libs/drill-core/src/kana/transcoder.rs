//! Incremental romaji-to-kana conversion of a typed buffer.

use super::{hiragana_to_katakana, is_kana, lookup_longest};

/// Accumulates typed Latin characters and renders them as kana.
///
/// The rendering is a pure function of the buffer: lowercase runs become
/// hiragana, uppercase runs become katakana, and letters that do not yet
/// form a syllable are shown as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanaTranscoder {
    latin: String,
}

/// One rendered piece and the number of buffer characters it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Unit {
    text: String,
    consumed: usize,
}

impl Unit {
    fn new(text: impl Into<String>, consumed: usize) -> Self {
        Self {
            text: text.into(),
            consumed,
        }
    }

    fn ends_with_kana(&self) -> bool {
        self.text.chars().next_back().is_some_and(is_kana)
    }
}

impl KanaTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing buffer.
    pub fn from_latin(latin: impl Into<String>) -> Self {
        Self {
            latin: latin.into(),
        }
    }

    /// The raw characters typed so far.
    pub fn latin(&self) -> &str {
        &self.latin
    }

    pub fn is_empty(&self) -> bool {
        self.latin.is_empty()
    }

    pub fn clear(&mut self) {
        self.latin.clear();
    }

    /// Append raw characters; case is significant.
    pub fn append_latin(&mut self, s: &str) {
        self.latin.push_str(s);
    }

    /// Remove the last rendered kana, or one raw character when the
    /// rendering ends in something that is not kana.
    pub fn delete_last(&mut self) {
        let Some(last) = self.units().pop() else {
            return;
        };

        let strip = if last.ends_with_kana() {
            last.consumed
        } else {
            1
        };
        let keep = self.latin.chars().count().saturating_sub(strip);
        let cut = self
            .latin
            .char_indices()
            .nth(keep)
            .map_or(self.latin.len(), |(idx, _)| idx);
        self.latin.truncate(cut);
    }

    /// Render the buffer as kana.
    pub fn render(&self) -> String {
        self.units().into_iter().map(|unit| unit.text).collect()
    }

    fn units(&self) -> Vec<Unit> {
        let chars: Vec<char> = self.latin.chars().collect();
        let mut units = Vec::new();
        for run in split_case_runs(&chars) {
            let uppercase = run.iter().any(|c| c.is_uppercase());
            let converted = convert_run(run);
            if uppercase {
                units.extend(converted.into_iter().map(|unit| Unit {
                    text: hiragana_to_katakana(&unit.text),
                    consumed: unit.consumed,
                }));
            } else {
                units.extend(converted);
            }
        }
        units
    }
}

/// Split into maximal runs of uppercase letters and everything else.
fn split_case_runs(chars: &[char]) -> Vec<&[char]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        if chars[i].is_uppercase() != chars[i - 1].is_uppercase() {
            runs.push(&chars[start..i]);
            start = i;
        }
    }
    if !chars.is_empty() {
        runs.push(&chars[start..]);
    }
    runs
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

/// Convert one case run. Output units are hiragana; leftovers keep the
/// characters as typed.
fn convert_run(run: &[char]) -> Vec<Unit> {
    let lower: Vec<char> = run.iter().flat_map(|c| c.to_lowercase()).collect();
    // Case folding of ASCII letters keeps lengths aligned; anything that
    // would not is passed through untouched.
    let lower = if lower.len() == run.len() {
        lower
    } else {
        run.to_vec()
    };

    let mut units = Vec::new();
    let mut i = 0;
    while i < lower.len() {
        if let Some((len, kana)) = lookup_longest(&lower[i..]) {
            units.push(Unit::new(kana, len));
            i += len;
            continue;
        }

        let c = lower[i];
        let next = lower.get(i + 1).copied();

        // Sokuon: a doubled consonant (or "tch") before a complete syllable
        let doubles = next == Some(c) || (c == 't' && next == Some('c'));
        if is_consonant(c) && c != 'n' && doubles && lookup_longest(&lower[i + 1..]).is_some() {
            units.push(Unit::new("っ", 1));
            i += 1;
            continue;
        }

        // Hatsuon: n that cannot start a syllable
        if c == 'n' && next.map_or(true, |n| !is_vowel(n) && n != 'y') {
            units.push(Unit::new("ん", 1));
            i += 1;
            continue;
        }

        units.push(Unit::new(run[i], 1));
        i += 1;
    }
    units
}
