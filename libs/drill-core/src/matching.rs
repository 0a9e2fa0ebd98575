//! Answer normalization and near-match scoring for typed answers.

/// Similarity ratio at or above which a meaning counts as "a bit off".
pub const CLOSE_MATCH_RATIO: f64 = 0.8;

/// Normalize a typed or stored answer: lowercase and trim.
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Ratcliff/Obershelp similarity between two strings, from 0.0 to 1.0.
///
/// Twice the number of matched characters divided by the total length,
/// where matches are found by repeatedly taking the longest common block
/// and recursing on both sides of it.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0; // Both empty strings are identical
    }

    let matched = matching_characters(&a_chars, &b_chars);
    2.0 * matched as f64 / total as f64
}

/// Return the first candidate whose similarity to `input` reaches `cutoff`.
pub fn close_match<'a, I>(input: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .find(|candidate| sequence_ratio(candidate, input) >= cutoff)
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties resolve to the block that ends first in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);

    // Two rows instead of the full table
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        curr[0] = 0;
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[col - 1] + 1;
                curr[col] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                curr[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
