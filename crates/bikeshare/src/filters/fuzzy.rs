//! Similarity scoring for typo correction.
//!
//! Scores are the Ratcliff/Obershelp ratio `2 * M / T`, where `T` is the
//! combined length of both strings and `M` the number of characters in the
//! matching blocks found by repeatedly taking the longest common substring
//! and recursing on either side of it.

use std::cmp::Ordering;

/// A valid value that is close to the user's input.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

/// Similarity between two strings in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Candidates scoring at least `cutoff` against `word`, best first.
///
/// Equal scores are ordered by the candidate, larger first. At most `limit`
/// matches are returned; an empty vector simply means nothing was close.
pub fn close_matches<'a>(
    word: &str,
    candidates: &[&'a str],
    limit: usize,
    cutoff: f64,
) -> Vec<CloseMatch<'a>> {
    let mut matches: Vec<CloseMatch<'a>> = candidates
        .iter()
        .map(|&candidate| CloseMatch {
            candidate,
            score: similarity(candidate, word),
        })
        .filter(|m| m.score >= cutoff)
        .collect();

    matches.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| y.candidate.cmp(x.candidate))
    });
    matches.truncate(limit);
    matches
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Among runs of equal length the one starting earliest in `a` wins, then
/// the one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    // run length of matches ending at b[j - 1] for the previous row of `a`
    let mut prev = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        let mut curr = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let len = prev[j - blo] + 1;
            curr[j - blo + 1] = len;
            if len > best_len {
                best_i = i + 1 - len;
                best_j = j + 1 - len;
                best_len = len;
            }
        }
        prev = curr;
    }

    (best_i, best_j, best_len)
}
