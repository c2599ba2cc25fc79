/*!
 * Similarity scoring for normalized strings.
 *
 * The positional scorer is the canonical one: it compares characters index by
 * index and is only meant to catch near-identical answers. The Levenshtein
 * scorer tolerates insertions and deletions and can be selected through
 * configuration.
 *
 * Both functions expect input that has already been through
 * [`normalize`](super::normalize::normalize) and both work on Unicode scalar
 * values, not bytes.
 */

use serde::{Deserialize, Serialize};

/// Which similarity function a checker should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityAlgorithm {
    /// Character-by-character comparison over the shorter length
    #[default]
    Positional,
    /// Normalized edit distance
    Levenshtein,
}

impl SimilarityAlgorithm {
    /// Score two normalized strings with this algorithm
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::Positional => positional_similarity(a, b),
            Self::Levenshtein => levenshtein_similarity(a, b),
        }
    }
}

impl std::fmt::Display for SimilarityAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

impl std::str::FromStr for SimilarityAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "levenshtein" => Ok(Self::Levenshtein),
            _ => Err(anyhow::anyhow!("Invalid similarity algorithm: {}", s)),
        }
    }
}

/// Canonical similarity between two normalized strings (positional)
pub fn similarity(a: &str, b: &str) -> f64 {
    positional_similarity(a, b)
}

/// Positional similarity ratio in [0, 1]
///
/// Counts the indices below `min(len(a), len(b))` where both strings hold the
/// same character and divides by `max(len(a), len(b))`. Two empty strings are
/// identical. Any length difference or mid-string shift costs heavily.
pub fn positional_similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let max_len = a_len.max(b_len);

    if max_len == 0 {
        return 1.0;
    }

    let matches = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca == cb)
        .count();

    matches as f64 / max_len as f64
}

/// Levenshtein similarity ratio in [0, 1]
///
/// `1 - distance / max(len(a), len(b))`, with two empty strings scoring 1.0.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Two rows are enough
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr_row[0] = i;

        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
