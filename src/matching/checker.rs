/*!
 * Pronunciation checking.
 *
 * Classifies a recognized utterance against an expected item. The checks run
 * in a fixed order and the first one that succeeds decides the result:
 *
 * 1. exact match of the normalized forms
 * 2. exact match against an accepted alternate, in order
 * 3. containment in either direction (`partial`)
 * 4. similarity at or above the threshold
 * 5. otherwise `none`, still carrying the computed similarity
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::similarity::SimilarityAlgorithm;

/// Anything that carries the Arabic form of an expected answer
pub trait ArabicText {
    /// The Arabic script form
    fn ar(&self) -> &str;

    /// Spellings accepted as equally correct
    fn alternates(&self) -> &[String] {
        &[]
    }
}

impl ArabicText for str {
    fn ar(&self) -> &str {
        self
    }
}

impl ArabicText for String {
    fn ar(&self) -> &str {
        self.as_str()
    }
}

impl<T: ArabicText + ?Sized> ArabicText for &T {
    fn ar(&self) -> &str {
        (**self).ar()
    }

    fn alternates(&self) -> &[String] {
        (**self).alternates()
    }
}

/// How a recognized utterance matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Normalized forms are equal
    Exact,
    /// Equal to one of the accepted alternates
    Alternate,
    /// One normalized form contains the other
    Partial,
    /// Similarity reached the threshold
    Similarity,
    /// Nothing matched
    None,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Alternate => write!(f, "alternate"),
            Self::Partial => write!(f, "partial"),
            Self::Similarity => write!(f, "similarity"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for MatchType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "alternate" => Ok(Self::Alternate),
            "partial" => Ok(Self::Partial),
            "similarity" => Ok(Self::Similarity),
            "none" => Ok(Self::None),
            _ => Err(anyhow::anyhow!("Invalid match type: {}", s)),
        }
    }
}

/// Outcome of a single pronunciation check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Whether the answer is accepted
    pub is_correct: bool,
    /// Which rule decided the result
    pub match_type: MatchType,
    /// Similarity of the normalized forms, 1.0 for exact, alternate and partial matches
    pub similarity: f64,
}

impl MatchResult {
    fn accepted(match_type: MatchType) -> Self {
        Self {
            is_correct: true,
            match_type,
            similarity: 1.0,
        }
    }

    /// Similarity as a whole percentage, for display
    pub fn percent(&self) -> u32 {
        (self.similarity * 100.0).round() as u32
    }
}

/// Check a recognized utterance against an expected item
///
/// Uses the positional similarity scorer. `threshold` is expected in [0, 1];
/// it is neither validated nor clamped.
pub fn check_pronunciation<E, S>(
    recognized_text: &str,
    expected_item: &E,
    alternates: &[S],
    threshold: f64,
) -> MatchResult
where
    E: ArabicText + ?Sized,
    S: AsRef<str>,
{
    check_with(
        SimilarityAlgorithm::Positional,
        recognized_text,
        expected_item.ar(),
        alternates,
        threshold,
    )
}

fn check_with<S: AsRef<str>>(
    algorithm: SimilarityAlgorithm,
    recognized_text: &str,
    expected: &str,
    alternates: &[S],
    threshold: f64,
) -> MatchResult {
    let recognized = normalize(recognized_text);
    let expected = normalize(expected);

    if recognized == expected {
        debug!("Exact match for '{}'", expected);
        return MatchResult::accepted(MatchType::Exact);
    }

    if alternates
        .iter()
        .any(|alternate| normalize(alternate.as_ref()) == recognized)
    {
        debug!("Alternate match for '{}' (heard '{}')", expected, recognized);
        return MatchResult::accepted(MatchType::Alternate);
    }

    // An empty side would be contained in anything
    if !recognized.is_empty()
        && !expected.is_empty()
        && (recognized.contains(&expected) || expected.contains(&recognized))
    {
        debug!("Partial match: '{}' vs '{}'", recognized, expected);
        return MatchResult::accepted(MatchType::Partial);
    }

    let similarity = algorithm.score(&recognized, &expected);
    debug!(
        "{} similarity {:.3} (threshold {:.3}): '{}' vs '{}'",
        algorithm, similarity, threshold, recognized, expected
    );

    if similarity >= threshold {
        MatchResult {
            is_correct: true,
            match_type: MatchType::Similarity,
            similarity,
        }
    } else {
        MatchResult {
            is_correct: false,
            match_type: MatchType::None,
            similarity,
        }
    }
}

/// A pronunciation checker bound to a threshold and a similarity algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PronunciationChecker {
    threshold: f64,
    algorithm: SimilarityAlgorithm,
}

impl Default for PronunciationChecker {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            algorithm: SimilarityAlgorithm::Positional,
        }
    }
}

impl PronunciationChecker {
    /// Create a checker using the positional algorithm
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            algorithm: SimilarityAlgorithm::Positional,
        }
    }

    /// Use a different similarity algorithm
    pub fn with_algorithm(mut self, algorithm: SimilarityAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn algorithm(&self) -> SimilarityAlgorithm {
        self.algorithm
    }

    /// Check against an item, accepting the item's own alternates
    pub fn check<E: ArabicText + ?Sized>(&self, recognized_text: &str, item: &E) -> MatchResult {
        check_with(
            self.algorithm,
            recognized_text,
            item.ar(),
            item.alternates(),
            self.threshold,
        )
    }

    /// Check against an item with an explicit list of alternates
    pub fn check_with_alternates<E, S>(&self, recognized_text: &str, item: &E, alternates: &[S]) -> MatchResult
    where
        E: ArabicText + ?Sized,
        S: AsRef<str>,
    {
        check_with(
            self.algorithm,
            recognized_text,
            item.ar(),
            alternates,
            self.threshold,
        )
    }
}
