/*!
 * Arabic text matching.
 *
 * This module turns a recognized utterance into a graded verdict against an
 * expected vocabulary item:
 * - `normalize`: canonical comparable form of Arabic text
 * - `similarity`: positional and Levenshtein similarity ratios
 * - `checker`: precedence-ordered pronunciation check producing a `MatchResult`
 *
 * Everything here is pure and synchronous, so it can be called from any
 * thread or async task without coordination.
 */

pub mod normalize;
pub mod similarity;
pub mod checker;

// Re-export main types
pub use normalize::normalize;
pub use similarity::{similarity, levenshtein_similarity, positional_similarity, SimilarityAlgorithm};
pub use checker::{check_pronunciation, ArabicText, MatchResult, MatchType, PronunciationChecker};
