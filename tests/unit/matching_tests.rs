/*!
 * Tests for normalization, similarity scoring and pronunciation checking
 */

use nutq::content::LexicalItem;
use nutq::matching::{
    check_pronunciation, levenshtein_similarity, normalize, positional_similarity, similarity, MatchResult,
    MatchType, PronunciationChecker, SimilarityAlgorithm,
};

const NO_ALTERNATES: &[&str] = &[];

/// Inputs mixing tashkeel, alef forms, bidi marks, whitespace and Latin text
const SAMPLES: &[&str] = &[
    "",
    "   ",
    "أَحِبُّ",
    "إِسْلَام آمِين",
    "\u{200F}مرحبا\u{200E} بك",
    "كَتَبَ\tالدَّرْسَ\n",
    "hello world",
    "ؤ ئ ء",
    "\u{0651}\u{064B}",
];

#[test]
fn test_normalize_appliedTwice_shouldBeIdempotent() {
    for sample in SAMPLES {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
    }
}

#[test]
fn test_normalize_alefVariants_shouldUnify() {
    assert_eq!(normalize("أحب"), normalize("احب"));
    assert_eq!(normalize("إسلام"), "اسلام");
    assert_eq!(normalize("آمين"), "امين");
}

#[test]
fn test_normalize_diacritics_shouldBeIgnored() {
    assert_eq!(normalize("كَتَبَ"), normalize("كتب"));
    assert_eq!(normalize("مَرْحَبًا"), "مرحبا");
}

#[test]
fn test_normalize_whitespaceAndBidiMarks_shouldBeRemoved() {
    assert_eq!(normalize("\u{200F}مرحبا\u{200E} بك"), "مرحبابك");
    assert_eq!(normalize("  \t\n"), "");
}

#[test]
fn test_similarity_sameString_shouldBeOne() {
    for sample in SAMPLES {
        let normalized = normalize(sample);
        assert_eq!(similarity(&normalized, &normalized), 1.0);
        assert_eq!(levenshtein_similarity(&normalized, &normalized), 1.0);
    }
}

#[test]
fn test_similarity_emptyStrings_shouldBeOne() {
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(positional_similarity("", ""), 1.0);
    assert_eq!(similarity("", "كتاب"), 0.0);
}

#[test]
fn test_similarity_shouldStayInUnitRange() {
    for a in SAMPLES {
        for b in SAMPLES {
            let (a, b) = (normalize(a), normalize(b));
            for algorithm in [SimilarityAlgorithm::Positional, SimilarityAlgorithm::Levenshtein] {
                let score = algorithm.score(&a, &b);
                assert!((0.0..=1.0).contains(&score), "{} out of range for {:?}/{:?}", score, a, b);
            }
        }
    }
}

#[test]
fn test_check_exactMatch_shouldWinRegardlessOfThreshold() {
    for threshold in [0.0, 0.5, 1.0, 1.5] {
        let result = check_pronunciation("احب", "أحب", NO_ALTERNATES, threshold);
        assert_eq!(
            result,
            MatchResult { is_correct: true, match_type: MatchType::Exact, similarity: 1.0 }
        );
    }
}

#[test]
fn test_check_containment_shouldBeatHighThreshold() {
    let result = check_pronunciation("مرحبا بك", "مرحبا", NO_ALTERNATES, 0.99);
    assert!(result.is_correct);
    assert_eq!(result.match_type, MatchType::Partial);

    let result = check_pronunciation("شكرا جزيلا", "شكرا", NO_ALTERNATES, 0.5);
    assert!(result.is_correct);
    assert_eq!(result.match_type, MatchType::Partial);
}

#[test]
fn test_check_similarityAtThreshold_shouldBeInclusive() {
    // 2 of 4 positions agree
    assert_eq!(positional_similarity("ابجد", "ابهو"), 0.5);
    let result = check_pronunciation("ابجد", "ابهو", NO_ALTERNATES, 0.5);
    assert!(result.is_correct);
    assert_eq!(result.match_type, MatchType::Similarity);
    assert_eq!(result.similarity, 0.5);
}

#[test]
fn test_check_belowThreshold_shouldReportSimilarity() {
    let result = check_pronunciation("ابجد", "ابهو", NO_ALTERNATES, 0.6);
    assert_eq!(
        result,
        MatchResult { is_correct: false, match_type: MatchType::None, similarity: 0.5 }
    );

    let result = check_pronunciation("باي", "مرحبا", NO_ALTERNATES, 0.5);
    assert!(!result.is_correct);
    assert_eq!(result.match_type, MatchType::None);
    assert!(result.similarity < 0.5);
}

#[test]
fn test_check_alternate_shouldBeAccepted() {
    let item = LexicalItem::new("مرحبا", "marhaba", "hello").with_alternates(["أهلا"]);
    let result = PronunciationChecker::default().check("اهلاً", &item);
    assert_eq!(result.match_type, MatchType::Alternate);
    assert!(result.is_correct);
}

#[test]
fn test_check_alternateContainingExpected_shouldReportAlternate() {
    // Also contains the expected text, but the alternate is checked first
    let result = check_pronunciation("شكرا جزيلا", "شكرا", &["شكرا جزيلا"], 0.5);
    assert_eq!(result.match_type, MatchType::Alternate);
    assert!(result.is_correct);
    assert_eq!(result.similarity, 1.0);
}

#[test]
fn test_check_exactAlsoListedAsAlternate_shouldReportExact() {
    let result = check_pronunciation("شكرا", "شكرا", &["شكرا"], 0.5);
    assert_eq!(result.match_type, MatchType::Exact);
    assert!(result.is_correct);
    assert_eq!(result.similarity, 1.0);
}

#[test]
fn test_check_emptyRecognition_shouldNotCountAsContained() {
    let result = check_pronunciation("", "مرحبا", NO_ALTERNATES, 0.5);
    assert!(!result.is_correct);
    assert_eq!(result.match_type, MatchType::None);
    assert_eq!(result.similarity, 0.0);
}

#[test]
fn test_checker_levenshtein_shouldTolerateInsertion() {
    let positional = PronunciationChecker::new(0.7);
    let levenshtein = PronunciationChecker::new(0.7).with_algorithm(SimilarityAlgorithm::Levenshtein);

    assert!(!positional.check("كتتاب", "كتاب").is_correct);

    let result = levenshtein.check("كتتاب", "كتاب");
    assert!(result.is_correct);
    assert_eq!(result.match_type, MatchType::Similarity);
}

#[test]
fn test_matchResult_serialize_shouldUseCamelCaseAndLowercaseTypes() {
    let result = check_pronunciation("شكرا جزيلا", "شكرا", NO_ALTERNATES, 0.5);
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["isCorrect"], serde_json::json!(true));
    assert_eq!(json["matchType"], serde_json::json!("partial"));
}
