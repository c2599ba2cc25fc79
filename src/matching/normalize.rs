/*!
 * Arabic text normalization.
 *
 * Produces the form every comparison in the crate runs on: no tashkeel,
 * a single alef shape, and no whitespace or bidi control marks.
 */

/// First code point of the Arabic combining marks block (fathatan)
const DIACRITICS_START: char = '\u{064B}';

/// Last code point of the Arabic combining marks block (wavy hamza below)
const DIACRITICS_END: char = '\u{065F}';

/// Bare alef (ا)
const ALEF: char = '\u{0627}';

/// Alef with hamza above (أ), hamza below (إ) and madda (آ)
const ALEF_VARIANTS: [char; 3] = ['\u{0623}', '\u{0625}', '\u{0622}'];

/// Left-to-right and right-to-left marks
const BIDI_MARKS: [char; 2] = ['\u{200E}', '\u{200F}'];

/// Check whether a character is an Arabic diacritical mark
#[inline]
pub fn is_diacritic(c: char) -> bool {
    (DIACRITICS_START..=DIACRITICS_END).contains(&c)
}

/// Normalize Arabic text for comparison
///
/// Applied in order:
/// 1. drop diacritics (U+064B to U+065F)
/// 2. map أ إ آ to bare alef ا
/// 3. drop bidi marks (U+200E, U+200F) and every whitespace character
/// 4. trim
///
/// Non-Arabic input passes through with only those transformations applied.
/// The function is total and idempotent.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if is_diacritic(c) {
            continue;
        }

        if ALEF_VARIANTS.contains(&c) {
            result.push(ALEF);
            continue;
        }

        if BIDI_MARKS.contains(&c) || c.is_whitespace() {
            continue;
        }

        result.push(c);
    }

    // No whitespace survives the loop, but keep the contract explicit.
    let trimmed = result.trim();
    if trimmed.len() == result.len() {
        result
    } else {
        trimmed.to_string()
    }
}
