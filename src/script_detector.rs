/*!
 * Detection of Japanese script in arbitrary text.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Full-width punctuation, hiragana, katakana, half/full-width forms,
// CJK unified ideographs and CJK extension A.
static TARGET_SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{3000}-\x{303F}\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{FF00}-\x{FFEF}\x{4E00}-\x{9FAF}\x{3400}-\x{4DBF}]")
        .expect("target script pattern is valid")
});

/// Returns true if any character of `text` belongs to the Japanese script ranges
pub fn contains_target_script(text: &str) -> bool {
    TARGET_SCRIPT_REGEX.is_match(text)
}
