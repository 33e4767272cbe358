/*!
 * Tests for Japanese script detection
 */

use jasweep::script_detector::contains_target_script;

#[test]
fn test_contains_target_script_withAsciiOnly_shouldReturnFalse() {
    assert!(!contains_target_script("Hello, world! 123 {}"));
    assert!(!contains_target_script(""));
}

#[test]
fn test_contains_target_script_withEachRange_shouldReturnTrue() {
    // full-width punctuation, hiragana, katakana, full-width forms, ideographs, extension A
    for sample in ["。", "ひらがな", "カタカナ", "Ａ", "漢字", "\u{3400}"] {
        assert!(contains_target_script(sample), "expected a match for {:?}", sample);
    }
}

#[test]
fn test_contains_target_script_withSingleCharInAscii_shouldReturnTrue() {
    assert!(contains_target_script("Save ファイル now"));
}

#[test]
fn test_contains_target_script_withOtherScripts_shouldReturnFalse() {
    assert!(!contains_target_script("Привет"));
    assert!(!contains_target_script("안녕하세요"));
    assert!(!contains_target_script("café 😀"));
}
