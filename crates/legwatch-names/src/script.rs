//! Script classification for raw name strings.

/// The writing system a raw name string uses, decided once up front; each
/// parsing branch is then a pure function of the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
  /// Every letter is Latin.
  English,
  /// No Latin letters at all.
  Chinese,
  /// Both Latin and non-Latin letters, e.g. a Chinese name with Latin
  /// honour codes appended ("潘兆平, GBS, JP").
  Mixed,
}

impl Script {
  /// Classify `s` by inspecting its alphabetic characters only; whitespace
  /// and punctuation never influence the result. An all-punctuation string
  /// classifies as English.
  pub fn classify(s: &str) -> Script {
    let mut latin = false;
    let mut other = false;
    for c in s.chars().filter(|c| c.is_alphabetic()) {
      if is_latin_char(c) {
        latin = true;
      } else {
        other = true;
      }
    }
    match (latin, other) {
      (_, false) => Script::English,
      (false, true) => Script::Chinese,
      (true, true) => Script::Mixed,
    }
  }
}

/// Basic Latin plus the Latin-1 / Latin Extended accented ranges.
pub(crate) fn is_latin_char(c: char) -> bool {
  c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}')
}
