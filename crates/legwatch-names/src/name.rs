//! [`MemberName`] — structured representation of a council member's name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::{Script, is_latin_char};

/// Honorific prefixes that may lead an English name.
const ENGLISH_TITLES: &[&str] = &[
  "Hon", "Mr", "Mrs", "Ms", "Miss", "Dr", "Prof", "Sir", "Ir",
];

/// Role suffixes that may trail a Chinese name. Titles appear as a prefix
/// in English but as a suffix in Chinese; the asymmetry is deliberate.
const CHINESE_TITLES: &[&str] = &["議員"];

// ─── MemberName ──────────────────────────────────────────────────────────────

/// A parsed member name. Immutable after construction.
///
/// Known unhandled shapes, deliberately left unparsed rather than guessed
/// at: initials ("J. R. YOUNG"), middle names, compound and multi-word
/// surnames ("梁劉柔芬", "DES VOEUX", "SELWYN-CLARKE"), apostrophes
/// ("O'MALLEY"), and stacked honorifics ("Ir Dr Hon LO Wai-kwok").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberName {
  /// Honorific prefix ("Hon", "Mr") or Chinese role suffix ("議員").
  /// Informational only; never affects equality.
  pub title:        Option<String>,
  /// Given name written in Latin script.
  pub english_name: Option<String>,
  /// Personal name: Latin romanization ("Yok-sing") or Chinese script.
  pub chinese_name: Option<String>,
  /// Surname, normalized to title case so that "TSANG", "Tsang" and
  /// "tsang" all compare equal.
  pub last_name:    String,
  /// Post-nominal honour codes ("GBS", "JP") in original order. Never
  /// affects equality.
  pub honours:      Vec<String>,
}

impl MemberName {
  /// Parse a free-form bilingual name string. Never fails; fragments that
  /// fit no known convention are dropped.
  pub fn parse(raw: &str) -> MemberName {
    let raw = raw.trim();
    match Script::classify(raw) {
      Script::English => parse_english(raw),
      Script::Chinese | Script::Mixed => parse_chinese(raw),
    }
  }

  /// Build a name directly from already-structured components, bypassing
  /// the parser. Used when constructing the canonical roster from the
  /// schedule-database API feed.
  pub fn from_parts(
    last_name: impl Into<String>,
    english_name: Option<String>,
    chinese_name: Option<String>,
  ) -> MemberName {
    MemberName {
      title: None,
      english_name,
      chinese_name,
      last_name: capitalize(&last_name.into()),
      honours: Vec::new(),
    }
  }

  /// True iff every stored name character is Latin. Honours and title are
  /// not consulted.
  pub fn is_english(&self) -> bool {
    let latin = |s: &String| {
      s.chars().filter(|c| c.is_alphabetic()).all(is_latin_char)
    };
    latin(&self.last_name)
      && self.english_name.iter().all(latin)
      && self.chinese_name.iter().all(latin)
  }

  /// Canonical display string.
  ///
  /// By convention an English full name is given-name(s) around the
  /// surname ("Jasper Tsang Yok-sing"), while a Chinese-script full name
  /// is surname-first with no separator ("曾鈺成").
  pub fn full_name(&self) -> String {
    match (&self.english_name, &self.chinese_name) {
      (Some(e), Some(c)) => format!("{e} {} {c}", self.last_name),
      (Some(e), None) => format!("{e} {}", self.last_name),
      (None, Some(c)) if c.chars().all(is_latin_char_or_sep) => {
        format!("{c} {}", self.last_name)
      }
      (None, Some(c)) => format!("{}{c}", self.last_name),
      (None, None) => self.last_name.clone(),
    }
  }
}

impl fmt::Display for MemberName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.full_name())
  }
}

// ─── Equality ────────────────────────────────────────────────────────────────

/// Identity comparison. Title and honours never participate.
///
/// Two names denote the same person when the surnames agree and every
/// given-name component present on *both* sides agrees; a component known
/// on only one side is not evidence either way. This makes the relation
/// intentionally non-transitive ("Jasper Tsang" == "Jasper TSANG Yok-sing"
/// == "Tsang Yok-sing", yet "Jasper Tsang" != "Tsang Yok-sing"), which is
/// why no `Eq` or `Hash` impl is provided.
impl PartialEq for MemberName {
  fn eq(&self, other: &Self) -> bool {
    if self.last_name != other.last_name {
      return false;
    }
    let english = both(&self.english_name, &other.english_name);
    let chinese = both(&self.chinese_name, &other.chinese_name);
    match (english, chinese) {
      (Some(e), Some(c)) => e && c,
      (Some(e), None) => e,
      (None, Some(c)) => c,
      // No comparable component: equal only if both names are bare
      // surnames.
      (None, None) => {
        self.english_name.is_none()
          && other.english_name.is_none()
          && self.chinese_name.is_none()
          && other.chinese_name.is_none()
      }
    }
  }
}

/// `Some(a == b)` when both sides carry the component, `None` otherwise.
fn both(a: &Option<String>, b: &Option<String>) -> Option<bool> {
  match (a, b) {
    (Some(a), Some(b)) => Some(a == b),
    _ => None,
  }
}

// ─── English branch ──────────────────────────────────────────────────────────

fn parse_english(raw: &str) -> MemberName {
  let (rest, honours) = strip_honours(raw);

  // Reversed form "Tsang, Jasper" — any comma surviving the honours strip
  // separates surname from given name.
  if let Some((last, given)) = rest.split_once(',') {
    return MemberName {
      title: None,
      english_name: non_empty(given.trim()),
      chinese_name: None,
      last_name: capitalize(last.trim()),
      honours,
    };
  }

  let mut tokens: Vec<&str> = rest.split_whitespace().collect();
  let mut title = None;
  if let Some(first) = tokens.first()
    && ENGLISH_TITLES.contains(first)
  {
    title = Some(first.to_string());
    tokens.remove(0);
  }

  let mut english_name = None;
  let mut chinese_name = None;
  let last_name;

  match tokens.len() {
    0 => last_name = String::new(),
    1 => last_name = capitalize(tokens[0]),
    2 => {
      if tokens[1].contains('-') {
        // Anglicized "Surname Given-name": a hyphenated romanization used
        // without an English given name.
        last_name = capitalize(tokens[0]);
        chinese_name = Some(tokens[1].to_string());
      } else {
        english_name = Some(tokens[0].to_string());
        last_name = capitalize(tokens[1]);
      }
    }
    _ => {
      // Full form "Jasper TSANG Yok-sing": the surname may appear in all
      // caps anywhere after the English given name, followed by the
      // romanized personal name.
      english_name = Some(tokens[0].to_string());
      if let Some(i) = tokens[1..].iter().position(|t| is_all_caps(t)) {
        let i = i + 1;
        last_name = capitalize(tokens[i]);
        chinese_name = tokens.get(i + 1).map(|t| t.to_string());
      } else {
        // No marked surname: take the final token, dropping inner ones.
        last_name = capitalize(tokens[tokens.len() - 1]);
      }
    }
  }

  MemberName { title, english_name, chinese_name, last_name, honours }
}

// ─── Chinese branch ──────────────────────────────────────────────────────────

fn parse_chinese(raw: &str) -> MemberName {
  let (rest, honours) = strip_honours(raw);
  let mut rest = rest.trim();

  let mut title = None;
  for suffix in CHINESE_TITLES {
    if let Some(stripped) = rest.strip_suffix(suffix) {
      title = Some(suffix.to_string());
      rest = stripped.trim_end();
      break;
    }
  }

  // Single-character surname. Compound surnames (歐陽, 司徒) are a known
  // unsupported case.
  let mut chars = rest.chars();
  let last_name = chars.next().map(String::from).unwrap_or_default();
  let remainder: String = chars.collect();

  MemberName {
    title,
    english_name: None,
    chinese_name: non_empty(&remainder),
    last_name,
    honours,
  }
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

/// Drain trailing comma-separated honour codes ("…, GBS, JP"), stopping at
/// the first section that fails the all-caps-short-token test. Returns the
/// remaining string (commas inside it preserved) and the codes in original
/// order.
fn strip_honours(raw: &str) -> (String, Vec<String>) {
  let mut sections: Vec<&str> = raw.split(',').map(str::trim).collect();
  let mut honours = Vec::new();
  while sections.len() > 1 {
    let last = sections[sections.len() - 1];
    if !is_honour_code(last) {
      break;
    }
    honours.insert(0, last.to_string());
    sections.pop();
  }
  (sections.join(", "), honours)
}

/// Honour codes are 1–4 ASCII capitals ("JP", "GBS", "OBE").
fn is_honour_code(s: &str) -> bool {
  let n = s.chars().count();
  (1..=4).contains(&n) && s.chars().all(|c| c.is_ascii_uppercase())
}

/// An ALL-CAPS surname marker ("TSANG"); two letters minimum so initials
/// never qualify.
fn is_all_caps(s: &str) -> bool {
  s.chars().count() >= 2 && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Title-case a surname: first character upper, the rest lower. A no-op on
/// Chinese script.
fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => {
      first.to_uppercase().collect::<String>()
        + &chars.as_str().to_lowercase()
    }
    None => String::new(),
  }
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

/// Latin letters plus the hyphen used in romanizations like "Yok-sing".
fn is_latin_char_or_sep(c: char) -> bool {
  is_latin_char(c) || c == '-' || c == ' '
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn english_or_chinese() {
    assert!(MemberName::parse("foo").is_english());
    assert!(!MemberName::parse("潘兆平").is_english());
    assert!(!MemberName::parse("潘兆平, GBS, JP").is_english());
  }

  #[test]
  fn minimal_english_name() {
    let name = MemberName::parse("Jasper Tsang");
    assert_eq!(name.last_name, "Tsang");
    assert_eq!(name.english_name.as_deref(), Some("Jasper"));
    assert_eq!(name.full_name(), "Jasper Tsang");
    assert!(name.chinese_name.is_none());
    assert!(name.title.is_none());
    assert!(name.honours.is_empty());
  }

  #[test]
  fn anglicized_english_name() {
    let name = MemberName::parse("Tsang Yok-sing");
    assert_eq!(name.last_name, "Tsang");
    assert_eq!(name.chinese_name.as_deref(), Some("Yok-sing"));
    assert_eq!(name.full_name(), "Yok-sing Tsang");
    assert!(name.english_name.is_none());
    assert!(name.title.is_none());
    assert!(name.honours.is_empty());
  }

  #[test]
  fn full_english_name() {
    let name = MemberName::parse("Hon Jasper TSANG Yok-sing, GBS, JP");
    assert_eq!(name.last_name, "Tsang");
    assert_eq!(name.english_name.as_deref(), Some("Jasper"));
    assert_eq!(name.chinese_name.as_deref(), Some("Yok-sing"));
    // By convention the full name carries the given names around the
    // surname, never both scripts collapsed.
    assert_eq!(name.full_name(), "Jasper Tsang Yok-sing");
    assert_eq!(name.title.as_deref(), Some("Hon"));
    assert_eq!(name.honours, ["GBS", "JP"]);
  }

  #[test]
  fn equality_of_english_names() {
    let n1 = MemberName::parse("Jasper Tsang");
    let n2 = MemberName::parse("Hon Jasper TSANG Yok-sing, GBS, JP");
    let n3 = MemberName::parse("Tsang Yok-sing");
    assert_eq!(n1, n2);
    assert_eq!(n2, n3);
    assert_ne!(n1, n3);
  }

  #[test]
  fn honours_or_title_dont_matter() {
    let n1 = MemberName::parse("Jasper TSANG Yok-sing, GBS, JP");
    let n2 = MemberName::parse("Hon Jasper TSANG Yok-sing, JS");
    let n3 = MemberName::parse("Mr Jasper TSANG Yok-sing");
    assert_eq!(n1, n2);
    assert_eq!(n2, n3);
    assert_eq!(n1, n3);
  }

  #[test]
  fn surname_casing_is_normalized() {
    let n1 = MemberName::parse("Jasper TSANG");
    let n2 = MemberName::parse("Jasper Tsang");
    let n3 = MemberName::parse("Jasper tsang");
    assert_eq!(n1.last_name, "Tsang");
    assert_eq!(n1, n2);
    assert_eq!(n2, n3);
  }

  #[test]
  fn reversed_english_name() {
    let name = MemberName::parse("Tsang, Jasper");
    assert_eq!(name.last_name, "Tsang");
    assert_eq!(name.english_name.as_deref(), Some("Jasper"));
    assert_eq!(name.full_name(), "Jasper Tsang");
    assert!(name.chinese_name.is_none());
    assert!(name.title.is_none());
    assert!(name.honours.is_empty());
  }

  #[test]
  fn minimal_chinese_name() {
    let name = MemberName::parse("曾鈺成");
    assert_eq!(name.last_name, "曾");
    assert_eq!(name.chinese_name.as_deref(), Some("鈺成"));
    assert_eq!(name.full_name(), "曾鈺成");
    assert!(name.english_name.is_none());
    assert!(name.title.is_none());
    assert!(name.honours.is_empty());
  }

  #[test]
  fn full_chinese_name() {
    let name = MemberName::parse("曾鈺成議員");
    assert_eq!(name.last_name, "曾");
    assert_eq!(name.chinese_name.as_deref(), Some("鈺成"));
    assert_eq!(name.full_name(), "曾鈺成");
    assert_eq!(name.title.as_deref(), Some("議員"));
    assert!(name.english_name.is_none());
    assert!(name.honours.is_empty());
  }

  #[test]
  fn equality_of_chinese_names() {
    let n1 = MemberName::parse("曾鈺成");
    let n2 = MemberName::parse("曾鈺成議員");
    assert_eq!(n1, n2);
  }

  #[test]
  fn chinese_name_with_honours() {
    let name = MemberName::parse("潘兆平, GBS, JP");
    assert_eq!(name.last_name, "潘");
    assert_eq!(name.chinese_name.as_deref(), Some("兆平"));
    assert_eq!(name.honours, ["GBS", "JP"]);
  }

  #[test]
  fn from_parts_normalizes_surname() {
    let name =
      MemberName::from_parts("TSANG", Some("Jasper".into()), None);
    assert_eq!(name.last_name, "Tsang");
    assert_eq!(name, MemberName::parse("Jasper Tsang"));
  }

  // Shapes the parser is known not to handle; kept here as a worklist.
  // Two-character Chinese surnames: "WEI Yuk", "梁劉柔芬".
  // Initials: "J. R. YOUNG".
  // Middle names: "Alfred Gascoyne WISE", "Julius C. POWER".
  // Doubled spaces: "Mary WONG  Wing-cheung".
  // Multi-word surnames: "Charles William Robert ST. JOHN",
  //   "Percy Selwyn SELWYN-CLARKE", "George William DES VOEUX".
  // Other characters: "Edward Loughlin O'MALLEY", "Richard Graves
  //   MacDONNELL".
  // Stacked honorifics: "Dr Hon KWOK Ka-ki", "Ir Dr Hon LO Wai-kwok".
}
