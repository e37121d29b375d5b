//! [`NameMatcher`] — resolve a parsed name against a known roster.

use crate::name::MemberName;

/// A roster of known names, each optionally carrying a payload (a member
/// id, a database handle, …).
///
/// Lookup is a linear scan returning the first entry equal to the query
/// under [`MemberName`]'s identity relation; the matcher does not
/// deduplicate, so callers must ensure the roster has no colliding
/// entries. Absence of a match is a normal outcome, not an error.
pub struct NameMatcher<T = ()> {
  entries: Vec<(MemberName, T)>,
}

impl<T> NameMatcher<T> {
  pub fn new(entries: impl IntoIterator<Item = (MemberName, T)>) -> Self {
    Self { entries: entries.into_iter().collect() }
  }

  /// Find the first roster entry matching `query`, ignoring title and
  /// honours. Returns the stored name and payload by reference.
  pub fn lookup(&self, query: &MemberName) -> Option<(&MemberName, &T)> {
    self
      .entries
      .iter()
      .find(|(name, _)| name == query)
      .map(|(name, value)| (name, value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl NameMatcher<()> {
  /// Build a matcher from bare names.
  pub fn from_names(names: impl IntoIterator<Item = MemberName>) -> Self {
    Self::new(names.into_iter().map(|n| (n, ())))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roster() -> Vec<MemberName> {
    vec![
      MemberName::from_parts("Wu", None, Some("Chi-wai".into())),
      MemberName::from_parts(
        "Wong",
        Some("Christopher".into()),
        Some("Kim-kam".into()),
      ),
      MemberName::from_parts("Edward", Some("Youde".into()), None),
    ]
  }

  #[test]
  fn simple_match_is_identity_preserving() {
    let query = MemberName::from_parts("Wu", None, Some("Chi-wai".into()));
    let matcher = NameMatcher::from_names(roster());

    // The stored instance itself comes back, not a reconstruction.
    let first = matcher.lookup(&query).unwrap().0;
    let second = matcher.lookup(&query).unwrap().0;
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.chinese_name.as_deref(), Some("Chi-wai"));
  }

  #[test]
  fn match_with_payloads() {
    let [n1, n2, n3]: [MemberName; 3] = roster().try_into().unwrap();
    let query = MemberName::from_parts("Wu", None, Some("Chi-wai".into()));
    let matcher = NameMatcher::new(vec![
      (n1.clone(), "foo"),
      (n2, "bar"),
      (n3, "baz"),
    ]);

    let (found, payload) = matcher.lookup(&query).unwrap();
    assert_eq!(found, &n1);
    assert_eq!(*payload, "foo");
  }

  #[test]
  fn no_match_is_none() {
    let matcher = NameMatcher::from_names(roster());
    let query = MemberName::from_parts("Chan", Some("Alice".into()), None);
    assert!(matcher.lookup(&query).is_none());
  }

  #[test]
  fn free_text_query_against_structured_roster() {
    let matcher = NameMatcher::new(vec![(
      MemberName::from_parts("Tsang", Some("Jasper".into()), None),
      1i64,
    )]);
    let query = MemberName::parse("Hon Jasper TSANG Yok-sing, GBS, JP");
    let (_, id) = matcher.lookup(&query).unwrap();
    assert_eq!(*id, 1);
  }

  #[test]
  fn ties_resolve_to_first_entry() {
    let a = MemberName::from_parts("Tsang", Some("Jasper".into()), None);
    let b = MemberName::from_parts("Tsang", Some("Jasper".into()), None);
    let matcher = NameMatcher::new(vec![(a, "first"), (b, "second")]);
    let query = MemberName::parse("Jasper Tsang");
    assert_eq!(*matcher.lookup(&query).unwrap().1, "first");
  }
}
