//! Canonical member roster, built from the schedule-database API feed.
//!
//! The schedule database is the authoritative member list and arrives
//! already structured, so its names bypass the parser entirely. Free-text
//! names from agendas and hansards are then resolved against it.

use legwatch_names::{MemberName, NameMatcher};
use serde::Deserialize;

/// The member id used by the schedule database.
pub type MemberId = i64;

/// One member as served by the schedule API
/// (`/ScheduleDB/odata/Tmember`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMemberItem {
  pub id:           MemberId,
  pub last_name_c:  String,
  pub first_name_c: String,
  pub last_name_e:  String,
  /// Romanized Chinese given name, e.g. "Yok-sing".
  pub first_name_e: String,
  /// Western given name, e.g. "Jasper". Not every member has one.
  pub english_name: Option<String>,
}

/// A roster mapping member names (in both scripts) to member ids.
pub struct MemberRoster {
  matcher: NameMatcher<MemberId>,
}

impl MemberRoster {
  /// Index a schedule feed. Each member contributes an English-script
  /// entry and a Chinese-script entry, both resolving to the same id.
  pub fn from_schedule(items: &[ScheduleMemberItem]) -> Self {
    let mut entries = Vec::with_capacity(items.len() * 2);
    for item in items {
      if !item.last_name_e.is_empty() {
        entries.push((
          MemberName::from_parts(
            item.last_name_e.clone(),
            item.english_name.clone().filter(|s| !s.is_empty()),
            non_empty(&item.first_name_e),
          ),
          item.id,
        ));
      }
      if !item.last_name_c.is_empty() {
        entries.push((
          MemberName::from_parts(
            item.last_name_c.clone(),
            None,
            non_empty(&item.first_name_c),
          ),
          item.id,
        ));
      }
    }
    Self { matcher: NameMatcher::new(entries) }
  }

  /// Resolve a free-text name ("Hon Jasper TSANG Yok-sing, GBS, JP",
  /// "曾鈺成議員") to a member id. `None` means no roster entry matched —
  /// a normal outcome for ex-members and officials.
  pub fn resolve(&self, raw: &str) -> Option<MemberId> {
    self
      .matcher
      .lookup(&MemberName::parse(raw))
      .map(|(_, id)| *id)
  }

  pub fn len(&self) -> usize {
    self.matcher.len()
  }

  pub fn is_empty(&self) -> bool {
    self.matcher.is_empty()
  }
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn feed() -> Vec<ScheduleMemberItem> {
    vec![
      ScheduleMemberItem {
        id: 1,
        last_name_c: "曾".into(),
        first_name_c: "鈺成".into(),
        last_name_e: "TSANG".into(),
        first_name_e: "Yok-sing".into(),
        english_name: Some("Jasper".into()),
      },
      ScheduleMemberItem {
        id: 2,
        last_name_c: "潘".into(),
        first_name_c: "兆平".into(),
        last_name_e: "POON".into(),
        first_name_e: "Siu-ping".into(),
        english_name: None,
      },
    ]
  }

  #[test]
  fn resolves_both_scripts_to_the_same_member() {
    let roster = MemberRoster::from_schedule(&feed());
    assert_eq!(roster.len(), 4);
    assert_eq!(
      roster.resolve("Hon Jasper TSANG Yok-sing, GBS, JP"),
      Some(1)
    );
    assert_eq!(roster.resolve("曾鈺成議員"), Some(1));
    assert_eq!(roster.resolve("潘兆平, GBS, JP"), Some(2));
  }

  #[test]
  fn unknown_names_resolve_to_none() {
    let roster = MemberRoster::from_schedule(&feed());
    assert_eq!(roster.resolve("Hon CHAN Tai-man"), None);
  }
}
