//! Bilingual member-name parsing and identity resolution for legwatch.
//!
//! Council members are referenced by wildly inconsistent free-form strings
//! across scraped sources: "Jasper Tsang", "Hon Jasper TSANG Yok-sing, GBS,
//! JP", "曾鈺成議員". This crate parses such a string into a structured
//! [`MemberName`] and decides whether two differently-formatted strings
//! denote the same person. Pure and synchronous; no I/O dependencies.
//!
//! Parsing never fails: unparseable fragments are dropped rather than
//! failing the whole parse, so the crate has no error type.
//!
//! # Quick start
//!
//! ```
//! use legwatch_names::MemberName;
//!
//! let a = MemberName::parse("Hon Jasper TSANG Yok-sing, GBS, JP");
//! let b = MemberName::parse("Jasper Tsang");
//! assert_eq!(a, b); // title, honours and casing never affect equality
//! ```

mod matcher;
mod name;
mod script;

pub use matcher::NameMatcher;
pub use name::MemberName;
pub use script::Script;
