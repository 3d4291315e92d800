#![deny(missing_docs)]

//! # Inventory Reconciliation
//!
//! Compares endpoint sets from two independent sources and reports the
//! keys each one has that the other lacks. Neither side is treated as
//! authoritative.

use crate::error::{AppError, AppResult};
use crate::oas::models::EndpointDescriptor;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A normalized `(METHOD, path)` pair.
///
/// The method is upper-cased on construction; the path is kept verbatim.
/// Ordering is lexicographic by method, then path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct InventoryKey {
    method: String,
    path: String,
}

impl InventoryKey {
    /// Builds a key, normalizing the method's case.
    pub fn new(method: &str, path: &str) -> Self {
        InventoryKey {
            method: method.trim().to_ascii_uppercase(),
            path: path.to_string(),
        }
    }

    /// Upper-case method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path template.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

impl FromStr for InventoryKey {
    type Err = AppError;

    /// Parses `METHOD /path`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(method), Some(path), None) => Ok(InventoryKey::new(method, path)),
            _ => Err(AppError::General(format!(
                "Expected 'METHOD /path', got '{}'",
                s.trim()
            ))),
        }
    }
}

/// Set differences between two inventories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Keys present only in the first set, sorted.
    pub only_in_a: Vec<InventoryKey>,
    /// Keys present only in the second set, sorted.
    pub only_in_b: Vec<InventoryKey>,
}

impl Reconciliation {
    /// The same report seen from the other side.
    pub fn swap(self) -> Self {
        Reconciliation {
            only_in_a: self.only_in_b,
            only_in_b: self.only_in_a,
        }
    }

    /// True when both sets agree.
    pub fn is_clean(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }

    /// Renders the report with caller-chosen source labels.
    pub fn render(&self, left: &str, right: &str) -> String {
        format!(
            "only in {}: {}\nonly in {}: {}",
            left,
            join_keys(&self.only_in_a),
            right,
            join_keys(&self.only_in_b)
        )
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("spec", "roster"))
    }
}

fn join_keys(keys: &[InventoryKey]) -> String {
    if keys.is_empty() {
        return "(none)".to_string();
    }
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Computes `(a \ b, b \ a)`, each sorted by method then path.
pub fn reconcile<'k, A, B>(a: A, b: B) -> Reconciliation
where
    A: IntoIterator<Item = &'k InventoryKey>,
    B: IntoIterator<Item = &'k InventoryKey>,
{
    let a: BTreeSet<&InventoryKey> = a.into_iter().collect();
    let b: BTreeSet<&InventoryKey> = b.into_iter().collect();

    Reconciliation {
        only_in_a: a.difference(&b).map(|k| (*k).clone()).collect(),
        only_in_b: b.difference(&a).map(|k| (*k).clone()).collect(),
    }
}

/// The key set of an endpoint list.
pub fn keys_of<'e, I>(endpoints: I) -> BTreeSet<InventoryKey>
where
    I: IntoIterator<Item = &'e EndpointDescriptor>,
{
    endpoints.into_iter().map(EndpointDescriptor::key).collect()
}

/// Parses an endpoint roster.
///
/// One endpoint per line, either `METHOD /path` or CSV `method,path[,...]`.
/// A CSV header row starting with `method,path` is skipped, as are blank
/// lines and `#` comments.
pub fn parse_roster(text: &str) -> AppResult<BTreeSet<InventoryKey>> {
    let mut keys = BTreeSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = if line.contains(',') {
            line.split(',').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        };

        if fields.len() < 2 || fields[0].is_empty() || fields[1].is_empty() {
            return Err(AppError::InvalidRoster {
                line: index + 1,
                message: format!("expected a method and a path, got '{}'", line),
            });
        }
        if fields[0].eq_ignore_ascii_case("method") && fields[1].eq_ignore_ascii_case("path") {
            continue;
        }

        keys.insert(InventoryKey::new(fields[0], fields[1]));
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> BTreeSet<InventoryKey> {
        keys.iter().map(|k| k.parse().unwrap()).collect()
    }

    #[test]
    fn test_method_case_normalized() {
        assert_eq!(InventoryKey::new("get", "/a"), InventoryKey::new("GET", "/a"));
        assert_ne!(InventoryKey::new("GET", "/a"), InventoryKey::new("GET", "/A"));
    }

    #[test]
    fn test_health_versus_score() {
        let a = set(&["GET /health"]);
        let b = set(&["GET /health", "POST /score"]);
        let report = reconcile(&a, &b);
        assert!(report.only_in_a.is_empty());
        assert_eq!(report.only_in_b, vec![InventoryKey::new("POST", "/score")]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_symmetry() {
        let a = set(&["GET /a", "POST /b", "DELETE /c"]);
        let b = set(&["POST /b", "PUT /d", "GET /e"]);
        assert_eq!(reconcile(&a, &b), reconcile(&b, &a).swap());
    }

    #[test]
    fn test_sorted_by_method_then_path() {
        let a = set(&["POST /a", "GET /z", "GET /b"]);
        let report = reconcile(&a, &BTreeSet::new());
        let rendered: Vec<String> = report.only_in_a.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["GET /b", "GET /z", "POST /a"]);
    }

    #[test]
    fn test_parse_roster_formats() {
        let roster = "\
# exported roster
method,path,operationId,tags,summary
get,/health,health,,Health check
POST /score

  PUT   /score/{id}
";
        let keys = parse_roster(roster).unwrap();
        assert_eq!(keys, set(&["GET /health", "POST /score", "PUT /score/{id}"]));
    }

    #[test]
    fn test_parse_roster_rejects_single_field() {
        let err = parse_roster("GET /a\n/lonely\n").unwrap_err();
        match err {
            AppError::InvalidRoster { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_display() {
        let report = reconcile(&set(&["GET /a"]), &set(&[]));
        assert_eq!(report.to_string(), "only in spec: GET /a\nonly in roster: (none)");
    }
}
