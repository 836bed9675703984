//! Hierarchical taxonomies of allowed term codes.
//!
//! A taxonomy is a closed vocabulary: every term has a unique code and sits
//! at a nesting level (roots are level 1). Lookups are exact and
//! case-sensitive by code; there is no normalization or fuzzy matching.
//!
//! ## Level inference
//!
//! Terms may omit their level. The level is then derived from the parent
//! chain:
//!
//! ```text
//! WASH            level 1 (explicit)
//! └── WASH-HYG    no level, parent WASH -> level 2
//!     └── SOAP    no level, parent WASH-HYG -> level 3
//! ```
//!
//! - no level and no parent: root, level 1
//! - parent code not in the taxonomy: the parent counts as a root, so level 2
//! - parent links that cycle stop at the first repeated code
//! - inferred levels saturate at `u32::MAX`

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A single taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Unique, case-sensitive code.
    pub code: String,
    /// Explicit nesting level, or `None` to infer it from `parent`.
    #[serde(default)]
    pub level: Option<u32>,
    /// Code of the parent term.
    #[serde(default)]
    pub parent: Option<String>,
}

impl Term {
    /// A term with an explicit level.
    pub fn new(code: impl Into<String>, level: u32) -> Self {
        Self {
            code: code.into(),
            level: Some(level),
            parent: None,
        }
    }

    /// A term whose level is inferred from its parent.
    pub fn child(code: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            level: None,
            parent: Some(parent.into()),
        }
    }
}

/// A mapping from term code to [`Term`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    terms: BTreeMap<String, Term>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a term.
    pub fn insert(&mut self, term: Term) {
        self.terms.insert(term.code.clone(), term);
    }

    /// True if `code` is a known term.
    pub fn contains(&self, code: &str) -> bool {
        self.terms.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&Term> {
        self.terms.get(code)
    }

    /// Nesting level of `code`, explicit or inferred; `None` if unknown.
    pub fn level_of(&self, code: &str) -> Option<u32> {
        let mut term = self.terms.get(code)?;
        let mut depth = 0u32;
        let mut visited = BTreeSet::new();
        loop {
            if let Some(level) = term.level {
                return Some(level.saturating_add(depth));
            }
            visited.insert(term.code.as_str());
            let Some(parent_code) = term.parent.as_deref() else {
                return Some(depth.saturating_add(1));
            };
            if visited.contains(parent_code) {
                return Some(depth.saturating_add(1));
            }
            match self.terms.get(parent_code) {
                Some(parent) => {
                    term = parent;
                    depth = depth.saturating_add(1);
                }
                None => return Some(depth.saturating_add(2)),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }
}

impl FromIterator<Term> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut taxonomy = Self::new();
        for term in iter {
            taxonomy.insert(term);
        }
        taxonomy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_taxonomy_rejects_everything() {
        let taxonomy = Taxonomy::new();
        assert!(!taxonomy.contains("AAA"));
        assert!(!taxonomy.contains(""));
        assert_eq!(taxonomy.level_of("AAA"), None);
    }

    #[test]
    fn cycle_terminates() {
        let taxonomy: Taxonomy = [Term::child("A", "B"), Term::child("B", "A")]
            .into_iter()
            .collect();
        assert_eq!(taxonomy.level_of("A"), Some(2));
        assert_eq!(taxonomy.level_of("B"), Some(2));
    }

    #[test]
    fn inferred_level_saturates() {
        let taxonomy: Taxonomy = [Term::new("A", u32::MAX), Term::child("B", "A")]
            .into_iter()
            .collect();
        assert_eq!(taxonomy.level_of("A"), Some(u32::MAX));
        assert_eq!(taxonomy.level_of("B"), Some(u32::MAX));
    }

    #[test]
    fn self_parent_is_root() {
        let taxonomy: Taxonomy = [Term::child("A", "A")].into_iter().collect();
        assert_eq!(taxonomy.level_of("A"), Some(1));
    }
}
