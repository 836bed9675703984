#![allow(missing_docs)]

use hxl_model::{Taxonomy, Term};

fn make_taxonomy() -> Taxonomy {
    [Term::new("AAA", 1), Term::new("BBB", 2)]
        .into_iter()
        .collect()
}

#[test]
fn test_contains_is_exact() {
    let taxonomy = make_taxonomy();
    assert!(taxonomy.contains("AAA"));
    assert!(taxonomy.contains("BBB"));
    assert!(!taxonomy.contains("CCC"));

    // Case-sensitive, no trimming
    assert!(!taxonomy.contains("aaa"));
    assert!(!taxonomy.contains(" AAA"));
}

#[test]
fn test_explicit_levels() {
    let taxonomy = make_taxonomy();
    assert_eq!(taxonomy.level_of("AAA"), Some(1));
    assert_eq!(taxonomy.level_of("BBB"), Some(2));
    assert_eq!(taxonomy.level_of("CCC"), None);
}

#[test]
fn test_inferred_levels() {
    let taxonomy: Taxonomy = [
        Term::new("WASH", 1),
        Term::child("WASH-HYG", "WASH"),
        Term::child("SOAP", "WASH-HYG"),
        Term::child("ORPHAN", "MISSING"),
        Term {
            code: "ROOT".to_string(),
            level: None,
            parent: None,
        },
    ]
    .into_iter()
    .collect();

    assert_eq!(taxonomy.level_of("WASH"), Some(1));
    assert_eq!(taxonomy.level_of("WASH-HYG"), Some(2));
    assert_eq!(taxonomy.level_of("SOAP"), Some(3));
    assert_eq!(taxonomy.level_of("ORPHAN"), Some(2));
    assert_eq!(taxonomy.level_of("ROOT"), Some(1));
}

#[test]
fn test_explicit_level_wins_over_parent() {
    let taxonomy: Taxonomy = [
        Term::new("A", 1),
        Term {
            code: "B".to_string(),
            level: Some(5),
            parent: Some("A".to_string()),
        },
    ]
    .into_iter()
    .collect();
    assert_eq!(taxonomy.level_of("B"), Some(5));
}

#[test]
fn test_insert_replaces() {
    let mut taxonomy = make_taxonomy();
    taxonomy.insert(Term::new("AAA", 3));
    assert_eq!(taxonomy.len(), 2);
    assert_eq!(taxonomy.level_of("AAA"), Some(3));
}

#[test]
fn test_term_deserializes_without_level() {
    let term: Term = serde_json::from_str(r#"{"code": "WASH-HYG", "parent": "WASH"}"#)
        .expect("deserialize term");
    assert_eq!(term, Term::child("WASH-HYG", "WASH"));
}
