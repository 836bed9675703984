#![allow(missing_docs)]

use hxl_ingest::{IngestError, Tagger};

const UNTAGGED: &[&[&str]] = &[
    &["Country Name", "Country Code", "2016", "2015", "2014", "2013", "2012"],
    &["Sudan", "SUD", "10000", "8500", "9000", "7500", "6000"],
    &["Syria", "SYR", "100000", "85000", "90000", "75000", "60000"],
    &["Yemen", "YEM", "50000", "43000", "45000", "38000", "30000"],
];

const EXPECTED_TAGS_SIMPLE: &[&str] = &["#country+name", "#country+code", "", "", "", "", ""];

fn untagged() -> Vec<Vec<String>> {
    UNTAGGED
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect()
}

fn display_tags(tagger: &Tagger) -> Vec<String> {
    tagger.read(untagged()).unwrap().display_tags()
}

#[test]
fn test_basic() {
    let tagger = Tagger::new([
        ("Country Name", "#country+name"),
        ("Country Code", "#country+code"),
    ])
    .unwrap();
    assert_eq!(display_tags(&tagger), EXPECTED_TAGS_SIMPLE);
}

#[test]
fn test_case_insensitive() {
    let tagger = Tagger::new([("country name", "#country+name"), ("code", "#country+code")]).unwrap();
    assert_eq!(display_tags(&tagger), EXPECTED_TAGS_SIMPLE);
}

#[test]
fn test_space_insensitive() {
    let tagger = Tagger::new([
        ("  Country  Name", "#country+name"),
        ("Country    Code  ", "#country+code"),
    ])
    .unwrap();
    assert_eq!(display_tags(&tagger), EXPECTED_TAGS_SIMPLE);
}

#[test]
fn test_partial_match() {
    let tagger = Tagger::new([("name", "#country+name"), ("code", "#country+code")]).unwrap();
    assert_eq!(display_tags(&tagger), EXPECTED_TAGS_SIMPLE);
}

#[test]
fn test_full_match() {
    let tagger = Tagger::new([("country name", "#country+name"), ("code", "#country+code")])
        .unwrap()
        .with_allow_partial(false);
    assert_eq!(
        display_tags(&tagger),
        vec!["#country+name", "", "", "", "", "", ""]
    );
}

#[test]
fn test_tagged_rows_keep_data() {
    let tagger = Tagger::new([("name", "#country+name")]).unwrap();
    let reader = tagger.read(untagged()).unwrap();
    let headers = reader.headers();
    assert_eq!(headers[0], Some("Country Name"));
    let rows: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get(0), Some("Sudan"));
    assert_eq!(rows[0].source_row_number(), Some(3));
}

#[test]
fn test_no_header_matched() {
    let tagger = Tagger::new([("population", "#population")]).unwrap();
    let err = tagger.tag_rows(untagged()).unwrap_err();
    assert!(matches!(err, IngestError::NoHeaderMatched { scanned: 4 }));
}
