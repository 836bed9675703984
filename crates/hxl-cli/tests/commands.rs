//! End-to-end tests for the subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use hxl_cli::cli::{CountArgs, ReportFormatArg, TagArgs, ValidateArgs};
use hxl_cli::commands::{run_count, run_tag, run_validate};
use hxl_validate::ErrorKind;
use tempfile::TempDir;

const SCHEMA: &str = r##"{
  "rules": [
    { "tag": "#sector", "minOccur": 1 },
    { "tag": "#affected_num", "dataType": "number", "minValue": 0 }
  ]
}"##;

const DATA: &str = "\
Organisation,Sector,People affected
#org,#sector,#affected_num
UNICEF,WASH,35
WFP,,abc
MSF,Health,-2
UNICEF,WASH,10
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn validate_args(dir: &TempDir, format: ReportFormatArg) -> ValidateArgs {
    ValidateArgs {
        schema: write(dir, "schema.json", SCHEMA),
        input: Some(write(dir, "data.csv", DATA)),
        format,
        output: Some(dir.path().join("report.out")),
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_validate_collects_errors() {
    let dir = TempDir::new().unwrap();
    let args = validate_args(&dir, ReportFormatArg::Table);
    let outcome = run_validate(&args).unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(outcome.summary.rows_checked, 4);
    assert_eq!(outcome.summary.invalid_rows, 2);
    assert_eq!(outcome.summary.error_count, 3);
    let found: Vec<_> = outcome
        .errors
        .iter()
        .map(|e| (e.row_number, e.source_row_number, e.kind))
        .collect();
    assert_eq!(
        found,
        vec![
            (Some(2), Some(4), ErrorKind::TooFewOccurrences),
            (Some(2), Some(4), ErrorKind::WrongDataType),
            (Some(3), Some(5), ErrorKind::ValueTooLow),
        ]
    );

    let output = read(args.output.as_ref().unwrap());
    assert!(output.contains("too_few_occurrences"));
    assert!(output.ends_with("Invalid: 2 of 4 row(s) failed with 3 error(s)\n"));
}

#[test]
fn test_validate_json_report() {
    let dir = TempDir::new().unwrap();
    let args = validate_args(&dir, ReportFormatArg::Json);
    run_validate(&args).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&read(args.output.as_ref().unwrap())).unwrap();
    assert_eq!(report["schema"], "hxl.validation-report");
    assert_eq!(report["invalid_rows"], 2);
    assert_eq!(report["errors"].as_array().unwrap().len(), 3);
    assert_eq!(report["errors"][2]["kind"], "value_too_low");
    assert_eq!(report["errors"][2]["value"], "-2");
}

#[test]
fn test_validate_log_format_only_summarizes() {
    let dir = TempDir::new().unwrap();
    let args = validate_args(&dir, ReportFormatArg::Log);
    let outcome = run_validate(&args).unwrap();
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.summary.error_count, 3);
    assert_eq!(
        read(args.output.as_ref().unwrap()),
        "Invalid: 2 of 4 row(s) failed with 3 error(s)\n"
    );
}

#[test]
fn test_validate_valid_dataset() {
    let dir = TempDir::new().unwrap();
    let mut args = validate_args(&dir, ReportFormatArg::Table);
    args.input = Some(write(&dir, "good.csv", "#sector,#affected_num\nWASH,1\n"));
    let outcome = run_validate(&args).unwrap();
    assert!(outcome.is_valid());
    assert_eq!(read(args.output.as_ref().unwrap()), "Valid: 1 row(s) checked\n");
}

#[test]
fn test_validate_bad_schema() {
    let dir = TempDir::new().unwrap();
    let mut args = validate_args(&dir, ReportFormatArg::Table);
    args.schema = write(&dir, "bad.json", r##"{ "rules": [ { "tag": "#x", "dataType": "date" } ] }"##);
    let err = run_validate(&args).unwrap_err();
    assert!(format!("{err:#}").contains("date"));
}

#[test]
fn test_count() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("counts.csv");
    let args = CountArgs {
        input: Some(write(&dir, "data.csv", DATA)),
        output: Some(output.clone()),
        tags: vec!["org".to_string()],
        aggregate: Some("affected_num".to_string()),
    };
    run_count(&args).unwrap();
    assert_eq!(
        read(&output),
        "#org,#x_count_num,#x_sum_num,#x_average_num,#x_min_num,#x_max_num\n\
         MSF,1,-2,-2,-2,-2\n\
         UNICEF,2,45,22.5,10,35\n\
         WFP,1,,,,\n"
    );
}

#[test]
fn test_count_invalid_tag() {
    let dir = TempDir::new().unwrap();
    let args = CountArgs {
        input: Some(write(&dir, "data.csv", DATA)),
        output: None,
        tags: vec!["1org".to_string()],
        aggregate: None,
    };
    assert!(run_count(&args).is_err());
}

#[test]
fn test_tag() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("tagged.csv");
    let args = TagArgs {
        input: Some(write(
            &dir,
            "untagged.csv",
            "Country Name,Country Code,2016\nSudan,SUD,10000\n",
        )),
        output: Some(output.clone()),
        mappings: vec![
            ("name".to_string(), "#country+name".to_string()),
            ("Country Code".to_string(), "#country+code".to_string()),
        ],
        exact: false,
    };
    run_tag(&args).unwrap();
    assert_eq!(
        read(&output),
        "Country Name,Country Code,2016\n#country+name,#country+code,\nSudan,SUD,10000\n"
    );
}

#[test]
fn test_tag_exact_without_match() {
    let dir = TempDir::new().unwrap();
    let args = TagArgs {
        input: Some(write(&dir, "untagged.csv", "Country Name\nSudan\n")),
        output: Some(dir.path().join("tagged.csv")),
        mappings: vec![("name".to_string(), "#country+name".to_string())],
        exact: true,
    };
    assert!(run_tag(&args).is_err());
}
