//! Subcommand implementations.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hxl_count::Counter;
use hxl_ingest::Tagger;
use hxl_model::{Hashtag, Row};
use hxl_validate::{
    CollectingSink, ErrorSink, TracingSink, ValidationError, ValidationSummary, load_schema,
};

use crate::cli::{CountArgs, ReportFormatArg, TagArgs, ValidateArgs};
use crate::io::{create_output, open_hxl, read_records, write_records};
use crate::report::{ValidationReport, error_table, summary_line};

/// Result of a validation run.
#[derive(Debug)]
pub struct ValidateOutcome {
    pub summary: ValidationSummary,
    /// Collected violations; empty when reported as log events.
    pub errors: Vec<ValidationError>,
}

impl ValidateOutcome {
    pub fn is_valid(&self) -> bool {
        self.summary.is_valid()
    }
}

/// Validate the input against the schema and write the report.
pub fn run_validate(args: &ValidateArgs) -> Result<ValidateOutcome> {
    let span = info_span!("validate", schema = %args.schema.display());
    let _guard = span.enter();

    let collector = Arc::new(CollectingSink::new());
    let sink: Arc<dyn ErrorSink> = match args.format {
        ReportFormatArg::Log => Arc::new(TracingSink),
        ReportFormatArg::Table | ReportFormatArg::Json => {
            Arc::clone(&collector) as Arc<dyn ErrorSink>
        }
    };
    let schema = load_schema(&args.schema, sink)
        .with_context(|| format!("load schema {}", args.schema.display()))?;
    let rows = open_hxl(args.input.as_deref())?
        .collect::<hxl_ingest::Result<Vec<Row>>>()
        .context("read rows")?;
    info!(
        rules = schema.rules().len(),
        rows = rows.len(),
        "validating dataset"
    );

    let summary = schema.validate_rows(&rows);
    let outcome = ValidateOutcome {
        summary,
        errors: collector.take(),
    };
    info!(
        rows = summary.rows_checked,
        invalid = summary.invalid_rows,
        errors = summary.error_count,
        "validation complete"
    );

    let mut out = create_output(args.output.as_deref())?;
    match args.format {
        ReportFormatArg::Table => {
            if !outcome.errors.is_empty() {
                writeln!(out, "{}", error_table(&outcome.errors))?;
            }
            writeln!(out, "{}", summary_line(&outcome.summary))?;
        }
        ReportFormatArg::Json => {
            let report = ValidationReport::new(
                &args.schema,
                args.input.as_deref(),
                outcome.summary,
                outcome.errors.clone(),
            );
            writeln!(out, "{}", report.to_json().context("serialize report")?)?;
        }
        ReportFormatArg::Log => {
            writeln!(out, "{}", summary_line(&outcome.summary))?;
        }
    }
    out.flush().context("flush report")?;
    Ok(outcome)
}

/// Count value combinations and write them as HXL CSV.
pub fn run_count(args: &CountArgs) -> Result<()> {
    let tags = args
        .tags
        .iter()
        .map(|tag| Hashtag::parse(tag).with_context(|| format!("invalid tag '{tag}'")))
        .collect::<Result<Vec<_>>>()?;
    let aggregate = args
        .aggregate
        .as_deref()
        .map(|tag| Hashtag::parse(tag).with_context(|| format!("invalid aggregate tag '{tag}'")))
        .transpose()?;

    let span = info_span!("count", tags = tags.len());
    let _guard = span.enter();

    let mut counter = Counter::new(tags).with_aggregate(aggregate);
    for row in open_hxl(args.input.as_deref())? {
        counter.add(&row.context("read row")?);
    }
    let report = counter.finish();
    info!(groups = report.len(), "counted dataset");

    report
        .write_csv(create_output(args.output.as_deref())?)
        .context("write counts")?;
    Ok(())
}

/// Add a hashtag row to an untagged table.
pub fn run_tag(args: &TagArgs) -> Result<()> {
    let tagger = Tagger::new(args.mappings.iter().map(|(header, tag)| (header, tag)))
        .context("invalid header mapping")?
        .with_allow_partial(!args.exact);
    let records = read_records(args.input.as_deref())?;
    let tagged = tagger.tag_rows(records).context("tag headers")?;
    info!(rows = tagged.len(), "tagged dataset");
    write_records(create_output(args.output.as_deref())?, &tagged)
}
