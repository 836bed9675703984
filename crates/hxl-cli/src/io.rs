//! Input and output streams for commands.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hxl_ingest::HxlReader;

/// Open an HXL reader over `path`, or stdin.
pub fn open_hxl(path: Option<&Path>) -> Result<HxlReader> {
    match path {
        Some(path) => {
            HxlReader::from_path(path).with_context(|| format!("read {}", path.display()))
        }
        None => HxlReader::from_reader(io::stdin()).context("read stdin"),
    }
}

/// Read raw CSV records from `path`, or stdin.
pub fn read_records(path: Option<&Path>) -> Result<Vec<Vec<String>>> {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    let reader: Box<dyn io::Read> = match path {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    let mut records = Vec::new();
    for record in builder.from_reader(reader).records() {
        let record = record.context("parse CSV")?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Buffered writer to `path`, or stdout.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Write records as CSV.
pub fn write_records<W: Write>(writer: W, records: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for record in records {
        writer.write_record(record).context("write CSV")?;
    }
    writer.flush().context("flush output")?;
    Ok(())
}
