//! CSV Row Loader.
//!
//! Parses the line-level authorship log (`loc.csv`): one record per line
//! of code ever written, with columns
//! `commit,file,type,line,depth,length,author,date,time,timezone,datetime`.
//!
//! The load is all-or-nothing: any malformed record fails the whole load,
//! and the caller treats a failed load as an empty dataset rather than
//! operating on partial data.

use std::io::Read;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::model::Row;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {record}: missing column `{column}`")]
    MissingColumn { record: usize, column: &'static str },
    #[error("record {record}: column `{column}` is not an integer: `{value}`")]
    IntField {
        record: usize,
        column: &'static str,
        value: String,
    },
    #[error("record {record}: bad datetime `{value}`")]
    DatetimeField { record: usize, value: String },
    #[error("no data rows")]
    Empty,
}

/// Parse rows from any reader of CSV text (with a header record).
pub fn load_rows(input: impl Read) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let index_of = |column: &'static str, record: usize| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(LoadError::MissingColumn { record, column })
    };

    let mut rows = Vec::new();
    for (number, record) in reader.records().enumerate() {
        let record = record?;
        // Record numbers are 1-based in error messages, matching how
        // spreadsheet tools count data rows.
        let n = number + 1;

        let field = |column: &'static str| -> Result<&str, LoadError> {
            let idx = index_of(column, n)?;
            record
                .get(idx)
                .ok_or(LoadError::MissingColumn { record: n, column })
        };
        let int_field = |column: &'static str| -> Result<u32, LoadError> {
            let value = field(column)?;
            value.parse().map_err(|_| LoadError::IntField {
                record: n,
                column,
                value: value.to_string(),
            })
        };

        rows.push(Row {
            commit: field("commit")?.into(),
            file: field("file")?.into(),
            kind: field("type")?.into(),
            line: int_field("line")?,
            depth: int_field("depth")?,
            length: int_field("length")?,
            author: field("author")?.into(),
            date: field("date")?.into(),
            time: field("time")?.into(),
            timezone: field("timezone")?.into(),
            datetime: parse_datetime(field("datetime")?, n)?,
        });
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(rows)
}

/// Parse the `datetime` column. RFC 3339 is the canonical form; the
/// compact `%z` offset (`-0800`) and an offset-less local form (assumed
/// UTC) appear in older logs.
fn parse_datetime(value: &str, record: usize) -> Result<DateTime<FixedOffset>, LoadError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(&format!("{value}+0000"), "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(|_| LoadError::DatetimeField {
            record,
            value: value.to_string(),
        })
}
