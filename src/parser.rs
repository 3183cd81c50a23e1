//! Input parsing for transaction batches
//!
//! Turns raw JSON or CSV text into an ordered batch of field maps. No field
//! values are interpreted here; that is the job of the validators.

use crate::{FraudReportError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A single transaction as parsed, keyed by field name
pub type TransactionRecord = HashMap<String, Value>;

/// Ordered batch of parsed records. Row numbers are 1-based positions here.
pub type TransactionBatch = Vec<TransactionRecord>;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Json => write!(f, "json"),
            InputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = FraudReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(FraudReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Parse raw input into a transaction batch
pub fn parse(data: &str, format: InputFormat) -> Result<TransactionBatch> {
    let batch = match format {
        InputFormat::Json => parse_json(data)?,
        InputFormat::Csv => parse_csv(data)?,
    };

    debug!(format = %format, records = batch.len(), "parsed transaction batch");
    Ok(batch)
}

fn parse_json(data: &str) -> Result<TransactionBatch> {
    let document: Value = serde_json::from_str(data).map_err(|e| {
        debug!("json decode failed: {e}");
        FraudReportError::Parse
    })?;

    let transactions = document
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or(FraudReportError::MissingTransactions)?;

    transactions
        .iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Value::Object(fields) => Ok(fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()),
            _ => Err(FraudReportError::InvalidRecord { row: idx + 1 }),
        })
        .collect()
}

/// Rows may be shorter or longer than the header. Values past the header are
/// dropped; missing trailing fields are present as `null`.
#[cfg(feature = "csv-input")]
fn parse_csv(data: &str) -> Result<TransactionBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| {
            debug!("csv header read failed: {e}");
            FraudReportError::Format
        })?
        .clone();

    let mut batch = TransactionBatch::new();
    for row in reader.records() {
        let row = row.map_err(|e| {
            debug!("csv row read failed: {e}");
            FraudReportError::Format
        })?;

        if row.len() != headers.len() {
            debug!(
                line = row.position().map(|p| p.line()),
                fields = row.len(),
                expected = headers.len(),
                "csv row length differs from header"
            );
        }

        let record = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = row
                    .get(idx)
                    .map_or(Value::Null, |value| Value::String(value.to_string()));
                (name.to_string(), value)
            })
            .collect();
        batch.push(record);
    }

    Ok(batch)
}

#[cfg(not(feature = "csv-input"))]
fn parse_csv(_data: &str) -> Result<TransactionBatch> {
    Err(FraudReportError::UnsupportedFormat(
        InputFormat::Csv.to_string(),
    ))
}
