//! Structural and field-level validation of parsed records

use crate::parser::{TransactionBatch, TransactionRecord};
use crate::{FraudReportError, Result, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const AMOUNT_FIELD: &str = "transaction_amount";
const CURRENCY_FIELD: &str = "transaction_currency";
const LOCATION_FIELD: &str = "transaction_location";
const ID_FIELD: &str = "transaction_id";

/// Shape of a batch as reported in the data structure check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub record_count: usize,
    pub required_field_count: usize,
}

/// A record that passed both validators, with typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub transaction_id: String,
    pub amount: f64,
    pub currency: String,
    pub location: String,
}

/// Summarize the batch shape. Never fails.
pub fn check_structure(batch: &TransactionBatch, rules: &RuleSet) -> StructureInfo {
    StructureInfo {
        record_count: batch.len(),
        required_field_count: rules.required_fields.len(),
    }
}

/// Ensure every required field is present on the record
pub fn check_required_fields(
    record: &TransactionRecord,
    row: usize,
    rules: &RuleSet,
) -> Result<()> {
    let missing: Vec<String> = rules
        .required_fields
        .iter()
        .filter(|field| !record.contains_key(field.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FraudReportError::MissingField {
            row,
            fields: missing,
        })
    }
}

/// Check amount, currency and location in that order, first failure wins.
///
/// Expects [`check_required_fields`] to have passed; an absent field is
/// treated the same as an ill-typed one.
pub fn check_types(
    record: &TransactionRecord,
    row: usize,
    rules: &RuleSet,
) -> Result<ValidatedTransaction> {
    let amount = record
        .get(AMOUNT_FIELD)
        .and_then(coerce_amount)
        .filter(|amount| *amount > 0.0)
        .ok_or(FraudReportError::InvalidAmount { row })?;

    let currency = match record.get(CURRENCY_FIELD) {
        Some(Value::String(code)) if *code == rules.accepted_currency => code.clone(),
        _ => {
            return Err(FraudReportError::UnsupportedCurrency {
                row,
                expected: rules.accepted_currency.clone(),
            })
        }
    };

    let location = match record.get(LOCATION_FIELD) {
        Some(Value::String(location)) => location.clone(),
        _ => return Err(FraudReportError::InvalidLocationType { row }),
    };

    Ok(ValidatedTransaction {
        transaction_id: record.get(ID_FIELD).map(display_value).unwrap_or_default(),
        amount,
        currency,
        location,
    })
}

/// Run both validators on a record
pub fn validate_record(
    record: &TransactionRecord,
    row: usize,
    rules: &RuleSet,
) -> Result<ValidatedTransaction> {
    check_required_fields(record, row, rules)?;
    check_types(record, row, rules)
}

/// Numeric coercion for amounts: JSON numbers, strings holding a float, or
/// booleans as 1 and 0
fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };

    amount.is_finite().then_some(amount)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
