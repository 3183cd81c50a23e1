//! # Transaction Fraud Reporter
//!
//! Validates a batch of financial transactions supplied as JSON or CSV text,
//! applies static fraud rules and renders a narrative report.
//!
//! ## Pipeline
//!
//! - **Parser**: raw text into ordered field maps ([`parser`])
//! - **Validators**: required fields, then amount, currency and location types ([`validation`])
//! - **Rule Evaluator**: high-amount rule, then unusual-location rule ([`rules`])
//! - **Report Renderer**: Markdown-like summary and per-transaction detail ([`report`])
//!
//! A batch is either analyzed completely or rejected with a single error.
//!
//! ```
//! use transaction_fraud_reporter::FraudDetectionSystem;
//!
//! let data = r#"{"transactions": [
//!     {"transaction_id": "TXB001", "transaction_amount": 3200,
//!      "transaction_currency": "USD", "transaction_location": "New York"}
//! ]}"#;
//!
//! let report = FraudDetectionSystem::new().generate_report(data, "json");
//! assert!(report.contains("- Fraud Status: Not Flagged"));
//! ```

pub mod parser;
pub mod report;
pub mod rules;
pub mod validation;

pub use parser::{InputFormat, TransactionBatch, TransactionRecord};
pub use rules::{AnalysisResult, Calculation, FinalStatus, FraudStatus, RuleEvaluator};
pub use validation::{StructureInfo, ValidatedTransaction};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that reject a batch. The display text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FraudReportError {
    #[error("ERROR: Invalid JSON format. Please check your input data.")]
    Parse,

    #[error("ERROR: Invalid CSV format. Please check your input data.")]
    Format,

    #[error("ERROR: Input JSON must contain a 'transactions' array.")]
    MissingTransactions,

    #[error("ERROR: Transaction at row {row} is not an object")]
    InvalidRecord { row: usize },

    #[error("ERROR: Unsupported input format '{0}'. Use json or csv.")]
    UnsupportedFormat(String),

    #[error("ERROR: Missing required field(s) at row {row}: {}", .fields.join(", "))]
    MissingField { row: usize, fields: Vec<String> },

    #[error("ERROR: Invalid data type for transaction_amount at row {row}")]
    InvalidAmount { row: usize },

    #[error("ERROR: Unsupported currency detected at row {row}. Please use {expected}.")]
    UnsupportedCurrency { row: usize, expected: String },

    #[error("ERROR: Invalid data type for transaction_location at row {row}")]
    InvalidLocationType { row: usize },

    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Rejected(Vec<FraudReportError>),
}

impl FraudReportError {
    /// 1-based row of the offending record, if the error belongs to one
    pub fn row(&self) -> Option<usize> {
        match self {
            FraudReportError::InvalidRecord { row }
            | FraudReportError::MissingField { row, .. }
            | FraudReportError::InvalidAmount { row }
            | FraudReportError::UnsupportedCurrency { row, .. }
            | FraudReportError::InvalidLocationType { row } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T, E = FraudReportError> = std::result::Result<T, E>;

/// How validation failures are reported
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Reject the batch at the first invalid row
    #[default]
    FailFast,
    /// Validate every row, then reject with the error of each failing row
    CollectAll,
}

/// Rule parameters shared read-only by every stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleSet {
    pub threshold_amount: f64,
    pub allowed_locations: Vec<String>,
    pub required_fields: Vec<String>,
    pub accepted_currency: String,
    pub validation_mode: ValidationMode,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            threshold_amount: 10_000.0,
            allowed_locations: ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"]
                .map(String::from)
                .to_vec(),
            required_fields: [
                "transaction_id",
                "transaction_amount",
                "transaction_currency",
                "transaction_location",
            ]
            .map(String::from)
            .to_vec(),
            accepted_currency: "USD".to_string(),
            validation_mode: ValidationMode::FailFast,
        }
    }
}

/// Per-status counts over an analyzed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSummary {
    pub flagged_high_amount: usize,
    pub flagged_unusual_location: usize,
    pub not_flagged: usize,
}

impl FlagSummary {
    pub fn total_flagged(&self) -> usize {
        self.flagged_high_amount + self.flagged_unusual_location
    }
}

/// A fully validated and evaluated batch, ready for rendering
#[derive(Debug, Clone)]
pub struct BatchAnalysis {
    pub structure: StructureInfo,
    pub batch: TransactionBatch,
    pub results: Vec<AnalysisResult>,
}

impl BatchAnalysis {
    pub fn summary(&self) -> FlagSummary {
        self.results
            .iter()
            .fold(FlagSummary::default(), |mut summary, result| {
                match result.status() {
                    FraudStatus::HighAmount => summary.flagged_high_amount += 1,
                    FraudStatus::UnusualLocation => summary.flagged_unusual_location += 1,
                    FraudStatus::NotFlagged => summary.not_flagged += 1,
                }
                summary
            })
    }

    pub fn render(&self) -> String {
        report::render(&self.structure, &self.batch, &self.results)
    }
}

/// Batch fraud detection and reporting
pub struct FraudDetectionSystem {
    rules: RuleSet,
}

impl FraudDetectionSystem {
    /// Create a system with the default rule set
    pub fn new() -> Self {
        Self {
            rules: RuleSet::default(),
        }
    }

    /// Create a system with custom rule parameters
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Produce the report for `data`, or the error text if the batch is rejected.
    ///
    /// `format` is `"json"` or `"csv"`, case-insensitive.
    pub fn generate_report(&self, data: &str, format: &str) -> String {
        let outcome = format
            .parse::<InputFormat>()
            .and_then(|format| self.try_generate_report(data, format));

        match outcome {
            Ok(report) => report,
            Err(e) => e.to_string(),
        }
    }

    /// Produce the report for `data`, keeping the error typed
    pub fn try_generate_report(&self, data: &str, format: InputFormat) -> Result<String> {
        Ok(self.analyze(data, format)?.render())
    }

    /// Parse, validate and evaluate a batch without rendering it
    pub fn analyze(&self, data: &str, format: InputFormat) -> Result<BatchAnalysis> {
        let batch = parser::parse(data, format).inspect_err(|e| warn!("batch rejected: {e}"))?;

        let structure = validation::check_structure(&batch, &self.rules);
        let validated = self
            .validate_batch(&batch)
            .inspect_err(|e| warn!(row = ?e.row(), "batch rejected: {e}"))?;
        debug!(records = validated.len(), "batch validated");

        let evaluator = RuleEvaluator::new(&self.rules);
        let results: Vec<AnalysisResult> = validated.iter().map(|tx| evaluator.evaluate(tx)).collect();

        let analysis = BatchAnalysis {
            structure,
            batch,
            results,
        };

        let summary = analysis.summary();
        info!(
            total = analysis.results.len(),
            high_amount = summary.flagged_high_amount,
            unusual_location = summary.flagged_unusual_location,
            not_flagged = summary.not_flagged,
            "batch analyzed"
        );

        Ok(analysis)
    }

    /// Validate every record of the batch according to the validation mode
    pub fn validate_batch(&self, batch: &TransactionBatch) -> Result<Vec<ValidatedTransaction>> {
        let rows = batch
            .iter()
            .enumerate()
            .map(|(idx, record)| validation::validate_record(record, idx + 1, &self.rules));

        match self.rules.validation_mode {
            ValidationMode::FailFast => rows.collect(),
            ValidationMode::CollectAll => {
                let mut validated = Vec::with_capacity(batch.len());
                let mut errors = Vec::new();
                for row in rows {
                    match row {
                        Ok(tx) => validated.push(tx),
                        Err(e) => errors.push(e),
                    }
                }

                if errors.is_empty() {
                    Ok(validated)
                } else {
                    Err(FraudReportError::Rejected(errors))
                }
            }
        }
    }
}

impl Default for FraudDetectionSystem {
    fn default() -> Self {
        Self::new()
    }
}
