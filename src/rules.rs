//! Static fraud rules
//!
//! Two rules are evaluated in priority order against every validated
//! transaction: the high-amount rule, then the unusual-location rule. The
//! first match decides the outcome, so a record carries at most one flag and
//! at most one calculation.

use crate::report::format_amount;
use crate::validation::ValidatedTransaction;
use crate::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Outcome of rule evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FraudStatus {
    HighAmount,
    UnusualLocation,
    NotFlagged,
}

impl FraudStatus {
    pub fn is_flagged(&self) -> bool {
        !matches!(self, FraudStatus::NotFlagged)
    }
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FraudStatus::HighAmount => write!(f, "Flagged for Fraud: High Amount"),
            FraudStatus::UnusualLocation => write!(f, "Flagged for Fraud: Unusual Location"),
            FraudStatus::NotFlagged => write!(f, "Not Flagged"),
        }
    }
}

/// Echo of the validated input, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub transaction_id: String,
    /// e.g. `$14,200.00`
    pub amount: String,
    pub currency: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalculationKind {
    Difference,
}

/// Arithmetic behind a rule decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub kind: CalculationKind,
    /// Symbolic form
    pub formula: String,
    /// Same formula with the numbers substituted
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStatus {
    pub status: FraudStatus,
    pub explanation: String,
}

/// Per-transaction result of rule evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub input: InputSnapshot,
    pub calculations: Vec<Calculation>,
    pub final_status: FinalStatus,
}

impl AnalysisResult {
    pub fn status(&self) -> FraudStatus {
        self.final_status.status
    }
}

/// Applies the fixed rules using the thresholds of a [`RuleSet`]
pub struct RuleEvaluator<'a> {
    rules: &'a RuleSet,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Evaluate a transaction, short-circuiting at the first matching rule
    pub fn evaluate(&self, transaction: &ValidatedTransaction) -> AnalysisResult {
        let mut calculations = Vec::new();

        let final_status = if let Some((calculation, status)) = self.check_high_amount(transaction)
        {
            calculations.push(calculation);
            status
        } else if let Some(status) = self.check_location(transaction) {
            status
        } else {
            FinalStatus {
                status: FraudStatus::NotFlagged,
                explanation: "Transaction amount and location are within acceptable parameters"
                    .to_string(),
            }
        };

        debug!(
            transaction_id = %transaction.transaction_id,
            status = %final_status.status,
            "evaluated transaction"
        );

        AnalysisResult {
            input: InputSnapshot {
                transaction_id: transaction.transaction_id.clone(),
                amount: format!("${}", format_amount(transaction.amount)),
                currency: transaction.currency.clone(),
                location: transaction.location.clone(),
            },
            calculations,
            final_status,
        }
    }

    /// Strictly greater than the threshold; equal amounts pass
    fn check_high_amount(
        &self,
        transaction: &ValidatedTransaction,
    ) -> Option<(Calculation, FinalStatus)> {
        let threshold = self.rules.threshold_amount;
        if transaction.amount <= threshold {
            return None;
        }

        let difference = transaction.amount - threshold;
        let (amount, threshold, difference) = (
            format_amount(transaction.amount),
            format_amount(threshold),
            format_amount(difference),
        );

        let calculation = Calculation {
            kind: CalculationKind::Difference,
            formula: r"Difference = transaction\_amount - threshold\_amount".to_string(),
            expression: format!(
                r"$\text{{Difference}} = {amount} - {threshold} = {difference}$"
            ),
        };

        let status = FinalStatus {
            status: FraudStatus::HighAmount,
            explanation: format!(
                "Transaction amount (${amount}) exceeds threshold (${threshold}) by ${difference}"
            ),
        };

        Some((calculation, status))
    }

    fn check_location(&self, transaction: &ValidatedTransaction) -> Option<FinalStatus> {
        if self.rules.allowed_locations.contains(&transaction.location) {
            return None;
        }

        Some(FinalStatus {
            status: FraudStatus::UnusualLocation,
            explanation: format!(
                "Transaction location '{}' is not in the list of usual locations: {}",
                transaction.location,
                self.rules.allowed_locations.join(", ")
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn transaction(amount: f64, location: &str) -> ValidatedTransaction {
        ValidatedTransaction {
            transaction_id: "TXB001".to_string(),
            amount,
            currency: "USD".to_string(),
            location: location.to_string(),
        }
    }

    #[rstest]
    #[case(3200.0, "New York", FraudStatus::NotFlagged)]
    #[case(14200.0, "Los Angeles", FraudStatus::HighAmount)]
    #[case(9800.0, "Los Angeles", FraudStatus::NotFlagged)]
    #[case(10000.0, "Chicago", FraudStatus::NotFlagged)]
    #[case(10000.01, "Chicago", FraudStatus::HighAmount)]
    #[case(50000.0, "Atlantis", FraudStatus::HighAmount)]
    #[case(500.0, "Atlantis", FraudStatus::UnusualLocation)]
    #[case(500.0, "new york", FraudStatus::UnusualLocation)]
    #[case(500.0, "Houston ", FraudStatus::UnusualLocation)]
    fn test_rule_outcomes(
        #[case] amount: f64,
        #[case] location: &str,
        #[case] expected: FraudStatus,
    ) {
        let rules = RuleSet::default();
        let evaluator = RuleEvaluator::new(&rules);

        let result = evaluator.evaluate(&transaction(amount, location));
        assert_eq!(result.status(), expected);
    }

    #[test]
    fn test_high_amount_calculation() {
        let rules = RuleSet::default();
        let evaluator = RuleEvaluator::new(&rules);

        let result = evaluator.evaluate(&transaction(14200.0, "Los Angeles"));

        assert_eq!(result.calculations.len(), 1);
        let calc = &result.calculations[0];
        assert_eq!(calc.kind, CalculationKind::Difference);
        assert_eq!(
            calc.formula,
            r"Difference = transaction\_amount - threshold\_amount"
        );
        assert_eq!(
            calc.expression,
            r"$\text{Difference} = 14,200.00 - 10,000.00 = 4,200.00$"
        );
        assert_eq!(
            result.final_status.explanation,
            "Transaction amount ($14,200.00) exceeds threshold ($10,000.00) by $4,200.00"
        );
        assert_eq!(result.input.amount, "$14,200.00");
    }

    #[test]
    fn test_unusual_location_explanation() {
        let rules = RuleSet::default();
        let evaluator = RuleEvaluator::new(&rules);

        let result = evaluator.evaluate(&transaction(700.0, "Miami"));

        assert!(result.calculations.is_empty());
        assert_eq!(
            result.final_status.explanation,
            "Transaction location 'Miami' is not in the list of usual locations: \
             New York, Los Angeles, Chicago, Houston, Phoenix"
        );
    }

    #[test]
    fn test_not_flagged_has_no_calculation() {
        let rules = RuleSet::default();
        let evaluator = RuleEvaluator::new(&rules);

        let result = evaluator.evaluate(&transaction(3200.0, "New York"));

        assert!(result.calculations.is_empty());
        assert!(!result.status().is_flagged());
        assert_eq!(result.final_status.status.to_string(), "Not Flagged");
        assert_eq!(
            result.final_status.explanation,
            "Transaction amount and location are within acceptable parameters"
        );
    }

    #[test]
    fn test_custom_threshold_and_locations() {
        let rules = RuleSet {
            threshold_amount: 500.0,
            allowed_locations: vec!["Boston".to_string()],
            ..Default::default()
        };
        let evaluator = RuleEvaluator::new(&rules);

        assert_eq!(
            evaluator.evaluate(&transaction(501.0, "Boston")).status(),
            FraudStatus::HighAmount
        );
        assert_eq!(
            evaluator.evaluate(&transaction(400.0, "New York")).status(),
            FraudStatus::UnusualLocation
        );
        assert_eq!(
            evaluator.evaluate(&transaction(400.0, "Boston")).status(),
            FraudStatus::NotFlagged
        );
    }
}
