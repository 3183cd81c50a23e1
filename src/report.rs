//! Narrative report rendering

use crate::parser::TransactionBatch;
use crate::rules::AnalysisResult;
use crate::validation::StructureInfo;

/// Format an amount with two decimals and comma thousands separators
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Render the validation summary and per-transaction analysis.
///
/// Output depends only on its inputs; rendering the same batch twice yields
/// identical text.
pub fn render(
    structure: &StructureInfo,
    batch: &TransactionBatch,
    results: &[AnalysisResult],
) -> String {
    let mut lines: Vec<String> = vec![
        "# Data Validation Report".into(),
        "## 1. Data Structure Check:".into(),
        format!("- Number of transactions: {}", structure.record_count),
        format!(
            "- Number of fields per transaction: {}",
            structure.required_field_count
        ),
        String::new(),
        "## 2. Required Fields Check:".into(),
        "- All required fields present in all transactions".into(),
        String::new(),
        "## 3. Data Type & Value Validation:".into(),
        "- All data types and values are valid".into(),
        String::new(),
        "## Validation Summary:".into(),
        "Data validation is successful! Proceeding with analysis...".into(),
        String::new(),
        "# Fraud Analysis Summary".into(),
        format!("Total Transactions Evaluated: {}", batch.len()),
        String::new(),
        "# Detailed Analysis per Transaction".into(),
    ];

    for result in results {
        render_transaction(&mut lines, result);
    }

    lines.join("\n")
}

fn render_transaction(lines: &mut Vec<String>, result: &AnalysisResult) {
    let input = &result.input;
    lines.extend([
        format!("## Transaction {}", input.transaction_id),
        "### Input Data:".into(),
        format!("- Transaction Amount: {}", input.amount),
        format!("- Transaction Currency: {}", input.currency),
        format!("- Transaction Location: {}", input.location),
        String::new(),
        "### Decision Analysis:".into(),
    ]);

    for calculation in &result.calculations {
        lines.push("- Calculate the difference:".into());
        lines.push(format!("  {}", calculation.expression));
    }

    lines.extend([
        String::new(),
        "### Final Status:".into(),
        format!("- Fraud Status: {}", result.final_status.status),
        format!("- Explanation: {}", result.final_status.explanation),
        String::new(),
    ]);
}
