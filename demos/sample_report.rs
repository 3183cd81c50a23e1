//! Fraud report example
//!
//! Prints the report for a fixed sample batch, first as JSON input and then
//! as the equivalent CSV. An optional first argument sets the log level
//! (error, warn, info, debug, trace).

use tracing::level_filters::LevelFilter;
use transaction_fraud_reporter::FraudDetectionSystem;

const SAMPLE_JSON: &str = r#"
{
"transactions": [
    { "transaction_id": "TXB001", "transaction_amount": 3200, "transaction_currency": "USD", "transaction_location": "New York" },
    { "transaction_id": "TXB002", "transaction_amount": 14200, "transaction_currency": "USD", "transaction_location": "Los Angeles" },
    { "transaction_id": "TXB003", "transaction_amount": 7500, "transaction_currency": "USD", "transaction_location": "Chicago" },
    { "transaction_id": "TXB004", "transaction_amount": 15800, "transaction_currency": "USD", "transaction_location": "Houston" },
    { "transaction_id": "TXB005", "transaction_amount": 6800, "transaction_currency": "USD", "transaction_location": "Phoenix" },
    { "transaction_id": "TXB006", "transaction_amount": 8700, "transaction_currency": "USD", "transaction_location": "New York" },
    { "transaction_id": "TXB007", "transaction_amount": 9800, "transaction_currency": "USD", "transaction_location": "Los Angeles" },
    { "transaction_id": "TXB008", "transaction_amount": 11000, "transaction_currency": "USD", "transaction_location": "Chicago" },
    { "transaction_id": "TXB009", "transaction_amount": 4500, "transaction_currency": "USD", "transaction_location": "Houston" },
    { "transaction_id": "TXB010", "transaction_amount": 12500, "transaction_currency": "USD", "transaction_location": "Phoenix" },
    { "transaction_id": "TXB011", "transaction_amount": 5400, "transaction_currency": "USD", "transaction_location": "New York" },
    { "transaction_id": "TXB012", "transaction_amount": 13400, "transaction_currency": "USD", "transaction_location": "Los Angeles" },
    { "transaction_id": "TXB013", "transaction_amount": 9200, "transaction_currency": "USD", "transaction_location": "Chicago" },
    { "transaction_id": "TXB014", "transaction_amount": 15600, "transaction_currency": "USD", "transaction_location": "Houston" },
    { "transaction_id": "TXB015", "transaction_amount": 4800, "transaction_currency": "USD", "transaction_location": "Phoenix" }
]
}
"#;

const SAMPLE_CSV: &str = "transaction_id,transaction_amount,transaction_currency,transaction_location
TXC001,2500,USD,Chicago
TXC002,18000,USD,Miami
TXC003,950.75,USD,Seattle
";

fn main() {
    let level = std::env::args()
        .nth(1)
        .map(|s| parse_log_level(&s))
        .unwrap_or(LevelFilter::WARN);

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let system = FraudDetectionSystem::new();

    println!("=== JSON batch ===\n");
    println!("{}", system.generate_report(SAMPLE_JSON, "json"));

    println!("=== CSV batch ===\n");
    println!("{}", system.generate_report(SAMPLE_CSV, "csv"));
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}
