//! Console output for API payloads and per-stop records.
//!
//! Result payloads go to stdout; diagnostics stay on the tracing layers.

use anyhow::Result;
use serde_json::Value;

use crate::workflow::StopArrivalRecord;

/// Pretty-prints a JSON payload to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the one-line console form of a stop record.
pub fn print_record(record: &StopArrivalRecord) {
    println!("{record}");
}

/// Prints a stop record as a single JSON line.
pub fn print_record_json(record: &StopArrivalRecord) {
    match serde_json::to_string(record) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize record"),
    }
}
