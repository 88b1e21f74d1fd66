// Colored terminal output for validation results and the validator registry.

use colored::Colorize;

use super::truncate_chars;
use crate::validators::{DataType, OnFail, Resolved, ValidationResult};

/// Display the result of running one validator over a value.
pub fn display_result(validator: &str, value: &str, result: &ValidationResult) {
    println!("\n{} {}", "Validator:".dimmed(), validator.bold());
    println!("{} {}", "Input:".dimmed(), truncate_chars(value, 120));

    match result {
        ValidationResult::Pass => {
            println!("{} {}", "Result:".dimmed(), "PASS".green().bold());
        }
        ValidationResult::Fail {
            error_message,
            fix_value,
        } => {
            println!("{} {}", "Result:".dimmed(), "FAIL".red().bold());
            println!("  {}", truncate_chars(error_message, 200));
            match fix_value {
                Some(fix) if fix.is_empty() => {
                    println!("  {} (empty string)", "Suggested fix:".dimmed())
                }
                Some(fix) => println!("  {} {}", "Suggested fix:".dimmed(), fix),
                None => println!("  {}", "No fix suggested".dimmed()),
            }
        }
    }
}

/// Display the value left after the on-fail policy ran.
pub fn display_resolved(policy: OnFail, resolved: &Resolved) {
    let label = format!("After on-fail={}:", policy);
    match resolved {
        Resolved::Value(v) if v.is_empty() => println!("{} (empty string)", label.dimmed()),
        Resolved::Value(v) => println!("{} {}", label.dimmed(), truncate_chars(v, 120)),
        Resolved::Filtered => println!("{} {}", label.dimmed(), "filtered".yellow()),
    }
}

/// Display registered validators.
pub fn display_registry(entries: &[(&str, DataType)]) {
    if entries.is_empty() {
        println!("No validators registered.");
        return;
    }

    println!("\n{}", format!("=== Validators ({}) ===", entries.len()).bold());
    println!("  {:<28} {}", "Name".dimmed(), "Data type".dimmed());
    println!("  {}", "-".repeat(40).dimmed());
    for (name, data_type) in entries {
        println!("  {:<28} {}", name, data_type);
    }
    println!();
}
