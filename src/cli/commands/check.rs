//! Check command implementation

use crate::cli::context::CliContext;
use crate::config::ErrorPolicy;
use crate::core::hash::HashAlgorithm;
use crate::request::{ValidityReport, ValidityRequest};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead};

/// Options for the check command
pub struct CheckArgs {
    pub host: String,
    pub port: u16,
    pub root: String,
    pub records: Vec<String>,
    pub from_stdin: bool,
    pub parallel: bool,
    pub algorithm: Option<HashAlgorithm>,
    pub abort_on_error: bool,
    pub json: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let mut config = CliContext::load_config()?;
    if let Some(algorithm) = args.algorithm {
        config.verification.hash_algorithm = algorithm;
    }
    if args.abort_on_error {
        config.verification.error_policy = ErrorPolicy::Abort;
    }

    let mut records = args.records;
    if args.from_stdin {
        records.extend(read_records(io::stdin().lock())?);
    }
    if records.is_empty() {
        return Err(anyhow::anyhow!(
            "No records to check; pass them as arguments or use --from-stdin"
        ));
    }

    let request = ValidityRequest::builder(args.host, args.port, args.root)
        .add_records(records)
        .with_config(config)
        .build()?;

    let report = if args.parallel {
        request.check_which_transaction_valid_parallel()?
    } else {
        request.check_which_transaction_valid()?
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else if !CliContext::is_quiet() {
        print_report(&request, &report);
    }

    if report.all_valid() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} record(s) invalid, {} record(s) could not be checked",
            report.invalid().len(),
            report.errored().len()
        ))
    }
}

/// Read one record per non-empty line
fn read_records<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let record = line.trim_end_matches(['\r', '\n']);
        if !record.is_empty() {
            records.push(record.to_string());
        }
    }
    Ok(records)
}

fn print_report(request: &ValidityRequest, report: &ValidityReport) {
    println!("{}", "Validity Check".green().bold());
    println!("{}", "═".repeat(40));
    println!("  • Authority: {}", request.address().to_string().cyan());
    println!("  • Root: {}", request.root().as_str().cyan());
    println!(
        "  • Algorithm: {}",
        request.config().verification.hash_algorithm.name().cyan()
    );
    println!();

    for record in report.valid() {
        println!("{} {}", "✓".green(), record);
    }
    for record in report.invalid() {
        println!("{} {}", "✗".red(), record);
    }
    for failed in report.errored() {
        println!("{} {} ({})", "!".yellow(), failed.record, failed.reason.dimmed());
    }

    println!();
    println!(
        "{} valid, {} invalid, {} errored",
        report.valid().len().to_string().green(),
        report.invalid().len().to_string().red(),
        report.errored().len().to_string().yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_records_skips_blank_lines() {
        let input = Cursor::new("tx1\n\ntx2\r\n  tx3\n");
        let records = read_records(input).unwrap();
        assert_eq!(records, vec!["tx1", "tx2", "  tx3"]);
    }
}
