//! `bank-report` command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use bank_report::{
    COMPANIES_ENV, DEFAULT_COMPANIES_PATH, DEFAULT_FINANCIALS_PATH, DEFAULT_PLACEHOLDER,
    DatasetPaths, FINANCIALS_ENV, ReportError, ReportService, Sanitizer, parse_report_date,
};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::error;

/// Exit status for an absent result or a malformed argument.
const EXIT_MISSING: u8 = 1;
/// Exit status when the source data cannot be loaded.
const EXIT_LOAD_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "bank-report", version, about = "Company financial lookups by tax id")]
struct Cli {
    /// Company registry CSV.
    #[arg(long, env = COMPANIES_ENV, default_value = DEFAULT_COMPANIES_PATH)]
    companies: PathBuf,

    /// Financial line items CSV.
    #[arg(long, env = FINANCIALS_ENV, default_value = DEFAULT_FINANCIALS_PATH)]
    financials: PathBuf,

    /// Text shown in place of missing values.
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Registry attributes of a company.
    Company {
        /// Tax identifier (EDRPOU).
        tax_id: String,
    },
    /// Assets, equity and liabilities on an exact reporting date.
    Balance {
        /// Tax identifier (EDRPOU).
        tax_id: String,
        /// Reporting date, YYYY-MM-DD.
        date: String,
    },
    /// Revenue history.
    Revenue {
        /// Tax identifier (EDRPOU).
        tax_id: String,
    },
    /// Reporting dates with any data, most recent first.
    Dates {
        /// Tax identifier (EDRPOU).
        tax_id: String,
    },
}

/// Result of one invocation, before anything is written.
#[derive(Debug)]
enum Outcome {
    /// Query answer, printed as JSON.
    Found(Value),
    /// Absent result or rejected argument, printed as `{"error": ...}`.
    Missing(String),
    /// Source data could not be loaded.
    LoadFailed(ReportError),
}

impl Outcome {
    const fn exit_status(&self) -> u8 {
        match self {
            Self::Found(_) => 0,
            Self::Missing(_) => EXIT_MISSING,
            Self::LoadFailed(_) => EXIT_LOAD_FAILED,
        }
    }

    /// JSON written to stdout; load failures only go to stderr.
    fn body(&self) -> Option<Value> {
        match self {
            Self::Found(value) => Some(value.clone()),
            Self::Missing(message) => Some(json!({ "error": message })),
            Self::LoadFailed(_) => None,
        }
    }

    fn emit(self) -> ExitCode {
        if let Some(body) = self.body() {
            println!("{body:#}");
        }
        if let Self::LoadFailed(e) = &self {
            error!(error = %e, "Failed to load report data");
            eprintln!("error: {e}");
        }
        ExitCode::from(self.exit_status())
    }
}

fn unknown_company(tax_id: &str) -> Outcome {
    Outcome::Missing(format!("Company with tax ID {} not found", tax_id.trim()))
}

fn run(service: &ReportService, command: Command) -> serde_json::Result<Outcome> {
    let outcome = match command {
        Command::Company { tax_id } => match service.prepared_company(&tax_id) {
            Some(record) => Outcome::Found(serde_json::to_value(record)?),
            None => unknown_company(&tax_id),
        },
        Command::Balance { tax_id, date } => match parse_report_date(&date) {
            Err(e) => Outcome::Missing(e.to_string()),
            Ok(date) => match service.prepared_balance(&tax_id, date) {
                Some(record) => Outcome::Found(serde_json::to_value(record)?),
                None => unknown_company(&tax_id),
            },
        },
        Command::Revenue { tax_id } => match service.prepared_revenue(&tax_id) {
            Some(series) => Outcome::Found(serde_json::to_value(series)?),
            None => Outcome::Missing(format!("No revenue data for tax ID {}", tax_id.trim())),
        },
        Command::Dates { tax_id } => {
            Outcome::Found(serde_json::to_value(service.query().available_report_dates(&tax_id))?)
        }
    };
    Ok(outcome)
}

fn execute(cli: Cli) -> serde_json::Result<Outcome> {
    let paths = DatasetPaths::new(&cli.companies, &cli.financials);
    match ReportService::load(&paths) {
        Ok(service) => {
            let service = service.with_sanitizer(Sanitizer::with_placeholder(cli.placeholder));
            run(&service, cli.command)
        }
        Err(e) => Ok(Outcome::LoadFailed(e)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match execute(Cli::parse()) {
        Ok(outcome) => outcome.emit(),
        Err(e) => {
            error!(error = %e, "Failed to serialize output");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_report::{CompanyTable, FinancialTable};
    use std::fs;

    const FIRMS: &str = "\
tax_id,name,kved,opf_code,katottg,region_code,local_code
00236903,Acme LLC,62.01,240,UA12345,01,007
00000042,   ,,,,,
";

    const FIN_VALUES: &str = "\
tax_id,my_date,code,value,c_doc_sub
00236903,2021-12-31,1300,500000.0,S
00236903,2021-12-31,1495,300000.0,S
00236903,2021-12-31,2000,0.0,F
00236903,2020-12-31,2000,,F
";

    fn service() -> ReportService {
        ReportService::from_tables(
            CompanyTable::from_reader(FIRMS.as_bytes()).unwrap(),
            FinancialTable::from_reader(FIN_VALUES.as_bytes()).unwrap(),
        )
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bank-report").chain(args.iter().copied())).unwrap()
    }

    fn outcome(args: &[&str]) -> Outcome {
        run(&service(), cli(args).command).unwrap()
    }

    fn error_message(outcome: &Outcome) -> String {
        outcome.body().unwrap()["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_company_found() {
        let outcome = outcome(&["company", " 00236903 "]);
        assert_eq!(outcome.exit_status(), 0);
        let body = outcome.body().unwrap();
        assert_eq!(body["name"], "Acme LLC");
        assert_eq!(body["kved"], "62.01");
    }

    #[test]
    fn test_company_blank_fields_use_placeholder() {
        let body = outcome(&["company", "00000042"]).body().unwrap();
        assert_eq!(body["name"], DEFAULT_PLACEHOLDER);
        assert_eq!(body["tax_id"], "00000042");
    }

    #[test]
    fn test_unknown_company_exits_with_error_body() {
        let outcome = outcome(&["company", "99999999"]);
        assert_eq!(outcome.exit_status(), EXIT_MISSING);
        assert_eq!(error_message(&outcome), "Company with tax ID 99999999 not found");
    }

    #[test]
    fn test_balance_found() {
        let outcome = outcome(&["balance", "00236903", "2021-12-31"]);
        assert_eq!(outcome.exit_status(), 0);
        let body = outcome.body().unwrap();
        assert_eq!(body["assets"], 500_000.0);
        assert_eq!(body["liabilities"], 200_000.0);
        assert_eq!(body["date"], "2021-12-31");
    }

    #[test]
    fn test_balance_unknown_company() {
        let outcome = outcome(&["balance", "99999999", "2021-12-31"]);
        assert_eq!(outcome.exit_status(), EXIT_MISSING);
        assert!(error_message(&outcome).contains("99999999"));
    }

    #[test]
    fn test_balance_malformed_date() {
        let outcome = outcome(&["balance", "00236903", "31.12.2021"]);
        assert_eq!(outcome.exit_status(), EXIT_MISSING);
        assert!(error_message(&outcome).contains("31.12.2021"));
    }

    #[test]
    fn test_revenue_found_and_missing() {
        let found = outcome(&["revenue", "00236903"]);
        assert_eq!(found.exit_status(), 0);
        let body = found.body().unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["value"], DEFAULT_PLACEHOLDER);
        assert_eq!(body[1]["value"], 0.0);

        let missing = outcome(&["revenue", "00000042"]);
        assert_eq!(missing.exit_status(), EXIT_MISSING);
        assert_eq!(error_message(&missing), "No revenue data for tax ID 00000042");
    }

    #[test]
    fn test_dates_descending_and_empty_for_unknown() {
        let found = outcome(&["dates", "00236903"]);
        assert_eq!(found.body().unwrap(), json!(["2021-12-31", "2020-12-31"]));

        let unknown = outcome(&["dates", "99999999"]);
        assert_eq!(unknown.exit_status(), 0);
        assert_eq!(unknown.body().unwrap(), json!([]));
    }

    #[test]
    fn test_load_failure_exits_with_status_two() {
        let dir = tempfile::tempdir().unwrap();
        let firms = dir.path().join("firms.csv");
        fs::write(&firms, FIRMS).unwrap();
        let missing = dir.path().join("fin_values.csv");

        let outcome = execute(cli(&[
            "--companies",
            firms.to_str().unwrap(),
            "--financials",
            missing.to_str().unwrap(),
            "dates",
            "00236903",
        ]))
        .unwrap();
        assert_eq!(outcome.exit_status(), EXIT_LOAD_FAILED);
        assert!(outcome.body().is_none());
        assert!(matches!(outcome, Outcome::LoadFailed(ReportError::NotFound { .. })));
    }

    #[test]
    fn test_execute_applies_placeholder_flag() {
        let dir = tempfile::tempdir().unwrap();
        let firms = dir.path().join("firms.csv");
        let fin_values = dir.path().join("fin_values.csv");
        fs::write(&firms, FIRMS).unwrap();
        fs::write(&fin_values, FIN_VALUES).unwrap();

        let outcome = execute(cli(&[
            "--companies",
            firms.to_str().unwrap(),
            "--financials",
            fin_values.to_str().unwrap(),
            "--placeholder",
            "n/a",
            "company",
            "00000042",
        ]))
        .unwrap();
        assert_eq!(outcome.body().unwrap()["name"], "n/a");
    }
}
