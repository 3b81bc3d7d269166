//! Assess command implementation
//!
//! This module implements the `assess` command: load a CSV dataset, run
//! the classification engine over every column, and render a risk report.

use clap::Args;
use std::path::Path;

use crate::classify::{
    ClassificationEngine, ClassificationMode, PatternRegistry, RiskModel, RiskReport,
    RuleClassifier,
};
use crate::config::load_config_or_default;
use crate::domain::Dataset;

/// Arguments for the assess command
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Path to the CSV file to assess
    pub input: String,

    /// Classification mode override (rule_only, enhanced, hybrid)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Sample size override (values per column)
    #[arg(short, long)]
    pub sample_size: Option<usize>,

    /// Write the JSON report to this path in addition to the console output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the report as JSON instead of the console format
    #[arg(long)]
    pub json: bool,

    /// Exit with code 1 when any column is classified High
    #[arg(long)]
    pub fail_on_high: bool,
}

impl AssessArgs {
    /// Execute the assess command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Assessing dataset");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let mode = match &self.mode {
            Some(raw) => match ClassificationMode::parse(raw) {
                Some(mode) => mode,
                None => {
                    eprintln!("Invalid mode '{raw}'. Must be one of: rule_only, enhanced, hybrid");
                    return Ok(2);
                }
            },
            None => config.classify.parsed_mode(),
        };
        let sample_size = self.sample_size.unwrap_or(config.classify.sample_size);

        let registry = match &config.classify.patterns_file {
            Some(path) => match PatternRegistry::from_file(Path::new(path)) {
                Ok(registry) => registry,
                Err(e) => {
                    eprintln!("Failed to load pattern library {path}: {e}");
                    return Ok(2);
                }
            },
            None => match PatternRegistry::builtin() {
                Ok(registry) => registry,
                Err(e) => {
                    eprintln!("Failed to load built-in pattern library: {e}");
                    return Ok(5);
                }
            },
        };

        let dataset = match Dataset::from_csv_path(&self.input) {
            Ok(dataset) => dataset,
            Err(e) => {
                eprintln!("Failed to read dataset {}: {e}", self.input);
                return Ok(3);
            }
        };

        tracing::info!(
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            %mode,
            sample_size,
            "Dataset loaded"
        );

        let rules = RuleClassifier::with_registry(registry);
        let engine = ClassificationEngine::with_components(rules, RiskModel::new())
            .sample_size(sample_size)
            .mode(mode);

        let verdicts = engine.classify_dataset(&dataset);
        let report = RiskReport::new(&self.input, verdicts);

        if self.json {
            println!("{}", report.format_json()?);
        } else {
            print!("{}", report.format_console());
        }

        if let Some(path) = &self.output {
            report.write_to_file(path)?;
            println!("Report written to {path}");
        }

        if self.fail_on_high && report.summary.high_risk_columns > 0 {
            tracing::warn!(
                high_risk_columns = report.summary.high_risk_columns,
                "High-risk columns found"
            );
            return Ok(1);
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_assess_low_risk_dataset_exits_zero() {
        let file = csv_file("quantity,price\n1,9.99\n2,19.99\n");
        let args = AssessArgs {
            input: file.path().to_string_lossy().into_owned(),
            mode: Some("rule_only".to_string()),
            sample_size: None,
            output: None,
            json: false,
            fail_on_high: true,
        };
        assert_eq!(args.execute(None).unwrap(), 0);
    }

    #[test]
    fn test_assess_fail_on_high() {
        let file = csv_file("ssn,quantity\n123-45-6789,1\n");
        let args = AssessArgs {
            input: file.path().to_string_lossy().into_owned(),
            mode: Some("rule_only".to_string()),
            sample_size: None,
            output: None,
            json: false,
            fail_on_high: true,
        };
        assert_eq!(args.execute(None).unwrap(), 1);
    }

    #[test]
    fn test_assess_missing_file_exits_three() {
        let args = AssessArgs {
            input: "no-such-file.csv".to_string(),
            mode: None,
            sample_size: None,
            output: None,
            json: false,
            fail_on_high: false,
        };
        assert_eq!(args.execute(None).unwrap(), 3);
    }

    #[test]
    fn test_assess_invalid_mode_exits_two() {
        let file = csv_file("a,b\n1,2\n");
        let args = AssessArgs {
            input: file.path().to_string_lossy().into_owned(),
            mode: Some("psychic".to_string()),
            sample_size: None,
            output: None,
            json: false,
            fail_on_high: false,
        };
        assert_eq!(args.execute(None).unwrap(), 2);
    }

    #[test]
    fn test_assess_writes_json_report() {
        let file = csv_file("email\na@b.com\n");
        let out = NamedTempFile::new().unwrap();
        let args = AssessArgs {
            input: file.path().to_string_lossy().into_owned(),
            mode: Some("enhanced".to_string()),
            sample_size: None,
            output: Some(out.path().to_string_lossy().into_owned()),
            json: false,
            fail_on_high: false,
        };
        assert_eq!(args.execute(None).unwrap(), 0);
        let written = std::fs::read_to_string(out.path()).unwrap();
        assert!(written.contains("\"final_risk\""));
    }
}
