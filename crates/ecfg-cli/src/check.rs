//! # Check CLI: Type check the parameters of an easyconfig document.
//!
//! Loads a YAML (or JSON) document mapping parameter names to values,
//! checks every parameter against the type registry and prints the
//! (optionally converted) values.
//!
//! ## Usage
//!
//! ```bash
//! ecfg check zlib-1.3.yaml
//! ecfg check zlib-1.3.yaml --convert --format json
//! ecfg check zlib-1.3.yaml --param toolchain --param dependencies
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use ecfg_core::{Dict, ErrorClass, Value};
use ecfg_types::{Conformance, TypeRegistry};

/// Arguments for the `ecfg check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Easyconfig document (YAML or JSON mapping of parameter values).
    pub file: PathBuf,

    /// Convert values that do not have the expected type.
    #[arg(long)]
    pub convert: bool,

    /// Only check the named parameter(s).
    #[arg(long = "param", value_name = "NAME")]
    pub params: Vec<String>,

    /// Output format for the checked values.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Output format of `ecfg check`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Result of checking a document.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Parameter name to its checked (and possibly converted) value.
    pub values: Dict,
    /// Parameter name and error message for each failed parameter.
    pub failures: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load an easyconfig document as a dict of parameter values.
pub fn load_document(path: &Path) -> Result<Dict> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read easyconfig document {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("invalid YAML in {}", path.display()))?;
    match value {
        Value::Dict(dict) => Ok(dict),
        Value::Null => Ok(Dict::new()),
        other => bail!(
            "expected a mapping of parameter values in {}, found {}",
            path.display(),
            other.kind()
        ),
    }
}

/// Check the parameters of `doc`, or only those named in `params`.
///
/// Values that fail their type are collected in the report. Registry and
/// internal errors abort the whole check.
pub fn check_document(
    registry: &TypeRegistry,
    doc: &Dict,
    params: &[String],
    convert: bool,
) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    for param in params {
        if !doc.contains_str(param) {
            report
                .failures
                .push((param.clone(), "parameter not defined in document".to_string()));
        }
    }

    for (key, value) in doc.iter() {
        let Some(param) = key.as_str() else {
            report
                .failures
                .push((key.to_string(), "parameter names must be strings".to_string()));
            continue;
        };
        if !params.is_empty() && !params.iter().any(|p| p == param) {
            continue;
        }

        match registry.check_type_of_param_value(param, value, convert) {
            Ok(Conformance::Mismatch) => {
                let expected = registry
                    .parameter_type(param)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                report.failures.push((
                    param.to_string(),
                    format!("value {value} ({}) is not of type {expected}", value.kind()),
                ));
            }
            Ok(res) => {
                if matches!(res, Conformance::Converted(_)) {
                    tracing::info!(param, "converted parameter value");
                }
                if let Some(checked) = res.into_value() {
                    report.values.insert(param, checked);
                }
            }
            Err(e) if e.class() == ErrorClass::UserInput => {
                tracing::debug!(param, "type check failed");
                report.failures.push((param.to_string(), e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(report)
}

/// Render checked values in the requested format.
pub fn render(values: &Dict, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(values).context("cannot render values as JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(values).context("cannot render values as YAML"),
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, registry: &TypeRegistry) -> Result<u8> {
    let doc = load_document(&args.file)?;
    let report = check_document(registry, &doc, &args.params, args.convert)?;

    let rendered = render(&report.values, args.format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end())?;

    for (param, message) in &report.failures {
        eprintln!("FAIL  {param}: {message}");
    }
    if report.is_ok() {
        tracing::info!(path = %args.file.display(), "all parameters passed");
        Ok(0)
    } else {
        eprintln!(
            "{} parameter(s) failed type checking in {}",
            report.failures.len(),
            args.file.display()
        );
        Ok(1)
    }
}
