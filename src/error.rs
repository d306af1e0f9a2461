// ⚠️ Error Types - Pipeline + scanner failures
//
// Only PayrollError ever crosses the library boundary. ScanError is logged
// and defaulted inside the scanner.

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the pipeline and the report writer
#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Failed to read input file: {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    WriteReport(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Recoverable field conversion failures (logged, never propagated)
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("error converting {raw:?} to float: {source}")]
    InvalidSalary {
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

pub type Result<T> = std::result::Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_salary_message() {
        let source = "12,5".parse::<f64>().unwrap_err();
        let err = ScanError::InvalidSalary {
            raw: "12,5".to_string(),
            source,
        };

        assert!(err.to_string().starts_with("error converting \"12,5\" to float"));
    }

    #[test]
    fn test_read_input_message_includes_path() {
        let err = PayrollError::ReadInput {
            path: PathBuf::from("/tmp/funcionarios.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to read input file: /tmp/funcionarios.json"
        );
    }
}
