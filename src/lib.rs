// Payroll Stats - Core Library
// Exposes scanner, aggregator and formatter for the CLI and tests

pub mod error;
pub mod config;
pub mod model;
pub mod scanner;     // Record Scanner - named-field tokenizer
pub mod splitter;    // Block Splitter - parallel scan
pub mod merge;       // Result Merger
pub mod ties;        // Extremum holders + tie sets
pub mod aggregator;  // Single-pass statistics
pub mod report;      // Report Formatter
pub mod dataset;     // Canonical input writer (fixtures)
pub mod pipeline;

// Re-export commonly used types
pub use error::{PayrollError, ScanError};
pub use config::{ScanConfig, DEFAULT_BLOCKS};
pub use model::{Area, Employee, Record};
pub use scanner::{scan_record, parse_salary, Field, FieldTokenizer, FieldValue};
pub use splitter::{block_ranges, scan_block, scan_blocks, PartialScan};
pub use merge::{merge, Dataset};
pub use ties::{Direction, Extremum, ExtremumHolder, Offer};
pub use aggregator::{AreaStats, PayrollStats, StatsEngine, SurnameBest};
pub use report::{Family, ReportFormatter};
pub use dataset::{decode_reference, render_input};
pub use pipeline::{analyze, load_input, run, scan_dataset};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
