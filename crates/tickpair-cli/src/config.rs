use std::path::PathBuf;

use tickpair_core::{Symbol, ValidationError};

use crate::cli::Cli;

pub const DEFAULT_START_DATE: &str = "2000-01-01";
pub const DEFAULT_END_DATE: &str = "2023-01-01";

/// Literals offered when a date prompt is answered with an empty line.
///
/// They go through the same validation as typed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDefaults {
    pub start: String,
    pub end: String,
}

impl Default for DateDefaults {
    fn default() -> Self {
        Self {
            start: String::from(DEFAULT_START_DATE),
            end: String::from(DEFAULT_END_DATE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: Symbol,
    pub label: String,
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub defaults: DateDefaults,
    pub left: Instrument,
    pub right: Instrument,
    /// `None` renders to a temporary file removed after viewing.
    pub output: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl AnalysisConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ValidationError> {
        Ok(Self {
            defaults: DateDefaults {
                start: cli.default_start.clone(),
                end: cli.default_end.clone(),
            },
            left: Instrument {
                symbol: Symbol::parse(&cli.symbol_a)?,
                label: cli.label_a.clone(),
            },
            right: Instrument {
                symbol: Symbol::parse(&cli.symbol_b)?,
                label: cli.label_b.clone(),
            },
            output: cli.output.clone(),
            timeout_ms: cli.timeout_ms,
        })
    }
}
