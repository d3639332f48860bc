use std::io::{self, Write};

use tickpair_core::PairAnalysis;

/// Prints the labelled summary lines for a pair.
///
/// Values are printed unrounded; undefined statistics show up as `NaN`.
pub fn write_summary(
    out: &mut impl Write,
    left_label: &str,
    right_label: &str,
    analysis: &PairAnalysis,
) -> io::Result<()> {
    writeln!(out, "{left_label} Mean Daily Return: {}", analysis.left.mean)?;
    writeln!(out, "{right_label} Mean Daily Return: {}", analysis.right.mean)?;
    writeln!(out)?;
    writeln!(
        out,
        "{left_label} Standard Deviation of Daily Returns: {}",
        analysis.left.std_dev
    )?;
    writeln!(
        out,
        "{right_label} Standard Deviation of Daily Returns: {}",
        analysis.right.std_dev
    )?;
    writeln!(
        out,
        "Correlation Coefficient between {left_label} and {right_label}: {}",
        analysis.correlation.coefficient
    )?;
    out.flush()
}
