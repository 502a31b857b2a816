//! Report command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use jurisgraph_quality::QualityAggregator;

/// Execute the report command.
///
/// Reads only the quality log, so it works while the graph is down.
pub fn execute_report(config: &Config, formatter: &Formatter) -> Result<()> {
    let aggregator = QualityAggregator::new(super::open_log(config));
    let report = aggregator.report()?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
