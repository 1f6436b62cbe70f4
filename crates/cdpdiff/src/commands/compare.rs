//! Compare command - diff two session logs.

use crate::config::CdpdiffConfig;
use crate::output::{OutputFormat, OutputFormatter};
use crate::report::ComparisonReport;
use clap::Args;
use rhizome_cdpdiff_log::{LogError, Markers, SessionLog, parse_file};
use std::path::{Path, PathBuf};

/// Compare command arguments
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Session log captured from the first client
    #[arg(value_name = "LOG_A")]
    pub log_a: PathBuf,

    /// Session log captured from the second client
    #[arg(value_name = "LOG_B")]
    pub log_b: PathBuf,

    /// Max records listed per section (0 = unlimited)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Run the compare command.
///
/// Both logs must parse before anything is reported. Differences are not
/// failures; only unreadable or undecodable logs exit non-zero.
pub fn run(args: CompareArgs, format: &OutputFormat, config: &CdpdiffConfig) -> i32 {
    let markers = config.markers.markers();
    tracing::info!(
        a = %args.log_a.display(),
        b = %args.log_b.display(),
        request_marker = %markers.request,
        response_marker = %markers.response,
        "comparing session logs"
    );

    let a = match load("A", &args.log_a, &markers) {
        Ok(log) => log,
        Err(code) => return code,
    };
    let b = match load("B", &args.log_b, &markers) {
        Ok(log) => log,
        Err(code) => return code,
    };

    let limit = args.limit.unwrap_or_else(|| config.report.limit());
    let report = ComparisonReport::new(&args.log_a, &a, &args.log_b, &b).with_limit(limit);
    tracing::info!(clean = report.is_clean(), "comparison finished");

    if report.print(format) { 0 } else { 1 }
}

fn load(label: &str, path: &Path, markers: &Markers) -> Result<SessionLog, i32> {
    parse_file(path, markers).map_err(|e| {
        report_error(label, path, &e);
        1
    })
}

fn report_error(label: &str, path: &Path, err: &LogError) {
    eprintln!("Error reading log {} ({}): {}", label, path.display(), err);
    if let Some(payload) = err.payload() {
        tracing::debug!(label, payload, "undecodable payload");
    }
}
