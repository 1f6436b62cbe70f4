//! Comparison report for two session logs.

use crate::output::OutputFormatter;
use nu_ansi_term::Color::{self, Cyan, Green, Yellow};
use nu_ansi_term::Style;
use rhizome_cdpdiff_log::{
    Request, Response, SessionLog, link, request_method_diff, response_method_diff,
};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Correlation results for one log.
#[derive(Debug, Serialize)]
pub struct LogSummary<'a> {
    pub label: &'static str,
    /// Color of the label in pretty output.
    #[serde(skip)]
    pub color: Color,
    pub path: String,
    pub requests: usize,
    pub responses: usize,
    pub matched: usize,
    pub unmatched_requests: Vec<&'a Request>,
    pub unmatched_responses: Vec<&'a Response>,
    pub no_id_responses: usize,
}

impl<'a> LogSummary<'a> {
    pub fn new(label: &'static str, color: Color, path: &Path, log: &'a SessionLog) -> Self {
        let correlation = link(log);
        Self {
            label,
            color,
            path: path.display().to_string(),
            requests: log.requests.len(),
            responses: log.responses.len(),
            matched: correlation.matched.len(),
            unmatched_requests: correlation.unmatched_requests,
            unmatched_responses: correlation.unmatched_responses,
            no_id_responses: correlation.no_id_responses.len(),
        }
    }
}

/// Everything printed for one comparison of log A against log B.
#[derive(Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub a: LogSummary<'a>,
    pub b: LogSummary<'a>,
    pub requests_only_in_a: Vec<&'a Request>,
    pub requests_only_in_b: Vec<&'a Request>,
    pub responses_only_in_a: Vec<&'a Response>,
    pub responses_only_in_b: Vec<&'a Response>,
    /// Max records listed per text section (0 = unlimited). JSON is never truncated.
    #[serde(skip)]
    pub limit: usize,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(a_path: &Path, a: &'a SessionLog, b_path: &Path, b: &'a SessionLog) -> Self {
        Self {
            a: LogSummary::new("A", Cyan, a_path, a),
            b: LogSummary::new("B", Green, b_path, b),
            requests_only_in_a: request_method_diff(a, b),
            requests_only_in_b: request_method_diff(b, a),
            responses_only_in_a: response_method_diff(a, b),
            responses_only_in_b: response_method_diff(b, a),
            limit: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// True when neither log has anything unmatched or one-sided.
    pub fn is_clean(&self) -> bool {
        [&self.a, &self.b]
            .iter()
            .all(|s| s.unmatched_requests.is_empty() && s.unmatched_responses.is_empty())
            && self.requests_only_in_a.is_empty()
            && self.requests_only_in_b.is_empty()
            && self.responses_only_in_a.is_empty()
            && self.responses_only_in_b.is_empty()
    }

    fn render(&self, paint: Painter) -> String {
        let mut out = String::new();
        writeln!(
            out,
            "Comparing {} ({}) with {} ({})",
            paint.label(&self.a),
            self.a.path,
            paint.label(&self.b),
            self.b.path
        )
        .unwrap();

        for summary in [&self.a, &self.b] {
            let label = summary.label;
            writeln!(out).unwrap();
            writeln!(
                out,
                "{}: {} requests, {} responses, {} matched",
                paint.label(summary),
                summary.requests,
                summary.responses,
                summary.matched
            )
            .unwrap();
            self.section(
                &mut out,
                paint,
                &format!("{label} requests with no matching response"),
                &summary.unmatched_requests,
            );
            self.section(
                &mut out,
                paint,
                &format!("{label} responses with no matching request"),
                &summary.unmatched_responses,
            );
            writeln!(out).unwrap();
            writeln!(
                out,
                "{label} no-id responses: {}",
                paint.number(summary.no_id_responses)
            )
            .unwrap();
        }

        self.section(
            &mut out,
            paint,
            "Requests in A but not in B",
            &self.requests_only_in_a,
        );
        self.section(
            &mut out,
            paint,
            "Requests in B but not in A",
            &self.requests_only_in_b,
        );
        self.section(
            &mut out,
            paint,
            "Responses in A but not in B",
            &self.responses_only_in_a,
        );
        self.section(
            &mut out,
            paint,
            "Responses in B but not in A",
            &self.responses_only_in_b,
        );

        if out.ends_with('\n') {
            out.pop();
        }
        out
    }

    fn section<R: Listed>(&self, out: &mut String, paint: Painter, title: &str, records: &[&R]) {
        writeln!(out).unwrap();
        writeln!(out, "{} ({}):", paint.title(title), paint.number(records.len())).unwrap();
        if records.is_empty() {
            writeln!(out, "  (none)").unwrap();
            return;
        }
        let shown = if self.limit == 0 {
            records.len()
        } else {
            self.limit.min(records.len())
        };
        for record in &records[..shown] {
            writeln!(out, "  {}: {}", paint.number(record.line()), record.raw()).unwrap();
        }
        if shown < records.len() {
            writeln!(out, "  ... {} more", records.len() - shown).unwrap();
        }
    }
}

impl OutputFormatter for ComparisonReport<'_> {
    fn format_text(&self) -> String {
        self.render(Painter { colors: false })
    }

    fn format_pretty(&self) -> String {
        self.render(Painter { colors: true })
    }
}

/// A record that can be listed in a report section.
trait Listed {
    fn line(&self) -> usize;
    fn raw(&self) -> &str;
}

impl Listed for Request {
    fn line(&self) -> usize {
        self.line
    }
    fn raw(&self) -> &str {
        &self.raw
    }
}

impl Listed for Response {
    fn line(&self) -> usize {
        self.line
    }
    fn raw(&self) -> &str {
        &self.raw
    }
}

#[derive(Clone, Copy)]
struct Painter {
    colors: bool,
}

impl Painter {
    fn title(self, text: &str) -> String {
        if self.colors {
            Style::new().bold().paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(self, summary: &LogSummary<'_>) -> String {
        if self.colors {
            summary.color.bold().paint(summary.label).to_string()
        } else {
            summary.label.to_string()
        }
    }

    fn number(self, n: usize) -> String {
        if self.colors {
            Yellow.paint(n.to_string()).to_string()
        } else {
            n.to_string()
        }
    }
}
