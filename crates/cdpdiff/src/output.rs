//! Report output: text (optionally colored), JSON, or JSON through jq.

use crate::merge::Merge;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    Always,
    Never,
}

/// `[pretty]` config section.
///
/// ```toml
/// [pretty]
/// enabled = true       # default: on when stdout is a TTY
/// colors = "auto"      # "auto", "always", or "never"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PrettyConfig {
    pub enabled: Option<bool>,
    pub colors: Option<ColorMode>,
}

impl Merge for PrettyConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: self.enabled.merge(other.enabled),
            colors: self.colors.merge(other.colors),
        }
    }
}

impl PrettyConfig {
    /// Whether text output gets ANSI colors. `forced` is an explicit --pretty.
    ///
    /// NO_COLOR always wins.
    pub fn colors(&self, forced: bool) -> bool {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        let tty = std::io::stdout().is_terminal();
        if !forced && !self.enabled.unwrap_or(tty) {
            return false;
        }
        match self.colors.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => tty,
        }
    }
}

/// Output selection flags.
#[derive(Args, Debug, Default)]
pub struct OutputFlags {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Filter JSON output with jq expression (implies --json)
    #[arg(long, value_name = "EXPR")]
    pub jq: Option<String>,

    /// Colored, human-friendly text output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Plain text output without colors (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub compact: bool,
}

/// Resolved output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Text { colors: bool },
    Json,
    Jq(String),
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text { colors: false }
    }
}

impl OutputFormat {
    /// jq beats --json beats text; --compact disables colors outright.
    pub fn resolve(flags: &OutputFlags, config: &PrettyConfig) -> Self {
        if let Some(filter) = &flags.jq {
            return OutputFormat::Jq(filter.clone());
        }
        if flags.json {
            return OutputFormat::Json;
        }
        OutputFormat::Text {
            colors: !flags.compact && config.colors(flags.pretty),
        }
    }
}

/// Something that prints as text or JSON.
pub trait OutputFormatter: Serialize {
    fn format_text(&self) -> String;

    /// Colored text. Defaults to plain text.
    fn format_pretty(&self) -> String {
        self.format_text()
    }

    /// Print to stdout. Returns false if a jq filter failed (already reported).
    fn print(&self, format: &OutputFormat) -> bool {
        match format {
            OutputFormat::Text { colors: false } => println!("{}", self.format_text()),
            OutputFormat::Text { colors: true } => println!("{}", self.format_pretty()),
            OutputFormat::Json => println!("{}", serde_json::to_string(self).unwrap_or_default()),
            OutputFormat::Jq(filter) => {
                let value = serde_json::to_value(self).unwrap_or_default();
                match apply_jq(value, filter) {
                    Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
                    Err(e) => {
                        eprintln!("jq error: {}", e);
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Run a jq filter over a JSON value, one output string per result.
pub fn apply_jq(value: serde_json::Value, filter: &str) -> Result<Vec<String>, String> {
    use jaq_core::load::{Arena, File as JaqFile, Loader};
    use jaq_core::{Compiler, Ctx, RcIter};
    use jaq_json::Val;

    let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = Arena::default();
    let modules = loader
        .load(&arena, JaqFile { code: filter, path: () })
        .map_err(|errs| format!("parse error: {:?}", errs))?;
    let compiled = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| format!("compile error: {:?}", errs))?;

    let inputs = RcIter::new(core::iter::empty());
    compiled
        .run((Ctx::new([], &inputs), Val::from(value)))
        .map(|result| {
            result
                .map(|v| v.to_string())
                .map_err(|e| format!("runtime error: {:?}", e))
        })
        .collect()
}
