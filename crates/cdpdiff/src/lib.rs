//! cdpdiff - compare remote-debugging protocol session logs.
//!
//! Thin CLI layer over `rhizome-cdpdiff-log`: configuration, output
//! formatting and the comparison report.

pub mod commands;
pub mod config;
pub mod merge;
pub mod output;
pub mod report;
